mod file_config;

pub use file_config::{FileConfig, ItunesConfig};

use crate::server::RequestsLoggingLevel;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub itunes: ItunesSettings,
}

/// Settings for the iTunes search proxy, with upstream defaults.
#[derive(Debug, Clone)]
pub struct ItunesSettings {
    pub base_url: String,
    pub country: String,
    pub limit: usize,
    pub timeout_secs: u64,
}

impl Default for ItunesSettings {
    fn default() -> Self {
        ItunesSettings {
            base_url: "https://itunes.apple.com".to_string(),
            country: "IT".to_string(),
            limit: 6,
            timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Self {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        // iTunes settings - merge file config with defaults
        let it_file = file.itunes.unwrap_or_default();
        let it_defaults = ItunesSettings::default();
        let itunes = ItunesSettings {
            base_url: it_file.base_url.unwrap_or(it_defaults.base_url),
            country: it_file.country.unwrap_or(it_defaults.country),
            limit: it_file.limit.unwrap_or(it_defaults.limit),
            timeout_secs: it_file.timeout_secs.unwrap_or(it_defaults.timeout_secs),
        };

        AppConfig {
            port,
            logging_level,
            frontend_dir_path,
            itunes,
        }
    }
}

fn parse_logging_level(value: &str) -> Option<RequestsLoggingLevel> {
    match value.to_lowercase().as_str() {
        "none" => Some(RequestsLoggingLevel::None),
        "path" => Some(RequestsLoggingLevel::Path),
        "headers" => Some(RequestsLoggingLevel::Headers),
        "body" => Some(RequestsLoggingLevel::Body),
        _ => None,
    }
}
