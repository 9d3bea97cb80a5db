pub mod config;
mod http_layers;
mod search;
#[allow(clippy::module_inception)]
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::*;
use search::make_search_routes;
pub use server::{make_app, run_server};
