pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{client::PnameClient, resolver::Resolver, server::AppState};
pub use config::{cli::LocalStorage, page::PageConfig, toml_config::ServerConfig};
pub use crate::core::{
    batch::{BatchEngine, BatchPipeline},
    converter::NameConverter,
    dictionary::Dictionary,
};
pub use domain::model::CasingStyle;
pub use utils::error::{PnameError, Result};
