#[cfg(feature = "cli")]
pub mod batch;
pub mod cli;
pub mod page;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use batch::CliConfig;
