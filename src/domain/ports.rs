use crate::core::dictionary::DictionaryOptions;
use crate::domain::model::{CasingStyle, ConversionResult, LogicalNameBatch};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Settings a batch conversion run needs, whatever their source.
pub trait ConfigProvider: Send + Sync {
    fn casing_style(&self) -> CasingStyle;
    fn input_files(&self) -> &[String];
    fn dictionary_path(&self) -> Option<&str>;
    fn dictionary_options(&self) -> DictionaryOptions {
        DictionaryOptions::default()
    }
    fn output_file(&self) -> Option<&str>;
    fn output_format(&self) -> OutputFormat;
    fn include_desc(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Physical names only, one per line.
    #[default]
    Plain,
    Tsv,
    Csv,
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<LogicalNameBatch>;
    async fn transform(&self, batch: LogicalNameBatch) -> Result<ConversionResult>;
    async fn load(&self, result: ConversionResult) -> Result<String>;
}
