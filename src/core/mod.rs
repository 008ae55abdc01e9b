pub mod batch;
pub mod casing;
pub mod converter;
pub mod dictionary;
pub mod tokenizer;

pub use crate::domain::model::{ConversionResult, LogicalNameBatch, PhysicalName};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
