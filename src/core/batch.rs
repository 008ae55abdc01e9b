use crate::core::converter::NameConverter;
use crate::core::dictionary::Dictionary;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{ConversionResult, LogicalNameBatch};
use crate::domain::ports::OutputFormat;
use crate::utils::error::{PnameError, Result};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub struct BatchPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    converter: NameConverter,
}

impl<S: Storage, C: ConfigProvider> BatchPipeline<S, C> {
    /// Loads the configured dictionary, if any.
    pub fn new(storage: S, config: C) -> Result<Self> {
        let converter = match config.dictionary_path() {
            Some(path) => {
                let dictionary = Dictionary::load(path, &config.dictionary_options())?;
                NameConverter::with_dictionary(Arc::new(dictionary))
            }
            None => NameConverter::new(),
        };
        Ok(Self::with_converter(storage, config, converter))
    }

    pub fn with_converter(storage: S, config: C, converter: NameConverter) -> Self {
        Self {
            storage,
            config,
            converter,
        }
    }

    async fn read_source(&self, path: &str) -> Result<String> {
        let data = self.storage.read_file(path).await?;
        String::from_utf8(data).map_err(|e| PnameError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{} is not valid UTF-8: {}", path, e),
        )))
    }

    fn render(&self, result: &ConversionResult) -> Result<Vec<u8>> {
        let delimiter = match self.config.output_format() {
            OutputFormat::Plain => {
                let mut text = result.physical_text();
                if !result.is_empty() {
                    text.push('\n');
                }
                return Ok(text.into_bytes());
            }
            OutputFormat::Tsv => b'\t',
            OutputFormat::Csv => b',',
        };

        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_writer(Vec::new());
        for name in &result.names {
            if self.config.include_desc() {
                writer.write_record([
                    name.logical.as_str(),
                    name.physical.as_str(),
                    name.mappings.join(", ").as_str(),
                ])?;
            } else {
                writer.write_record([name.logical.as_str(), name.physical.as_str()])?;
            }
        }
        writer
            .into_inner()
            .map_err(|e| PnameError::IoError(e.into_error()))
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for BatchPipeline<S, C> {
    async fn extract(&self) -> Result<LogicalNameBatch> {
        let mut lines = Vec::new();

        if self.config.input_files().is_empty() {
            tracing::debug!("Reading logical names from stdin");
            let mut content = String::new();
            tokio::io::stdin().read_to_string(&mut content).await?;
            lines.extend(content.lines().map(str::to_string));
        } else {
            for path in self.config.input_files() {
                tracing::debug!("Reading logical names from {}", path);
                let content = self.read_source(path).await?;
                lines.extend(content.lines().map(str::to_string));
            }
        }

        Ok(LogicalNameBatch::from_lines(lines))
    }

    async fn transform(&self, batch: LogicalNameBatch) -> Result<ConversionResult> {
        Ok(self
            .converter
            .convert_batch(&batch, self.config.casing_style()))
    }

    async fn load(&self, result: ConversionResult) -> Result<String> {
        let data = self.render(&result)?;

        match self.config.output_file() {
            Some(path) => {
                tracing::debug!("Writing {} bytes to {}", data.len(), path);
                self.storage.write_file(path, &data).await?;
                Ok(path.to_string())
            }
            None => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(&data).await?;
                stdout.flush().await?;
                Ok("stdout".to_string())
            }
        }
    }
}

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting batch conversion");

        let batch = self.pipeline.extract().await?;
        tracing::info!("Read {} logical names", batch.len());

        let result = self.pipeline.transform(batch).await?;
        tracing::info!("Converted {} names", result.len());

        let destination = self.pipeline.load(result).await?;
        tracing::info!("Output written to {}", destination);

        Ok(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CasingStyle;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn put(&self, path: &str, content: &str) {
            self.files
                .lock()
                .await
                .insert(path.to_string(), content.as_bytes().to_vec());
        }

        async fn get(&self, path: &str) -> Option<String> {
            let files = self.files.lock().await;
            files
                .get(path)
                .map(|data| String::from_utf8_lossy(data).into_owned())
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                PnameError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    path.to_string(),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig {
        style: CasingStyle,
        inputs: Vec<String>,
        format: OutputFormat,
        desc: bool,
    }

    impl ConfigProvider for TestConfig {
        fn casing_style(&self) -> CasingStyle {
            self.style
        }
        fn input_files(&self) -> &[String] {
            &self.inputs
        }
        fn dictionary_path(&self) -> Option<&str> {
            None
        }
        fn output_file(&self) -> Option<&str> {
            Some("out.txt")
        }
        fn output_format(&self) -> OutputFormat {
            self.format
        }
        fn include_desc(&self) -> bool {
            self.desc
        }
    }

    fn config(format: OutputFormat, desc: bool) -> TestConfig {
        TestConfig {
            style: CasingStyle::LowerCamel,
            inputs: vec!["a.txt".to_string(), "b.txt".to_string()],
            format,
            desc,
        }
    }

    async fn run(format: OutputFormat, desc: bool) -> String {
        let storage = MockStorage::default();
        storage.put("a.txt", "first_name\nlast_name\n").await;
        storage.put("b.txt", "\r\nHTTPServer").await;

        let pipeline = BatchPipeline::new(storage.clone(), config(format, desc)).unwrap();
        let destination = BatchEngine::new(pipeline).run().await.unwrap();
        assert_eq!(destination, "out.txt");
        storage.get("out.txt").await.unwrap()
    }

    #[tokio::test]
    async fn test_plain_output_keeps_every_line() {
        let output = run(OutputFormat::Plain, false).await;
        assert_eq!(output, "firstName\nlastName\n\nhttpServer\n");
    }

    #[tokio::test]
    async fn test_tsv_output_with_desc() {
        let output = run(OutputFormat::Tsv, true).await;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "first_name\tfirstName\tfirst=*, name=*");
        assert_eq!(lines[3], "HTTPServer\thttpServer\tHTTP=*, Server=*");
    }

    #[tokio::test]
    async fn test_csv_output() {
        let output = run(OutputFormat::Csv, false).await;
        assert!(output.starts_with("first_name,firstName\nlast_name,lastName\n"));
    }

    #[tokio::test]
    async fn test_missing_input_file_fails() {
        let pipeline =
            BatchPipeline::new(MockStorage::default(), config(OutputFormat::Plain, false))
                .unwrap();
        let err = BatchEngine::new(pipeline).run().await.unwrap_err();
        assert!(matches!(err, PnameError::IoError(_)));
    }
}
