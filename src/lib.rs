pub mod config;
pub mod crawlers;
pub mod error;
pub mod filter;
pub mod parsers;
pub mod results;
pub mod utils;
pub mod validator;

// Re-export commonly used types for convenience
pub use config::{BuildConfig, SiteConfig};
pub use crawlers::filesystem::{BuildOutcome, BuildStream};
pub use error::{Error, Result};
pub use parsers::Extractor;
pub use results::{ImageRecord, LinkRecord, PageRecord, Record};
pub use validator::{Report, Validator};

use std::io::Write;
use std::path::{Path, PathBuf};

/// Main builder for manifest generation from a site directory
pub struct Manifest {
    config: BuildConfig,
}

impl Manifest {
    /// Create a new builder for the given site root and domain
    pub fn new(root_dir: impl Into<PathBuf>, domain: &str) -> Self {
        Self {
            config: BuildConfig::new(root_dir, domain),
        }
    }

    /// Use a complete configuration
    pub fn with_config(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_config(BuildConfig::from_file(path)?))
    }

    /// Set the maximum number of pages extracted at once
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Set whether page records keep their raw markup
    pub fn with_content_html(mut self, include: bool) -> Self {
        self.config.include_content_html = include;
        self
    }

    /// Replace the page file extensions
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.config.extensions = extensions;
        self
    }

    /// Add a regex for site paths to skip
    pub fn with_exclude_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.exclude_patterns.push(pattern.into());
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Start the walk and get the stream of manifest records
    pub async fn generate(self) -> Result<BuildStream> {
        crawlers::filesystem::start(&self.config).await
    }

    /// Generate the manifest and write it as newline-delimited JSON.
    ///
    /// Returns the number of records written. Records are written on the
    /// calling task, so `writer` should be buffered. Every record that was
    /// produced is written even when some pages failed; the failure is
    /// reported afterwards as [`Error::PagesFailed`].
    pub async fn write_to<W: Write>(self, mut writer: W) -> Result<usize> {
        let BuildStream {
            mut records,
            finished,
        } = self.generate().await?;
        let mut written = 0;

        while let Some(record) = records.recv().await {
            serde_json::to_writer(&mut writer, &record)
                .map_err(|e| Error::Output(e.into()))?;
            writer.write_all(b"\n").map_err(Error::Output)?;
            written += 1;
        }

        writer.flush().map_err(Error::Output)?;
        finished.await?.check()?;
        Ok(written)
    }
}
