//! Port for reading user directory files.

use std::path::Path;

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised while reading an import file.
    pub enum ImportSourceError {
        /// The file does not exist.
        NotFound { path: String } => "import file not found: {path}",
        /// The file could not be read.
        Read { path: String, message: String } => "failed to read {path}: {message}",
    }
}

/// Source of raw `name,follow...` directory text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImportSource: Send + Sync {
    /// Read the whole file at `path` as UTF-8.
    async fn read_to_string(&self, path: &Path) -> Result<String, ImportSourceError>;
}

/// Fixture source that returns the same text for every path.
#[derive(Debug, Default, Clone)]
pub struct FixtureImportSource {
    contents: String,
}

impl FixtureImportSource {
    /// Serve `contents` for every read.
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }
}

#[async_trait]
impl ImportSource for FixtureImportSource {
    async fn read_to_string(&self, _path: &Path) -> Result<String, ImportSourceError> {
        Ok(self.contents.clone())
    }
}
