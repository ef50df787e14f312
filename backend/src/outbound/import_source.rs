//! Filesystem import source built on `cap_std`.
//!
//! The file's parent directory is opened as a capability and the file is
//! read relative to it. Reads run on the blocking pool.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};

use crate::domain::ports::{ImportSource, ImportSourceError};

/// [`ImportSource`] reading UTF-8 files from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct CapStdImportSource;

impl CapStdImportSource {
    /// Create the source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn read_file_to_string(path: &Path) -> io::Result<String> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "path has no file name")
    })?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
    directory.read_to_string(Path::new(file_name))
}

fn map_io_error(path: &Path, error: &io::Error) -> ImportSourceError {
    let display = path.display().to_string();
    match error.kind() {
        io::ErrorKind::NotFound => ImportSourceError::not_found(display),
        _ => ImportSourceError::read(display, error.to_string()),
    }
}

#[async_trait]
impl ImportSource for CapStdImportSource {
    async fn read_to_string(&self, path: &Path) -> Result<String, ImportSourceError> {
        let owned: PathBuf = path.to_path_buf();
        let joined = tokio::task::spawn_blocking(move || read_file_to_string(&owned)).await;
        match joined {
            Ok(Ok(contents)) => Ok(contents),
            Ok(Err(error)) => Err(map_io_error(path, &error)),
            Err(error) => Err(ImportSourceError::read(
                path.display().to_string(),
                format!("read task failed: {error}"),
            )),
        }
    }
}
