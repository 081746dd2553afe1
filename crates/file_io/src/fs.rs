//! Filesystem-backed picker and downloader used by the command line.

use super::{FileDownloader, FileFilter, FilePicker, PickedFile};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Picker whose "selection" is a path given up front, e.g. on the command
/// line. Paths the filter would hide count as no selection.
#[derive(Debug, Clone)]
pub struct PathPicker {
    path: Option<PathBuf>,
}

impl PathPicker {
    pub fn new(path: Option<PathBuf>) -> Arc<Self> {
        Arc::new(Self { path })
    }
}

#[async_trait]
impl FilePicker for PathPicker {
    async fn pick_file(&self, filter: &FileFilter) -> Result<Option<PickedFile>> {
        match &self.path {
            Some(path) if filter.matches(path) => Ok(Some(PickedFile::from_path(path))),
            Some(path) => {
                tracing::warn!(path=%path.display(), accepted=?filter.extensions, "file does not match picker filter");
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

/// Writes downloads into a directory, creating it on first use. Only the
/// final component of a requested file name is used.
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Arc<Self> {
        Arc::new(Self { dir: dir.into() })
    }
}

impl FileDownloader for DirectoryDownloader {
    fn download(&self, filename: &str, mime: &str, contents: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| anyhow!("'{filename}' is not a file name"))?;
        let path = self.dir.join(name);
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path=%path.display(), %mime, bytes=contents.len(), "file downloaded");
        Ok(path)
    }
}
