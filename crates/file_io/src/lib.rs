use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Which files a picker offers, by extension (without the dot).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub extensions: &'static [&'static str],
}

impl FileFilter {
    pub const JSON: FileFilter = FileFilter {
        extensions: &["json"],
    };

    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
    }
}

#[derive(Debug, Clone)]
enum FileSource {
    Path(PathBuf),
    Memory(Option<String>),
}

/// A file the user selected; its content is read on demand.
#[derive(Debug, Clone)]
pub struct PickedFile {
    pub name: String,
    source: FileSource,
}

impl PickedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            source: FileSource::Path(path),
        }
    }

    pub fn in_memory(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            source: FileSource::Memory(Some(content.to_string())),
        }
    }

    /// A selection whose content cannot be read.
    pub fn unreadable(name: &str) -> Self {
        Self {
            name: name.to_string(),
            source: FileSource::Memory(None),
        }
    }

    pub async fn read_text(&self) -> Result<String> {
        match &self.source {
            FileSource::Path(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display())),
            FileSource::Memory(Some(content)) => Ok(content.clone()),
            FileSource::Memory(None) => Err(anyhow!("{} is not readable", self.name)),
        }
    }
}

/// Lets the user choose one file to open.
#[async_trait]
pub trait FilePicker: Send + Sync {
    /// `Ok(None)` when the user cancels or selects nothing.
    async fn pick_file(&self, filter: &FileFilter) -> Result<Option<PickedFile>>;
}

/// Hands a generated file to the user.
pub trait FileDownloader: Send + Sync {
    /// Returns where the file ended up.
    fn download(&self, filename: &str, mime: &str, contents: &[u8]) -> Result<PathBuf>;
}

pub mod fs;
pub mod mock;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_filter_matches_extension_case_insensitively() {
        assert!(FileFilter::JSON.matches(Path::new("invoice.json")));
        assert!(FileFilter::JSON.matches(Path::new("/tmp/INVOICE.JSON")));
        assert!(!FileFilter::JSON.matches(Path::new("invoice.json.txt")));
        assert!(!FileFilter::JSON.matches(Path::new("invoice")));
    }

    #[test]
    fn picked_file_name_comes_from_path() {
        let file = PickedFile::from_path("/tmp/exports/invoice-1.json");
        assert_eq!(file.name, "invoice-1.json");
    }

    #[tokio::test]
    async fn in_memory_files_read_back() {
        let file = PickedFile::in_memory("a.json", "{}");
        assert_eq!(file.read_text().await.unwrap(), "{}");
        assert!(PickedFile::unreadable("b.json").read_text().await.is_err());
    }
}
