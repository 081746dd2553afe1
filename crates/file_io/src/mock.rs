use super::{FileDownloader, FileFilter, FilePicker, PickedFile};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Answer {
    Cancel,
    Select(PickedFile),
    Fail(String),
}

/// Picker that gives the same scripted answer every time it is opened.
#[derive(Debug)]
pub struct MockPicker {
    answer: Answer,
    filters: Mutex<Vec<FileFilter>>,
}

impl MockPicker {
    fn with_answer(answer: Answer) -> Arc<Self> {
        Arc::new(Self {
            answer,
            filters: Mutex::new(Vec::new()),
        })
    }

    pub fn cancelled() -> Arc<Self> {
        Self::with_answer(Answer::Cancel)
    }

    pub fn selecting(file: PickedFile) -> Arc<Self> {
        Self::with_answer(Answer::Select(file))
    }

    /// Convenience for `selecting(PickedFile::in_memory(..))`.
    pub fn with_content(name: &str, content: &str) -> Arc<Self> {
        Self::selecting(PickedFile::in_memory(name, content))
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::with_answer(Answer::Fail(message.to_string()))
    }

    /// Filters passed to every `pick_file` call so far.
    pub fn requested_filters(&self) -> Vec<FileFilter> {
        self.filters.lock().map(|f| f.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl FilePicker for MockPicker {
    async fn pick_file(&self, filter: &FileFilter) -> Result<Option<PickedFile>> {
        if let Ok(mut filters) = self.filters.lock() {
            filters.push(*filter);
        }
        match &self.answer {
            Answer::Cancel => Ok(None),
            Answer::Select(file) => Ok(Some(file.clone())),
            Answer::Fail(message) => Err(anyhow!("{message}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub mime: String,
    pub contents: Vec<u8>,
}

impl Download {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.contents).to_string()
    }
}

/// Downloader that keeps every file in memory.
#[derive(Debug, Default)]
pub struct MemoryDownloader {
    downloads: Mutex<Vec<Download>>,
    fail: bool,
}

impl MemoryDownloader {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Rejects every download.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            downloads: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn downloads(&self) -> Vec<Download> {
        self.downloads.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

impl FileDownloader for MemoryDownloader {
    fn download(&self, filename: &str, mime: &str, contents: &[u8]) -> Result<PathBuf> {
        if self.fail {
            return Err(anyhow!("download of {filename} rejected"));
        }
        self.downloads
            .lock()
            .map_err(|_| anyhow!("download log poisoned"))?
            .push(Download {
                filename: filename.to_string(),
                mime: mime.to_string(),
                contents: contents.to_vec(),
            });
        Ok(PathBuf::from(filename))
    }
}
