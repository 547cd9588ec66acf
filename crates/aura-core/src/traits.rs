use crate::{AuraError, AuraResult};
use async_trait::async_trait;
use std::path::PathBuf;

/// Somewhere delimited text can be read from: a picked file, a dropped
/// file, or text already held in memory.
#[async_trait]
pub trait CsvSource: Send + Sync {
    /// Display name of the source, used in logs and error messages.
    fn name(&self) -> &str;

    /// Read the raw bytes of the source.
    async fn read_bytes(&self) -> AuraResult<Vec<u8>>;

    /// Read the source as UTF-8 text.
    async fn read_text(&self) -> AuraResult<String> {
        let bytes = self.read_bytes().await?;
        String::from_utf8(bytes).map_err(|err| {
            AuraError::UnreadableFile(format!("{} is not valid UTF-8: {}", self.name(), err))
        })
    }
}

/// A CSV file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }
}

#[async_trait]
impl CsvSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_bytes(&self) -> AuraResult<Vec<u8>> {
        tokio::fs::read(&self.path).await.map_err(|err| {
            AuraError::UnreadableFile(format!("{}: {}", self.path.display(), err))
        })
    }
}

/// Text that is already in memory, e.g. a dropped payload.
#[derive(Debug, Clone)]
pub struct TextSource {
    name: String,
    text: String,
}

impl TextSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[async_trait]
impl CsvSource for TextSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_bytes(&self) -> AuraResult<Vec<u8>> {
        Ok(self.text.as_bytes().to_vec())
    }
}
