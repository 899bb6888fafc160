use std::path::{Path, PathBuf};

use async_trait::async_trait;
use textbook_core::model::Curriculum;

use crate::records::CurriculumRecord;
use crate::repository::{CurriculumSource, StorageError};

/// Parse and validate curriculum JSON.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON and
/// `StorageError::Curriculum` for content that breaks a structural invariant.
pub fn parse_curriculum(text: &str) -> Result<Curriculum, StorageError> {
    let record: CurriculumRecord = serde_json::from_str(text)?;
    Ok(record.into_curriculum()?)
}

/// Serialize a curriculum back to pretty-printed JSON.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn to_json(curriculum: &Curriculum) -> Result<String, StorageError> {
    let record = CurriculumRecord::from_curriculum(curriculum);
    Ok(serde_json::to_string_pretty(&record)?)
}

/// Curriculum stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileCurriculum {
    path: PathBuf,
}

impl JsonFileCurriculum {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CurriculumSource for JsonFileCurriculum {
    async fn load(&self) -> Result<Curriculum, StorageError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => {
                    StorageError::NotFound(self.path.display().to_string())
                }
                _ => StorageError::Io(err.to_string()),
            })?;
        parse_curriculum(&text)
    }
}
