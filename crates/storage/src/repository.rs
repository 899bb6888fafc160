use std::sync::Arc;

use async_trait::async_trait;
use textbook_core::model::{Curriculum, CurriculumError};
use thiserror::Error;

/// Errors surfaced by content sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Curriculum(#[from] CurriculumError),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Supplies the curriculum once at startup.
///
/// Implementations must return content that already satisfies every structural
/// invariant; building a `Curriculum` enforces that.
#[async_trait]
pub trait CurriculumSource: Send + Sync {
    /// Load the full chapter → lesson → exercise tree.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the content cannot be read, parsed or validated.
    async fn load(&self) -> Result<Curriculum, StorageError>;
}

/// Hands out an already-built curriculum. Useful for tests and embedding.
#[derive(Clone)]
pub struct InMemoryCurriculum {
    curriculum: Arc<Curriculum>,
}

impl InMemoryCurriculum {
    #[must_use]
    pub fn new(curriculum: Curriculum) -> Self {
        Self {
            curriculum: Arc::new(curriculum),
        }
    }
}

#[async_trait]
impl CurriculumSource for InMemoryCurriculum {
    async fn load(&self) -> Result<Curriculum, StorageError> {
        Ok(Curriculum::clone(&self.curriculum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textbook_core::model::{Chapter, ChapterId, Lesson, LessonContent, LessonId};

    #[tokio::test]
    async fn in_memory_source_returns_same_tree() {
        let curriculum = Curriculum::new(vec![Chapter::new(
            ChapterId::new("c1"),
            "Chapter",
            "",
            vec![Lesson::new(
                LessonId::new("l1"),
                "Lesson",
                LessonContent::default(),
                Vec::new(),
            )],
        )])
        .unwrap();

        let source = InMemoryCurriculum::new(curriculum.clone());
        let loaded = source.load().await.unwrap();
        assert_eq!(loaded, curriculum);
    }

    #[test]
    fn json_errors_map_to_serialization() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let storage: StorageError = err.into();
        assert!(matches!(storage, StorageError::Serialization(_)));
    }
}
