use async_trait::async_trait;
use textbook_core::model::Curriculum;

use crate::json::parse_curriculum;
use crate::repository::{CurriculumSource, StorageError};

const TEXTBOOK_JSON: &str = include_str!("../content/textbook.json");

/// The textbook compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledCurriculum;

impl BundledCurriculum {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Raw JSON of the bundled textbook.
    #[must_use]
    pub fn json() -> &'static str {
        TEXTBOOK_JSON
    }

    /// Parse the bundled textbook without going through the async trait.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the bundled content is malformed.
    pub fn parse() -> Result<Curriculum, StorageError> {
        parse_curriculum(TEXTBOOK_JSON)
    }
}

#[async_trait]
impl CurriculumSource for BundledCurriculum {
    async fn load(&self) -> Result<Curriculum, StorageError> {
        Self::parse()
    }
}
