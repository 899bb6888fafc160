use std::sync::Arc;

use storage::CurriculumSource;
use textbook_core::model::{Curriculum, TextbookSettings};
use tracing::debug;

use crate::Clock;
use crate::assistant_service::AssistantService;
use crate::error::TextbookError;
use crate::progression::StudySession;
use crate::transcript::Transcript;

/// Assembles the loaded curriculum, settings and assistant for a front end.
#[derive(Clone)]
pub struct TextbookService {
    curriculum: Arc<Curriculum>,
    settings: TextbookSettings,
    clock: Clock,
    assistant: Arc<AssistantService>,
}

impl TextbookService {
    /// Load the curriculum from `source`.
    ///
    /// # Errors
    ///
    /// Returns `TextbookError::Storage` if the content cannot be read or fails
    /// structural validation.
    pub async fn load(
        source: &dyn CurriculumSource,
        settings: TextbookSettings,
        clock: Clock,
        assistant: AssistantService,
    ) -> Result<Self, TextbookError> {
        let curriculum = source.load().await?;
        debug!(
            chapters = curriculum.chapters().len(),
            lessons = curriculum.lesson_count(),
            exercises = curriculum.exercise_count(),
            "curriculum loaded"
        );
        Ok(Self::new(Arc::new(curriculum), settings, clock, assistant))
    }

    #[must_use]
    pub fn new(
        curriculum: Arc<Curriculum>,
        settings: TextbookSettings,
        clock: Clock,
        assistant: AssistantService,
    ) -> Self {
        Self {
            curriculum,
            settings,
            clock,
            assistant: Arc::new(assistant),
        }
    }

    #[must_use]
    pub fn curriculum(&self) -> Arc<Curriculum> {
        Arc::clone(&self.curriculum)
    }

    #[must_use]
    pub fn settings(&self) -> TextbookSettings {
        self.settings
    }

    #[must_use]
    pub fn assistant(&self) -> Arc<AssistantService> {
        Arc::clone(&self.assistant)
    }

    /// Fresh study session. A seed makes practice draws reproducible.
    #[must_use]
    pub fn start_session(&self, seed: Option<u64>) -> StudySession {
        let curriculum = Arc::clone(&self.curriculum);
        match seed {
            Some(seed) => StudySession::with_seed(curriculum, self.settings, seed),
            None => StudySession::new(curriculum, self.settings),
        }
    }

    #[must_use]
    pub fn new_transcript(&self) -> Transcript {
        Transcript::new(self.clock)
    }
}
