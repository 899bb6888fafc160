#![forbid(unsafe_code)]

pub mod assistant_service;
pub mod error;
pub mod progression;
pub mod textbook_service;
pub mod transcript;

pub use textbook_core::Clock;

pub use assistant_service::{AssistantConfig, AssistantService};
pub use error::{AssistantError, TextbookError};
pub use progression::{
    LessonProgress, PracticeProgress, PracticeSession, ProgressionController, StudyMode,
    StudySession, SubmitOutcome, generate_practice_set,
};
pub use textbook_service::TextbookService;
pub use transcript::{ChatMessage, ChatRole, Transcript};
