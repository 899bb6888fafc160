mod controller;
mod practice;
mod progress;
mod study;

#[cfg(test)]
mod test_support;

// Public API of the progression subsystem.
pub use controller::{ProgressionController, SubmitOutcome};
pub use practice::{PracticeSession, generate_practice_set};
pub use progress::{LessonProgress, PracticeProgress};
pub use study::{StudyMode, StudySession};
