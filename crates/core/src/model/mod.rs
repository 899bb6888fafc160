mod chapter;
mod curriculum;
mod exercise;
mod ids;
mod lesson;
mod settings;

pub use ids::{ChapterId, ExerciseId, LessonId, ParseIdError};

pub use chapter::Chapter;
pub use curriculum::{Curriculum, CurriculumError};
pub use exercise::Exercise;
pub use lesson::{Lesson, LessonContent};
pub use settings::{SettingsError, TextbookSettings};
