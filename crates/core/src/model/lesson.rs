use crate::model::exercise::Exercise;
use crate::model::ids::LessonId;

/// Reading material for a lesson. Every field is an opaque display string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LessonContent {
    pub theory: String,
    pub example: String,
    pub solution: String,
}

impl LessonContent {
    #[must_use]
    pub fn new(
        theory: impl Into<String>,
        example: impl Into<String>,
        solution: impl Into<String>,
    ) -> Self {
        Self {
            theory: theory.into(),
            example: example.into(),
            solution: solution.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    id: LessonId,
    title: String,
    content: LessonContent,
    exercises: Vec<Exercise>,
}

impl Lesson {
    #[must_use]
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        content: LessonContent,
        exercises: Vec<Exercise>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content,
            exercises,
        }
    }

    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> &LessonContent {
        &self.content
    }

    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Lessons without exercises are vacuously complete.
    #[must_use]
    pub fn has_exercises(&self) -> bool {
        !self.exercises.is_empty()
    }
}
