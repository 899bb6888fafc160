use crate::model::ids::ChapterId;
use crate::model::lesson::Lesson;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    id: ChapterId,
    title: String,
    description: String,
    lessons: Vec<Lesson>,
}

impl Chapter {
    #[must_use]
    pub fn new(
        id: ChapterId,
        title: impl Into<String>,
        description: impl Into<String>,
        lessons: Vec<Lesson>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            lessons,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ChapterId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn first_lesson(&self) -> Option<&Lesson> {
        self.lessons.first()
    }
}
