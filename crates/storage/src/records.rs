//! Serialized shape of curriculum content.
//!
//! Records mirror the domain tree so sources can (de)serialize content without
//! leaking format concerns into `textbook_core`. Conversion into the domain runs
//! every structural check, so a bad file fails at load time.

use serde::{Deserialize, Serialize};
use textbook_core::model::{
    Chapter, ChapterId, Curriculum, CurriculumError, Exercise, ExerciseId, Lesson, LessonContent,
    LessonId,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumRecord {
    pub chapters: Vec<ChapterRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRecord {
    pub id: ChapterId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub lessons: Vec<LessonRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonRecord {
    pub id: LessonId,
    pub title: String,
    #[serde(default)]
    pub content: ContentRecord,
    #[serde(default)]
    pub exercises: Vec<ExerciseRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentRecord {
    #[serde(default)]
    pub theory: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub solution: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub id: ExerciseId,
    pub question: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    #[serde(default)]
    pub explanation: String,
}

impl CurriculumRecord {
    #[must_use]
    pub fn from_curriculum(curriculum: &Curriculum) -> Self {
        Self {
            chapters: curriculum
                .chapters()
                .iter()
                .map(ChapterRecord::from_chapter)
                .collect(),
        }
    }

    /// Convert the record into a validated `Curriculum`.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError` for invalid exercises, duplicate ids, or an empty tree.
    pub fn into_curriculum(self) -> Result<Curriculum, CurriculumError> {
        let chapters = self
            .chapters
            .into_iter()
            .map(ChapterRecord::into_chapter)
            .collect::<Result<Vec<_>, _>>()?;
        Curriculum::new(chapters)
    }
}

impl ChapterRecord {
    #[must_use]
    pub fn from_chapter(chapter: &Chapter) -> Self {
        Self {
            id: chapter.id().clone(),
            title: chapter.title().to_owned(),
            description: chapter.description().to_owned(),
            lessons: chapter.lessons().iter().map(LessonRecord::from_lesson).collect(),
        }
    }

    fn into_chapter(self) -> Result<Chapter, CurriculumError> {
        let lessons = self
            .lessons
            .into_iter()
            .map(LessonRecord::into_lesson)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Chapter::new(self.id, self.title, self.description, lessons))
    }
}

impl LessonRecord {
    #[must_use]
    pub fn from_lesson(lesson: &Lesson) -> Self {
        let content = lesson.content();
        Self {
            id: lesson.id().clone(),
            title: lesson.title().to_owned(),
            content: ContentRecord {
                theory: content.theory.clone(),
                example: content.example.clone(),
                solution: content.solution.clone(),
            },
            exercises: lesson
                .exercises()
                .iter()
                .map(ExerciseRecord::from_exercise)
                .collect(),
        }
    }

    fn into_lesson(self) -> Result<Lesson, CurriculumError> {
        let exercises = self
            .exercises
            .into_iter()
            .map(ExerciseRecord::into_exercise)
            .collect::<Result<Vec<_>, _>>()?;
        let content = LessonContent::new(
            self.content.theory,
            self.content.example,
            self.content.solution,
        );
        Ok(Lesson::new(self.id, self.title, content, exercises))
    }
}

impl ExerciseRecord {
    #[must_use]
    pub fn from_exercise(exercise: &Exercise) -> Self {
        Self {
            id: exercise.id().clone(),
            question: exercise.question().to_owned(),
            options: exercise.options().to_vec(),
            correct_option_index: exercise.correct_option_index(),
            explanation: exercise.explanation().to_owned(),
        }
    }

    /// # Errors
    ///
    /// Returns `CurriculumError` if the options or correct index are invalid.
    pub fn into_exercise(self) -> Result<Exercise, CurriculumError> {
        Exercise::new(
            self.id,
            self.question,
            self.options,
            self.correct_option_index,
            self.explanation,
        )
    }
}
