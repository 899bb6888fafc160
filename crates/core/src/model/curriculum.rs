use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::model::chapter::Chapter;
use crate::model::exercise::Exercise;
use crate::model::ids::{ChapterId, ExerciseId, LessonId};
use crate::model::lesson::Lesson;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Structural problems in curriculum content.
///
/// These are raised once, when the content is assembled. A built `Curriculum`
/// upholds every invariant for the rest of the process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CurriculumError {
    #[error("curriculum has no lessons")]
    NoLessons,

    #[error("duplicate chapter id: {0}")]
    DuplicateChapter(ChapterId),

    #[error("duplicate lesson id: {0}")]
    DuplicateLesson(LessonId),

    #[error("duplicate exercise id: {0}")]
    DuplicateExercise(ExerciseId),

    #[error("exercise {exercise} needs at least two options, got {count}")]
    TooFewOptions { exercise: ExerciseId, count: usize },

    #[error("exercise {exercise} marks option {index} correct but only has {options} options")]
    CorrectOptionOutOfRange {
        exercise: ExerciseId,
        index: usize,
        options: usize,
    },
}

//
// ─── CURRICULUM ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LessonSlot {
    chapter: usize,
    lesson: usize,
}

/// Immutable chapter → lesson → exercise tree.
///
/// Lessons have a global order: every chapter's lessons, chapter after chapter,
/// as authored. "Next lesson" always refers to this flattened order, so the last
/// lesson of one chapter is followed by the first lesson of the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Curriculum {
    chapters: Vec<Chapter>,
    order: Vec<LessonSlot>,
    positions: HashMap<LessonId, usize>,
}

impl Curriculum {
    /// Assemble a curriculum and check its structural invariants.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError::NoLessons` if no chapter contains a lesson, and a
    /// `Duplicate*` variant when a chapter, lesson or exercise id is reused.
    pub fn new(chapters: Vec<Chapter>) -> Result<Self, CurriculumError> {
        let mut chapter_ids = HashSet::new();
        let mut exercise_ids = HashSet::new();
        let mut order = Vec::new();
        let mut positions = HashMap::new();

        for (chapter_idx, chapter) in chapters.iter().enumerate() {
            if !chapter_ids.insert(chapter.id().clone()) {
                return Err(CurriculumError::DuplicateChapter(chapter.id().clone()));
            }

            for (lesson_idx, lesson) in chapter.lessons().iter().enumerate() {
                if positions.insert(lesson.id().clone(), order.len()).is_some() {
                    return Err(CurriculumError::DuplicateLesson(lesson.id().clone()));
                }
                order.push(LessonSlot {
                    chapter: chapter_idx,
                    lesson: lesson_idx,
                });

                for exercise in lesson.exercises() {
                    if !exercise_ids.insert(exercise.id().clone()) {
                        return Err(CurriculumError::DuplicateExercise(exercise.id().clone()));
                    }
                }
            }
        }

        if order.is_empty() {
            return Err(CurriculumError::NoLessons);
        }

        Ok(Self {
            chapters,
            order,
            positions,
        })
    }

    #[must_use]
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    #[must_use]
    pub fn chapter(&self, id: &ChapterId) -> Option<&Chapter> {
        self.chapters.iter().find(|chapter| chapter.id() == id)
    }

    /// All lessons in global order.
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> + '_ {
        self.order.iter().map(|slot| self.lesson_at_slot(*slot))
    }

    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn lesson(&self, id: &LessonId) -> Option<&Lesson> {
        self.position(id).and_then(|pos| self.lesson_at(pos))
    }

    /// Position of a lesson in global order.
    #[must_use]
    pub fn position(&self, id: &LessonId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    #[must_use]
    pub fn lesson_at(&self, position: usize) -> Option<&Lesson> {
        self.order
            .get(position)
            .map(|slot| self.lesson_at_slot(*slot))
    }

    /// The lesson every learner starts on.
    #[must_use]
    pub fn first_lesson(&self) -> &Lesson {
        // `new` rejects curricula without lessons, so slot 0 always exists.
        self.lesson_at_slot(self.order[0])
    }

    /// The chapter holding the first lesson.
    #[must_use]
    pub fn first_chapter(&self) -> &Chapter {
        &self.chapters[self.order[0].chapter]
    }

    /// The lesson immediately after `id` in global order, if any.
    #[must_use]
    pub fn next_lesson(&self, id: &LessonId) -> Option<&Lesson> {
        let pos = self.position(id)?;
        self.lesson_at(pos + 1)
    }

    /// The chapter a lesson belongs to.
    #[must_use]
    pub fn chapter_of(&self, id: &LessonId) -> Option<&Chapter> {
        let pos = self.position(id)?;
        self.order
            .get(pos)
            .map(|slot| &self.chapters[slot.chapter])
    }

    /// Every exercise of every lesson, in global lesson order.
    pub fn exercises(&self) -> impl Iterator<Item = &Exercise> + '_ {
        self.lessons().flat_map(Lesson::exercises)
    }

    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.lessons().map(|lesson| lesson.exercises().len()).sum()
    }

    #[must_use]
    pub fn exercise(&self, id: &ExerciseId) -> Option<&Exercise> {
        self.exercises().find(|exercise| exercise.id() == id)
    }

    fn lesson_at_slot(&self, slot: LessonSlot) -> &Lesson {
        &self.chapters[slot.chapter].lessons()[slot.lesson]
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LessonContent;

    fn exercise(id: &str) -> Exercise {
        Exercise::new(
            ExerciseId::new(id),
            "Q",
            vec!["a".into(), "b".into()],
            0,
            "E",
        )
        .unwrap()
    }

    fn lesson(id: &str, exercises: Vec<Exercise>) -> Lesson {
        Lesson::new(LessonId::new(id), id, LessonContent::default(), exercises)
    }

    fn chapter(id: &str, lessons: Vec<Lesson>) -> Chapter {
        Chapter::new(ChapterId::new(id), id, "", lessons)
    }

    fn sample() -> Curriculum {
        Curriculum::new(vec![
            chapter(
                "c1",
                vec![
                    lesson("c1l1", vec![exercise("e1")]),
                    lesson("c1l2", vec![exercise("e2"), exercise("e3")]),
                ],
            ),
            chapter("c2", Vec::new()),
            chapter("c3", vec![lesson("c3l1", Vec::new())]),
        ])
        .unwrap()
    }

    #[test]
    fn global_order_flattens_chapters() {
        let curriculum = sample();
        let ids: Vec<_> = curriculum.lessons().map(|l| l.id().as_str()).collect();
        assert_eq!(ids, vec!["c1l1", "c1l2", "c3l1"]);
        assert_eq!(curriculum.lesson_count(), 3);
        assert_eq!(curriculum.first_lesson().id(), &LessonId::new("c1l1"));
    }

    #[test]
    fn next_lesson_crosses_chapter_boundaries() {
        let curriculum = sample();
        let next = curriculum.next_lesson(&LessonId::new("c1l2")).unwrap();
        assert_eq!(next.id(), &LessonId::new("c3l1"));
        assert!(curriculum.next_lesson(&LessonId::new("c3l1")).is_none());
        assert!(curriculum.next_lesson(&LessonId::new("missing")).is_none());
    }

    #[test]
    fn chapter_of_resolves_owner() {
        let curriculum = sample();
        let owner = curriculum.chapter_of(&LessonId::new("c3l1")).unwrap();
        assert_eq!(owner.id(), &ChapterId::new("c3"));
    }

    #[test]
    fn first_chapter_skips_empty_chapters() {
        let curriculum = Curriculum::new(vec![
            chapter("empty", Vec::new()),
            chapter("c2", vec![lesson("l1", Vec::new())]),
        ])
        .unwrap();
        assert_eq!(curriculum.first_chapter().id(), &ChapterId::new("c2"));
    }

    #[test]
    fn exercises_span_all_lessons() {
        let curriculum = sample();
        let ids: Vec<_> = curriculum.exercises().map(|e| e.id().as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2", "e3"]);
        assert_eq!(curriculum.exercise_count(), 3);
        assert!(curriculum.exercise(&ExerciseId::new("e3")).is_some());
    }

    #[test]
    fn rejects_curriculum_without_lessons() {
        let err = Curriculum::new(vec![chapter("c1", Vec::new())]).unwrap_err();
        assert_eq!(err, CurriculumError::NoLessons);
    }

    #[test]
    fn rejects_duplicate_lesson_across_chapters() {
        let err = Curriculum::new(vec![
            chapter("c1", vec![lesson("l", Vec::new())]),
            chapter("c2", vec![lesson("l", Vec::new())]),
        ])
        .unwrap_err();
        assert_eq!(err, CurriculumError::DuplicateLesson(LessonId::new("l")));
    }

    #[test]
    fn rejects_duplicate_exercise_across_lessons() {
        let err = Curriculum::new(vec![chapter(
            "c1",
            vec![
                lesson("l1", vec![exercise("e")]),
                lesson("l2", vec![exercise("e")]),
            ],
        )])
        .unwrap_err();
        assert_eq!(err, CurriculumError::DuplicateExercise(ExerciseId::new("e")));
    }

    #[test]
    fn rejects_duplicate_chapter() {
        let err = Curriculum::new(vec![
            chapter("c", vec![lesson("l1", Vec::new())]),
            chapter("c", vec![lesson("l2", Vec::new())]),
        ])
        .unwrap_err();
        assert_eq!(err, CurriculumError::DuplicateChapter(ChapterId::new("c")));
    }
}
