use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use textbook_core::answers::{AnswerSheet, ExerciseState};
use textbook_core::assessment;
use textbook_core::model::{
    Chapter, ChapterId, Curriculum, ExerciseId, Lesson, LessonId, TextbookSettings,
};
use tracing::debug;

use super::progress::LessonProgress;

/// What a `submit` call changed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmitOutcome {
    /// The exercise moved to `Submitted` on this call.
    pub recorded: bool,
    /// A lesson newly added to the unlock set by this call.
    pub unlocked: Option<LessonId>,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Owns lesson-mode progress: answers, submissions, the unlock set and the
/// current chapter/lesson.
///
/// Every operation is total. Requests that are not allowed in the current state
/// (a locked lesson, a frozen answer, a submit with nothing selected) leave the
/// state untouched and report `false`.
///
/// The unlock set starts with the first lesson in global order and only grows.
/// After each submission, and after each navigation, the current lesson is
/// re-scored; when it meets the passing threshold the lesson right after it in
/// global order joins the set. Only the current lesson is considered.
pub struct ProgressionController {
    curriculum: Arc<Curriculum>,
    settings: TextbookSettings,
    sheet: AnswerSheet,
    unlocked: HashSet<LessonId>,
    current_chapter: ChapterId,
    current_lesson: LessonId,
}

impl ProgressionController {
    #[must_use]
    pub fn new(curriculum: Arc<Curriculum>, settings: TextbookSettings) -> Self {
        let first_lesson = curriculum.first_lesson().id().clone();
        let first_chapter = curriculum.first_chapter().id().clone();
        let mut unlocked = HashSet::new();
        unlocked.insert(first_lesson.clone());

        Self {
            curriculum,
            settings,
            sheet: AnswerSheet::new(),
            unlocked,
            current_chapter: first_chapter,
            current_lesson: first_lesson,
        }
    }

    #[must_use]
    pub fn curriculum(&self) -> &Arc<Curriculum> {
        &self.curriculum
    }

    #[must_use]
    pub fn settings(&self) -> &TextbookSettings {
        &self.settings
    }

    #[must_use]
    pub fn sheet(&self) -> &AnswerSheet {
        &self.sheet
    }

    #[must_use]
    pub fn exercise_state(&self, exercise: &ExerciseId) -> ExerciseState {
        self.sheet.state(exercise)
    }

    #[must_use]
    pub fn current_lesson(&self) -> &Lesson {
        self.curriculum
            .lesson(&self.current_lesson)
            .unwrap_or_else(|| self.curriculum.first_lesson())
    }

    #[must_use]
    pub fn current_chapter(&self) -> &Chapter {
        self.curriculum
            .chapter(&self.current_chapter)
            .unwrap_or_else(|| self.curriculum.first_chapter())
    }

    #[must_use]
    pub fn is_unlocked(&self, lesson: &LessonId) -> bool {
        self.unlocked.contains(lesson)
    }

    /// Unlocked lessons in global order.
    pub fn unlocked_lessons(&self) -> impl Iterator<Item = &LessonId> + '_ {
        self.curriculum
            .lessons()
            .map(Lesson::id)
            .filter(|id| self.unlocked.contains(*id))
    }

    #[must_use]
    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    //
    // ─── ANSWERS ───────────────────────────────────────────────────────────────
    //

    /// Record `option` as the answer to `exercise`, replacing any earlier choice.
    ///
    /// Ignored for unknown exercises, out-of-range options and submitted exercises.
    pub fn select_option(&mut self, exercise: &ExerciseId, option: usize) -> bool {
        let valid = self
            .curriculum
            .exercise(exercise)
            .is_some_and(|ex| ex.has_option(option));
        if !valid {
            debug!(exercise = %exercise, option, "ignoring selection for unknown exercise or option");
            return false;
        }
        self.sheet.select(exercise, option)
    }

    /// Submit the recorded answer for `exercise`, then re-check the unlock rule.
    ///
    /// Submitting with nothing selected does nothing. Submitting twice is the same
    /// as submitting once.
    pub fn submit(&mut self, exercise: &ExerciseId) -> SubmitOutcome {
        let recorded = self.sheet.submit(exercise);
        if !recorded {
            debug!(exercise = %exercise, "submit ignored");
        }
        let unlocked = self.propagate_unlock();
        SubmitOutcome { recorded, unlocked }
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    /// Move to `lesson` if it is unlocked. Locked or unknown lessons are refused.
    pub fn select_lesson(&mut self, lesson: &LessonId) -> bool {
        if !self.unlocked.contains(lesson) {
            debug!(lesson = %lesson, "refusing to open locked lesson");
            return false;
        }
        let Some(chapter) = self.curriculum.chapter_of(lesson) else {
            return false;
        };
        self.current_chapter = chapter.id().clone();
        self.current_lesson = lesson.clone();
        self.propagate_unlock();
        true
    }

    /// Switch chapter. The current lesson follows only when the chapter's first
    /// lesson is unlocked. Returns true if the current lesson changed.
    pub fn select_chapter(&mut self, chapter: &ChapterId) -> bool {
        let Some(found) = self.curriculum.chapter(chapter) else {
            debug!(chapter = %chapter, "ignoring unknown chapter");
            return false;
        };
        let first = found.first_lesson().map(|lesson| lesson.id().clone());
        self.current_chapter = chapter.clone();

        match first {
            Some(first) if self.unlocked.contains(&first) => {
                self.current_lesson = first;
                self.propagate_unlock();
                true
            }
            _ => false,
        }
    }

    /// True when the current lesson passed and a following lesson exists.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.settings.passes(self.current_score())
            && self
                .curriculum
                .next_lesson(&self.current_lesson)
                .is_some()
    }

    /// Move to the lesson after the current one, if the current one passed.
    pub fn advance_to_next_lesson(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        let Some(next) = self
            .curriculum
            .next_lesson(&self.current_lesson)
            .map(|lesson| lesson.id().clone())
        else {
            return false;
        };
        self.select_lesson(&next)
    }

    //
    // ─── SCORES ────────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn current_score(&self) -> u8 {
        assessment::score_sheet(self.current_lesson(), &self.sheet)
    }

    #[must_use]
    pub fn lesson_score(&self, lesson: &LessonId) -> Option<u8> {
        self.curriculum
            .lesson(lesson)
            .map(|lesson| assessment::score_sheet(lesson, &self.sheet))
    }

    #[must_use]
    pub fn lesson_progress(&self, lesson: &LessonId) -> Option<LessonProgress> {
        let lesson = self.curriculum.lesson(lesson)?;
        Some(self.progress_for(lesson))
    }

    /// Progress of the current lesson.
    #[must_use]
    pub fn progress(&self) -> LessonProgress {
        self.progress_for(self.current_lesson())
    }

    fn progress_for(&self, lesson: &Lesson) -> LessonProgress {
        let mut answered = 0;
        let mut submitted = 0;
        let mut correct = 0;
        for exercise in lesson.exercises() {
            let state = self.sheet.state(exercise.id());
            if state.selected().is_some() {
                answered += 1;
            }
            if state.is_submitted() {
                submitted += 1;
                if assessment::is_correct(exercise, self.sheet.answers()) {
                    correct += 1;
                }
            }
        }

        let score = assessment::score_sheet(lesson, &self.sheet);
        LessonProgress {
            lesson_id: lesson.id().clone(),
            score,
            passed: self.settings.passes(score),
            total: lesson.exercises().len(),
            answered,
            submitted,
            correct,
        }
    }

    fn propagate_unlock(&mut self) -> Option<LessonId> {
        let next = {
            let lesson = self.current_lesson();
            let score = assessment::score_sheet(lesson, &self.sheet);
            if !self.settings.passes(score) {
                return None;
            }
            self.curriculum.next_lesson(lesson.id())?.id().clone()
        };

        if self.unlocked.insert(next.clone()) {
            debug!(lesson = %next, after = %self.current_lesson, "lesson unlocked");
            Some(next)
        } else {
            None
        }
    }
}

impl fmt::Debug for ProgressionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressionController")
            .field("current_chapter", &self.current_chapter)
            .field("current_lesson", &self.current_lesson)
            .field("unlocked_len", &self.unlocked.len())
            .field("answered_len", &self.sheet.answers().len())
            .field("submitted_len", &self.sheet.submissions().len())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
