use std::fmt;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use textbook_core::model::{ChapterId, Curriculum, ExerciseId, LessonId, TextbookSettings};
use tracing::debug;

use super::controller::{ProgressionController, SubmitOutcome};
use super::practice::{PracticeSession, generate_practice_set};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyMode {
    Lesson,
    Practice,
}

/// One learner's session: lesson-mode progression plus the optional practice set.
///
/// Practice mode is `Inactive -> Active` on `start_practice`, stays `Active`
/// across re-draws (each draw resets the practice answers), and returns to
/// `Inactive` on `leave_practice` or when the learner navigates into a lesson.
/// Drawing a practice set never reads or writes the unlock set or lesson answers.
pub struct StudySession {
    progression: ProgressionController,
    practice: Option<PracticeSession>,
    rng: StdRng,
}

impl StudySession {
    /// Session with an OS-seeded random source.
    #[must_use]
    pub fn new(curriculum: Arc<Curriculum>, settings: TextbookSettings) -> Self {
        Self::with_rng(curriculum, settings, StdRng::from_os_rng())
    }

    /// Session with a deterministic random source.
    #[must_use]
    pub fn with_seed(curriculum: Arc<Curriculum>, settings: TextbookSettings, seed: u64) -> Self {
        Self::with_rng(curriculum, settings, StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn with_rng(curriculum: Arc<Curriculum>, settings: TextbookSettings, rng: StdRng) -> Self {
        Self {
            progression: ProgressionController::new(curriculum, settings),
            practice: None,
            rng,
        }
    }

    #[must_use]
    pub fn mode(&self) -> StudyMode {
        if self.practice.is_some() {
            StudyMode::Practice
        } else {
            StudyMode::Lesson
        }
    }

    #[must_use]
    pub fn progression(&self) -> &ProgressionController {
        &self.progression
    }

    #[must_use]
    pub fn practice(&self) -> Option<&PracticeSession> {
        self.practice.as_ref()
    }

    #[must_use]
    pub fn curriculum(&self) -> &Arc<Curriculum> {
        self.progression.curriculum()
    }

    /// Practice needs at least one exercise somewhere in the curriculum.
    #[must_use]
    pub fn practice_available(&self) -> bool {
        self.curriculum().exercise_count() > 0
    }

    //
    // ─── PRACTICE MODE ─────────────────────────────────────────────────────────
    //

    /// Draw a fresh practice set and enter (or stay in) practice mode.
    ///
    /// Any previous practice answers are dropped. Returns false, leaving the mode
    /// unchanged, when the curriculum has no exercises.
    pub fn start_practice(&mut self) -> bool {
        let curriculum = Arc::clone(self.progression.curriculum());
        let size = self.progression.settings().practice_size();
        let set = generate_practice_set(curriculum.exercises(), size, &mut self.rng);

        match PracticeSession::new(set) {
            Some(session) => {
                debug!(size = session.exercises().len(), "practice set drawn");
                self.practice = Some(session);
                true
            }
            None => {
                debug!("no exercises available for practice");
                false
            }
        }
    }

    pub fn leave_practice(&mut self) {
        if self.practice.take().is_some() {
            debug!("left practice mode");
        }
    }

    //
    // ─── ANSWERS (routed by mode) ──────────────────────────────────────────────
    //

    /// Select an option in whichever mode is active.
    pub fn select_option(&mut self, exercise: &ExerciseId, option: usize) -> bool {
        match self.practice.as_mut() {
            Some(practice) => practice.select_option(exercise, option),
            None => self.progression.select_option(exercise, option),
        }
    }

    /// Submit in whichever mode is active. Practice submissions never unlock lessons.
    pub fn submit(&mut self, exercise: &ExerciseId) -> SubmitOutcome {
        match self.practice.as_mut() {
            Some(practice) => SubmitOutcome {
                recorded: practice.submit(exercise),
                unlocked: None,
            },
            None => self.progression.submit(exercise),
        }
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    /// Open an unlocked lesson; doing so leaves practice mode.
    pub fn select_lesson(&mut self, lesson: &LessonId) -> bool {
        let moved = self.progression.select_lesson(lesson);
        if moved {
            self.leave_practice();
        }
        moved
    }

    /// Switch chapter; leaves practice mode only if the current lesson moved.
    pub fn select_chapter(&mut self, chapter: &ChapterId) -> bool {
        let moved = self.progression.select_chapter(chapter);
        if moved {
            self.leave_practice();
        }
        moved
    }

    /// Only meaningful in lesson mode.
    pub fn advance_to_next_lesson(&mut self) -> bool {
        if self.practice.is_some() {
            return false;
        }
        self.progression.advance_to_next_lesson()
    }
}

impl fmt::Debug for StudySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudySession")
            .field("mode", &self.mode())
            .field("progression", &self.progression)
            .finish_non_exhaustive()
    }
}
