use rand::Rng;
use rand::seq::SliceRandom;

use textbook_core::answers::{AnswerSheet, ExerciseState};
use textbook_core::assessment::{self, Verdict};
use textbook_core::model::{Exercise, ExerciseId};

use super::progress::PracticeProgress;

/// Sample a practice set from the exercise pool.
///
/// Shuffles a copy of the pool uniformly (Fisher–Yates) and keeps the first
/// `min(size, pool.len())` exercises. Every call is an independent draw; an empty
/// pool yields an empty set.
pub fn generate_practice_set<'a, R>(
    pool: impl IntoIterator<Item = &'a Exercise>,
    size: usize,
    rng: &mut R,
) -> Vec<Exercise>
where
    R: Rng + ?Sized,
{
    let mut candidates: Vec<Exercise> = pool.into_iter().cloned().collect();
    candidates.as_mut_slice().shuffle(rng);
    candidates.truncate(size);
    candidates
}

/// A sampled practice set with its own answer sheet.
///
/// The sheet starts empty and is discarded with the session; nothing here
/// touches lesson-mode progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeSession {
    exercises: Vec<Exercise>,
    sheet: AnswerSheet,
}

impl PracticeSession {
    /// Returns `None` for an empty set; practice cannot start without exercises.
    #[must_use]
    pub fn new(exercises: Vec<Exercise>) -> Option<Self> {
        if exercises.is_empty() {
            return None;
        }
        Some(Self {
            exercises,
            sheet: AnswerSheet::new(),
        })
    }

    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
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
    pub fn contains(&self, exercise: &ExerciseId) -> bool {
        self.find(exercise).is_some()
    }

    /// Ignored for exercises outside the set, invalid options and submitted exercises.
    pub fn select_option(&mut self, exercise: &ExerciseId, option: usize) -> bool {
        let valid = self.find(exercise).is_some_and(|ex| ex.has_option(option));
        if !valid {
            return false;
        }
        self.sheet.select(exercise, option)
    }

    pub fn submit(&mut self, exercise: &ExerciseId) -> bool {
        if !self.contains(exercise) {
            return false;
        }
        self.sheet.submit(exercise)
    }

    #[must_use]
    pub fn verdict(&self, exercise: &ExerciseId) -> Option<Verdict> {
        self.find(exercise)
            .and_then(|ex| assessment::verdict(ex, &self.sheet))
    }

    #[must_use]
    pub fn progress(&self) -> PracticeProgress {
        let submitted = self
            .exercises
            .iter()
            .filter(|ex| self.sheet.submissions().is_submitted(ex.id()))
            .count();
        let correct = self
            .exercises
            .iter()
            .filter(|ex| assessment::verdict(ex, &self.sheet) == Some(Verdict::Correct))
            .count();
        PracticeProgress {
            total: self.exercises.len(),
            submitted,
            correct,
        }
    }

    fn find(&self, exercise: &ExerciseId) -> Option<&Exercise> {
        self.exercises.iter().find(|ex| ex.id() == exercise)
    }
}
