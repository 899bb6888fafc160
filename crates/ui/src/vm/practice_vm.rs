use services::PracticeSession;

use crate::vm::exercise_vm::{ExerciseVm, map_exercises};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeVm {
    pub summary: String,
    pub exercises: Vec<ExerciseVm>,
    pub progress_label: String,
    pub complete: bool,
}

#[must_use]
pub fn map_practice(practice: &PracticeSession) -> PracticeVm {
    let progress = practice.progress();
    PracticeVm {
        summary: format!("Showing {} random questions", progress.total),
        exercises: map_exercises(practice.exercises(), practice.sheet()),
        progress_label: format!(
            "{}/{} checked, {} correct",
            progress.submitted, progress.total, progress.correct
        ),
        complete: progress.is_complete(),
    }
}
