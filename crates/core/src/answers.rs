//! Per-exercise answer tracking shared by lesson mode and practice mode.
//!
//! Each mode owns its own `AnswerSheet`; the two are never merged.

use std::collections::{HashMap, HashSet};

use crate::model::ExerciseId;

/// Lifecycle of one exercise within a sheet.
///
/// `Unanswered -> Answered -> Submitted`, with `Submitted` absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseState {
    Unanswered,
    Answered { option: usize },
    Submitted { option: usize },
}

impl ExerciseState {
    #[must_use]
    pub fn selected(self) -> Option<usize> {
        match self {
            ExerciseState::Unanswered => None,
            ExerciseState::Answered { option } | ExerciseState::Submitted { option } => {
                Some(option)
            }
        }
    }

    #[must_use]
    pub fn is_submitted(self) -> bool {
        matches!(self, ExerciseState::Submitted { .. })
    }
}

/// Exercise id → currently selected option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerRecord {
    selected: HashMap<ExerciseId, usize>,
}

impl AnswerRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &ExerciseId) -> Option<usize> {
        self.selected.get(id).copied()
    }

    /// Record `option`, replacing any earlier selection.
    pub fn set(&mut self, id: ExerciseId, option: usize) {
        self.selected.insert(id, option);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Exercise ids that have been graded. Absent means still editable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionRecord {
    submitted: HashSet<ExerciseId>,
}

impl SubmissionRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_submitted(&self, id: &ExerciseId) -> bool {
        self.submitted.contains(id)
    }

    /// Mark an exercise as graded. Returns false if it already was.
    pub fn mark(&mut self, id: ExerciseId) -> bool {
        self.submitted.insert(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.submitted.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.submitted.is_empty()
    }
}

/// Paired answer and submission records for one assessment session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    answers: AnswerRecord,
    submissions: SubmissionRecord,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    #[must_use]
    pub fn submissions(&self) -> &SubmissionRecord {
        &self.submissions
    }

    #[must_use]
    pub fn state(&self, id: &ExerciseId) -> ExerciseState {
        match self.answers.get(id) {
            None => ExerciseState::Unanswered,
            Some(option) if self.submissions.is_submitted(id) => {
                ExerciseState::Submitted { option }
            }
            Some(option) => ExerciseState::Answered { option },
        }
    }

    /// Select an option for an exercise.
    ///
    /// Ignored once the exercise is submitted. Returns true if the selection was
    /// accepted, including re-selecting the option already chosen.
    pub fn select(&mut self, id: &ExerciseId, option: usize) -> bool {
        if self.submissions.is_submitted(id) {
            return false;
        }
        self.answers.set(id.clone(), option);
        true
    }

    /// Freeze the current selection for grading.
    ///
    /// Ignored when nothing is selected yet, and idempotent once submitted.
    /// Returns true if the sheet changed.
    pub fn submit(&mut self, id: &ExerciseId) -> bool {
        if self.answers.get(id).is_none() {
            return false;
        }
        self.submissions.mark(id.clone())
    }
}
