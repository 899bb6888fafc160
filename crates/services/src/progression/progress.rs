use textbook_core::model::LessonId;

/// Aggregated view of a lesson's assessment, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonProgress {
    pub lesson_id: LessonId,
    pub score: u8,
    pub passed: bool,
    pub total: usize,
    pub answered: usize,
    pub submitted: usize,
    pub correct: usize,
}

/// Aggregated view of the active practice set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PracticeProgress {
    pub total: usize,
    pub submitted: usize,
    pub correct: usize,
}

impl PracticeProgress {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.submitted == self.total
    }
}
