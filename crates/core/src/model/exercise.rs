use crate::model::curriculum::CurriculumError;
use crate::model::ids::ExerciseId;

/// Minimum number of options a multiple-choice exercise must offer.
pub const MIN_OPTIONS: usize = 2;

/// A single multiple-choice question.
///
/// Question, option and explanation strings are opaque: they may carry inline
/// math markup and are handed to the renderer untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    id: ExerciseId,
    question: String,
    options: Vec<String>,
    correct_option_index: usize,
    explanation: String,
}

impl Exercise {
    /// Build an exercise, checking the option list against the correct index.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError::TooFewOptions` when fewer than two options are given.
    /// Returns `CurriculumError::CorrectOptionOutOfRange` when the correct index is not
    /// a valid index into `options`.
    pub fn new(
        id: ExerciseId,
        question: impl Into<String>,
        options: Vec<String>,
        correct_option_index: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, CurriculumError> {
        if options.len() < MIN_OPTIONS {
            return Err(CurriculumError::TooFewOptions {
                exercise: id,
                count: options.len(),
            });
        }
        if correct_option_index >= options.len() {
            return Err(CurriculumError::CorrectOptionOutOfRange {
                exercise: id,
                index: correct_option_index,
                options: options.len(),
            });
        }

        Ok(Self {
            id,
            question: question.into(),
            options,
            correct_option_index,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &ExerciseId {
        &self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Returns true if `index` points at one of this exercise's options.
    #[must_use]
    pub fn has_option(&self, index: usize) -> bool {
        index < self.options.len()
    }

    #[must_use]
    pub fn correct_option_index(&self) -> usize {
        self.correct_option_index
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("option {i}")).collect()
    }

    #[test]
    fn exercise_requires_two_options() {
        let err = Exercise::new(ExerciseId::new("ex"), "Q", options(1), 0, "E").unwrap_err();
        assert!(matches!(err, CurriculumError::TooFewOptions { count: 1, .. }));
    }

    #[test]
    fn exercise_rejects_out_of_range_answer() {
        let err = Exercise::new(ExerciseId::new("ex"), "Q", options(4), 4, "E").unwrap_err();
        assert!(matches!(
            err,
            CurriculumError::CorrectOptionOutOfRange {
                index: 4,
                options: 4,
                ..
            }
        ));
    }

    #[test]
    fn valid_exercise_exposes_fields() {
        let ex = Exercise::new(ExerciseId::new("ex1_1"), "$x^2$?", options(4), 1, "because").unwrap();
        assert_eq!(ex.id(), &ExerciseId::new("ex1_1"));
        assert_eq!(ex.question(), "$x^2$?");
        assert_eq!(ex.option_count(), 4);
        assert_eq!(ex.correct_option_index(), 1);
        assert!(ex.has_option(3));
        assert!(!ex.has_option(4));
        assert_eq!(ex.explanation(), "because");
    }
}
