use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("passing threshold must be between 1 and 100, got {0}")]
    InvalidPassingThreshold(u8),

    #[error("practice set size must be > 0")]
    InvalidPracticeSize,
}

/// Tunables for progression and practice.
///
/// Defaults: a lesson passes at 80% and practice sets hold 5 exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextbookSettings {
    passing_threshold: u8,
    practice_size: usize,
}

impl TextbookSettings {
    pub const DEFAULT_PASSING_THRESHOLD: u8 = 80;
    pub const DEFAULT_PRACTICE_SIZE: usize = 5;

    /// # Errors
    ///
    /// Returns `SettingsError` if the threshold is outside 1..=100 or the practice size is zero.
    pub fn new(passing_threshold: u8, practice_size: usize) -> Result<Self, SettingsError> {
        if !(1..=100).contains(&passing_threshold) {
            return Err(SettingsError::InvalidPassingThreshold(passing_threshold));
        }
        if practice_size == 0 {
            return Err(SettingsError::InvalidPracticeSize);
        }
        Ok(Self {
            passing_threshold,
            practice_size,
        })
    }

    #[must_use]
    pub fn passing_threshold(&self) -> u8 {
        self.passing_threshold
    }

    #[must_use]
    pub fn practice_size(&self) -> usize {
        self.practice_size
    }

    /// Returns true if `score` meets the passing threshold.
    #[must_use]
    pub fn passes(&self, score: u8) -> bool {
        score >= self.passing_threshold
    }
}

impl Default for TextbookSettings {
    fn default() -> Self {
        Self {
            passing_threshold: Self::DEFAULT_PASSING_THRESHOLD,
            practice_size: Self::DEFAULT_PRACTICE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_textbook_rules() {
        let settings = TextbookSettings::default();
        assert_eq!(settings.passing_threshold(), 80);
        assert_eq!(settings.practice_size(), 5);
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let settings = TextbookSettings::default();
        assert!(settings.passes(80));
        assert!(!settings.passes(79));
    }

    #[test]
    fn rejects_invalid_values() {
        assert_eq!(
            TextbookSettings::new(0, 5).unwrap_err(),
            SettingsError::InvalidPassingThreshold(0)
        );
        assert_eq!(
            TextbookSettings::new(101, 5).unwrap_err(),
            SettingsError::InvalidPassingThreshold(101)
        );
        assert_eq!(
            TextbookSettings::new(80, 0).unwrap_err(),
            SettingsError::InvalidPracticeSize
        );
    }
}
