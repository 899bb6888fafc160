use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique, stable identifier for a Chapter
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterId(String);

/// Identifier for a Lesson, unique across the whole curriculum
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(String);

/// Identifier for an Exercise, unique across the whole curriculum
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(String);

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cannot be blank", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            /// Creates a new id from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(ParseIdError {
                        kind: stringify!($name),
                    });
                }
                Ok(Self::new(trimmed))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(ChapterId);
string_id!(LessonId);
string_id!(ExerciseId);

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lesson_id_display() {
        let id = LessonId::new("chap1_lesson1");
        assert_eq!(id.to_string(), "chap1_lesson1");
    }

    #[test]
    fn lesson_id_debug_names_the_kind() {
        let id = LessonId::new("l1");
        assert_eq!(format!("{id:?}"), "LessonId(\"l1\")");
    }

    #[test]
    fn exercise_id_from_str_trims() {
        let id: ExerciseId = "  ex1_1 ".parse().unwrap();
        assert_eq!(id, ExerciseId::new("ex1_1"));
    }

    #[test]
    fn chapter_id_from_str_rejects_blank() {
        let err = "   ".parse::<ChapterId>().unwrap_err();
        assert_eq!(err.to_string(), "ChapterId cannot be blank");
    }
}
