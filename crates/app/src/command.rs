use std::fmt;

use textbook_core::model::{ChapterId, ExerciseId, LessonId};

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Chapters,
    Chapter(ChapterId),
    Lesson(LessonId),
    Theory,
    Exercises,
    /// `option` is zero-based; the prompt accepts `1..` or `A..`.
    Select { exercise: ExerciseId, option: usize },
    Submit(ExerciseId),
    Next,
    Practice,
    Again,
    Leave,
    Ask(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    InvalidOption(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "type a command, or `help`"),
            CommandError::Unknown(word) => write!(f, "unknown command: {word} (try `help`)"),
            CommandError::MissingArgument { command, argument } => {
                write!(f, "`{command}` needs {argument}")
            }
            CommandError::InvalidOption(raw) => {
                write!(f, "invalid option `{raw}`: use a number from 1 or a letter from A")
            }
        }
    }
}

impl std::error::Error for CommandError {}

impl Command {
    /// Parse a prompt line.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` for blank lines, unknown commands, missing
    /// arguments and option numbers that cannot be read.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "chapters" | "toc" => Ok(Self::Chapters),
            "chapter" => Ok(Self::Chapter(ChapterId::new(first_arg(
                rest,
                "chapter",
                "a chapter id",
            )?))),
            "lesson" | "open" => Ok(Self::Lesson(LessonId::new(first_arg(
                rest,
                "lesson",
                "a lesson id",
            )?))),
            "theory" => Ok(Self::Theory),
            "exercises" | "ex" => Ok(Self::Exercises),
            "select" | "pick" => {
                let mut args = rest.split_whitespace();
                let exercise = args.next().ok_or(CommandError::MissingArgument {
                    command: "select",
                    argument: "an exercise id",
                })?;
                let raw = args.next().ok_or(CommandError::MissingArgument {
                    command: "select",
                    argument: "an option",
                })?;
                Ok(Self::Select {
                    exercise: ExerciseId::new(exercise),
                    option: parse_option(raw)?,
                })
            }
            "submit" | "check" => Ok(Self::Submit(ExerciseId::new(first_arg(
                rest,
                "submit",
                "an exercise id",
            )?))),
            "next" => Ok(Self::Next),
            "practice" => Ok(Self::Practice),
            "again" => Ok(Self::Again),
            "leave" | "back" => Ok(Self::Leave),
            "ask" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "ask",
                        argument: "a question",
                    });
                }
                Ok(Self::Ask(rest.to_string()))
            }
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

fn first_arg<'a>(
    rest: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    rest.split_whitespace()
        .next()
        .ok_or(CommandError::MissingArgument { command, argument })
}

/// `1`-based numbers or letters, returned zero-based.
fn parse_option(raw: &str) -> Result<usize, CommandError> {
    let invalid = || CommandError::InvalidOption(raw.to_string());

    if let Ok(number) = raw.parse::<usize>() {
        return number.checked_sub(1).ok_or_else(invalid);
    }

    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => {
            Ok(usize::from(letter.to_ascii_uppercase() as u8 - b'A'))
        }
        _ => Err(invalid()),
    }
}

pub const HELP: &str = "\
Commands:
  chapters                    list chapters and lessons
  chapter <id>                switch chapter (opens its first lesson when unlocked)
  lesson <id>                 open an unlocked lesson
  theory                      show the current lesson's theory
  exercises                   show the exercises (lesson or practice)
  select <exercise> <option>  choose an option, e.g. `select ex1_1 2` or `select ex1_1 B`
  submit <exercise>           check the chosen option
  next                        go to the next lesson once this one is passed
  practice | again            draw a random practice set
  leave                       return from practice to the lesson
  ask <question>              ask the tutor
  help                        show this text
  quit                        exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation() {
        assert_eq!(Command::parse("chapters"), Ok(Command::Chapters));
        assert_eq!(
            Command::parse("  chapter   chap2 "),
            Ok(Command::Chapter(ChapterId::new("chap2")))
        );
        assert_eq!(
            Command::parse("LESSON chap1_lesson2"),
            Ok(Command::Lesson(LessonId::new("chap1_lesson2")))
        );
        assert_eq!(Command::parse("next"), Ok(Command::Next));
    }

    #[test]
    fn select_takes_one_based_numbers_and_letters() {
        assert_eq!(
            Command::parse("select ex1_1 2"),
            Ok(Command::Select {
                exercise: ExerciseId::new("ex1_1"),
                option: 1,
            })
        );
        assert_eq!(
            Command::parse("select ex1_1 d"),
            Ok(Command::Select {
                exercise: ExerciseId::new("ex1_1"),
                option: 3,
            })
        );
        assert_eq!(
            Command::parse("select ex1_1 0"),
            Err(CommandError::InvalidOption("0".into()))
        );
        assert_eq!(
            Command::parse("select ex1_1 two"),
            Err(CommandError::InvalidOption("two".into()))
        );
    }

    #[test]
    fn missing_arguments_are_reported() {
        assert_eq!(
            Command::parse("select ex1_1"),
            Err(CommandError::MissingArgument {
                command: "select",
                argument: "an option",
            })
        );
        assert!(matches!(
            Command::parse("submit"),
            Err(CommandError::MissingArgument { command: "submit", .. })
        ));
        assert!(matches!(
            Command::parse("ask   "),
            Err(CommandError::MissingArgument { command: "ask", .. })
        ));
    }

    #[test]
    fn ask_keeps_the_whole_question() {
        assert_eq!(
            Command::parse("ask why is $f'(x) > 0$ increasing?"),
            Ok(Command::Ask("why is $f'(x) > 0$ increasing?".into()))
        );
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(
            Command::parse("dance"),
            Err(CommandError::Unknown("dance".into()))
        );
    }
}
