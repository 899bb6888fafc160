use textbook_core::answers::AnswerSheet;
use textbook_core::assessment::{self, Verdict};
use textbook_core::model::{Exercise, ExerciseId};

use crate::text::render_markdown;

/// How one option is drawn.
///
/// Before submission only the learner's choice is marked. After submission the
/// correct option is always revealed, a wrong choice is flagged and the rest fade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    Idle,
    Selected,
    Correct,
    Incorrect,
    Dimmed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: char,
    pub text: String,
    pub state: OptionState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExerciseVm {
    pub id: ExerciseId,
    pub number: usize,
    pub question: String,
    pub options: Vec<OptionVm>,
    pub can_submit: bool,
    pub submitted: bool,
    /// `None` until submitted.
    pub verdict: Option<Verdict>,
    /// `None` until submitted.
    pub explanation: Option<String>,
}

impl ExerciseVm {
    #[must_use]
    pub fn verdict_label(&self) -> Option<&'static str> {
        self.verdict.map(|verdict| match verdict {
            Verdict::Correct => "Correct",
            Verdict::Incorrect => "Incorrect",
        })
    }
}

/// Map one exercise against the sheet that records its answers. `number` is 1-based.
#[must_use]
pub fn map_exercise(number: usize, exercise: &Exercise, sheet: &AnswerSheet) -> ExerciseVm {
    let state = sheet.state(exercise.id());
    let selected = state.selected();
    let submitted = state.is_submitted();

    let options = exercise
        .options()
        .iter()
        .enumerate()
        .map(|(index, text)| OptionVm {
            label: option_label(index),
            text: render_markdown(text),
            state: option_state(index, selected, submitted, exercise.correct_option_index()),
        })
        .collect();

    ExerciseVm {
        id: exercise.id().clone(),
        number,
        question: render_markdown(exercise.question()),
        options,
        can_submit: selected.is_some() && !submitted,
        submitted,
        verdict: assessment::verdict(exercise, sheet),
        explanation: submitted.then(|| render_markdown(exercise.explanation())),
    }
}

#[must_use]
pub fn map_exercises<'a>(
    exercises: impl IntoIterator<Item = &'a Exercise>,
    sheet: &AnswerSheet,
) -> Vec<ExerciseVm> {
    exercises
        .into_iter()
        .enumerate()
        .map(|(index, exercise)| map_exercise(index + 1, exercise, sheet))
        .collect()
}

/// `A`, `B`, … for the first 26 options, then `?`.
#[must_use]
pub fn option_label(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|index| *index < 26)
        .map_or('?', |index| char::from(b'A' + index))
}

fn option_state(
    index: usize,
    selected: Option<usize>,
    submitted: bool,
    correct: usize,
) -> OptionState {
    let chosen = selected == Some(index);
    if !submitted {
        return if chosen {
            OptionState::Selected
        } else {
            OptionState::Idle
        };
    }
    if index == correct {
        OptionState::Correct
    } else if chosen {
        OptionState::Incorrect
    } else {
        OptionState::Dimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise() -> Exercise {
        Exercise::new(
            ExerciseId::new("ex"),
            "What is $1 + 1$?",
            vec!["$1$".into(), "$2$".into(), "$3$".into()],
            1,
            "Because $1 + 1 = 2$.",
        )
        .unwrap()
    }

    fn states(vm: &ExerciseVm) -> Vec<OptionState> {
        vm.options.iter().map(|option| option.state).collect()
    }

    #[test]
    fn fresh_exercise_is_idle_and_hides_the_answer() {
        let vm = map_exercise(1, &exercise(), &AnswerSheet::new());
        assert_eq!(states(&vm), vec![OptionState::Idle; 3]);
        assert!(!vm.can_submit);
        assert!(vm.verdict.is_none());
        assert!(vm.explanation.is_none());
        assert_eq!(vm.options[0].label, 'A');
        assert_eq!(vm.question, "What is $1 + 1$?");
    }

    #[test]
    fn selection_does_not_reveal_correctness() {
        let ex = exercise();
        let mut sheet = AnswerSheet::new();
        sheet.select(ex.id(), 0);
        let vm = map_exercise(1, &ex, &sheet);
        assert_eq!(
            states(&vm),
            vec![OptionState::Selected, OptionState::Idle, OptionState::Idle]
        );
        assert!(vm.can_submit);
        assert!(vm.verdict.is_none());
        assert!(vm.explanation.is_none());
    }

    #[test]
    fn wrong_submission_marks_choice_and_reveals_correct_option() {
        let ex = exercise();
        let mut sheet = AnswerSheet::new();
        sheet.select(ex.id(), 2);
        sheet.submit(ex.id());
        let vm = map_exercise(1, &ex, &sheet);
        assert_eq!(
            states(&vm),
            vec![
                OptionState::Dimmed,
                OptionState::Correct,
                OptionState::Incorrect
            ]
        );
        assert!(!vm.can_submit);
        assert_eq!(vm.verdict_label(), Some("Incorrect"));
        assert_eq!(vm.explanation.as_deref(), Some("Because $1 + 1 = 2$."));
    }

    #[test]
    fn right_submission_has_no_incorrect_option() {
        let ex = exercise();
        let mut sheet = AnswerSheet::new();
        sheet.select(ex.id(), 1);
        sheet.submit(ex.id());
        let vm = map_exercise(1, &ex, &sheet);
        assert_eq!(
            states(&vm),
            vec![OptionState::Dimmed, OptionState::Correct, OptionState::Dimmed]
        );
        assert_eq!(vm.verdict, Some(Verdict::Correct));
    }

    #[test]
    fn labels_run_past_the_alphabet_safely() {
        assert_eq!(option_label(3), 'D');
        assert_eq!(option_label(25), 'Z');
        assert_eq!(option_label(26), '?');
    }
}
