//! Lesson scoring and per-exercise grading.
//!
//! Everything here is a pure function of its inputs.

use crate::answers::{AnswerRecord, AnswerSheet, SubmissionRecord};
use crate::model::{Exercise, Lesson};

/// Outcome of a submitted exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Score a lesson as a whole percentage in `0..=100`.
///
/// An exercise counts only when it is submitted and its recorded answer is the
/// correct option; selected-but-unsubmitted answers earn nothing. A lesson with
/// no exercises scores 100. The percentage is rounded half-up.
///
/// # Examples
///
/// ```
/// # use textbook_core::assessment::score;
/// # use textbook_core::answers::AnswerSheet;
/// # use textbook_core::model::{Lesson, LessonContent, LessonId};
/// let lesson = Lesson::new(LessonId::new("intro"), "Intro", LessonContent::default(), Vec::new());
/// let sheet = AnswerSheet::new();
/// assert_eq!(score(&lesson, sheet.answers(), sheet.submissions()), 100);
/// ```
#[must_use]
pub fn score(lesson: &Lesson, answers: &AnswerRecord, submissions: &SubmissionRecord) -> u8 {
    let total = lesson.exercises().len();
    if total == 0 {
        return 100;
    }

    let correct = lesson
        .exercises()
        .iter()
        .filter(|exercise| submissions.is_submitted(exercise.id()) && is_correct(exercise, answers))
        .count();

    // round(100 * correct / total), half-up, in integer arithmetic
    let rounded = (200 * correct + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

/// Convenience wrapper over [`score`] for a paired sheet.
#[must_use]
pub fn score_sheet(lesson: &Lesson, sheet: &AnswerSheet) -> u8 {
    score(lesson, sheet.answers(), sheet.submissions())
}

/// True iff the recorded answer is the correct option.
///
/// This ignores submission state; use [`verdict`] for anything shown to a learner.
#[must_use]
pub fn is_correct(exercise: &Exercise, answers: &AnswerRecord) -> bool {
    answers.get(exercise.id()) == Some(exercise.correct_option_index())
}

/// Grade an exercise, revealing the result only after it was submitted.
#[must_use]
pub fn verdict(exercise: &Exercise, sheet: &AnswerSheet) -> Option<Verdict> {
    if !sheet.submissions().is_submitted(exercise.id()) {
        return None;
    }
    if is_correct(exercise, sheet.answers()) {
        Some(Verdict::Correct)
    } else {
        Some(Verdict::Incorrect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExerciseId, LessonContent, LessonId};

    fn lesson_with(n: usize) -> Lesson {
        let exercises = (0..n)
            .map(|i| {
                Exercise::new(
                    ExerciseId::new(format!("e{i}")),
                    "Q",
                    vec!["a".into(), "b".into(), "c".into()],
                    1,
                    "E",
                )
                .unwrap()
            })
            .collect();
        Lesson::new(LessonId::new("l"), "L", LessonContent::default(), exercises)
    }

    fn answer(sheet: &mut AnswerSheet, i: usize, option: usize, submit: bool) {
        let id = ExerciseId::new(format!("e{i}"));
        sheet.select(&id, option);
        if submit {
            sheet.submit(&id);
        }
    }

    #[test]
    fn empty_lesson_scores_full() {
        let lesson = lesson_with(0);
        assert_eq!(score_sheet(&lesson, &AnswerSheet::new()), 100);
    }

    #[test]
    fn four_of_five_scores_eighty() {
        let lesson = lesson_with(5);
        let mut sheet = AnswerSheet::new();
        for i in 0..4 {
            answer(&mut sheet, i, 1, true);
        }
        answer(&mut sheet, 4, 0, true);
        assert_eq!(score_sheet(&lesson, &sheet), 80);
    }

    #[test]
    fn two_of_three_rounds_to_sixty_seven() {
        let lesson = lesson_with(3);
        let mut sheet = AnswerSheet::new();
        answer(&mut sheet, 0, 1, true);
        answer(&mut sheet, 1, 1, true);
        assert_eq!(score_sheet(&lesson, &sheet), 67);
    }

    #[test]
    fn half_rounds_up() {
        let lesson = lesson_with(8);
        let mut sheet = AnswerSheet::new();
        answer(&mut sheet, 0, 1, true);
        // 12.5% rounds to 13
        assert_eq!(score_sheet(&lesson, &sheet), 13);
    }

    #[test]
    fn unsubmitted_correct_answer_earns_nothing() {
        let lesson = lesson_with(1);
        let mut sheet = AnswerSheet::new();
        answer(&mut sheet, 0, 1, false);
        assert_eq!(score_sheet(&lesson, &sheet), 0);
        assert!(is_correct(&lesson.exercises()[0], sheet.answers()));
    }

    #[test]
    fn score_is_pure() {
        let lesson = lesson_with(3);
        let mut sheet = AnswerSheet::new();
        answer(&mut sheet, 0, 1, true);
        let first = score_sheet(&lesson, &sheet);
        let second = score_sheet(&lesson, &sheet);
        assert_eq!(first, second);
    }

    #[test]
    fn verdict_hidden_until_submitted() {
        let lesson = lesson_with(1);
        let exercise = &lesson.exercises()[0];
        let mut sheet = AnswerSheet::new();
        answer(&mut sheet, 0, 0, false);
        assert_eq!(verdict(exercise, &sheet), None);
        sheet.submit(exercise.id());
        assert_eq!(verdict(exercise, &sheet), Some(Verdict::Incorrect));
    }
}
