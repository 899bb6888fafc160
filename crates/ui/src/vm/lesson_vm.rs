use services::{StudyMode, StudySession};
use textbook_core::model::Lesson;

use crate::text::render_markdown;
use crate::vm::exercise_vm::{ExerciseVm, map_exercises};

pub const PRACTICE_TITLE: &str = "Mixed review";
pub const PRACTICE_SUBTITLE: &str = "All chapters";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonHeaderVm {
    pub title: String,
    pub subtitle: String,
    /// Hidden while practising.
    pub score: Option<u8>,
    pub passed: bool,
    pub badge: Option<&'static str>,
}

impl LessonHeaderVm {
    #[must_use]
    pub fn progress_label(&self) -> Option<String> {
        self.score.map(|score| format!("{score}%"))
    }
}

#[must_use]
pub fn map_lesson_header(session: &StudySession) -> LessonHeaderVm {
    if session.mode() == StudyMode::Practice {
        return LessonHeaderVm {
            title: PRACTICE_TITLE.to_string(),
            subtitle: PRACTICE_SUBTITLE.to_string(),
            score: None,
            passed: false,
            badge: Some("Random"),
        };
    }

    let progression = session.progression();
    let progress = progression.progress();
    LessonHeaderVm {
        title: progression.current_lesson().title().to_string(),
        subtitle: progression.current_chapter().title().to_string(),
        score: Some(progress.score),
        passed: progress.passed,
        badge: progress.passed.then_some("Completed"),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TheoryVm {
    pub theory: String,
    pub example: String,
    pub solution: String,
}

#[must_use]
pub fn map_theory(lesson: &Lesson) -> TheoryVm {
    let content = lesson.content();
    TheoryVm {
        theory: render_markdown(&content.theory),
        example: render_markdown(&content.example),
        solution: render_markdown(&content.solution),
    }
}

/// The exercise tab in lesson mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonExercisesVm {
    pub exercises: Vec<ExerciseVm>,
    pub score: u8,
    pub passed: bool,
    pub status: String,
    pub can_advance: bool,
}

#[must_use]
pub fn map_lesson_exercises(session: &StudySession) -> LessonExercisesVm {
    let progression = session.progression();
    let lesson = progression.current_lesson();
    let progress = progression.progress();
    let threshold = progression.settings().passing_threshold();

    let status = if !lesson.has_exercises() {
        "This lesson has no exercises.".to_string()
    } else if progress.passed {
        format!(
            "Passed with {}%. The next lesson is unlocked.",
            progress.score
        )
    } else {
        format!(
            "Score {}%. Reach {threshold}% to unlock the next lesson.",
            progress.score
        )
    };

    LessonExercisesVm {
        exercises: map_exercises(lesson.exercises(), progression.sheet()),
        score: progress.score,
        passed: progress.passed,
        status,
        can_advance: progression.can_advance(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::bundled_session;
    use textbook_core::model::ExerciseId;

    #[test]
    fn header_tracks_lesson_and_score() {
        let mut session = bundled_session();
        let header = map_lesson_header(&session);
        assert_eq!(header.score, Some(0));
        assert!(!header.passed);
        assert!(header.badge.is_none());
        assert_eq!(header.progress_label().as_deref(), Some("0%"));

        let id = ExerciseId::new("ex1_1");
        session.select_option(&id, 1);
        session.submit(&id);
        let header = map_lesson_header(&session);
        assert_eq!(header.score, Some(100));
        assert_eq!(header.badge, Some("Completed"));
    }

    #[test]
    fn header_in_practice_hides_score() {
        let mut session = bundled_session();
        session.start_practice();
        let header = map_lesson_header(&session);
        assert_eq!(header.title, PRACTICE_TITLE);
        assert_eq!(header.subtitle, PRACTICE_SUBTITLE);
        assert!(header.progress_label().is_none());
    }

    #[test]
    fn exercise_tab_reports_unlock_status() {
        let mut session = bundled_session();
        let vm = map_lesson_exercises(&session);
        assert_eq!(vm.exercises.len(), 1);
        assert!(!vm.can_advance);
        assert!(vm.status.contains("80%"));

        let id = ExerciseId::new("ex1_1");
        session.select_option(&id, 1);
        session.submit(&id);
        let vm = map_lesson_exercises(&session);
        assert!(vm.passed);
        assert!(vm.can_advance);
        assert!(vm.exercises[0].submitted);
    }

    #[test]
    fn theory_keeps_math() {
        let session = bundled_session();
        let theory = map_theory(session.progression().current_lesson());
        assert!(theory.theory.contains("$y = f(x)$"));
        assert!(!theory.theory.contains("**"));
    }
}
