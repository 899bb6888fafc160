mod chat_vm;
mod exercise_vm;
mod lesson_vm;
mod practice_vm;
mod sidebar_vm;
mod time_fmt;

pub use chat_vm::{ChatLineVm, ChatVm, map_chat};
pub use exercise_vm::{ExerciseVm, OptionState, OptionVm, map_exercise, map_exercises, option_label};
pub use lesson_vm::{
    LessonExercisesVm, LessonHeaderVm, PRACTICE_SUBTITLE, PRACTICE_TITLE, TheoryVm,
    map_lesson_exercises, map_lesson_header, map_theory,
};
pub use practice_vm::{PracticeVm, map_practice};
pub use sidebar_vm::{SidebarChapterVm, SidebarLessonVm, map_sidebar};
pub use time_fmt::format_time_of_day;

#[cfg(test)]
pub(crate) fn bundled_session() -> services::StudySession {
    use std::sync::Arc;

    let curriculum = storage::BundledCurriculum::parse().unwrap();
    services::StudySession::with_seed(
        Arc::new(curriculum),
        textbook_core::model::TextbookSettings::default(),
        5,
    )
}
