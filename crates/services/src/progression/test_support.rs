use std::sync::Arc;

use textbook_core::model::{
    Chapter, ChapterId, Curriculum, Exercise, ExerciseId, Lesson, LessonContent, LessonId,
};

/// Correct option for every fixture exercise.
pub(crate) const CORRECT: usize = 1;
pub(crate) const WRONG: usize = 0;

/// Builds a curriculum where `layout[c][l]` is the exercise count of lesson `l`
/// in chapter `c`. Ids follow `c{c}`, `c{c}l{l}` and `c{c}l{l}e{e}`.
pub(crate) fn curriculum(layout: &[&[usize]]) -> Arc<Curriculum> {
    let chapters = layout
        .iter()
        .enumerate()
        .map(|(c, lessons)| {
            let lessons = lessons
                .iter()
                .enumerate()
                .map(|(l, count)| {
                    let exercises = (0..*count)
                        .map(|e| {
                            Exercise::new(
                                exercise_id(c, l, e),
                                format!("question {c}.{l}.{e}"),
                                vec!["a".into(), "b".into(), "c".into()],
                                CORRECT,
                                "explanation",
                            )
                            .unwrap()
                        })
                        .collect();
                    Lesson::new(
                        lesson_id(c, l),
                        format!("Lesson {c}.{l}"),
                        LessonContent::default(),
                        exercises,
                    )
                })
                .collect();
            Chapter::new(chapter_id(c), format!("Chapter {c}"), "", lessons)
        })
        .collect();
    Arc::new(Curriculum::new(chapters).unwrap())
}

pub(crate) fn chapter_id(c: usize) -> ChapterId {
    ChapterId::new(format!("c{c}"))
}

pub(crate) fn lesson_id(c: usize, l: usize) -> LessonId {
    LessonId::new(format!("c{c}l{l}"))
}

pub(crate) fn exercise_id(c: usize, l: usize, e: usize) -> ExerciseId {
    ExerciseId::new(format!("c{c}l{l}e{e}"))
}
