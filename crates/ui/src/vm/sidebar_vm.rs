use services::{StudyMode, StudySession};
use textbook_core::model::{ChapterId, LessonId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarLessonVm {
    pub id: LessonId,
    pub title: String,
    pub locked: bool,
    /// The open lesson; never set while practising.
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarChapterVm {
    pub id: ChapterId,
    pub badge: String,
    pub title: String,
    pub expanded: bool,
    pub lessons: Vec<SidebarLessonVm>,
}

#[must_use]
pub fn map_sidebar(session: &StudySession) -> Vec<SidebarChapterVm> {
    let progression = session.progression();
    let current_chapter = progression.current_chapter().id();
    let current_lesson = progression.current_lesson().id();
    let in_lesson = session.mode() == StudyMode::Lesson;

    progression
        .curriculum()
        .chapters()
        .iter()
        .enumerate()
        .map(|(index, chapter)| SidebarChapterVm {
            id: chapter.id().clone(),
            badge: format!("CH {}", index + 1),
            title: chapter.title().to_string(),
            expanded: chapter.id() == current_chapter,
            lessons: chapter
                .lessons()
                .iter()
                .map(|lesson| SidebarLessonVm {
                    id: lesson.id().clone(),
                    title: lesson.title().to_string(),
                    locked: !progression.is_unlocked(lesson.id()),
                    active: in_lesson && lesson.id() == current_lesson,
                })
                .collect(),
        })
        .collect()
}
