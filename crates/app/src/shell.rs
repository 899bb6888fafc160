use std::io::{self, Write};

use services::{AssistantError, StudyMode, StudySession, TextbookService, Transcript};
use textbook_core::model::{ChapterId, ExerciseId, LessonId};
use tracing::debug;
use ui::vm::{
    ExerciseVm, OptionState, map_chat, map_exercise, map_lesson_exercises, map_lesson_header,
    map_practice, map_sidebar, map_theory,
};

use crate::command::{Command, HELP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Line-oriented front end: applies one command to the session and prints the result.
pub struct Shell {
    service: TextbookService,
    session: StudySession,
    transcript: Transcript,
}

impl Shell {
    #[must_use]
    pub fn new(service: TextbookService, seed: Option<u64>) -> Self {
        let session = service.start_session(seed);
        let transcript = service.new_transcript();
        Self {
            service,
            session,
            transcript,
        }
    }

    #[must_use]
    pub fn session(&self) -> &StudySession {
        &self.session
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// # Errors
    ///
    /// Returns an I/O error if `out` cannot be written.
    pub fn welcome(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Interactive textbook. Type `help` for commands.")?;
        writeln!(out)?;
        self.print_header(out)?;
        self.print_theory(out)
    }

    /// Apply `command` and print what changed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if `out` cannot be written.
    pub async fn execute(&mut self, command: Command, out: &mut impl Write) -> io::Result<Flow> {
        debug!(?command, "executing command");
        match command {
            Command::Chapters => self.print_chapters(out)?,
            Command::Chapter(id) => self.open_chapter(&id, out)?,
            Command::Lesson(id) => self.open_lesson(&id, out)?,
            Command::Theory => {
                self.session.leave_practice();
                self.print_header(out)?;
                self.print_theory(out)?;
            }
            Command::Exercises => self.print_exercises(out)?,
            Command::Select { exercise, option } => self.select(&exercise, option, out)?,
            Command::Submit(exercise) => self.submit(&exercise, out)?,
            Command::Next => self.next(out)?,
            Command::Practice | Command::Again => {
                if self.session.start_practice() {
                    self.print_header(out)?;
                    self.print_exercises(out)?;
                } else {
                    writeln!(out, "There are no exercises to practise yet.")?;
                }
            }
            Command::Leave => {
                if self.session.mode() == StudyMode::Practice {
                    self.session.leave_practice();
                    self.print_header(out)?;
                } else {
                    writeln!(out, "You are not in practice mode.")?;
                }
            }
            Command::Ask(question) => self.ask(&question, out).await?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────────
    //

    fn open_chapter(&mut self, id: &ChapterId, out: &mut impl Write) -> io::Result<()> {
        let Some(title) = self
            .session
            .curriculum()
            .chapter(id)
            .map(|chapter| chapter.title().to_string())
        else {
            return writeln!(out, "No chapter named `{id}`.");
        };

        if self.session.select_chapter(id) {
            self.print_header(out)?;
            self.print_theory(out)
        } else {
            writeln!(
                out,
                "{title}: its first lesson is still locked. Pass the lessons before it first."
            )
        }
    }

    fn open_lesson(&mut self, id: &LessonId, out: &mut impl Write) -> io::Result<()> {
        if self.session.curriculum().lesson(id).is_none() {
            return writeln!(out, "No lesson named `{id}`.");
        }
        if self.session.select_lesson(id) {
            self.print_header(out)?;
            self.print_theory(out)
        } else {
            writeln!(out, "Lesson `{id}` is locked.")
        }
    }

    fn next(&mut self, out: &mut impl Write) -> io::Result<()> {
        if self.session.mode() == StudyMode::Practice {
            return writeln!(out, "Leave practice mode first (`leave`).");
        }
        if self.session.advance_to_next_lesson() {
            self.print_header(out)?;
            return self.print_theory(out);
        }

        let progression = self.session.progression();
        let current = progression.current_lesson().id();
        if progression.curriculum().next_lesson(current).is_none() {
            writeln!(out, "This is the last lesson.")
        } else {
            writeln!(
                out,
                "Reach {}% in this lesson to continue (currently {}%).",
                progression.settings().passing_threshold(),
                progression.current_score()
            )
        }
    }

    //
    // ─── ANSWERS ───────────────────────────────────────────────────────────────
    //

    fn select(&mut self, exercise: &ExerciseId, option: usize, out: &mut impl Write) -> io::Result<()> {
        if !self.is_visible(exercise) {
            return self.not_visible(exercise, out);
        }
        if self.session.select_option(exercise, option) {
            match self.exercise_vm(exercise) {
                Some(vm) => print_exercise(&vm, out),
                None => Ok(()),
            }
        } else {
            writeln!(
                out,
                "Selection ignored: the option does not exist or `{exercise}` is already checked."
            )
        }
    }

    fn submit(&mut self, exercise: &ExerciseId, out: &mut impl Write) -> io::Result<()> {
        if !self.is_visible(exercise) {
            return self.not_visible(exercise, out);
        }
        let outcome = self.session.submit(exercise);
        if !outcome.recorded {
            return writeln!(
                out,
                "Nothing to check: choose an option for `{exercise}` first, or it was already checked."
            );
        }

        if let Some(vm) = self.exercise_vm(exercise) {
            print_exercise(&vm, out)?;
        }

        match self.session.practice() {
            Some(practice) => {
                let vm = map_practice(practice);
                writeln!(out, "Practice: {}", vm.progress_label)?;
            }
            None => {
                let vm = map_lesson_exercises(&self.session);
                writeln!(out, "{}", vm.status)?;
            }
        }

        if let Some(unlocked) = outcome.unlocked {
            let title = self
                .session
                .curriculum()
                .lesson(&unlocked)
                .map_or_else(|| unlocked.to_string(), |lesson| lesson.title().to_string());
            writeln!(out, "Unlocked: {title}. Type `next` to continue.")?;
        }
        Ok(())
    }

    /// In lesson mode only the current lesson's exercises can be answered.
    fn is_visible(&self, exercise: &ExerciseId) -> bool {
        match self.session.practice() {
            Some(practice) => practice.contains(exercise),
            None => self
                .session
                .progression()
                .current_lesson()
                .exercises()
                .iter()
                .any(|ex| ex.id() == exercise),
        }
    }

    fn not_visible(&self, exercise: &ExerciseId, out: &mut impl Write) -> io::Result<()> {
        let place = match self.session.mode() {
            StudyMode::Lesson => "this lesson",
            StudyMode::Practice => "the practice set",
        };
        writeln!(out, "`{exercise}` is not part of {place}.")
    }

    fn exercise_vm(&self, exercise: &ExerciseId) -> Option<ExerciseVm> {
        match self.session.practice() {
            Some(practice) => map_practice(practice)
                .exercises
                .into_iter()
                .find(|vm| &vm.id == exercise),
            None => {
                let progression = self.session.progression();
                progression
                    .current_lesson()
                    .exercises()
                    .iter()
                    .enumerate()
                    .find(|(_, ex)| ex.id() == exercise)
                    .map(|(index, ex)| map_exercise(index + 1, ex, progression.sheet()))
            }
        }
    }

    //
    // ─── ASSISTANT ─────────────────────────────────────────────────────────────
    //

    async fn ask(&mut self, question: &str, out: &mut impl Write) -> io::Result<()> {
        let assistant = self.service.assistant();
        match assistant.ask(&mut self.transcript, question).await {
            Ok(_) => {}
            Err(AssistantError::Disabled) => {
                return writeln!(
                    out,
                    "The tutor is not configured. Set TEXTBOOK_AI_API_KEY to enable it."
                );
            }
            Err(AssistantError::EmptyQuestion) => {
                return writeln!(out, "Ask a question after `ask`.");
            }
            Err(err) => debug!(error = %err, "tutor request failed"),
        }

        let chat = map_chat(&self.transcript, assistant.enabled());
        if let Some(line) = chat.lines.last() {
            let marker = if line.is_error { " (error)" } else { "" };
            writeln!(out, "[{}] {}{marker}:", line.time, line.speaker)?;
            writeln!(out, "{}", line.text)?;
        }
        Ok(())
    }

    //
    // ─── PRINTING ──────────────────────────────────────────────────────────────
    //

    fn print_chapters(&self, out: &mut impl Write) -> io::Result<()> {
        for chapter in map_sidebar(&self.session) {
            let open = if chapter.expanded { "*" } else { " " };
            writeln!(out, "{open} {} [{}] {}", chapter.badge, chapter.id, chapter.title)?;
            for lesson in chapter.lessons {
                let marker = match (lesson.active, lesson.locked) {
                    (true, _) => ">",
                    (false, true) => "x",
                    (false, false) => "-",
                };
                let locked = if lesson.locked { " (locked)" } else { "" };
                writeln!(out, "    {marker} [{}] {}{locked}", lesson.id, lesson.title)?;
            }
        }
        Ok(())
    }

    fn print_header(&self, out: &mut impl Write) -> io::Result<()> {
        let header = map_lesson_header(&self.session);
        let badge = header
            .badge
            .map(|badge| format!(" [{badge}]"))
            .unwrap_or_default();
        writeln!(out, "== {}{badge} ==", header.title)?;
        match header.progress_label() {
            Some(progress) => writeln!(out, "{} | progress {progress}", header.subtitle)?,
            None => writeln!(out, "{}", header.subtitle)?,
        }
        writeln!(out)
    }

    fn print_theory(&self, out: &mut impl Write) -> io::Result<()> {
        let theory = map_theory(self.session.progression().current_lesson());
        for (title, body) in [
            ("Key ideas", theory.theory),
            ("Worked example", theory.example),
            ("Solution", theory.solution),
        ] {
            if body.is_empty() {
                continue;
            }
            writeln!(out, "-- {title} --")?;
            writeln!(out, "{body}")?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn print_exercises(&self, out: &mut impl Write) -> io::Result<()> {
        if let Some(practice) = self.session.practice() {
            let vm = map_practice(practice);
            writeln!(out, "{} ({})", vm.summary, vm.progress_label)?;
            writeln!(out)?;
            for exercise in &vm.exercises {
                print_exercise(exercise, out)?;
            }
            return writeln!(out, "Type `again` for a new set or `leave` to go back.");
        }

        let vm = map_lesson_exercises(&self.session);
        for exercise in &vm.exercises {
            print_exercise(exercise, out)?;
        }
        writeln!(out, "{}", vm.status)?;
        if vm.can_advance {
            writeln!(out, "Type `next` for the next lesson.")?;
        }
        Ok(())
    }
}

fn print_exercise(vm: &ExerciseVm, out: &mut impl Write) -> io::Result<()> {
    let verdict = vm
        .verdict_label()
        .map(|label| format!(" - {label}"))
        .unwrap_or_default();
    writeln!(out, "Question {} [{}]{verdict}", vm.number, vm.id)?;
    writeln!(out, "{}", vm.question)?;
    for option in &vm.options {
        let marker = match option.state {
            OptionState::Idle | OptionState::Dimmed => ' ',
            OptionState::Selected => '>',
            OptionState::Correct => '+',
            OptionState::Incorrect => 'x',
        };
        writeln!(out, "  {marker} {}) {}", option.label, option.text)?;
    }
    if let Some(explanation) = &vm.explanation {
        writeln!(out, "  Explanation: {explanation}")?;
    }
    writeln!(out)
}
