use services::{ChatRole, Transcript};

use crate::text::render_markdown;
use crate::vm::time_fmt::format_time_of_day;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatLineVm {
    pub speaker: &'static str,
    pub text: String,
    pub time: String,
    pub is_error: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatVm {
    pub enabled: bool,
    pub lines: Vec<ChatLineVm>,
}

/// Learner text is shown as typed; assistant replies go through the markdown renderer.
#[must_use]
pub fn map_chat(transcript: &Transcript, enabled: bool) -> ChatVm {
    let lines = transcript
        .messages()
        .iter()
        .map(|message| {
            let (speaker, text) = match message.role {
                ChatRole::User => ("You", message.text.clone()),
                ChatRole::Assistant => ("Tutor", render_markdown(&message.text)),
            };
            ChatLineVm {
                speaker,
                text,
                time: format_time_of_day(message.sent_at),
                is_error: message.is_error,
            }
        })
        .collect();

    ChatVm { enabled, lines }
}
