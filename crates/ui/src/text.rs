//! Terminal rendering for authored lesson text.
//!
//! Lesson content is markdown with inline `$…$` and display `$$…$$` math. The
//! markdown structure is flattened to plain text; math spans are written back
//! verbatim, delimiters included, so a downstream math renderer sees exactly
//! what the author wrote.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

#[must_use]
pub fn render_markdown(input: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_MATH);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let mut out = String::with_capacity(input.len());
    let mut lists: Vec<Option<u64>> = Vec::new();

    for event in Parser::new_ext(input, options) {
        match event {
            Event::Start(Tag::List(first)) => {
                start_line(&mut out);
                lists.push(first);
            }
            Event::End(TagEnd::List(_)) => {
                lists.pop();
                if lists.is_empty() {
                    end_block(&mut out);
                }
            }
            Event::Start(Tag::Item) => {
                start_line(&mut out);
                out.push_str(&"  ".repeat(lists.len().saturating_sub(1)));
                match lists.last_mut() {
                    Some(Some(number)) => {
                        out.push_str(&format!("{number}. "));
                        *number += 1;
                    }
                    _ => out.push_str("- "),
                }
            }
            Event::Start(
                Tag::Paragraph | Tag::Heading { .. } | Tag::BlockQuote(_) | Tag::CodeBlock(_),
            ) => start_line(&mut out),
            Event::End(TagEnd::Paragraph) => {
                if lists.is_empty() {
                    end_block(&mut out);
                }
            }
            Event::End(TagEnd::Heading(_) | TagEnd::BlockQuote(..) | TagEnd::CodeBlock) => {
                end_block(&mut out);
            }
            Event::Text(text) | Event::Code(text) | Event::Html(text) | Event::InlineHtml(text) => {
                out.push_str(&text);
            }
            Event::InlineMath(math) => {
                out.push('$');
                out.push_str(&math);
                out.push('$');
            }
            Event::DisplayMath(math) => {
                out.push_str("$$");
                out.push_str(&math);
                out.push_str("$$");
            }
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Rule => {
                start_line(&mut out);
                out.push_str("---");
                end_block(&mut out);
            }
            Event::TaskListMarker(done) => out.push_str(if done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    out.trim_end().to_string()
}

fn start_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn end_block(out: &mut String) {
    if out.is_empty() {
        return;
    }
    while !out.ends_with("\n\n") {
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_math_is_left_verbatim() {
        let rendered = render_markdown("Let $x_1 < x_2 \\Rightarrow f(x_1) < f(x_2)$ hold.");
        assert_eq!(rendered, "Let $x_1 < x_2 \\Rightarrow f(x_1) < f(x_2)$ hold.");
    }

    #[test]
    fn display_math_is_left_verbatim() {
        let rendered = render_markdown("$$\\int_0^1 x^2 \\, dx = \\frac{1}{3}$$");
        assert_eq!(rendered, "$$\\int_0^1 x^2 \\, dx = \\frac{1}{3}$$");
    }

    #[test]
    fn emphasis_markers_are_dropped() {
        let rendered = render_markdown("**1. Definition**\nA function is *increasing* here.");
        assert_eq!(rendered, "1. Definition\nA function is increasing here.");
    }

    #[test]
    fn lists_become_dashed_lines() {
        let rendered = render_markdown("Intro\n\n- first $a$\n- second\n\nOutro");
        assert_eq!(rendered, "Intro\n\n- first $a$\n- second\n\nOutro");
    }

    #[test]
    fn ordered_lists_keep_numbers() {
        let rendered = render_markdown("1. one\n2. two");
        assert_eq!(rendered, "1. one\n2. two");
    }

    #[test]
    fn empty_input_renders_empty() {
        assert_eq!(render_markdown(""), "");
    }
}
