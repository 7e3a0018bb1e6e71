//! `ConductorState`/`StreamEvent` formatting for stderr output.

use skein::{ConductorState, Message};

/// Truncates a string to at most `max` chars; appends "..." when truncated. UTF-8 safe.
/// `max == 0` means no truncation.
pub(crate) fn truncate_display(s: &str, max: usize) -> String {
    if max == 0 {
        return s.to_string();
    }
    const SUFFIX: &str = "...";
    let suffix_len = 3;
    if max <= suffix_len {
        return s.chars().take(max).collect();
    }
    let content_max = max - suffix_len;
    if s.chars().count() <= max {
        return s.to_string();
    }
    format!(
        "{}{}",
        s.chars().take(content_max).collect::<String>(),
        SUFFIX
    )
}

/// Prefix each line of `s` with `indent` (for embedding multi-line blocks in outer output).
pub(crate) fn indent_lines(s: &str, indent: &str) -> String {
    s.lines()
        .map(|line| format!("{}{}", indent, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats one `Message` with content truncated for display.
fn format_message_truncated(m: &Message, max: usize) -> String {
    match m {
        Message::Human(s) => format!("Human({})", truncate_display(s, max)),
        Message::System(s) => format!("System({})", truncate_display(s, max)),
        Message::Ai(s) => format!("Ai({})", truncate_display(s, max)),
        Message::Function { name, content, idx, .. } => format!(
            "Function[{}] {}({})",
            idx,
            name,
            truncate_display(content, max)
        ),
    }
}

/// Formats `ConductorState` for verbose stderr output: one message per line, plus round count.
pub(crate) fn format_conductor_state_display(state: &ConductorState, max: usize) -> String {
    let mut lines = vec!["ConductorState {".to_string()];
    lines.push("  messages:".to_string());
    for m in &state.messages {
        lines.push(format!("    {}", format_message_truncated(m, max)));
    }
    lines.push(format!("  round: {}", state.round));
    lines.push("}".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn truncate_display_handles_short_exact_and_truncated() {
        assert_eq!(truncate_display("abc", 10), "abc");
        assert_eq!(truncate_display("abcdef", 3), "abc");
        assert_eq!(truncate_display("abcdefghij", 5), "ab...");
        assert_eq!(truncate_display("abcdefghij", 0), "abcdefghij");
    }

    #[test]
    fn format_message_truncated_for_all_variants() {
        assert_eq!(
            format_message_truncated(&Message::Human("hello world".into()), 8),
            "Human(hello...)"
        );
        assert_eq!(
            format_message_truncated(&Message::Ai("hello answer".into()), 8),
            "Ai(hello...)"
        );
        assert_eq!(
            format_message_truncated(
                &Message::function("search", "a very long result", 1, BTreeMap::new()),
                10
            ),
            "Function[1] search(a very...)"
        );
    }

    #[test]
    fn format_conductor_state_display_contains_sections() {
        let state = ConductorState {
            messages: vec![Message::human("q"), Message::ai("answer")],
            round: 1,
        };
        let rendered = format_conductor_state_display(&state, 200);
        assert!(rendered.contains("ConductorState {"));
        assert!(rendered.contains("messages:"));
        assert!(rendered.contains("round: 1"));
        assert!(rendered.contains("Ai(answer)"));
    }

    #[test]
    fn indent_lines_prefixes_every_line() {
        assert_eq!(indent_lines("a\nb", "  "), "  a\n  b");
    }
}
