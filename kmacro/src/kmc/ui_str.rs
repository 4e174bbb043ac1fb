// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::style::Stylize;

use crate::{MacroSession, MacroView};

pub fn unrecoverable_error_message(report: &miette::Report) -> String {
    let text = format!(
        "{a}:\n{b:?}",
        a = "Could not run kmc due to the following problem",
        b = report
    );
    text.magenta().to_string()
}

pub fn status_message(text: &str) -> String { format!("▸ {text}").dark_grey().to_string() }

pub fn empty_ring_message() -> &'static str { "The macro ring is empty." }

/// The ring, head first, then the named macros in name order.
pub fn describe_session(session: &MacroSession) -> Vec<String> {
    let ring = session.ring();
    let mut lines: Vec<String> = if ring.is_empty() {
        vec![empty_ring_message().to_string()]
    } else {
        ring.view(ring.len())
            .iter()
            .map(MacroView::to_string)
            .collect()
    };

    for (name, it) in session.named_macros() {
        lines.push(format!(
            "{name}: {keys}  (counter {counter}, format {format:?})",
            keys = it.describe(),
            counter = it.counter(),
            format = it.format().to_string(),
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_describe_empty_session() {
        let session = MacroSession::default();
        assert_eq!(describe_session(&session), vec![empty_ring_message().to_string()]);
    }
}
