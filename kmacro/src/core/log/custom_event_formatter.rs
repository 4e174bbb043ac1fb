// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Every log call in this crate has a `message` field which becomes the heading of the
//! log entry, and zero or more other fields which become the body. Eg:
//!
//! ```rust
//! tracing::debug!(
//!     message = "kmacro -> playback stopped",
//!     iterations = 3,
//!     stop = "bell",
//! );
//! ```
//!
//! is rendered as:
//!
//! ```text
//!  03:15pm D: kmacro -> playback stopped
//!  • iterations: 3
//!  • stop: bell
//! ────────────────────────────────────────
//! ```

use std::fmt;

use chrono::Local;
use const_format::formatcp;
use crossterm::style::{Color, Stylize};
use custom_event_formatter_constants::*;
use textwrap::{Options, WordSeparator, wrap};
use tracing::{Event, Subscriber,
              field::{Field, Visit}};
use tracing_subscriber::{fmt::{FmtContext, FormatEvent, FormatFields, format::Writer},
                         registry::LookupSpan};

pub struct CustomEventFormatter;

pub mod custom_event_formatter_constants {
    use super::*;

    pub const SPACER: &str = " ";
    pub const FIRST_LINE_PREFIX: &str = formatcp!("{sp}•{sp}", sp = SPACER);
    pub const SUBSEQUENT_LINE_PREFIX: &str = formatcp!("{sp}{sp}{sp}", sp = SPACER);
    pub const LEVEL_SUFFIX: &str = ":";

    pub const ERROR_SIGIL: &str = "E";
    pub const WARN_SIGIL: &str = "W";
    pub const INFO_SIGIL: &str = "I";
    pub const DEBUG_SIGIL: &str = "D";
    pub const TRACE_SIGIL: &str = "T";

    pub const ENTRY_SEPARATOR_CHAR: &str = "─";
    pub const DEFAULT_MAX_DISPLAY_WIDTH: usize = 80;

    pub const BODY_FG_COLOR: Color = Color::Rgb {
        r: 175,
        g: 175,
        b: 175,
    };
    pub const HEADING_BG_COLOR: Color = Color::Rgb {
        r: 70,
        g: 70,
        b: 90,
    };
    pub const ERROR_FG_COLOR: Color = Color::Rgb {
        r: 255,
        g: 182,
        b: 193,
    };
    pub const WARN_FG_COLOR: Color = Color::Rgb {
        r: 255,
        g: 140,
        b: 0,
    };
    pub const INFO_FG_COLOR: Color = Color::Rgb {
        r: 233,
        g: 150,
        b: 122,
    };
    pub const DEBUG_FG_COLOR: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 0,
    };
    pub const TRACE_FG_COLOR: Color = Color::Rgb {
        r: 186,
        g: 85,
        b: 211,
    };
}

impl<S, N> FormatEvent<S, N> for CustomEventFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    /// Format the event into a heading line (timestamp, span, level, message), the body
    /// lines (one per field, text wrapped to the terminal width), and a separator. ANSI
    /// styling is only applied when the writer supports it, so log files stay plain.
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut f: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let use_ansi = f.has_ansi_escapes();
        let max_display_width = get_max_display_width();

        // Heading.
        let timestamp = Local::now();
        let mut heading = format!("{SPACER}{ts}{SPACER}", ts = timestamp.format("%I:%M%P"));
        if let Some(scope) = ctx.lookup_current() {
            heading.push_str(&format!("[{}]{SPACER}", scope.name()));
        }

        let (sigil, level_color) = match *event.metadata().level() {
            tracing::Level::ERROR => (ERROR_SIGIL, ERROR_FG_COLOR),
            tracing::Level::WARN => (WARN_SIGIL, WARN_FG_COLOR),
            tracing::Level::INFO => (INFO_SIGIL, INFO_FG_COLOR),
            tracing::Level::DEBUG => (DEBUG_SIGIL, DEBUG_FG_COLOR),
            tracing::Level::TRACE => (TRACE_SIGIL, TRACE_FG_COLOR),
        };
        let level_str = format!("{sigil}{LEVEL_SUFFIX}{SPACER}");

        let mut fields = VisitEventAndCollectFields::default();
        event.record(&mut fields);

        let message = truncate_to_width(
            &fields.message,
            max_display_width.saturating_sub(heading.chars().count() + level_str.len()),
        );

        if use_ansi {
            writeln!(
                f,
                "{}{}{}",
                heading.with(BODY_FG_COLOR).on(HEADING_BG_COLOR),
                level_str.with(level_color).on(HEADING_BG_COLOR).bold(),
                message.bold()
            )?;
        } else {
            writeln!(f, "{heading}{level_str}{message}")?;
        }

        // Body.
        let text_wrap_options = Options::new(max_display_width)
            .initial_indent(FIRST_LINE_PREFIX)
            .subsequent_indent(SUBSEQUENT_LINE_PREFIX)
            .word_separator(WordSeparator::UnicodeBreakProperties);

        for (name, value) in &fields.body {
            let line = format!("{name}: {value}");
            for body_line in wrap(&line, &text_wrap_options) {
                let body_line: &str = &body_line;
                if use_ansi {
                    writeln!(f, "{}", body_line.with(BODY_FG_COLOR))?;
                } else {
                    writeln!(f, "{body_line}")?;
                }
            }
        }

        // Terminating line separator.
        let line_separator = ENTRY_SEPARATOR_CHAR.repeat(max_display_width);
        if use_ansi {
            writeln!(f, "{}", line_separator.dark_green())
        } else {
            writeln!(f, "{line_separator}")
        }
    }
}

fn get_max_display_width() -> usize {
    crossterm::terminal::size()
        .map(|(columns, _rows)| usize::from(columns))
        .unwrap_or(DEFAULT_MAX_DISPLAY_WIDTH)
        .max(DEFAULT_MAX_DISPLAY_WIDTH / 2)
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    text.chars().take(max_width.max(1)).collect()
}

/// Collects the `message` field as the heading, and every other field into the body, in
/// the order they were recorded.
#[derive(Debug, Default)]
pub struct VisitEventAndCollectFields {
    pub message: String,
    pub body: Vec<(String, String)>,
}

impl Visit for VisitEventAndCollectFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.body.push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let field_value = format!("{value:?}");
        let field_value = remove_escaped_quotes(&field_value);
        if field.name() == "message" {
            self.message = field_value;
        } else {
            self.body.push((field.name().to_string(), field_value));
        }
    }
}

fn remove_escaped_quotes(text: &str) -> String {
    text.trim_matches('"').replace("\\\"", "\"")
}
