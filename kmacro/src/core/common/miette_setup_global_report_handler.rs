// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Configure how [miette](https://docs.rs/miette/latest/miette/index.html) renders a
//! [`miette::Report`] when `main() -> miette::Result<_>` errors out, eg: when a config
//! file fails validation in the `kmc` binary.

use miette::MietteHandlerOpts;
use tracing::debug;

/// The [`miette::ErrorHook`] is lazily evaluated, so the terminal width is only
/// measured if an error is actually displayed.
pub fn setup_default_miette_global_report_handler(issues_url: &'static str) {
    miette::set_hook(Box::new(|_report| {
        let terminal_width = {
            let it = crossterm::terminal::size()
                .map(|(columns, _rows)| usize::from(columns))
                .unwrap_or(80);
            debug!("miette::set_hook -> terminal_width: {}", it);
            it
        };
        Box::new(
            MietteHandlerOpts::new()
                .width(terminal_width)
                .wrap_lines(true)
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .with_cause_chain()
                .footer(issues_url.to_string())
                .build(),
        )
    }))
    .ok();
}
