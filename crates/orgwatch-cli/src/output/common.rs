// SPDX-License-Identifier: Apache-2.0

//! Common UX helper functions for consistent display patterns across commands.

use std::io::Write;

use chrono::{DateTime, Utc};
use console::style;

/// Display dry-run message to a writer.
///
/// # Errors
/// Returns error if write operation fails.
pub fn show_dry_run_message<W: Write + ?Sized>(w: &mut W, message: &str) -> std::io::Result<()> {
    writeln!(w, "{}", style(message).yellow())
}

/// Format a timestamp for display, e.g. `2024-06-01 08:30 UTC`.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Format an optional cutoff; `None` means every repository is reported.
pub fn format_since(since: Option<&DateTime<Utc>>) -> String {
    since.map_or_else(|| "the beginning".to_string(), format_timestamp)
}

/// Truncate `text` to at most `max` characters, ending with `...` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
