//! # Rendering
//!
//! Turns command results into terminal text. Width math is done on the plain
//! strings with `unicode-width` and styles are applied after padding, so ANSI
//! escapes never skew the columns. Styles are dropped automatically when
//! stdout is not a terminal.

use super::styles;
use adrapp::commands::{CmdMessage, MessageLevel};
use adrapp::model::Record;
use adrapp::tagset::TagSet;
use chrono::{DateTime, Utc};
use console::Style;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const TITLE_WIDTH: usize = 40;
const COLUMN_GAP: &str = "  ";
const HEADERS: [&str; 8] = [
    "ID",
    "Title",
    "Status",
    "Author",
    "Creation Date",
    "Last Update Date",
    "Superseders",
    "Tags",
];

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let style = match message.level {
            MessageLevel::Info => &*styles::INFO,
            MessageLevel::Success => &*styles::SUCCESS,
            MessageLevel::Warning => &*styles::WARNING,
        };
        out.push_str(&style.apply_to(&message.content).to_string());
        out.push('\n');
    }
    out
}

struct Cell {
    text: String,
    style: Option<&'static Style>,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    fn styled(text: impl Into<String>, style: &'static Style) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }
}

fn record_row(record: &Record, now: DateTime<Utc>) -> Vec<Cell> {
    vec![
        Cell::styled(&record.id, &styles::ID),
        Cell::plain(truncate_to_width(&record.title, TITLE_WIDTH)),
        Cell::styled(record.status.as_str(), styles::status(record.status)),
        Cell::plain(&record.author),
        Cell::styled(format_time_ago(record.creation_date, now), &styles::TIME),
        Cell::styled(format_time_ago(record.last_update_date, now), &styles::TIME),
        Cell::plain(join_set(&record.superseders)),
        Cell::plain(join_set(&record.tags)),
    ]
}

/// Records as an aligned table, one line per record.
pub fn render_record_table(records: &[Record]) -> String {
    render_record_table_at(records, Utc::now())
}

fn render_record_table_at(records: &[Record], now: DateTime<Utc>) -> String {
    if records.is_empty() {
        return "No records found.\n".to_string();
    }

    let header: Vec<Cell> = HEADERS
        .iter()
        .map(|h| Cell::styled(*h, &styles::HEADER))
        .collect();
    let rows: Vec<Vec<Cell>> = std::iter::once(header)
        .chain(records.iter().map(|r| record_row(r, now)))
        .collect();

    let mut widths = [0usize; HEADERS.len()];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.text.width());
        }
    }

    let mut out = String::new();
    for row in &rows {
        let mut line = String::new();
        for (i, (cell, width)) in row.iter().zip(widths).enumerate() {
            if i > 0 {
                line.push_str(COLUMN_GAP);
            }
            let padded = format!(
                "{}{}",
                cell.text,
                " ".repeat(width.saturating_sub(cell.text.width()))
            );
            match cell.style {
                Some(style) => line.push_str(&style.apply_to(padded).to_string()),
                None => line.push_str(&padded),
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub fn render_json(records: &[Record]) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    Ok(json)
}

fn join_set(set: &TagSet) -> String {
    set.iter().collect::<Vec<_>>().join(", ")
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    timeago::Formatter::new().convert(duration.to_std().unwrap_or_default())
}
