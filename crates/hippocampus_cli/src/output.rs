//! Output formatting utilities

use chrono::NaiveDate;
use hippocampus_core::{display_label, format_date_ref, DayRecord, Entry, WeekStrip};

/// One line per entry: id, day, pin marker, title and tag.
pub fn format_entry_list(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format_entry_line(entry));
        output.push('\n');
    }
    output
}

pub fn format_entry_line(entry: &Entry) -> String {
    let marker = if entry.pinned { "*" } else { " " };
    let mut line = format!(
        "{:>4} {} {}{}",
        entry.id,
        format_date_ref(entry.date_ref),
        marker,
        entry.title
    );
    if let Some(tag) = entry.tag.as_deref() {
        line.push_str(&format!("  #{tag}"));
    }
    line
}

/// Header line followed by the body, if any.
pub fn format_entry_detail(entry: &Entry) -> String {
    let mut output = format_entry_line(entry);
    if let Some(body) = entry.body.as_deref() {
        output.push_str("\n\n");
        output.push_str(body);
    }
    output
}

/// Seven rows, the selected day marked with `>`.
pub fn format_week(strip: &WeekStrip, counts: &[(NaiveDate, usize)]) -> String {
    let mut output = String::new();
    for (index, (day, count)) in counts.iter().enumerate() {
        let marker = if index == strip.selected_index() { ">" } else { " " };
        output.push_str(&format!(
            "{} {} {} {}\n",
            marker,
            day.format("%a"),
            display_label(*day),
            count
        ));
    }
    output
}

pub fn format_day(record: &DayRecord) -> String {
    format!(
        "{} mood={} weather={} location={}",
        format_date_ref(record.date),
        optional(record.mood.map(|value| value.to_string())),
        optional(record.weather.map(|value| value.to_string())),
        optional(record.location.clone())
    )
}

fn optional(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}
