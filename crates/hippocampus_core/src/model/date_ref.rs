//! Calendar date references for journal entries.
//!
//! # Responsibility
//! - Accept the date shapes callers historically wrote (`MMM dd`,
//!   `MMM dd yyyy`, ISO) and normalize them to one stored form.
//! - Render display labels for the week strip.
//!
//! # Invariants
//! - Storage only ever sees `YYYY-MM-DD`.
//! - Year-less input resolves against an explicit year.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const ISO_FORMAT: &str = "%Y-%m-%d";
const LABEL_FORMAT: &str = "%b %d";

static ISO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));
static MONTH_DAY_YEAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]{3})\s+(\d{1,2}),?\s+(\d{4})$").expect("valid month-day-year regex")
});
static MONTH_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]{3})\s+(\d{1,2})$").expect("valid month-day regex"));

/// Input that does not name a real calendar day in any accepted shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRefError {
    pub input: String,
}

impl Display for DateRefError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid date `{}`; expected YYYY-MM-DD, `MMM dd yyyy` or `MMM dd`",
            self.input
        )
    }
}

impl Error for DateRefError {}

/// Parses a date reference, resolving year-less input against the local
/// current year.
pub fn parse_date_ref(input: &str) -> Result<NaiveDate, DateRefError> {
    parse_date_ref_in_year(input, Local::now().year())
}

/// Parses a date reference, resolving year-less input against `year`.
pub fn parse_date_ref_in_year(input: &str, year: i32) -> Result<NaiveDate, DateRefError> {
    let trimmed = input.trim();
    let invalid = || DateRefError {
        input: input.to_string(),
    };

    if ISO_RE.is_match(trimmed) {
        return NaiveDate::parse_from_str(trimmed, ISO_FORMAT).map_err(|_| invalid());
    }

    if let Some(caps) = MONTH_DAY_YEAR_RE.captures(trimmed) {
        let month = month_from_abbrev(&caps[1]).ok_or_else(invalid)?;
        let day = caps[2].parse::<u32>().map_err(|_| invalid())?;
        let year = caps[3].parse::<i32>().map_err(|_| invalid())?;
        return NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid);
    }

    if let Some(caps) = MONTH_DAY_RE.captures(trimmed) {
        let month = month_from_abbrev(&caps[1]).ok_or_else(invalid)?;
        let day = caps[2].parse::<u32>().map_err(|_| invalid())?;
        return NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid);
    }

    Err(invalid())
}

/// Canonical stored form.
pub fn format_date_ref(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Short label, e.g. `Jan 05`.
pub fn display_label(date: NaiveDate) -> String {
    date.format(LABEL_FORMAT).to_string()
}

fn month_from_abbrev(value: &str) -> Option<u32> {
    let month = match value.to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

#[cfg(test)]
mod tests {
    use super::{display_label, format_date_ref, parse_date_ref_in_year};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn iso_input_is_accepted_as_is() {
        assert_eq!(
            parse_date_ref_in_year("2024-01-01", 1999).unwrap(),
            date(2024, 1, 1)
        );
    }

    #[test]
    fn legacy_shapes_normalize_to_the_same_day() {
        let expected = date(2024, 3, 7);
        assert_eq!(parse_date_ref_in_year("Mar 07 2024", 1999).unwrap(), expected);
        assert_eq!(parse_date_ref_in_year("mar 7, 2024", 1999).unwrap(), expected);
        assert_eq!(parse_date_ref_in_year(" Mar 07 ", 2024).unwrap(), expected);
    }

    #[test]
    fn impossible_days_are_rejected() {
        assert!(parse_date_ref_in_year("2023-02-29", 2023).is_err());
        assert!(parse_date_ref_in_year("Feb 30", 2024).is_err());
        assert!(parse_date_ref_in_year("Foo 01 2024", 2024).is_err());
        assert!(parse_date_ref_in_year("", 2024).is_err());
        assert!(parse_date_ref_in_year("01/02/2024", 2024).is_err());
    }

    #[test]
    fn leap_day_resolves_only_in_leap_years() {
        assert_eq!(parse_date_ref_in_year("Feb 29", 2024).unwrap(), date(2024, 2, 29));
        assert!(parse_date_ref_in_year("Feb 29", 2023).is_err());
    }

    #[test]
    fn formatting_uses_iso_and_short_label() {
        assert_eq!(format_date_ref(date(2024, 1, 5)), "2024-01-05");
        assert_eq!(display_label(date(2024, 1, 5)), "Jan 05");
    }
}
