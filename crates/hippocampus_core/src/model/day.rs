//! Per-day metadata (mood, weather, location).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Optional metadata attached to one calendar day.
///
/// Entries and day records share a date value but are not linked by a
/// foreign key; either may exist without the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub mood: Option<i64>,
    pub weather: Option<i64>,
    pub location: Option<String>,
}

impl DayRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            mood: None,
            weather: None,
            location: None,
        }
    }
}
