//! Week strip date list.
//!
//! The strip always covers one full Sunday..Saturday week, so every weekday
//! (Saturday and Sunday included) lands on a stable index.

use crate::model::date_ref::display_label;
use chrono::{Datelike, Duration, NaiveDate};

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekStrip {
    days: [NaiveDate; DAYS_PER_WEEK],
    selected: usize,
}

impl WeekStrip {
    /// The week containing `date`, with `date` selected.
    pub fn containing(date: NaiveDate) -> Self {
        let offset = date.weekday().num_days_from_sunday();
        let start = date - Duration::days(i64::from(offset));
        Self {
            days: std::array::from_fn(|index| start + Duration::days(index as i64)),
            selected: offset as usize,
        }
    }

    pub fn days(&self) -> &[NaiveDate; DAYS_PER_WEEK] {
        &self.days
    }

    pub fn first_day(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn last_day(&self) -> NaiveDate {
        self.days[DAYS_PER_WEEK - 1]
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.days[self.selected]
    }

    /// Moves the selection; out-of-range indexes leave it unchanged.
    pub fn select(&mut self, index: usize) -> Option<NaiveDate> {
        let date = *self.days.get(index)?;
        self.selected = index;
        Some(date)
    }

    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.days.iter().position(|day| *day == date)
    }

    /// Same weekday one week earlier.
    pub fn previous_week(&self) -> Self {
        Self::containing(self.selected_date() - Duration::days(DAYS_PER_WEEK as i64))
    }

    /// Same weekday one week later.
    pub fn next_week(&self) -> Self {
        Self::containing(self.selected_date() + Duration::days(DAYS_PER_WEEK as i64))
    }

    pub fn labels(&self) -> Vec<String> {
        self.days.iter().map(|day| display_label(*day)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{WeekStrip, DAYS_PER_WEEK};
    use chrono::{Datelike, Duration, NaiveDate, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn strip_starts_on_sunday_and_selects_the_given_day() {
        // 2024-01-03 is a Wednesday.
        let strip = WeekStrip::containing(date(2024, 1, 3));
        assert_eq!(strip.first_day(), date(2023, 12, 31));
        assert_eq!(strip.first_day().weekday(), Weekday::Sun);
        assert_eq!(strip.last_day(), date(2024, 1, 6));
        assert_eq!(strip.selected_index(), 3);
        assert_eq!(strip.selected_date(), date(2024, 1, 3));
    }

    #[test]
    fn weekend_days_stay_inside_their_own_week() {
        let sunday = WeekStrip::containing(date(2024, 1, 7));
        assert_eq!(sunday.selected_index(), 0);
        assert_eq!(sunday.first_day(), date(2024, 1, 7));

        let saturday = WeekStrip::containing(date(2024, 1, 13));
        assert_eq!(saturday.selected_index(), 6);
        assert_eq!(saturday.first_day(), date(2024, 1, 7));
    }

    #[test]
    fn days_are_consecutive() {
        let strip = WeekStrip::containing(date(2024, 2, 28));
        for pair in strip.days().windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
        assert_eq!(strip.days().len(), DAYS_PER_WEEK);
    }

    #[test]
    fn select_rejects_out_of_range_index() {
        let mut strip = WeekStrip::containing(date(2024, 1, 3));
        assert_eq!(strip.select(0), Some(date(2023, 12, 31)));
        assert_eq!(strip.select(7), None);
        assert_eq!(strip.selected_index(), 0);
    }

    #[test]
    fn week_navigation_keeps_weekday() {
        let strip = WeekStrip::containing(date(2024, 1, 3));
        assert_eq!(strip.next_week().selected_date(), date(2024, 1, 10));
        assert_eq!(strip.previous_week().selected_date(), date(2023, 12, 27));
    }

    #[test]
    fn labels_use_short_month_format() {
        let strip = WeekStrip::containing(date(2024, 1, 3));
        assert_eq!(strip.labels()[0], "Dec 31");
        assert_eq!(strip.labels()[6], "Jan 06");
    }
}
