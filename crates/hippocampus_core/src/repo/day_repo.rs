//! Day metadata repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist optional mood/weather/location per calendar day.
//!
//! # Invariants
//! - At most one record per date (`day_date` is unique).
//! - Dates are stored as `YYYY-MM-DD`.

use crate::contract::days;
use crate::db::{table_exists, table_has_column};
use crate::model::date_ref::format_date_ref;
use crate::model::day::DayRecord;
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

const DAY_SELECT_SQL: &str = "SELECT
    day_date,
    mood,
    weather,
    location
FROM days";

/// Repository interface for day metadata.
pub trait DayRepository {
    /// Inserts or replaces the record for `record.date`.
    fn upsert_day(&self, record: &DayRecord) -> RepoResult<()>;
    fn get_day(&self, date: NaiveDate) -> RepoResult<Option<DayRecord>>;
    /// Records with `from <= date <= to`, oldest first.
    fn list_days(&self, from: NaiveDate, to: NaiveDate) -> RepoResult<Vec<DayRecord>>;
    /// Returns whether a record existed.
    fn delete_day(&self, date: NaiveDate) -> RepoResult<bool>;
}

/// SQLite-backed day repository.
pub struct SqliteDayRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDayRepository<'conn> {
    /// Constructs a repository from a connection with the schema applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        if !table_exists(conn, days::TABLE_NAME)? {
            return Err(RepoError::MissingRequiredTable(days::TABLE_NAME));
        }
        for column in [
            days::COLUMN_DATE,
            days::COLUMN_MOOD,
            days::COLUMN_WEATHER,
            days::COLUMN_LOCATION,
        ] {
            if !table_has_column(conn, days::TABLE_NAME, column)? {
                return Err(RepoError::MissingRequiredColumn {
                    table: days::TABLE_NAME,
                    column,
                });
            }
        }
        Ok(Self { conn })
    }
}

impl DayRepository for SqliteDayRepository<'_> {
    fn upsert_day(&self, record: &DayRecord) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO days (day_date, mood, weather, location)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(day_date) DO UPDATE SET
                mood     = excluded.mood,
                weather  = excluded.weather,
                location = excluded.location;",
            params![
                format_date_ref(record.date),
                record.mood,
                record.weather,
                record.location.as_deref(),
            ],
        )?;
        Ok(())
    }

    fn get_day(&self, date: NaiveDate) -> RepoResult<Option<DayRecord>> {
        let raw = self
            .conn
            .query_row(
                &format!("{DAY_SELECT_SQL} WHERE day_date = ?1;"),
                [format_date_ref(date)],
                read_raw_day,
            )
            .optional()?;
        raw.map(RawDay::into_record).transpose()
    }

    fn list_days(&self, from: NaiveDate, to: NaiveDate) -> RepoResult<Vec<DayRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DAY_SELECT_SQL}
             WHERE day_date BETWEEN ?1 AND ?2
             ORDER BY day_date ASC;"
        ))?;
        let mut rows = stmt.query(params![format_date_ref(from), format_date_ref(to)])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(read_raw_day(row)?.into_record()?);
        }
        Ok(records)
    }

    fn delete_day(&self, date: NaiveDate) -> RepoResult<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM days WHERE day_date = ?1;", [format_date_ref(date)])?;
        Ok(deleted > 0)
    }
}

struct RawDay {
    date: String,
    mood: Option<i64>,
    weather: Option<i64>,
    location: Option<String>,
}

impl RawDay {
    fn into_record(self) -> RepoResult<DayRecord> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid date value `{}` in days.day_date",
                self.date
            ))
        })?;
        Ok(DayRecord {
            date,
            mood: self.mood,
            weather: self.weather,
            location: self.location,
        })
    }
}

fn read_raw_day(row: &Row<'_>) -> rusqlite::Result<RawDay> {
    Ok(RawDay {
        date: row.get("day_date")?,
        mood: row.get("mood")?,
        weather: row.get("weather")?,
        location: row.get("location")?,
    })
}
