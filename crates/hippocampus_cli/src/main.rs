//! `hippocampus` command-line journal.
//!
//! # Responsibility
//! - Resolve configuration and open one store context per invocation.
//! - Drive `hippocampus_core` services and render their results.
//!
//! # Exit codes
//! - `0` success, `1` runtime failure, `2` rejected input, `3` not found.

mod cli;
mod output;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use cli::{Cli, Commands};
use hippocampus_core::db::DbResult;
use hippocampus_core::{
    init_logging_from_config, DateRefError, DayRecord, DayRepository, EntryPatch,
    EntryValidationError, JournalError, JournalService, NewEntry, ProviderError,
    SqliteDayRepository, StoreConfig, StoreContext, WeekStrip,
};
use log::{error, info};
use serde_json::json;

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_code(&err));
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    init_logging_from_config(&config).context("failed to initialize logging")?;

    let ctx = StoreContext::open(&config)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    info!("event=cli_command module=cli status=start");

    let outcome = execute(&ctx, cli.command, cli.json);
    finish(outcome, ctx.close())
}

/// A command failure wins over a close failure, which is only logged.
fn finish(outcome: Result<()>, close: DbResult<()>) -> Result<()> {
    match (outcome, close) {
        (Ok(()), close) => Ok(close?),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(close_err)) => {
            error!("event=db_close module=cli status=error error={close_err}");
            Err(err)
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<StoreConfig> {
    let config = match cli.config.as_deref() {
        Some(path) => StoreConfig::load_from_file(path)?,
        None => StoreConfig::default(),
    };
    let mut config = config.with_env_overrides();
    if let Some(db) = cli.db.as_ref() {
        config.db_path = db.clone();
    }
    Ok(config)
}

fn execute(ctx: &StoreContext, command: Commands, as_json: bool) -> Result<()> {
    let service = JournalService::try_new(ctx)?;

    match command {
        Commands::Add {
            title,
            body,
            tag,
            date,
            pin,
        } => {
            if is_blank(title.as_deref()) && is_blank(body.as_deref()) {
                println!("Nothing to save");
                return Ok(());
            }
            let mut entry = NewEntry::new(title.unwrap_or_default(), date.unwrap_or_else(today))
                .pinned(pin);
            entry.body = body;
            entry.tag = tag;

            let created = service.create_entry(&entry)?;
            if as_json {
                println!("{}", serde_json::to_string_pretty(&created)?);
            } else {
                println!("Added {}", ctx.entry_uri(created.id));
            }
        }
        Commands::List { date } => {
            let entries = service.entries_for_day(date.unwrap_or_else(today))?;
            if as_json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                println!("{}", output::format_entry_list(&entries).trim_end());
            }
        }
        Commands::Show { id } => {
            let entry = service.get_entry(id)?.ok_or(JournalError::NotFound(id))?;
            if as_json {
                println!("{}", serde_json::to_string_pretty(&entry)?);
            } else {
                println!("{}", output::format_entry_detail(&entry));
            }
        }
        Commands::Edit {
            id,
            title,
            body,
            tag,
            date,
            pin,
            unpin,
        } => {
            let pinned = match (pin, unpin) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let patch = EntryPatch {
                title,
                body: body.map(Some),
                tag: tag.map(Some),
                date_ref: date,
                pinned,
            };

            let updated = service.update_entry(id, &patch)?;
            if as_json {
                println!("{}", serde_json::to_string_pretty(&updated)?);
            } else {
                println!("{}", output::format_entry_line(&updated));
            }
        }
        Commands::Rm { id } => {
            if !service.delete_entry(id)? {
                return Err(JournalError::NotFound(id).into());
            }
            println!("Deleted {}", ctx.entry_uri(id));
        }
        Commands::Clear => {
            let removed = service.delete_all_entries()?;
            println!("Removed {removed} entries");
        }
        Commands::Week { date } => {
            let strip = WeekStrip::containing(date.unwrap_or_else(today));
            let counts = service.day_counts(&strip)?;
            if as_json {
                let days: Vec<_> = counts
                    .iter()
                    .map(|(day, count)| json!({ "date": day, "entries": count }))
                    .collect();
                let payload = json!({ "selected": strip.selected_date(), "days": days });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                print!("{}", output::format_week(&strip, &counts));
            }
        }
        Commands::Day {
            date,
            mood,
            weather,
            location,
        } => {
            let repo = SqliteDayRepository::try_new(ctx.connection())?;
            let stored = repo.get_day(date)?.unwrap_or_else(|| DayRecord::new(date));
            let record = merge_day(stored.clone(), mood, weather, location);
            if record != stored {
                repo.upsert_day(&record)?;
            }
            if as_json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("{}", output::format_day(&record));
            }
        }
        Commands::Mime { uri } => {
            println!("{}", service.provider().type_of(&uri)?);
        }
    }

    Ok(())
}

/// Overlays the supplied fields on `stored`; omitted fields keep their value.
fn merge_day(
    stored: DayRecord,
    mood: Option<i64>,
    weather: Option<i64>,
    location: Option<String>,
) -> DayRecord {
    DayRecord {
        mood: mood.or(stored.mood),
        weather: weather.or(stored.weather),
        location: location.or(stored.location),
        ..stored
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |value| value.trim().is_empty())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<JournalError>() {
        return match err {
            JournalError::Validation(_) => 2,
            JournalError::NotFound(_) => 3,
            JournalError::Provider(err) => provider_exit_code(err),
            JournalError::InconsistentState(_) => 1,
        };
    }
    if let Some(err) = err.downcast_ref::<ProviderError>() {
        return provider_exit_code(err);
    }
    if err.downcast_ref::<EntryValidationError>().is_some()
        || err.downcast_ref::<DateRefError>().is_some()
    {
        return 2;
    }
    1
}

fn provider_exit_code(err: &ProviderError) -> i32 {
    match err {
        ProviderError::Validation(_) => 2,
        ProviderError::UnknownResource(_) | ProviderError::UnsupportedResource { .. } => 3,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hippocampus_core::db::DbError;

    #[test]
    fn exit_codes_follow_error_kind() {
        let validation = anyhow::Error::from(JournalError::Validation(
            EntryValidationError::BlankTitle,
        ));
        assert_eq!(exit_code(&validation), 2);

        let missing = anyhow::Error::from(JournalError::NotFound(7));
        assert_eq!(exit_code(&missing), 3);

        let unknown = anyhow::Error::from(ProviderError::UnknownResource("x".to_string()));
        assert_eq!(exit_code(&unknown), 3);

        assert_eq!(exit_code(&anyhow::anyhow!("disk on fire")), 1);
    }

    #[test]
    fn command_error_survives_close_failure() {
        let close_failure = || {
            Err(DbError::UnsupportedSchemaVersion {
                db_version: 9,
                latest_supported: 1,
            })
        };

        let outcome = finish(Err(JournalError::NotFound(5).into()), close_failure());
        assert_eq!(exit_code(&outcome.unwrap_err()), 3);

        assert!(finish(Ok(()), close_failure()).is_err());
        assert!(finish(Ok(()), Ok(())).is_ok());
    }

    #[test]
    fn merge_day_keeps_fields_not_supplied() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let stored = DayRecord {
            mood: Some(4),
            location: Some("Porto".to_string()),
            ..DayRecord::new(date)
        };

        let merged = merge_day(stored, None, Some(2), None);
        assert_eq!(merged.mood, Some(4));
        assert_eq!(merged.weather, Some(2));
        assert_eq!(merged.location.as_deref(), Some("Porto"));
    }

    #[test]
    fn blank_detection_treats_missing_as_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("  ")));
        assert!(!is_blank(Some("x")));
    }
}
