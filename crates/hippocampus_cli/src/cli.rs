//! CLI command definitions

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use hippocampus_core::parse_date_ref;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hippocampus")]
#[command(about = "Day-by-day journal backed by SQLite", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML config file (db_path, authority, log_level, log_dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Database file; overrides config and HIPPOCAMPUS_DB
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a new entry
    Add {
        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        body: Option<String>,

        #[arg(long)]
        tag: Option<String>,

        /// Day of the entry (YYYY-MM-DD, "Jan 05 2024" or "Jan 05"; default: today)
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,

        /// Pin the entry to the top of its day
        #[arg(long)]
        pin: bool,
    },

    /// List the entries of one day
    List {
        /// Day to list (default: today)
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },

    /// Show one entry
    Show { id: i64 },

    /// Change fields of an existing entry
    Edit {
        id: i64,

        #[arg(short, long)]
        title: Option<String>,

        /// New body; an empty value clears it
        #[arg(short, long)]
        body: Option<String>,

        /// New tag; an empty value clears it
        #[arg(long)]
        tag: Option<String>,

        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,

        #[arg(long, conflicts_with = "unpin")]
        pin: bool,

        #[arg(long)]
        unpin: bool,
    },

    /// Delete one entry
    Rm { id: i64 },

    /// Delete every entry
    Clear,

    /// Show the Sunday..Saturday strip around a day with entry counts
    Week {
        #[arg(short, long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },

    /// Show or set the mood, weather and location of a day
    Day {
        #[arg(value_parser = parse_date_arg)]
        date: NaiveDate,

        #[arg(long)]
        mood: Option<i64>,

        #[arg(long)]
        weather: Option<i64>,

        #[arg(long)]
        location: Option<String>,
    },

    /// Print the MIME type of a resource path
    Mime { uri: String },
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date_ref(value).map_err(|err| err.to_string())
}
