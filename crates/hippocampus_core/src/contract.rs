//! Storage contract for the journal store.
//!
//! Table layout, column names and resource path constants shared by the
//! provider, the repositories and callers building projections or filters.
//! MIME strings are provider metadata only.

/// Authority used when no configuration overrides it.
pub const DEFAULT_AUTHORITY: &str = "hippocampus.journal";

/// Scheme prefix of every resource uri.
pub const CONTENT_SCHEME: &str = "content://";

/// Path segment of the entries collection.
pub const PATH_ENTRIES: &str = "entries";

pub const CURSOR_DIR_BASE_TYPE: &str = "vnd.android.cursor.dir";
pub const CURSOR_ITEM_BASE_TYPE: &str = "vnd.android.cursor.item";

/// Columns of the `entries` table.
pub mod entries {
    pub const TABLE_NAME: &str = "entries";

    /// Type: INTEGER, auto-assigned, never reused.
    pub const COLUMN_ID: &str = "_id";
    /// Type: TEXT, required and non-blank.
    pub const COLUMN_TITLE: &str = "title";
    /// Type: TEXT
    pub const COLUMN_BODY: &str = "body";
    /// Type: TEXT
    pub const COLUMN_TAG: &str = "tag";
    /// Type: TEXT, canonical `YYYY-MM-DD`.
    pub const COLUMN_DATE_REF: &str = "date_ref";
    /// Type: INTEGER, 0 or 1.
    pub const COLUMN_PIN: &str = "pin";

    /// Every column, in declaration order.
    pub const ALL_COLUMNS: [&str; 6] = [
        COLUMN_ID,
        COLUMN_TITLE,
        COLUMN_BODY,
        COLUMN_TAG,
        COLUMN_DATE_REF,
        COLUMN_PIN,
    ];
}

/// Columns of the `days` table.
pub mod days {
    pub const TABLE_NAME: &str = "days";

    pub const COLUMN_ID: &str = "_id";
    /// Type: TEXT, canonical `YYYY-MM-DD`, unique.
    pub const COLUMN_DATE: &str = "day_date";
    pub const COLUMN_MOOD: &str = "mood";
    pub const COLUMN_WEATHER: &str = "weather";
    pub const COLUMN_LOCATION: &str = "location";
}

/// MIME type of the entries collection for `authority`.
pub fn entry_list_type(authority: &str) -> String {
    format!("{CURSOR_DIR_BASE_TYPE}/{authority}/{PATH_ENTRIES}")
}

/// MIME type of a single entry for `authority`.
pub fn entry_item_type(authority: &str) -> String {
    format!("{CURSOR_ITEM_BASE_TYPE}/{authority}/{PATH_ENTRIES}")
}

/// Uri of the entries collection for `authority`.
pub fn entries_uri(authority: &str) -> String {
    format!("{CONTENT_SCHEME}{authority}/{PATH_ENTRIES}")
}
