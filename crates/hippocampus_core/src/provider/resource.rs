//! Resource path matching.
//!
//! Two patterns exist: `<authority>/entries` (collection) and
//! `<authority>/entries/<id>` (item). The `content://` scheme is optional on
//! input and always present on output.

use crate::contract::{CONTENT_SCHEME, PATH_ENTRIES};
use crate::model::entry::EntryId;
use std::fmt::{Display, Formatter};

/// Target of one provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Every entry; caller filters apply.
    Collection,
    /// One entry; caller filters are replaced by the id.
    Item(EntryId),
}

impl Resource {
    /// Matches `uri` against the entry patterns for `authority`.
    ///
    /// Returns `None` for other authorities, other paths, extra segments and
    /// ids that are not non-negative integers.
    pub fn parse(uri: &str, authority: &str) -> Option<Self> {
        let without_scheme = uri.trim().strip_prefix(CONTENT_SCHEME).unwrap_or(uri.trim());
        let path = without_scheme.strip_prefix(authority)?;
        if !path.is_empty() && !path.starts_with('/') {
            return None;
        }

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [base] if *base == PATH_ENTRIES => Some(Self::Collection),
            [base, id] if *base == PATH_ENTRIES => parse_id(id).map(Self::Item),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<EntryId> {
        match self {
            Self::Collection => None,
            Self::Item(id) => Some(*id),
        }
    }

    pub fn to_uri(&self, authority: &str) -> String {
        match self {
            Self::Collection => format!("{CONTENT_SCHEME}{authority}/{PATH_ENTRIES}"),
            Self::Item(id) => format!("{CONTENT_SCHEME}{authority}/{PATH_ENTRIES}/{id}"),
        }
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collection => write!(f, "collection"),
            Self::Item(id) => write!(f, "item({id})"),
        }
    }
}

fn parse_id(segment: &str) -> Option<EntryId> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse::<EntryId>().ok()
}
