//! Composite cache keys for trip count lookups.

use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Cache key for a trip count entry.
///
/// Two shapes exist and are never interchangeable:
///
/// - [`LookupKey::MedallionOnDate`] - single-medallion lookups scoped to a
///   pickup date
/// - [`LookupKey::Medallion`] - date-less batch lookups
///
/// The cache is keyed on this enum directly, so entries written by one
/// lookup mode can never collide with entries written by the other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LookupKey {
    /// Trip count for one medallion on one calendar date.
    MedallionOnDate {
        medallion: String,
        pickup_date: NaiveDate,
    },
    /// Total trip count for one medallion across all dates.
    Medallion(String),
}

impl LookupKey {
    /// Key for a single-medallion lookup on a pickup date.
    pub fn for_pickup_date(medallion: impl Into<String>, pickup_date: NaiveDate) -> Self {
        Self::MedallionOnDate {
            medallion: medallion.into(),
            pickup_date,
        }
    }

    /// Key for a date-less medallion lookup.
    pub fn for_medallion(medallion: impl Into<String>) -> Self {
        Self::Medallion(medallion.into())
    }

    /// Canonical string form, used for logging.
    ///
    /// Renders as `medallion|YYYYMMDD` for dated keys and the bare medallion
    /// otherwise. Collision-free for any medallion that does not itself
    /// contain `|`; this is a documented constraint, not an enforced check.
    pub fn canonical(&self) -> String {
        match self {
            Self::MedallionOnDate {
                medallion,
                pickup_date,
            } => format!(
                "{}|{:04}{:02}{:02}",
                medallion,
                pickup_date.year(),
                pickup_date.month(),
                pickup_date.day()
            ),
            Self::Medallion(medallion) => medallion.clone(),
        }
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}
