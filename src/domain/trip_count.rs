//! Core domain entity: a trip count per medallion.

/// Number of trips recorded for a single medallion.
///
/// Produced either by the cache or by an aggregate COUNT query against the
/// trip store. `trips` is never negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripCount {
    pub medallion: String,
    pub trips: i64,
}

impl TripCount {
    pub fn new(medallion: impl Into<String>, trips: i64) -> Self {
        Self {
            medallion: medallion.into(),
            trips,
        }
    }
}
