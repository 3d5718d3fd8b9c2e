use crate::domain::lookup_key::LookupKey;

/// A pending cache repopulation, submitted to the background writer after a
/// trip count was fetched from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheWrite {
    pub key: LookupKey,
    pub trips: i64,
}
