//! # Stable Entry Identity
//!
//! [`EntryId`] identifies one technology row for the lifetime of a form
//! session. Ids are issued from a monotonically increasing counter by the
//! list controller and are never reused, so a removed row's id can never
//! be confused with a row appended later.

use serde::{Deserialize, Serialize};

/// Synthetic identifier for a technology list entry.
///
/// Ordering follows issue order, which is not necessarily list order once
/// rows have been moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(u64);

impl EntryId {
    /// Wrap a raw counter value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tech:{}", self.0)
    }
}
