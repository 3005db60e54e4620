//! # Validated Records
//!
//! The output side of validation. Values of these types only exist after
//! every field passed its rules and transforms have run; the raw input side
//! lives in `techform-schema`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The validated, normalized user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Name with each word's first character uppercased.
    pub name: String,
    /// Lowercased email address.
    pub email: String,
    /// Password, verbatim.
    pub password: String,
    /// Technologies in submitted order.
    pub techs: Vec<TechEntry>,
}

/// A validated technology entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechEntry {
    /// Non-empty title.
    pub title: String,
    /// Knowledge level within the configured range.
    pub knowledge: Knowledge,
}

/// A knowledge level coerced from raw text or a number.
///
/// Whole values serialize as JSON integers (`80`, not `80.0`) so the
/// rendered record matches what the user typed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Knowledge(f64);

/// Largest integer magnitude an `f64` represents exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Knowledge {
    /// Wrap a coerced value.
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// The value as an integer, when it is whole.
    pub fn as_integer(&self) -> Option<i64> {
        if self.0.is_finite() && self.0.fract() == 0.0 && self.0.abs() <= MAX_EXACT_INTEGER {
            Some(self.0 as i64)
        } else {
            None
        }
    }
}

impl From<f64> for Knowledge {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<u8> for Knowledge {
    fn from(value: u8) -> Self {
        Self(f64::from(value))
    }
}

impl std::fmt::Display for Knowledge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_integer() {
            Some(whole) => write!(f, "{whole}"),
            None => write!(f, "{}", self.0),
        }
    }
}

impl Serialize for Knowledge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_integer() {
            Some(whole) => serializer.serialize_i64(whole),
            None => serializer.serialize_f64(self.0),
        }
    }
}

impl<'de> Deserialize<'de> for Knowledge {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self)
    }
}
