//! # Field Keys — Error Addressing Scheme
//!
//! A [`FieldKey`] names one addressable field of the record under edit:
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `name` | The user's name |
//! | `email` | The user's email |
//! | `password` | The user's password |
//! | `techs` | The technology list as a whole (length rule) |
//! | `techs[i].title` | Title of the entry at position `i` |
//! | `techs[i].knowledge` | Knowledge level of the entry at position `i` |
//!
//! Keys are structured values. The dotted/indexed string form is produced by
//! `Display` and accepted by `FromStr`; `FromStr` also accepts the
//! `techs.i.title` form used by form-binding paths.
//!
//! The derived ordering puts scalar fields first in record order, then the
//! list-level key, then entries by position, so error maps iterate in the
//! same order the fields are laid out.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TechformError;

/// A sub-field of a technology entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechField {
    /// The technology's title.
    Title,
    /// The self-assessed knowledge level.
    Knowledge,
}

impl TechField {
    /// Returns the field name as it appears in keys and raw input.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Knowledge => "knowledge",
        }
    }
}

impl fmt::Display for TechField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TechField {
    type Err = TechformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "knowledge" => Ok(Self::Knowledge),
            other => Err(TechformError::InvalidFieldKey(other.to_string())),
        }
    }
}

/// Address of a field, or of the technology list itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    /// `name`
    Name,
    /// `email`
    Email,
    /// `password`
    Password,
    /// `techs`. List-level failures attach here, never to an entry.
    Techs,
    /// `techs[index].field`
    Tech {
        /// Position of the entry in the submitted list.
        index: usize,
        /// Which sub-field.
        field: TechField,
    },
}

impl FieldKey {
    /// Shorthand for an entry sub-field key.
    pub fn tech(index: usize, field: TechField) -> Self {
        Self::Tech { index, field }
    }

    /// Returns the entry position for entry keys.
    pub fn entry_index(&self) -> Option<usize> {
        match self {
            Self::Tech { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("name"),
            Self::Email => f.write_str("email"),
            Self::Password => f.write_str("password"),
            Self::Techs => f.write_str("techs"),
            Self::Tech { index, field } => write!(f, "techs[{index}].{field}"),
        }
    }
}

impl FromStr for FieldKey {
    type Err = TechformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TechformError::InvalidFieldKey(s.to_string());
        match s {
            "name" => return Ok(Self::Name),
            "email" => return Ok(Self::Email),
            "password" => return Ok(Self::Password),
            "techs" => return Ok(Self::Techs),
            _ => {}
        }

        let rest = s.strip_prefix("techs").ok_or_else(invalid)?;
        // Either `[3].title` or `.3.title`.
        let (index, field) = if let Some(bracketed) = rest.strip_prefix('[') {
            bracketed.split_once("].").ok_or_else(invalid)?
        } else if let Some(dotted) = rest.strip_prefix('.') {
            dotted.split_once('.').ok_or_else(invalid)?
        } else {
            return Err(invalid());
        };

        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let index: usize = index.parse().map_err(|_| invalid())?;
        let field: TechField = field.parse().map_err(|_| invalid())?;
        Ok(Self::Tech { index, field })
    }
}

impl Serialize for FieldKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
