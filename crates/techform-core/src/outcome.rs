//! # Validation Outcome
//!
//! The result of running the schema over raw input: either the transformed
//! record or a sparse map from [`FieldKey`] to message. Only failing fields
//! appear in the map, and each key carries exactly one message (the first
//! rule that failed in that field's chain).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::key::FieldKey;
use crate::record::UserRecord;

/// Sparse, ordered map of field failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: BTreeMap<FieldKey, String>,
}

impl FieldErrors {
    /// Create an empty error map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `key`.
    ///
    /// A field's chain stops at its first failing rule, so the first message
    /// recorded for a key is kept and later ones are ignored.
    pub fn insert(&mut self, key: FieldKey, message: impl Into<String>) {
        self.errors.entry(key).or_insert_with(|| message.into());
    }

    /// Message for `key`, if that field failed.
    pub fn get(&self, key: &FieldKey) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    /// Whether `key` failed.
    pub fn contains(&self, key: &FieldKey) -> bool {
        self.errors.contains_key(key)
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no field failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failing keys in layout order.
    pub fn keys(&self) -> impl Iterator<Item = &FieldKey> {
        self.errors.keys()
    }

    /// `(key, message)` pairs in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &str)> {
        self.errors.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Failures attached to the entry at `index`.
    pub fn for_entry(&self, index: usize) -> impl Iterator<Item = (&FieldKey, &str)> {
        self.iter()
            .filter(move |(key, _)| key.entry_index() == Some(index))
    }
}

impl FromIterator<(FieldKey, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (FieldKey, String)>>(iter: I) -> Self {
        let mut errors = Self::new();
        for (key, message) in iter {
            errors.insert(key, message);
        }
        errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, message)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{key}: {message}")?;
        }
        Ok(())
    }
}

/// Result of validating one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// Every field passed; transforms have been applied.
    Success(UserRecord),
    /// At least one field failed.
    Failure(FieldErrors),
}

impl ValidationOutcome {
    /// Whether validation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The validated record, on success.
    pub fn record(&self) -> Option<&UserRecord> {
        match self {
            Self::Success(record) => Some(record),
            Self::Failure(_) => None,
        }
    }

    /// The error map, on failure.
    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Success(_) => None,
            Self::Failure(errors) => Some(errors),
        }
    }

    /// Message for `key`, if present. Always `None` on success.
    pub fn message(&self, key: &FieldKey) -> Option<&str> {
        self.errors().and_then(|errors| errors.get(key))
    }

    /// Convert into a `Result` for `?`-style consumers.
    pub fn into_result(self) -> Result<UserRecord, FieldErrors> {
        match self {
            Self::Success(record) => Ok(record),
            Self::Failure(errors) => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::TechField;

    #[test]
    fn test_first_message_wins() {
        let mut errors = FieldErrors::new();
        errors.insert(FieldKey::Email, "email is required");
        errors.insert(FieldKey::Email, "invalid email format");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(&FieldKey::Email), Some("email is required"));
    }

    #[test]
    fn test_display_lists_keys_in_layout_order() {
        let mut errors = FieldErrors::new();
        errors.insert(FieldKey::Techs, "insert at least 2 technologies");
        errors.insert(FieldKey::Password, "password must be at least 6 characters");
        assert_eq!(
            errors.to_string(),
            "password: password must be at least 6 characters\ntechs: insert at least 2 technologies"
        );
    }

    #[test]
    fn test_for_entry_filters_by_position() {
        let errors: FieldErrors = [
            (FieldKey::tech(0, TechField::Title), "title is required".to_string()),
            (FieldKey::tech(1, TechField::Knowledge), "out of range".to_string()),
            (FieldKey::Techs, "too few".to_string()),
        ]
        .into_iter()
        .collect();
        let entry_one: Vec<_> = errors.for_entry(1).collect();
        assert_eq!(entry_one, [(&FieldKey::tech(1, TechField::Knowledge), "out of range")]);
    }

    #[test]
    fn test_errors_serialize_as_string_keyed_map() {
        let mut errors = FieldErrors::new();
        errors.insert(
            FieldKey::tech(0, TechField::Knowledge),
            "knowledge must be between 1 and 100",
        );
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"techs[0].knowledge": "knowledge must be between 1 and 100"})
        );
    }

    #[test]
    fn test_outcome_accessors() {
        let mut errors = FieldErrors::new();
        errors.insert(FieldKey::Name, "name is required");
        let outcome = ValidationOutcome::Failure(errors);
        assert!(!outcome.is_success());
        assert!(outcome.record().is_none());
        assert_eq!(outcome.message(&FieldKey::Name), Some("name is required"));
        assert_eq!(outcome.message(&FieldKey::Email), None);
        assert!(outcome.into_result().is_err());
    }
}
