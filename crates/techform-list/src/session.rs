//! # Form Session
//!
//! The single record under edit: the scalar inputs plus the technology
//! list. The session is the only writer; the schema reads a snapshot of it
//! at submit time.

use serde_json::{Map, Value};

use techform_core::{EntryId, FieldKey, ValidationOutcome};
use techform_schema::{RawInput, UserSchema};

use crate::list::{ListError, TechDraft, TechList};

/// Raw values of one form being filled in.
#[derive(Debug, Clone, Default)]
pub struct FormSession {
    name: String,
    email: String,
    password: String,
    techs: TechList,
}

impl FormSession {
    /// A blank form with no technology rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// A blank form with pre-seeded technology rows.
    pub fn with_techs(techs: TechList) -> Self {
        Self {
            techs,
            ..Self::default()
        }
    }

    /// Bind a typed value to the field addressed by `key`.
    ///
    /// Entry keys resolve to the row currently at that position.
    pub fn set(&mut self, key: &FieldKey, value: impl Into<String>) -> Result<(), ListError> {
        match key {
            FieldKey::Name => self.name = value.into(),
            FieldKey::Email => self.email = value.into(),
            FieldKey::Password => self.password = value.into(),
            FieldKey::Techs => return Err(ListError::NotEditable(*key)),
            FieldKey::Tech { index, field } => {
                let id = self.techs.id_at(*index)?;
                self.techs.bind(id, *field, value)?;
            }
        }
        Ok(())
    }

    /// Current raw value of a scalar field.
    pub fn value(&self, key: &FieldKey) -> Option<&str> {
        match key {
            FieldKey::Name => Some(self.name.as_str()),
            FieldKey::Email => Some(self.email.as_str()),
            FieldKey::Password => Some(self.password.as_str()),
            FieldKey::Techs | FieldKey::Tech { .. } => None,
        }
    }

    /// "Add technology": append a blank row.
    pub fn add_tech(&mut self) -> EntryId {
        self.techs.append(TechDraft::blank())
    }

    /// The technology rows.
    pub fn techs(&self) -> &TechList {
        &self.techs
    }

    /// Mutable access to the technology rows.
    pub fn techs_mut(&mut self) -> &mut TechList {
        &mut self.techs
    }

    /// Materialize the combined raw record for the schema.
    pub fn raw_input(&self) -> RawInput {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(self.name.clone()));
        fields.insert("email".to_string(), Value::String(self.email.clone()));
        fields.insert("password".to_string(), Value::String(self.password.clone()));
        fields.insert("techs".to_string(), self.techs.to_raw());
        RawInput::new(fields)
    }

    /// Validate the current state.
    pub fn submit(&self, schema: &UserSchema) -> ValidationOutcome {
        let outcome = schema.validate(&self.raw_input());
        match &outcome {
            ValidationOutcome::Success(_) => {
                tracing::info!(techs = self.techs.len(), "form submitted");
            }
            ValidationOutcome::Failure(errors) => {
                tracing::info!(
                    techs = self.techs.len(),
                    failed_fields = errors.len(),
                    "form rejected"
                );
            }
        }
        outcome
    }
}
