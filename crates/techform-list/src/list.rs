//! # Technology List
//!
//! Arena-style store for technology rows. A monotonically increasing
//! counter issues [`EntryId`]s, `order` holds the positional sequence, and
//! `slots` holds each row's raw values keyed by id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use techform_core::{EntryId, FieldErrors, FieldKey, TechField};

/// A row's raw, pre-validation values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechDraft {
    /// Title as typed.
    pub title: String,
    /// Knowledge as typed (text), or a number when seeded programmatically.
    pub knowledge: Value,
}

impl TechDraft {
    /// Create a draft from typed values.
    pub fn new(title: impl Into<String>, knowledge: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            knowledge: Value::String(knowledge.into()),
        }
    }

    /// The row added by an "add technology" action: empty title, knowledge 0.
    pub fn blank() -> Self {
        Self {
            title: String::new(),
            knowledge: json!(0),
        }
    }

    fn to_raw(&self) -> Value {
        json!({ "title": self.title, "knowledge": self.knowledge })
    }
}

impl Default for TechDraft {
    fn default() -> Self {
        Self::blank()
    }
}

/// Errors from list operations.
#[derive(Error, Debug, PartialEq)]
pub enum ListError {
    /// The id was never issued, or its row was removed.
    #[error("unknown technology entry: {0}")]
    UnknownEntry(EntryId),

    /// A positional index past the end of the list.
    #[error("position {position} out of range for {len} technology entries")]
    PositionOutOfRange {
        /// Requested position.
        position: usize,
        /// Current list length.
        len: usize,
    },

    /// The key names something that cannot be bound to an input.
    #[error("field '{0}' is not editable")]
    NotEditable(FieldKey),
}

/// Ordered, independently keyed technology rows.
#[derive(Debug, Clone, Default)]
pub struct TechList {
    next_id: u64,
    order: Vec<EntryId>,
    slots: HashMap<EntryId, TechDraft>,
}

impl TechList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// A list pre-seeded with `drafts`, in order.
    pub fn seeded(drafts: impl IntoIterator<Item = TechDraft>) -> Self {
        let mut list = Self::new();
        for draft in drafts {
            list.append(draft);
        }
        list
    }

    /// Insert `draft` at the tail under a fresh id.
    ///
    /// Existing rows keep their ids and positions.
    pub fn append(&mut self, draft: TechDraft) -> EntryId {
        let id = EntryId::from_raw(self.next_id);
        self.next_id += 1;
        self.order.push(id);
        self.slots.insert(id, draft);
        tracing::debug!(%id, position = self.order.len() - 1, "appended technology entry");
        id
    }

    /// Drop the row permanently. Rows after it shift down one position.
    pub fn remove(&mut self, id: EntryId) -> Result<TechDraft, ListError> {
        let position = self.position(id)?;
        self.order.remove(position);
        let draft = self.slots.remove(&id).ok_or(ListError::UnknownEntry(id))?;
        tracing::debug!(%id, position, "removed technology entry");
        Ok(draft)
    }

    /// Move the row to `new_position`, shifting the rows in between.
    pub fn move_to(&mut self, id: EntryId, new_position: usize) -> Result<(), ListError> {
        let position = self.position(id)?;
        if new_position >= self.order.len() {
            return Err(ListError::PositionOutOfRange {
                position: new_position,
                len: self.order.len(),
            });
        }
        let moved = self.order.remove(position);
        self.order.insert(new_position, moved);
        tracing::debug!(%id, from = position, to = new_position, "moved technology entry");
        Ok(())
    }

    /// Raw values of the row.
    pub fn get(&self, id: EntryId) -> Result<&TechDraft, ListError> {
        self.slots.get(&id).ok_or(ListError::UnknownEntry(id))
    }

    /// Current position of the row.
    pub fn position(&self, id: EntryId) -> Result<usize, ListError> {
        self.order
            .iter()
            .position(|candidate| *candidate == id)
            .ok_or(ListError::UnknownEntry(id))
    }

    /// Id of the row currently at `position`.
    pub fn id_at(&self, position: usize) -> Result<EntryId, ListError> {
        self.order
            .get(position)
            .copied()
            .ok_or(ListError::PositionOutOfRange {
                position,
                len: self.order.len(),
            })
    }

    /// Ids in positional order.
    pub fn ids(&self) -> &[EntryId] {
        &self.order
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Bind a typed value to one sub-field of a row.
    pub fn bind(
        &mut self,
        id: EntryId,
        field: TechField,
        value: impl Into<String>,
    ) -> Result<(), ListError> {
        let draft = self.slots.get_mut(&id).ok_or(ListError::UnknownEntry(id))?;
        let value = value.into();
        match field {
            TechField::Title => draft.title = value,
            TechField::Knowledge => draft.knowledge = Value::String(value),
        }
        Ok(())
    }

    /// Bind the row's title.
    pub fn set_title(&mut self, id: EntryId, title: impl Into<String>) -> Result<(), ListError> {
        self.bind(id, TechField::Title, title)
    }

    /// Bind the row's knowledge text.
    pub fn set_knowledge(
        &mut self,
        id: EntryId,
        knowledge: impl Into<String>,
    ) -> Result<(), ListError> {
        self.bind(id, TechField::Knowledge, knowledge)
    }

    /// `(id, draft)` pairs in positional order.
    pub fn rows(&self) -> impl Iterator<Item = (EntryId, &TechDraft)> {
        self.order
            .iter()
            .filter_map(|id| self.slots.get(id).map(|draft| (*id, draft)))
    }

    /// Current raw values in positional order.
    pub fn snapshot(&self) -> Vec<TechDraft> {
        self.rows().map(|(_, draft)| draft.clone()).collect()
    }

    /// The snapshot as the raw `techs` value handed to the schema.
    pub fn to_raw(&self) -> Value {
        Value::Array(self.rows().map(|(_, draft)| draft.to_raw()).collect())
    }

    /// Positional key of a row's sub-field, for attaching error messages.
    pub fn key_for(&self, id: EntryId, field: TechField) -> Result<FieldKey, ListError> {
        Ok(FieldKey::tech(self.position(id)?, field))
    }

    /// Messages attached to a row by the last validation of this snapshot.
    pub fn errors_for<'a>(
        &self,
        id: EntryId,
        errors: &'a FieldErrors,
    ) -> Result<Vec<(TechField, &'a str)>, ListError> {
        let position = self.position(id)?;
        Ok(errors
            .for_entry(position)
            .filter_map(|(key, message)| match key {
                FieldKey::Tech { field, .. } => Some((*field, message)),
                _ => None,
            })
            .collect())
    }
}
