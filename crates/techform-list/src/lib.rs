//! # techform-list — Dynamic List Controller
//!
//! Manages the editable technology rows of a form and the session that
//! owns them.
//!
//! ## Stable Identity
//!
//! ```text
//!   append ──▶ counter issues EntryId ──▶ pushed at tail
//!                                            │
//!   bind(id, field, value) ◀── rows addressed by id, never by position
//!                                            │
//!   snapshot() ──▶ positional order ──▶ RawInput["techs"] ──▶ schema
//!                                            │
//!   key_for(id, field) ──▶ techs[position].field (error display only)
//! ```
//!
//! Ids are never reused. Removing a row drops its id for good; the rows
//! after it shift down, and their positional keys are renumbered the next
//! time a snapshot is taken.
//!
//! ## Crate Policy
//!
//! - Single writer, no interior mutability, no locking.
//! - Unknown ids and bad positions are contract violations returned as
//!   [`ListError`], never panics.

pub mod list;
pub mod session;

pub use list::{ListError, TechDraft, TechList};
pub use session::FormSession;
