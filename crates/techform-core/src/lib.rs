#![deny(missing_docs)]

//! # techform-core — Foundational Types
//!
//! This crate defines the vocabulary shared by the schema engine, the
//! technology list controller, and the command-line coordinator. It depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Structured field keys.** Errors are addressed by [`FieldKey`], an
//!    enum over the record layout, never by concatenated path strings.
//!    `techs[3].title` is `FieldKey::Tech { index: 3, field: TechField::Title }`.
//!
//! 2. **Validation failures are data.** [`ValidationOutcome`] is either a
//!    fully transformed [`UserRecord`] or a sparse [`FieldErrors`] map.
//!    Nothing in the validation path returns `Err` for bad user input.
//!
//! 3. **Stable list identity.** [`EntryId`] decouples a technology row's
//!    binding identity from its position in the list.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `techform-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod key;
pub mod outcome;
pub mod record;

// Re-export primary types for ergonomic imports.
pub use error::TechformError;
pub use identity::EntryId;
pub use key::{FieldKey, TechField};
pub use outcome::{FieldErrors, ValidationOutcome};
pub use record::{Knowledge, TechEntry, UserRecord};
