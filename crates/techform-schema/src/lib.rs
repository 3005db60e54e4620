//! # techform-schema — Schema Engine
//!
//! Validates raw form input against the user record schema and produces a
//! [`ValidationOutcome`](techform_core::ValidationOutcome).
//!
//! ## Rule Tables (`rules`)
//!
//! Each field is described by an ordered [`RuleChain`] of
//! `(predicate, message)` pairs. The first failing rule stops that field's
//! chain and its message is recorded; other fields are still checked.
//!
//! ## Transforms (`transform`)
//!
//! Success-only normalizations: name capitalization, email lowercasing,
//! and knowledge coercion from text.
//!
//! ## Validation (`validate`)
//!
//! [`UserSchema::validate`] runs every field's chain, collects failures into
//! a [`FieldErrors`](techform_core::FieldErrors) map keyed by
//! [`FieldKey`](techform_core::FieldKey), and returns the transformed
//! record only when nothing failed.
//!
//! ## Crate Policy
//!
//! - Depends only on `techform-core` internally.
//! - Bad user input is never an `Err`. Only unreadable documents and invalid
//!   configuration are.

pub mod config;
pub mod raw;
pub mod rules;
pub mod transform;
pub mod validate;

pub use config::{ConfigError, SchemaConfig};
pub use raw::RawInput;
pub use rules::{Rule, RuleChain};
pub use transform::{coerce_knowledge, is_email_shape, transform_email, transform_name};
pub use validate::UserSchema;
