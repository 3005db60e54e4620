//! # techform-cli — Form Coordinator
//!
//! The thin layer between a user and the core: it gathers raw input,
//! hands it to the schema engine, and prints either the normalized record
//! or one message per failing field.
//!
//! ## Subcommands
//!
//! - `validate`: validate one JSON/YAML document (or JSON on stdin)
//! - `session`: replay a script of edit commands against a form session
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from handling; handlers write to any
//!   `io::Write` so they can be exercised without a terminal.
//! - No validation logic here. Decisions belong to `techform-schema` and
//!   `techform-list`.
//!
//! ## Exit Codes
//!
//! `0` valid, `1` validation failure, `2` operational error.

pub mod render;
pub mod session;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use techform_schema::{SchemaConfig, UserSchema};

/// Build the schema from an optional YAML config file.
pub fn load_schema(config_path: Option<&Path>) -> Result<UserSchema> {
    let config = match config_path {
        Some(path) => SchemaConfig::from_path(path)
            .with_context(|| format!("failed to load schema config {}", path.display()))?,
        None => SchemaConfig::default(),
    };
    tracing::debug!(?config, "schema limits");
    UserSchema::new(config).context("invalid schema config")
}
