//! # Outcome Rendering
//!
//! Success prints the record as two-space pretty JSON. Failure prints one
//! `key: message` line per field, or a JSON object keyed by field with
//! `--format json`.

use clap::ValueEnum;
use techform_core::ValidationOutcome;

/// How failures are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `key: message` lines.
    #[default]
    Text,
    /// A JSON object keyed by field.
    Json,
}

/// Render an outcome for display.
pub fn render_outcome(
    outcome: &ValidationOutcome,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match (outcome, format) {
        (ValidationOutcome::Success(record), _) => serde_json::to_string_pretty(record),
        (ValidationOutcome::Failure(errors), OutputFormat::Text) => Ok(errors.to_string()),
        (ValidationOutcome::Failure(errors), OutputFormat::Json) => {
            serde_json::to_string_pretty(errors)
        }
    }
}

/// Process exit code for an outcome.
pub fn exit_code(outcome: &ValidationOutcome) -> u8 {
    if outcome.is_success() {
        0
    } else {
        1
    }
}
