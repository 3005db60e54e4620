//! # Validate Subcommand
//!
//! One-shot validation of a form document.
//!
//! ```text
//! techform validate form.json
//! techform validate form.yaml --format json
//! echo '{"name": "ana"}' | techform validate
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use techform_schema::{RawInput, UserSchema};

use crate::render::{exit_code, render_outcome, OutputFormat};

/// Arguments for the `techform validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON or YAML document to validate. Reads JSON from stdin when omitted or `-`.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Output format for field failures.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 on success, 1 on validation failure.
pub fn run_validate(args: &ValidateArgs, schema: &UserSchema, out: &mut impl Write) -> Result<u8> {
    let raw = match &args.path {
        Some(path) if path.as_os_str() != "-" => {
            tracing::info!(path = %path.display(), "validating document");
            RawInput::from_path(path)?
        }
        _ => {
            let content =
                std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?;
            RawInput::from_json_str(&content, "<stdin>")?
        }
    };
    validate_raw(&raw, schema, args.format, out)
}

/// Validate already-loaded input and print the outcome.
pub fn validate_raw(
    raw: &RawInput,
    schema: &UserSchema,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<u8> {
    let outcome = schema.validate(raw);
    let rendered = render_outcome(&outcome, format).context("failed to render outcome")?;
    writeln!(out, "{rendered}")?;
    Ok(exit_code(&outcome))
}
