//! # Session Subcommand
//!
//! Replays a script of form edits, one command per line, against a single
//! [`FormSession`]. This is how the list controller is driven from the
//! command line.
//!
//! ```text
//! # comment lines and blank lines are skipped
//! set name maria silva
//! set email M@X.COM
//! set password 123456
//! add
//! set techs[0].title React
//! set techs.0.knowledge 80
//! add Node 70
//! remove 1
//! move 1 0
//! show
//! submit
//! ```
//!
//! `add` appends a blank row (empty title, knowledge 0); `add <title>
//! <knowledge>` appends a filled one. `show` prints the raw form state.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use techform_core::FieldKey;
use techform_list::FormSession;
use techform_schema::UserSchema;

use crate::render::{exit_code, render_outcome, OutputFormat};

/// Arguments for the `techform session` subcommand.
#[derive(Args, Debug)]
pub struct SessionArgs {
    /// Script of edit commands. Reads stdin when omitted or `-`.
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Output format for field failures.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// One edit command.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Bind a value to a field.
    Set {
        /// Field to bind.
        key: FieldKey,
        /// Text as typed; may be empty.
        value: String,
    },
    /// Append a blank technology row.
    Add,
    /// Append a technology row with values.
    AddFilled {
        /// Row title.
        title: String,
        /// Knowledge text.
        knowledge: String,
    },
    /// Remove the row at a position.
    Remove(usize),
    /// Move the row at `from` to `to`.
    Move {
        /// Current position.
        from: usize,
        /// Target position.
        to: usize,
    },
    /// Print the current raw form state.
    Show,
    /// Validate and print the outcome.
    Submit,
}

/// Parse one script line. Blank lines and comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>> {
    let line = strip_comment(line).trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim_start()));

    let command = match verb {
        "set" => {
            let (key, value) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(key, value)| (key, value.trim_start()));
            if key.is_empty() {
                bail!("set requires a field key");
            }
            SessionCommand::Set {
                key: key.parse()?,
                value: value.to_string(),
            }
        }
        "add" if rest.is_empty() => SessionCommand::Add,
        "add" => match rest.rsplit_once(char::is_whitespace) {
            Some((title, knowledge)) => SessionCommand::AddFilled {
                title: title.trim_end().to_string(),
                knowledge: knowledge.to_string(),
            },
            None => bail!("add takes either no arguments or <title> <knowledge>"),
        },
        "remove" => SessionCommand::Remove(parse_index(rest)?),
        "move" => match rest.split_once(char::is_whitespace) {
            Some((from, to)) => SessionCommand::Move {
                from: parse_index(from)?,
                to: parse_index(to.trim())?,
            },
            None => bail!("move requires <from> <to>"),
        },
        "show" if rest.is_empty() => SessionCommand::Show,
        "submit" if rest.is_empty() => SessionCommand::Submit,
        other => bail!("unknown command {other:?}"),
    };
    Ok(Some(command))
}

fn strip_comment(line: &str) -> &str {
    match line.trim_start().strip_prefix('#') {
        Some(_) => "",
        None => line,
    }
}

fn parse_index(raw: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .with_context(|| format!("expected a row position, got {raw:?}"))
}

/// Apply one command to the session, printing anything it produces.
///
/// Returns the exit code of a `submit`, if the command was one.
pub fn apply_command(
    session: &mut FormSession,
    command: SessionCommand,
    schema: &UserSchema,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<Option<u8>> {
    match command {
        SessionCommand::Set { key, value } => session.set(&key, value)?,
        SessionCommand::Add => {
            session.add_tech();
        }
        SessionCommand::AddFilled { title, knowledge } => {
            let id = session.add_tech();
            session.techs_mut().set_title(id, title)?;
            session.techs_mut().set_knowledge(id, knowledge)?;
        }
        SessionCommand::Remove(position) => {
            let id = session.techs().id_at(position)?;
            session.techs_mut().remove(id)?;
        }
        SessionCommand::Move { from, to } => {
            let id = session.techs().id_at(from)?;
            session.techs_mut().move_to(id, to)?;
        }
        SessionCommand::Show => {
            let state = serde_json::to_string_pretty(&session.raw_input().to_json())?;
            writeln!(out, "{state}")?;
        }
        SessionCommand::Submit => {
            let outcome = session.submit(schema);
            writeln!(out, "{}", render_outcome(&outcome, format)?)?;
            return Ok(Some(exit_code(&outcome)));
        }
    }
    Ok(None)
}

/// Replay a whole script. Returns the exit code of the last `submit`
/// (0 if the script never submits).
pub fn run_script(
    script: &str,
    schema: &UserSchema,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<u8> {
    let mut session = FormSession::new();
    let mut code = 0;
    let mut submits = 0usize;
    for (number, line) in script.lines().enumerate() {
        let number = number + 1;
        let Some(command) = parse_command(line).with_context(|| format!("line {number}"))? else {
            continue;
        };
        tracing::debug!(line = number, ?command, "applying");
        if let Some(submitted) = apply_command(&mut session, command, schema, format, out)
            .with_context(|| format!("line {number}"))?
        {
            code = submitted;
            submits += 1;
        }
    }
    tracing::info!(submits, techs = session.techs().len(), "session finished");
    Ok(code)
}

/// Execute the session subcommand.
pub fn run_session(args: &SessionArgs, schema: &UserSchema, out: &mut impl Write) -> Result<u8> {
    let script = match &args.script {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?,
        _ => std::io::read_to_string(std::io::stdin()).context("failed to read stdin")?,
    };
    run_script(&script, schema, args.format, out)
}
