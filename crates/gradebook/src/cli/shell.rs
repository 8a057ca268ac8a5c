//! Interactive shell: one session, many commands.
//!
//! The shell keeps a single [`Session`] alive between lines, so upgrading to
//! premium unlocks the career report for the rest of the shell's lifetime.
//! Lines are split on spaces; double quotes group words (`--name "Ann Lee"`).

use std::io::{BufRead, Write};

use clap::{Parser, Subcommand};
use csv::ReaderBuilder;

use crate::book::Gradebook;
use crate::codec::ScoreCodec;
use crate::error::{Error, Result};
use crate::session::Session;

use super::commands::RecordCommand;
use super::handlers;
use super::render::RenderOptions;

const PROMPT: &str = "gradebook> ";

/// One line typed into the shell.
#[derive(Debug, Parser)]
#[command(name = "gradebook", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    /// The command to execute
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands accepted by the shell.
#[derive(Debug, Subcommand)]
pub enum ShellCommand {
    // add, set-score, edit-score, delete, show, list, premium, career
    #[command(flatten)]
    Record(RecordCommand),

    /// Unlock premium features for this session
    Upgrade,

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

/// Split a shell line into arguments.
///
/// # Errors
///
/// Returns an error if the line is not valid quoted text.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .flexible(true)
        .from_reader(line.trim().as_bytes());

    let Some(row) = reader.records().next() else {
        return Ok(Vec::new());
    };
    let row = row.map_err(|e| Error::shell(format!("could not read line: {e}")))?;
    Ok(row
        .iter()
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect())
}

/// Read commands from `input` until it ends or the user exits.
///
/// Failed commands are reported on `out` and the loop continues.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub fn run<C: ScoreCodec>(
    mut input: impl BufRead,
    out: &mut impl Write,
    book: &mut Gradebook<C>,
    session: &mut Session,
    opts: RenderOptions,
) -> Result<()> {
    writeln!(
        out,
        "gradebook shell: {} students loaded. Type `help` for commands, `exit` to quit.",
        book.records().len()
    )?;

    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let tokens = match tokenize(&line) {
            Ok(tokens) if tokens.is_empty() => continue,
            Ok(tokens) => tokens,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            }
        };

        let parsed = match ShellLine::try_parse_from(&tokens) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Covers `help` as well as usage errors.
                write!(out, "{}", e.render())?;
                continue;
            }
        };

        match parsed.command {
            ShellCommand::Exit => break,
            ShellCommand::Upgrade => {
                if session.upgrade() {
                    writeln!(out, "Upgrade complete. This session now has premium access.")?;
                } else {
                    writeln!(out, "This session already has premium access.")?;
                }
            }
            ShellCommand::Record(command) => {
                if let Err(e) = handlers::execute(&command, book, session, opts, out) {
                    writeln!(out, "error: {e}")?;
                }
            }
        }
    }
    Ok(())
}
