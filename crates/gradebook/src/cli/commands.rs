//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands. The record
//! commands are shared between one-shot invocations and the interactive shell.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::config::DisplayFormat;

/// Commands that read or change student records.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum RecordCommand {
    /// Add a new student
    Add(AddCommand),

    /// Add a course score, or overwrite it if the course already has one
    SetScore(ScoreArgs),

    /// Change the score of a course the student already has
    EditScore(ScoreArgs),

    /// Delete a student
    Delete(IdArgs),

    /// Show one student with all scores and the average
    Show(ShowCommand),

    /// List every student with course count and average
    List(ListCommand),

    /// Show premium status, or upgrade this session
    Premium(PremiumCommand),

    /// Career recommendation from a student's scores (premium)
    Career(IdArgs),
}

/// Add command arguments.
#[derive(Debug, Clone, PartialEq, Args)]
pub struct AddCommand {
    /// Student id
    pub id: String,

    /// Display name
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Academic program
    #[arg(short, long, default_value = "")]
    pub program: String,

    /// Record a first course score right away
    #[arg(long, requires = "score")]
    pub course: Option<String>,

    /// Score for --course
    #[arg(long, requires = "course", allow_negative_numbers = true)]
    pub score: Option<f64>,
}

/// Arguments naming one course score.
#[derive(Debug, Clone, PartialEq, Args)]
pub struct ScoreArgs {
    /// Student id
    pub id: String,

    /// Course name
    pub course: String,

    /// Score value
    #[arg(allow_negative_numbers = true)]
    pub score: f64,
}

/// Arguments naming one student.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct IdArgs {
    /// Student id
    pub id: String,
}

/// Show command arguments.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ShowCommand {
    /// Student id
    pub id: String,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// List command arguments.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Premium command arguments.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct PremiumCommand {
    /// Unlock premium features for this session
    #[arg(long)]
    pub upgrade: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}

impl From<DisplayFormat> for OutputFormat {
    fn from(format: DisplayFormat) -> Self {
        match format {
            DisplayFormat::Plain => Self::Plain,
            DisplayFormat::Table => Self::Table,
            DisplayFormat::Json => Self::Json,
        }
    }
}
