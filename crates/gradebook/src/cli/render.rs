//! Text, table and JSON rendering of records.

use std::io::Write;

use serde::Serialize;

use crate::career::CareerTag;
use crate::config::DisplayConfig;
use crate::error::Result;
use crate::record::{StudentRecord, SummaryRow};

use super::commands::OutputFormat;

/// How command output should look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Digits after the decimal point for averages and scores.
    pub decimals: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}

impl RenderOptions {
    /// Options from the `[display]` configuration section.
    #[must_use]
    pub fn from_config(display: &DisplayConfig) -> Self {
        Self {
            format: display.format.into(),
            decimals: display.decimals,
        }
    }

    /// Use `format` instead of the configured one, if given.
    #[must_use]
    pub fn with_format(mut self, format: Option<OutputFormat>) -> Self {
        if let Some(format) = format {
            self.format = format;
        }
        self
    }

    fn number(&self, value: f64) -> String {
        format!("{value:.prec$}", prec = self.decimals)
    }
}

#[derive(Serialize)]
struct StudentDetail<'a> {
    #[serde(flatten)]
    record: &'a StudentRecord,
    course_count: usize,
    average: Option<f64>,
}

#[derive(Serialize)]
struct CareerReport<'a> {
    id: &'a str,
    tag: CareerTag,
    label: &'static str,
}

/// Render one student's details.
///
/// # Errors
///
/// Returns an error if writing to `out` or JSON encoding fails.
pub fn student(out: &mut impl Write, record: &StudentRecord, opts: RenderOptions) -> Result<()> {
    if opts.format == OutputFormat::Json {
        let detail = StudentDetail {
            record,
            course_count: record.scores.len(),
            average: record.average(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&detail)?)?;
        return Ok(());
    }

    writeln!(out, "ID:      {}", record.id)?;
    writeln!(out, "Name:    {}", record.name)?;
    writeln!(out, "Program: {}", record.program)?;

    let Some(average) = record.average() else {
        writeln!(out, "No scores yet.")?;
        return Ok(());
    };

    writeln!(out)?;
    if opts.format == OutputFormat::Table {
        let rows: Vec<Vec<String>> = record
            .scores
            .iter()
            .map(|(course, score)| vec![course.clone(), opts.number(*score)])
            .collect();
        table(out, &["COURSE", "SCORE"], &rows)?;
    } else {
        for (course, score) in &record.scores {
            writeln!(out, "{course}: {}", opts.number(*score))?;
        }
    }
    writeln!(out)?;
    writeln!(out, "Average: {}", opts.number(average))?;
    Ok(())
}

/// Render the all-students listing.
///
/// # Errors
///
/// Returns an error if writing to `out` or JSON encoding fails.
pub fn summaries(out: &mut impl Write, rows: &[SummaryRow], opts: RenderOptions) -> Result<()> {
    if opts.format == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(rows)?)?;
        return Ok(());
    }

    if rows.is_empty() {
        writeln!(out, "No students recorded.")?;
        return Ok(());
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.id.clone(),
                row.name.clone(),
                row.program.clone(),
                row.course_count.to_string(),
                opts.number(row.average),
            ]
        })
        .collect();

    if opts.format == OutputFormat::Table {
        table(out, &["ID", "NAME", "PROGRAM", "COURSES", "AVERAGE"], &cells)?;
    } else {
        for row in &cells {
            writeln!(out, "{}", row.join("\t"))?;
        }
    }
    Ok(())
}

/// Render a career recommendation.
///
/// # Errors
///
/// Returns an error if writing to `out` or JSON encoding fails.
pub fn career(out: &mut impl Write, id: &str, tag: CareerTag, opts: RenderOptions) -> Result<()> {
    if opts.format == OutputFormat::Json {
        let report = CareerReport {
            id,
            tag,
            label: tag.label(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "Career recommendation for {id}: {tag}")?;
    }
    Ok(())
}

/// Write left-aligned columns separated by two spaces.
fn table(out: &mut impl Write, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    writeln!(out, "{}", pad_row(headers, &widths))?;
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        writeln!(out, "{}", pad_row(&cells, &widths))?;
    }
    Ok(())
}

fn pad_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
