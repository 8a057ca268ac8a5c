//! Core record types for gradebook.
//!
//! This module defines the in-memory shape of a student record and the
//! summary rows derived from it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Course name to score mapping, kept ordered by course name.
pub type Scores = BTreeMap<String, f64>;

/// One student's identity, program, and course scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Institutional identifier, unique within a store.
    pub id: String,

    /// Display name (may be empty).
    pub name: String,

    /// Academic program label (may be empty).
    pub program: String,

    /// Scores keyed by course name.
    pub scores: Scores,
}

impl StudentRecord {
    /// Create a record with no scores.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            program: program.into(),
            scores: Scores::new(),
        }
    }

    /// Builder-style helper that sets the initial scores.
    #[must_use]
    pub fn with_scores(mut self, scores: Scores) -> Self {
        self.scores = scores;
        self
    }

    /// Insert or overwrite the score for one course.
    ///
    /// Returns the previous score if the course was already present.
    pub fn upsert_score(&mut self, course: impl Into<String>, score: f64) -> Option<f64> {
        self.scores.insert(course.into(), score)
    }

    /// Arithmetic mean of all scores, or `None` when there are none.
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        mean(&self.scores)
    }

    /// Course count and average, with the average reported as `0.0` when
    /// the record has no scores.
    #[must_use]
    pub fn summarize(&self) -> Summary {
        Summary {
            course_count: self.scores.len(),
            average: self.average().unwrap_or(0.0),
        }
    }

    /// The listing row for this record.
    #[must_use]
    pub fn summary_row(&self) -> SummaryRow {
        let Summary {
            course_count,
            average,
        } = self.summarize();
        SummaryRow {
            id: self.id.clone(),
            name: self.name.clone(),
            program: self.program.clone(),
            course_count,
            average,
        }
    }
}

/// Arithmetic mean of a score mapping.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(scores: &Scores) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.values().sum::<f64>() / scores.len() as f64)
}

/// Aggregate figures for a single record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Number of scored courses.
    pub course_count: usize,
    /// Mean score, `0.0` when there are no courses.
    pub average: f64,
}

/// One row of the "all students" listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Student id.
    pub id: String,
    /// Student name.
    pub name: String,
    /// Program label.
    pub program: String,
    /// Number of scored courses.
    pub course_count: usize,
    /// Mean score, `0.0` when there are no courses.
    pub average: f64,
}
