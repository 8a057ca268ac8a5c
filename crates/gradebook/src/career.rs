//! Career recommendation derived from a student's scores.

use serde::Serialize;

use crate::record::{mean, Scores};

/// Advisory career label, chosen from the mean score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CareerTag {
    /// The student has no scores yet.
    NoData,
    /// Mean of 85 or more.
    SoftwareAiEngineer,
    /// Mean of 75 up to 85.
    DataAnalystWebDeveloper,
    /// Mean of 65 up to 75.
    UiUxQa,
    /// Mean below 65.
    BusinessSupport,
}

impl CareerTag {
    /// Pick the tag for a score mapping.
    #[must_use]
    pub fn from_scores(scores: &Scores) -> Self {
        match mean(scores) {
            None => Self::NoData,
            Some(avg) => Self::from_average(avg),
        }
    }

    /// Pick the tag for a mean score. Thresholds are inclusive lower bounds.
    #[must_use]
    pub fn from_average(avg: f64) -> Self {
        if avg >= 85.0 {
            Self::SoftwareAiEngineer
        } else if avg >= 75.0 {
            Self::DataAnalystWebDeveloper
        } else if avg >= 65.0 {
            Self::UiUxQa
        } else {
            Self::BusinessSupport
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NoData => "No score data yet.",
            Self::SoftwareAiEngineer => "Software Engineer / AI Engineer",
            Self::DataAnalystWebDeveloper => "Data Analyst / Web Developer",
            Self::UiUxQa => "UI/UX Designer / QA Tester",
            Self::BusinessSupport => "Business Analyst / Customer Support",
        }
    }
}

impl std::fmt::Display for CareerTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
