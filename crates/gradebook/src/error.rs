//! Error types for gradebook.
//!
//! This module defines all error types used throughout the gradebook crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for gradebook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Record Errors ===
    /// A student with this id already exists.
    #[error("student '{id}' already exists")]
    DuplicateId {
        /// The id that was already taken.
        id: String,
    },

    /// No student with this id exists.
    #[error("student '{id}' not found")]
    NotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The student exists but has no score for this course.
    #[error("student '{id}' has no score for course '{course}'")]
    CourseNotFound {
        /// The student id.
        id: String,
        /// The course that was looked up.
        course: String,
    },

    /// The id cannot be stored because it would be skipped on the next load.
    #[error("invalid student id '{id}': must be non-empty and not a header token")]
    InvalidId {
        /// The rejected id.
        id: String,
    },

    /// A course name was empty.
    #[error("course name for student '{id}' must not be empty")]
    EmptyCourse {
        /// The student id.
        id: String,
    },

    /// The career report was requested without a premium session.
    #[error("career recommendation requires a premium session; run `upgrade` first")]
    PremiumRequired,

    // === Storage Errors ===
    /// Failed to read the backing data file.
    #[error("failed to read data file {path}: {source}")]
    DataFileRead {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: csv::Error,
    },

    /// Failed to write the backing data file.
    #[error("failed to write data file {path}: {source}")]
    DataFileWrite {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A CSV encoding or decoding step failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Shell Errors ===
    /// A line typed into the interactive shell could not be understood.
    #[error("{0}")]
    Shell(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for gradebook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a duplicate id error.
    #[must_use]
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    /// Create a not-found error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a course-not-found error.
    #[must_use]
    pub fn course_not_found(id: impl Into<String>, course: impl Into<String>) -> Self {
        Self::CourseNotFound {
            id: id.into(),
            course: course.into(),
        }
    }

    /// Create a shell input error.
    #[must_use]
    pub fn shell(message: impl Into<String>) -> Self {
        Self::Shell(message.into())
    }

    /// Check if this error means a student or course was not found.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::CourseNotFound { .. })
    }

    /// Check if this error is a duplicate id rejection.
    #[must_use]
    pub fn is_duplicate_id(&self) -> bool {
        matches!(self, Self::DuplicateId { .. })
    }
}
