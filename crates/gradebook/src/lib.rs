//! `gradebook` - Student score records kept in a flat CSV file
//!
//! This library provides the record codec, the file-backed record store, and
//! the session-level operations a front end uses to add students, record
//! course scores, and report averages and career recommendations.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod book;
pub mod career;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod session;
pub mod storage;

pub use book::Gradebook;
pub use career::CareerTag;
pub use codec::{DelimitedScoreCodec, ScoreCodec};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::{Scores, StudentRecord, Summary, SummaryRow};
pub use session::Session;
pub use storage::RecordStore;
