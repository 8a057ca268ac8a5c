//! Per-session front-end state.
//!
//! The premium entitlement only gates the career report. It belongs to one
//! session and is never shared, so two sessions over the same data file see
//! independent flags. The record store knows nothing about it.

use tracing::info;

use crate::book::Gradebook;
use crate::career::CareerTag;
use crate::codec::ScoreCodec;
use crate::error::{Error, Result};

/// State held by the front end for the lifetime of one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    premium: bool,
}

impl Session {
    /// Start a session without premium access.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this session has premium access.
    #[must_use]
    pub fn is_premium(&self) -> bool {
        self.premium
    }

    /// Grant premium access for the rest of the session.
    ///
    /// Returns `false` if the session already had it.
    pub fn upgrade(&mut self) -> bool {
        if self.premium {
            return false;
        }
        info!("Session upgraded to premium");
        self.premium = true;
        true
    }

    /// The career report for a student, available to premium sessions only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PremiumRequired`] without premium access, otherwise
    /// [`Error::NotFound`] for an unknown id.
    pub fn career_tag<C: ScoreCodec>(&self, book: &Gradebook<C>, id: &str) -> Result<CareerTag> {
        if !self.premium {
            return Err(Error::PremiumRequired);
        }
        book.career_tag(id)
    }
}
