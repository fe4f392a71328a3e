use thiserror::Error;

use crate::{model::ClaimStatus, workflow::ClaimAction};

#[derive(Error, Debug)]
pub enum ClaimsError {
    /// Connection failures and bodies that could not be decoded.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP error! status: {status}, detail: {detail}")]
    Api { status: u16, detail: String },

    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Another request is still in flight")]
    Busy,

    #[error("Claim {0} is not in the current list")]
    UnknownClaim(i64),

    #[error("Action '{action}' is not available for status '{status}'")]
    ActionUnavailable {
        status: ClaimStatus,
        action: ClaimAction,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClaimsError {
    /// Server-reported detail for API failures.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClaimsError::Api { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClaimsError>;
