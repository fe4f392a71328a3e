use reqwest::Url;
use std::time::Duration;

use crate::error::{ClaimsError, Result};

pub const BASE_URL_VAR: &str = "CLAIMS_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "CLAIMS_API_TIMEOUT_SECS";

/// Where the backend lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    /// `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ClaimsError::Config(format!("{BASE_URL_VAR} not set")))?;

        let mut config = Self::new(base_url.trim())?;

        if let Some(raw) = lookup(TIMEOUT_VAR).filter(|value| !value.trim().is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ClaimsError::Config(format!("{TIMEOUT_VAR} must be a whole number of seconds"))
            })?;
            if secs == 0 {
                return Err(ClaimsError::Config(format!(
                    "{TIMEOUT_VAR} must be greater than zero"
                )));
            }
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| ClaimsError::Config(format!("invalid base URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ClaimsError::Config(format!(
            "unsupported URL scheme '{other}'"
        ))),
    }
}
