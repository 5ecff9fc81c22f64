//! Provider settings, read once per process from the environment.

use std::time::Duration;

use mskconnect_core::{PollPolicy, WaitMode};

use crate::error::ProviderError;

pub const POLL_DELAY_VAR: &str = "MSKCONNECT_POLL_DELAY_SECS";
pub const STABILIZATION_TIMEOUT_VAR: &str = "MSKCONNECT_STABILIZATION_TIMEOUT_SECS";
pub const WAIT_MODE_VAR: &str = "MSKCONNECT_WAIT_MODE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderConfig {
    pub poll: PollPolicy,
    pub wait_mode: WaitMode,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            poll: PollPolicy::default(),
            wait_mode: WaitMode::Reinvoke,
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Unset variables keep their
    /// defaults; set but malformed ones are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ProviderError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(POLL_DELAY_VAR) {
            config.poll.delay = seconds(POLL_DELAY_VAR, &raw)?;
        }
        if let Some(raw) = lookup(STABILIZATION_TIMEOUT_VAR) {
            config.poll.timeout = seconds(STABILIZATION_TIMEOUT_VAR, &raw)?;
        }
        if let Some(raw) = lookup(WAIT_MODE_VAR) {
            config.wait_mode = WaitMode::parse(&raw).ok_or_else(|| ProviderError::Config {
                name: WAIT_MODE_VAR,
                value: raw.clone(),
                reason: "expected `blocking` or `reinvoke`".to_string(),
            })?;
        }

        Ok(config)
    }
}

fn seconds(name: &'static str, raw: &str) -> Result<Duration, ProviderError> {
    let secs: u64 = raw.trim().parse().map_err(|e| ProviderError::Config {
        name,
        value: raw.to_string(),
        reason: format!("{e}"),
    })?;
    if secs == 0 {
        return Err(ProviderError::Config {
            name,
            value: raw.to_string(),
            reason: "must be at least one second".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}
