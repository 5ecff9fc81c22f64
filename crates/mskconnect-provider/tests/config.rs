use std::collections::HashMap;
use std::time::Duration;

use mskconnect_core::WaitMode;
use mskconnect_provider::config::{POLL_DELAY_VAR, STABILIZATION_TIMEOUT_VAR, WAIT_MODE_VAR};
use mskconnect_provider::{ProviderConfig, ProviderError};

fn from(vars: &[(&str, &str)]) -> Result<ProviderConfig, ProviderError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ProviderConfig::from_lookup(|name| vars.get(name).cloned())
}

#[test]
fn defaults_when_nothing_is_set() {
    let config = from(&[]).unwrap();
    assert_eq!(config, ProviderConfig::default());
    assert_eq!(config.poll.delay, Duration::from_secs(30));
    assert_eq!(config.poll.timeout, Duration::from_secs(3600));
    assert_eq!(config.wait_mode, WaitMode::Reinvoke);
}

#[test]
fn overrides_are_applied() {
    let config = from(&[
        (POLL_DELAY_VAR, "5"),
        (STABILIZATION_TIMEOUT_VAR, " 600 "),
        (WAIT_MODE_VAR, "Blocking"),
    ])
    .unwrap();
    assert_eq!(config.poll.delay, Duration::from_secs(5));
    assert_eq!(config.poll.timeout, Duration::from_secs(600));
    assert_eq!(config.wait_mode, WaitMode::Blocking);
}

#[test]
fn zero_seconds_is_rejected() {
    let err = from(&[(POLL_DELAY_VAR, "0")]).unwrap_err();
    assert!(err.to_string().contains(POLL_DELAY_VAR));
}

#[test]
fn non_numeric_seconds_are_rejected() {
    let err = from(&[(STABILIZATION_TIMEOUT_VAR, "1h")]).unwrap_err();
    assert!(matches!(
        err,
        ProviderError::Config {
            name: STABILIZATION_TIMEOUT_VAR,
            ..
        }
    ));
}

#[test]
fn unknown_wait_mode_is_rejected() {
    let err = from(&[(WAIT_MODE_VAR, "async")]).unwrap_err();
    assert!(err.to_string().contains("async"));
}
