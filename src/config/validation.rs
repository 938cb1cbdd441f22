//! Configuration validation.
//!
//! Serde handles the syntax; this checks value ranges and addresses.
//! Every problem is reported, not just the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::BridgeConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    InvalidBindAddress(String),

    #[error("conversion.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("observability.metrics_address `{0}` is not a socket address")]
    InvalidMetricsAddress(String),
}

pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.conversion.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    // Only checked when the exporter will actually bind.
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(validate_config(&BridgeConfig::default()), Ok(()));
    }

    #[test]
    fn all_errors_are_reported() {
        let mut config = BridgeConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.conversion.max_body_size = 0;
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidBindAddress("nowhere".into()),
                ValidationError::ZeroBodyLimit,
                ValidationError::ZeroRequestTimeout,
            ]
        );
    }

    #[test]
    fn metrics_address_ignored_when_disabled() {
        let mut config = BridgeConfig::default();
        config.observability.metrics_address = "bogus".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::InvalidMetricsAddress("bogus".into())])
        );
    }
}
