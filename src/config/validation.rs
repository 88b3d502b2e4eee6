//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the store endpoint is usable (URL scheme, key, table)
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ServiceConfig;

/// A single semantic configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("store.url is not set")]
    MissingStoreUrl,

    #[error("store.url '{url}' is invalid: {reason}")]
    InvalidStoreUrl { url: String, reason: String },

    #[error("store.key is not set")]
    MissingStoreKey,

    #[error("store.table is empty")]
    EmptyTable,

    #[error("{field} '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Validate a loaded configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.store.url.trim().is_empty() {
        errors.push(ValidationError::MissingStoreUrl);
    } else {
        match Url::parse(&config.store.url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::InvalidStoreUrl {
                url: config.store.url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidStoreUrl {
                url: config.store.url.clone(),
                reason: e.to_string(),
            }),
        }
    }

    if config.store.key.is_empty() {
        errors.push(ValidationError::MissingStoreKey);
    }
    if config.store.table.trim().is_empty() {
        errors.push(ValidationError::EmptyTable);
    }
    if config.store.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("store.timeout_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
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

    fn valid_config() -> ServiceConfig {
        let mut config = ServiceConfig::default();
        config.store.url = "https://abc.supabase.co".into();
        config.store.key = "key".into();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_default_config_reports_all_missing_store_fields() {
        let errors = validate_config(&ServiceConfig::default()).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::MissingStoreUrl, ValidationError::MissingStoreKey]
        );
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = valid_config();
        config.store.url = "ftp://abc.supabase.co".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidStoreUrl { .. }));
    }

    #[test]
    fn test_rejects_bad_bind_address_and_zero_timeout() {
        let mut config = valid_config();
        config.listener.bind_address = "localhost".into();
        config.timeouts.request_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ValidationError::ZeroTimeout("timeouts.request_secs")));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = valid_config();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
