//! Configuration validation.

use anyhow::Result;

use super::Config;
use crate::constants::*;

/// Reject values the panel cannot work with.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(url) = &config.store_url {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            anyhow::bail!("store_url cannot be empty");
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            anyhow::bail!(
                "store_url ({}) must start with http:// or https://",
                trimmed
            );
        }
    }

    if let Some(timeout) = config.request_timeout
        && !(MINIMUM_REQUEST_TIMEOUT_SECS..=MAXIMUM_REQUEST_TIMEOUT_SECS).contains(&timeout)
    {
        anyhow::bail!(
            "request_timeout ({} s) must be between {} and {} seconds",
            timeout,
            MINIMUM_REQUEST_TIMEOUT_SECS,
            MAXIMUM_REQUEST_TIMEOUT_SECS
        );
    }

    if let Some(power) = config.default_power
        && !(MINIMUM_POWER..=MAXIMUM_POWER).contains(&power)
    {
        anyhow::bail!(
            "default_power ({}) must be between {} and {}",
            power,
            MINIMUM_POWER,
            MAXIMUM_POWER
        );
    }

    if let Some(grace) = config.delete_grace_period
        && !(MINIMUM_DELETE_GRACE_SECS..=MAXIMUM_DELETE_GRACE_SECS).contains(&grace)
    {
        anyhow::bail!(
            "delete_grace_period ({} s) must be between {} and {} seconds",
            grace,
            MINIMUM_DELETE_GRACE_SECS,
            MAXIMUM_DELETE_GRACE_SECS
        );
    }

    Ok(())
}
