//! Configuration loading and validation for the decrypt tool.
//!
//! Keys come from the environment, never from the command line, so they do
//! not end up in shell history or process listings.

use anyhow::{Context, Result};
use serde::Deserialize;
use winprice::{Decrypter, KeyPair};

/// Validated decrypt-tool configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Web-safe base64 encryption key (`WINPRICE_ENCRYPTION_KEY`). **Required.**
    pub encryption_key: String,

    /// Web-safe base64 integrity key (`WINPRICE_INTEGRITY_KEY`). **Required.**
    pub integrity_key: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from `WINPRICE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or empty.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix("WINPRICE"))
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.encryption_key, "WINPRICE_ENCRYPTION_KEY")?;
        ensure_non_empty(&self.integrity_key, "WINPRICE_INTEGRITY_KEY")?;
        Ok(())
    }

    /// Decode the configured keys into a ready [`Decrypter`].
    ///
    /// # Errors
    ///
    /// Returns an error if either key is not valid web-safe base64.
    pub fn decrypter(&self) -> Result<Decrypter> {
        let keys = KeyPair::from_base64(&self.encryption_key, &self.integrity_key)
            .context("failed to decode WINPRICE_ENCRYPTION_KEY / WINPRICE_INTEGRITY_KEY")?;
        Ok(Decrypter::new(keys))
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("encryption_key", &"[REDACTED]")
            .field("integrity_key", &"[REDACTED]")
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENC: &str = "skU7Ax_NL5pPAFyKdkfZjZz2-VhIN8bjj1rVFOaJ_5o=";
    const INT: &str = "arO23ykdNqUQ5LEoQ0FVmPkBd7xB5CO89PDZlSjpFxo=";

    fn cfg(encryption_key: &str, integrity_key: &str) -> Config {
        Config {
            encryption_key: encryption_key.into(),
            integrity_key: integrity_key.into(),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults() {
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_rejects_empty_encryption_key() {
        assert!(cfg("", INT).validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_integrity_key() {
        assert!(cfg(ENC, "   ").validate().is_err());
    }

    #[test]
    fn validate_accepts_valid_config() {
        assert!(cfg(ENC, INT).validate().is_ok());
    }

    #[test]
    fn decrypter_rejects_bad_base64() {
        assert!(cfg(ENC, "not/web+safe").decrypter().is_err());
    }

    #[test]
    fn decrypter_accepts_sample_keys() {
        assert!(cfg(ENC, INT).decrypter().is_ok());
    }

    #[test]
    fn keys_redacted_in_debug() {
        let printed = format!("{:?}", cfg(ENC, INT));
        assert!(printed.contains("REDACTED"));
        assert!(!printed.contains(ENC));
        assert!(!printed.contains(INT));
    }
}
