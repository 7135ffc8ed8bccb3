//! Proof validity configuration.
//!
//! ```toml
//! [proof]
//! default_validity_seconds = 3600
//! max_validity_seconds = 2592000   # optional cap, unlimited by default
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Environment variable overriding `proof.default_validity_seconds`.
pub const VALIDITY_ENV_VAR: &str = "SUBLY_PROOF_VALIDITY_SECS";

/// Errors loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Membership configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipConfig {
    /// Proof issuance settings.
    #[serde(default)]
    pub proof: ProofConfig,
}

/// Proof issuance settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofConfig {
    /// Window used when a request does not name one.
    #[serde(default = "default_validity_seconds")]
    pub default_validity_seconds: u32,
    /// Longest window the issuer will sign. Unlimited unless set.
    #[serde(default = "default_max_validity_seconds")]
    pub max_validity_seconds: u32,
}

fn default_validity_seconds() -> u32 {
    3_600
}

fn default_max_validity_seconds() -> u32 {
    u32::MAX
}

impl Default for ProofConfig {
    fn default() -> Self {
        Self {
            default_validity_seconds: default_validity_seconds(),
            max_validity_seconds: default_max_validity_seconds(),
        }
    }
}

impl MembershipConfig {
    /// Load configuration from `path`, then apply environment overrides.
    ///
    /// Falls back to defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::from_toml_str(&std::fs::read_to_string(path)?)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        if let Ok(raw) = std::env::var(VALIDITY_ENV_VAR) {
            config.apply_validity_override(&raw)?;
        }

        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the default validity window with a textual value.
    pub fn apply_validity_override(&mut self, raw: &str) -> Result<(), ConfigError> {
        let seconds = raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidValue {
                key: VALIDITY_ENV_VAR,
                value: raw.to_string(),
            })?;
        check_default_within_max(seconds, self.proof.max_validity_seconds)?;
        self.proof.default_validity_seconds = seconds;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_default_within_max(
            self.proof.default_validity_seconds,
            self.proof.max_validity_seconds,
        )
    }
}

fn check_default_within_max(default: u32, max: u32) -> Result<(), ConfigError> {
    if default > max {
        return Err(ConfigError::InvalidValue {
            key: "proof.default_validity_seconds",
            value: default.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MembershipConfig::default();
        assert_eq!(config.proof.default_validity_seconds, 3_600);
        assert_eq!(config.proof.max_validity_seconds, u32::MAX);
    }

    #[test]
    fn test_config_serialization() {
        let config = MembershipConfig::default();
        let toml_str = toml::to_string(&config).expect("serialize");
        let parsed = MembershipConfig::from_toml_str(&toml_str).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = MembershipConfig::from_toml_str("[proof]\ndefault_validity_seconds = 600\n")
            .expect("parse");
        assert_eq!(config.proof.default_validity_seconds, 600);
        assert_eq!(config.proof.max_validity_seconds, u32::MAX);

        let empty = MembershipConfig::from_toml_str("").expect("parse");
        assert_eq!(empty, MembershipConfig::default());
    }

    #[test]
    fn test_default_above_max_rejected() {
        let result = MembershipConfig::from_toml_str(
            "[proof]\ndefault_validity_seconds = 100\nmax_validity_seconds = 10\n",
        );
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_bad_toml_rejected() {
        assert!(matches!(
            MembershipConfig::from_toml_str("[proof\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validity_override() {
        let mut config = MembershipConfig::default();
        config.apply_validity_override(" 120 ").expect("override");
        assert_eq!(config.proof.default_validity_seconds, 120);

        assert!(config.apply_validity_override("soon").is_err());
        assert!(config.apply_validity_override("-5").is_err());
        assert_eq!(config.proof.default_validity_seconds, 120);
    }

    #[test]
    fn test_rejected_override_leaves_config_unchanged() {
        let mut config = MembershipConfig::from_toml_str(
            "[proof]\ndefault_validity_seconds = 60\nmax_validity_seconds = 600\n",
        )
        .expect("parse");
        assert!(matches!(
            config.apply_validity_override("900"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(config.proof.default_validity_seconds, 60);
        assert_eq!(config.proof.max_validity_seconds, 600);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("subly-membership-absent-config.toml");
        let config = MembershipConfig::load(&path).expect("load");
        // An override in the environment may change the default window only.
        assert_eq!(config.proof.max_validity_seconds, u32::MAX);
    }

    #[test]
    fn test_load_reads_file() {
        let path = std::env::temp_dir().join(format!(
            "subly-membership-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[proof]\nmax_validity_seconds = 7200\n").expect("write");
        let loaded = MembershipConfig::load(&path);
        std::fs::remove_file(&path).expect("cleanup");
        assert_eq!(loaded.expect("load").proof.max_validity_seconds, 7_200);
    }
}
