//! Portal configuration.
//!
//! This module provides strongly-typed configuration for the portal,
//! loaded via the `config` crate from environment variables. The
//! development placeholders are the defaults: one OTP code accepted
//! for every user, and one security question guarding guest access.

use serde::Deserialize;

/// Portal configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortalConfig {
    /// Sign-in and guest-access configuration.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Credential and challenge configuration.
///
/// The OTP send is simulated; the configured code stands in for a
/// delivery channel until one exists.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// The one-time password accepted at sign-in.
    #[serde(default = "default_otp_code")]
    pub otp_code: String,

    /// The security question shown on the guest results form.
    #[serde(default = "default_challenge_question")]
    pub challenge_question: String,

    /// The expected answer, compared case-insensitively.
    #[serde(default = "default_challenge_answer")]
    pub challenge_answer: String,
}

fn default_otp_code() -> String {
    "555".to_string()
}

fn default_challenge_question() -> String {
    "What is your favourite subject?".to_string()
}

fn default_challenge_answer() -> String {
    "Computer Science".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            otp_code: default_otp_code(),
            challenge_question: default_challenge_question(),
            challenge_answer: default_challenge_answer(),
        }
    }
}

impl PortalConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment holds malformed values.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
