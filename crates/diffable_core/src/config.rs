//! Reconciler configuration.
//!
//! # Responsibility
//! - Decide when surviving items get a reload op.
//! - Resolve overrides from the process environment.
//!
//! # Invariants
//! - Absent or blank environment values fall back to defaults.
//! - Unknown values are rejected, never silently mapped.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Environment variable that overrides [`ReloadPolicy`].
pub const RELOAD_POLICY_ENV: &str = "DIFFABLE_RELOAD_POLICY";

/// When a surviving item is re-rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReloadPolicy {
    /// Only items marked with `reload_items` reload. Payload edits without a
    /// mark stay invisible until the row is rebuilt for another reason.
    #[default]
    Explicit,
    /// Marked items reload, and so does any item whose payload changed.
    PayloadChanged,
}

impl ReloadPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::PayloadChanged => "payload_changed",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "explicit" => Ok(Self::Explicit),
            "payload_changed" | "payload-changed" => Ok(Self::PayloadChanged),
            other => Err(ConfigError::UnsupportedReloadPolicy(other.to_string())),
        }
    }
}

/// Reconciler behaviour switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilerConfig {
    pub reload_policy: ReloadPolicy,
}

impl ReconcilerConfig {
    pub fn with_reload_policy(reload_policy: ReloadPolicy) -> Self {
        Self { reload_policy }
    }

    /// Reads overrides from the process environment.
    ///
    /// # Errors
    /// - Returns an error when `DIFFABLE_RELOAD_POLICY` holds an unknown value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let reload_policy = match lookup(RELOAD_POLICY_ENV) {
            Some(raw) if !raw.trim().is_empty() => ReloadPolicy::parse(&raw)?,
            _ => ReloadPolicy::default(),
        };
        Ok(Self { reload_policy })
    }
}

/// Configuration resolution errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedReloadPolicy(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedReloadPolicy(value) => write!(
                f,
                "unsupported reload policy `{value}`; expected explicit|payload_changed"
            ),
        }
    }
}

impl Error for ConfigError {}
