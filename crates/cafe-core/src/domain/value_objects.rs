//! Domain value objects: Handle, Credential, PermissionLevel, Severity.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Each
//! owns its string representation and, where the CLI or the log reader needs
//! to parse it back, a `FromStr` implementation.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Handle ───────────────────────────────────────────────────────────────────

/// Unique human-readable member identifier.
///
/// Stored without the leading `@`; displayed with it. `Handle::new("@alice")`
/// and `Handle::new("alice")` are the same handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref().trim();
        Self(raw.strip_prefix('@').unwrap_or(raw).to_owned())
    }

    /// The handle without the `@` prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl From<&str> for Handle {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Handle {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

// ── Credential ───────────────────────────────────────────────────────────────

/// Opaque member secret.
///
/// Never printed: both `Debug` and `Display` redact the value, and it is
/// skipped on serialization.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

// ── PermissionLevel ──────────────────────────────────────────────────────────

/// Coarse permission level stored on a member record.
///
/// Informational only: the registry never gates operations on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    #[default]
    Standard,
    Moderator,
    Admin,
}

impl PermissionLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Severity ─────────────────────────────────────────────────────────────────

/// Severity of an activity-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Success,
    Error,
    Warning,
}

impl Severity {
    /// The label written into the log line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUCCESS" | "SUCESSO" => Ok(Self::Success),
            "ERROR" | "ERRO" => Ok(Self::Error),
            "WARNING" | "AVISO" => Ok(Self::Warning),
            other => Err(DomainError::InvalidSeverity(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_strips_at_sign() {
        assert_eq!(Handle::new("@alice"), Handle::new("alice"));
        assert_eq!(Handle::new(" bruno ").as_str(), "bruno");
        assert_eq!(Handle::new("alice").to_string(), "@alice");
    }

    #[test]
    fn credential_is_redacted() {
        let secret = Credential::new("hunter2");
        assert_eq!(format!("{secret:?}"), "Credential(***)");
        assert_eq!(secret.to_string(), "***");
        assert_eq!(secret, Credential::new("hunter2"));
        assert_ne!(secret, Credential::new("hunter3"));
    }

    #[test]
    fn severity_parses_both_label_sets() {
        assert_eq!("SUCCESS".parse::<Severity>().unwrap(), Severity::Success);
        assert_eq!("aviso".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("ERRO".parse::<Severity>().unwrap(), Severity::Error);
        assert!("INFO".parse::<Severity>().is_err());
    }
}
