// ============================================================================
// domain/error.rs - COMMUNITY REJECTIONS
// ============================================================================

use thiserror::Error;

use crate::domain::value_objects::{Handle, Severity};

/// Root domain error type.
///
/// Every variant is an expected, recoverable outcome of a community
/// operation. None of them is fatal; the registry returns them as values and
/// mirrors each one into the activity log.
///
/// All errors are:
/// - Cloneable (receipts and logs keep copies)
/// - Categorizable (for CLI display)
/// - Mapped to a log [`Severity`]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Conflicts (the thing already exists)
    // ========================================================================
    #[error("Member {handle} is already registered")]
    AlreadyMember { handle: Handle },

    #[error("Discussion '{title}' already exists")]
    DuplicateDiscussion { title: String },

    #[error("Establishment '{name}' already exists")]
    DuplicateEstablishment { name: String },

    // ========================================================================
    // Not Found
    // ========================================================================
    #[error("Member {handle} not found")]
    UnknownMember { handle: Handle },

    #[error("Discussion '{title}' not found")]
    UnknownDiscussion { title: String },

    #[error("Message #{index} not found in discussion '{title}'")]
    UnknownMessage { title: String, index: usize },

    #[error("Topic '{title}' not found")]
    UnknownTopic { title: String },

    #[error("Establishment '{name}' not found")]
    UnknownEstablishment { name: String },

    #[error("Shopkeeper '{name}' not found")]
    UnknownShopkeeper { name: String },

    // ========================================================================
    // Construction
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Unknown ranking strategy: {0}")]
    InvalidRanking(String),

    #[error("Unknown log severity: {0}")]
    InvalidSeverity(String),
}

impl DomainError {
    /// Severity this rejection is recorded with in the activity log.
    ///
    /// Duplicates are warnings (the caller asked for something that is
    /// already true); references to missing entities are errors.
    pub fn severity(&self) -> Severity {
        match self {
            Self::AlreadyMember { .. }
            | Self::DuplicateDiscussion { .. }
            | Self::DuplicateEstablishment { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AlreadyMember { handle } => vec![
                format!("The handle {handle} is taken"),
                "Pick another handle".into(),
            ],
            Self::UnknownMember { handle } => vec![
                format!("Register {handle} before using it"),
            ],
            Self::DuplicateDiscussion { title } => vec![
                format!("A discussion named '{title}' already exists"),
                "Post into the existing discussion or choose another title".into(),
            ],
            Self::UnknownDiscussion { title } => vec![
                format!("Start the discussion '{title}' first"),
            ],
            Self::UnknownMessage { index, .. } => vec![
                format!("Message indexes start at 0; #{index} is out of range"),
            ],
            Self::UnknownShopkeeper { name } => vec![
                format!("Register '{name}' as a shopkeeper first"),
            ],
            Self::InvalidRanking(_) => vec![
                "Valid strategies: participation, ratings, tenure".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AlreadyMember { .. }
            | Self::DuplicateDiscussion { .. }
            | Self::DuplicateEstablishment { .. } => ErrorCategory::Conflict,
            Self::UnknownMember { .. }
            | Self::UnknownDiscussion { .. }
            | Self::UnknownMessage { .. }
            | Self::UnknownTopic { .. }
            | Self::UnknownEstablishment { .. }
            | Self::UnknownShopkeeper { .. } => ErrorCategory::NotFound,
            Self::MissingRequiredField { .. }
            | Self::InvalidRanking(_)
            | Self::InvalidSeverity(_) => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Conflict,
    NotFound,
    Validation,
}
