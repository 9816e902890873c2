//! Role capability registry.
//!
//! A user is exactly one [`Role`]. What a role can do is a fixed list of
//! [`Capability`] values looked up in [`ROLE_REGISTRY`]; nothing wraps
//! anything else. Shopkeepers, moderators and administrators all carry the
//! logged-in member capabilities plus their own.
//!
//! # Adding a New Role
//!
//! 1. Add a variant to [`Role`]
//! 2. Add one [`RoleDef`] entry to [`ROLE_REGISTRY`]

use std::fmt;

use serde::Serialize;

/// Something a role may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    ReadTopics,
    Comment,
    DeleteOwnComment,
    ViewLinks,
    OpenEstablishment,
    ApproveTopics,
    RemovePosts,
    GrantPermissions,
    RevokePermissions,
}

/// The closed set of user roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Role {
    Guest,
    Member { rank: String },
    Shopkeeper { establishment: Option<String> },
    Moderator { moderator_id: u32 },
    Administrator { admin_id: u32 },
}

/// Discriminant used as the registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleKind {
    Guest,
    Member,
    Shopkeeper,
    Moderator,
    Administrator,
}

#[derive(Debug, Clone, Copy)]
pub struct RoleDef {
    pub kind: RoleKind,
    pub capabilities: &'static [Capability],
}

const MEMBER_CAPABILITIES: &[Capability] = &[
    Capability::ReadTopics,
    Capability::Comment,
    Capability::DeleteOwnComment,
    Capability::ViewLinks,
];

/// Single source of truth for role capabilities.
pub static ROLE_REGISTRY: &[RoleDef] = &[
    RoleDef {
        kind: RoleKind::Guest,
        capabilities: &[Capability::ReadTopics],
    },
    RoleDef {
        kind: RoleKind::Member,
        capabilities: MEMBER_CAPABILITIES,
    },
    RoleDef {
        kind: RoleKind::Shopkeeper,
        capabilities: &[
            Capability::ReadTopics,
            Capability::Comment,
            Capability::DeleteOwnComment,
            Capability::ViewLinks,
            Capability::OpenEstablishment,
        ],
    },
    RoleDef {
        kind: RoleKind::Moderator,
        capabilities: &[
            Capability::ReadTopics,
            Capability::Comment,
            Capability::DeleteOwnComment,
            Capability::ViewLinks,
            Capability::ApproveTopics,
            Capability::RemovePosts,
            Capability::RevokePermissions,
        ],
    },
    RoleDef {
        kind: RoleKind::Administrator,
        capabilities: &[
            Capability::ReadTopics,
            Capability::Comment,
            Capability::DeleteOwnComment,
            Capability::ViewLinks,
            Capability::ApproveTopics,
            Capability::RemovePosts,
            Capability::GrantPermissions,
            Capability::RevokePermissions,
        ],
    },
];

impl Role {
    pub const fn kind(&self) -> RoleKind {
        match self {
            Self::Guest => RoleKind::Guest,
            Self::Member { .. } => RoleKind::Member,
            Self::Shopkeeper { .. } => RoleKind::Shopkeeper,
            Self::Moderator { .. } => RoleKind::Moderator,
            Self::Administrator { .. } => RoleKind::Administrator,
        }
    }

    pub fn capabilities(&self) -> &'static [Capability] {
        let kind = self.kind();
        ROLE_REGISTRY
            .iter()
            .find(|def| def.kind == kind)
            .map(|def| def.capabilities)
            .unwrap_or(&[])
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Every role can at least read topics; guests read only.
    pub fn has_topic_access(&self) -> bool {
        self.has(Capability::ReadTopics)
    }

    /// Whether this role may write into discussions.
    ///
    /// Exposed for callers that want stricter enforcement; the registry
    /// itself does not consult it.
    pub fn may_post(&self) -> bool {
        self.has(Capability::Comment)
    }

    /// Shopkeeper-only: remember the establishment this shopkeeper opened.
    ///
    /// Returns `None` for every other role.
    pub fn open_establishment(&mut self, name: impl Into<String>) -> Option<&str> {
        match self {
            Self::Shopkeeper { establishment } => {
                *establishment = Some(name.into());
                establishment.as_deref()
            }
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guest => f.write_str("guest"),
            Self::Member { rank } => write!(f, "member ({rank})"),
            Self::Shopkeeper { establishment: Some(name) } => write!(f, "shopkeeper of {name}"),
            Self::Shopkeeper { establishment: None } => f.write_str("shopkeeper"),
            Self::Moderator { moderator_id } => write!(f, "moderator #{moderator_id}"),
            Self::Administrator { admin_id } => write!(f, "administrator #{admin_id}"),
        }
    }
}
