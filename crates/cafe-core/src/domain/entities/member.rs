//! The `Member` record.
//!
//! A member is created once by the registry and never deleted. Its handle is
//! the registry key; everything else is descriptive.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::value_objects::{Credential, Handle, PermissionLevel};

/// A registered community member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    handle: Handle,
    display_name: String,
    #[serde(skip)]
    credential: Credential,
    permission: PermissionLevel,
    followed_discussions: BTreeSet<String>,
    followed_members: BTreeSet<Handle>,
}

impl Member {
    /// Create a member with the standard permission level.
    pub fn new(
        handle: impl Into<Handle>,
        display_name: impl Into<String>,
        credential: Credential,
    ) -> Self {
        Self {
            handle: handle.into(),
            display_name: display_name.into(),
            credential,
            permission: PermissionLevel::default(),
            followed_discussions: BTreeSet::new(),
            followed_members: BTreeSet::new(),
        }
    }

    pub fn with_permission(mut self, permission: PermissionLevel) -> Self {
        self.permission = permission;
        self
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub const fn permission(&self) -> PermissionLevel {
        self.permission
    }

    pub fn followed_discussions(&self) -> impl Iterator<Item = &str> {
        self.followed_discussions.iter().map(String::as_str)
    }

    pub fn followed_members(&self) -> impl Iterator<Item = &Handle> {
        self.followed_members.iter()
    }

    /// Returns `false` if the discussion was already followed.
    pub(crate) fn follow_discussion(&mut self, title: &str) -> bool {
        self.followed_discussions.insert(title.to_owned())
    }

    /// Returns `false` if the member was already followed.
    pub(crate) fn follow_member(&mut self, other: Handle) -> bool {
        self.followed_members.insert(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_member_defaults_to_standard() {
        let m = Member::new("@alice", "Alice Souza", Credential::new("123"));
        assert_eq!(m.handle().as_str(), "alice");
        assert_eq!(m.permission(), PermissionLevel::Standard);
        assert_eq!(m.followed_discussions().count(), 0);
    }

    #[test]
    fn follows_are_sets() {
        let mut m = Member::new("alice", "Alice", Credential::default());
        assert!(m.follow_discussion("Brews"));
        assert!(!m.follow_discussion("Brews"));
        assert!(m.follow_member(Handle::new("bruno")));
        assert_eq!(m.followed_members().count(), 1);
    }

    #[test]
    fn serialization_skips_credential() {
        let m = Member::new("alice", "Alice", Credential::new("secret"));
        let json = serde_json::to_string(&m).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("\"handle\":\"alice\""));
    }
}
