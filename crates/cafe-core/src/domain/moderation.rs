//! Topic moderation: the observer side of the topic subject.
//!
//! A [`Topic`](crate::domain::Topic) pushes a [`TopicEvent`] to every bound
//! [`TopicObserver`] after each lifecycle change. Delivery is synchronous and
//! in binding order. A failing observer never stops the pass; its failure is
//! collected into a [`NotificationError`] returned once every observer has
//! been called.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::value_objects::Handle;

// ── Events ───────────────────────────────────────────────────────────────────

/// What happened to a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TopicChange {
    Created,
    Edited { description: String },
    Reported { reason: String },
    Approved,
}

impl TopicChange {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Edited { .. } => "edited",
            Self::Reported { .. } => "reported",
            Self::Approved => "approved",
        }
    }

    /// The moderation state an observer should record for this change.
    pub const fn state(&self) -> ModerationState {
        match self {
            Self::Created => ModerationState::Created,
            Self::Edited { .. } => ModerationState::Edited,
            Self::Reported { .. } => ModerationState::Reported,
            Self::Approved => ModerationState::Approved,
        }
    }
}

impl fmt::Display for TopicChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Notification pushed to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicEvent {
    pub topic_id: Uuid,
    pub title: String,
    pub actor: Handle,
    pub change: TopicChange,
}

/// Last known state of a topic from a moderator's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationState {
    #[default]
    Unknown,
    Created,
    Edited,
    Reported,
    Approved,
}

impl fmt::Display for ModerationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unknown => "unknown",
            Self::Created => "created",
            Self::Edited => "edited",
            Self::Reported => "reported",
            Self::Approved => "approved",
        })
    }
}

// ── Observer port ────────────────────────────────────────────────────────────

/// Returned by an observer that could not handle a notification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct ObserverError {
    pub reason: String,
}

impl ObserverError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Anything that wants to hear about topic changes.
///
/// Observers are shared (`Arc<dyn TopicObserver>`) and called through `&self`,
/// so implementations keep their own interior mutability.
#[cfg_attr(test, mockall::automock)]
pub trait TopicObserver: Send + Sync {
    /// Identifier used when reporting failures.
    fn observer_id(&self) -> String;

    fn on_topic_changed(&self, event: &TopicEvent) -> Result<(), ObserverError>;
}

// ── Notification outcome ─────────────────────────────────────────────────────

/// Successful notification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notified {
    /// Number of observer invocations performed.
    pub delivered: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserverFailure {
    pub observer: String,
    pub error: ObserverError,
}

/// Aggregate of every observer failure in one notification pass.
///
/// The topic change that triggered the pass has already been applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error(
    "{} of {attempted} observers failed on '{title}' ({change})",
    .failures.len()
)]
pub struct NotificationError {
    pub title: String,
    pub change: &'static str,
    pub attempted: usize,
    pub failures: Vec<ObserverFailure>,
}

impl NotificationError {
    pub fn failed_observers(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|f| f.observer.as_str())
    }
}

// ── Moderator ────────────────────────────────────────────────────────────────

/// A moderator bound to topics as an observer.
///
/// Holds no reference to the topics themselves: everything it knows arrives
/// through notifications, recorded in an inbox and a per-title state map.
#[derive(Debug)]
pub struct Moderator {
    handle: Handle,
    moderator_id: u32,
    inbox: Mutex<Vec<TopicEvent>>,
    states: Mutex<HashMap<String, ModerationState>>,
}

impl Moderator {
    pub fn new(handle: impl Into<Handle>, moderator_id: u32) -> Self {
        Self {
            handle: handle.into(),
            moderator_id,
            inbox: Mutex::new(Vec::new()),
            states: Mutex::new(HashMap::new()),
        }
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub const fn moderator_id(&self) -> u32 {
        self.moderator_id
    }

    /// Every event received so far, oldest first.
    pub fn inbox(&self) -> Vec<TopicEvent> {
        self.inbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn notification_count(&self) -> usize {
        self.inbox.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// `Unknown` for topics this moderator never heard about.
    pub fn topic_state(&self, title: &str) -> ModerationState {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(title)
            .copied()
            .unwrap_or_default()
    }
}

impl TopicObserver for Moderator {
    fn observer_id(&self) -> String {
        format!("moderator#{} ({})", self.moderator_id, self.handle)
    }

    fn on_topic_changed(&self, event: &TopicEvent) -> Result<(), ObserverError> {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(event.title.clone(), event.change.state());
        self.inbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(title: &str, change: TopicChange) -> TopicEvent {
        TopicEvent {
            topic_id: Uuid::new_v4(),
            title: title.into(),
            actor: Handle::new("joao123"),
            change,
        }
    }

    #[test]
    fn moderator_records_state_per_title() {
        let m = Moderator::new("ana_mod", 1);
        assert_eq!(m.topic_state("First"), ModerationState::Unknown);

        m.on_topic_changed(&event("First", TopicChange::Created)).unwrap();
        m.on_topic_changed(&event(
            "First",
            TopicChange::Edited {
                description: "new".into(),
            },
        ))
        .unwrap();
        m.on_topic_changed(&event(
            "Second",
            TopicChange::Reported {
                reason: "spam".into(),
            },
        ))
        .unwrap();

        assert_eq!(m.topic_state("First"), ModerationState::Edited);
        assert_eq!(m.topic_state("Second"), ModerationState::Reported);
        assert_eq!(m.notification_count(), 3);
        assert_eq!(m.inbox()[0].change, TopicChange::Created);
    }

    #[test]
    fn observer_id_names_the_moderator() {
        let m = Moderator::new("ana_mod", 7);
        assert_eq!(m.observer_id(), "moderator#7 (@ana_mod)");
    }

    #[test]
    fn notification_error_counts_failures() {
        let err = NotificationError {
            title: "T".into(),
            change: "created",
            attempted: 3,
            failures: vec![ObserverFailure {
                observer: "x".into(),
                error: ObserverError::new("boom"),
            }],
        };
        assert_eq!(err.to_string(), "1 of 3 observers failed on 'T' (created)");
        assert_eq!(err.failed_observers().collect::<Vec<_>>(), ["x"]);
    }
}
