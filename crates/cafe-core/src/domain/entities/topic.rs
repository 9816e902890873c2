//! The `Topic` aggregate: the subject side of topic moderation.
//!
//! Every lifecycle method (`create`, `edit`, `report`, `approve`) first
//! applies its state change, then runs one notification pass over the bound
//! observers, in binding order, before returning. The pass never stops early:
//! failures are collected and returned together once every observer has been
//! called.
//!
//! Binding is a plain list append. Binding the same observer twice means it
//! is notified twice per change.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::moderation::{
    NotificationError, Notified, ObserverFailure, TopicChange, TopicEvent, TopicObserver,
};
use crate::domain::value_objects::Handle;

/// Lifecycle marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicStatus {
    /// Constructed, not yet published.
    #[default]
    Draft,
    /// `create` has run at least once.
    Open,
}

/// A report filed against a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicReport {
    pub reporter: Handle,
    pub reason: String,
}

/// A moderated forum topic.
#[derive(Serialize)]
pub struct Topic {
    id: Uuid,
    title: String,
    author: Handle,
    created_at: NaiveDateTime,
    category: String,
    description: String,
    approved: bool,
    status: TopicStatus,
    reports: Vec<TopicReport>,
    #[serde(skip)]
    observers: Vec<Arc<dyn TopicObserver>>,
}

impl Topic {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<Handle>,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            author: author.into(),
            created_at,
            category: String::new(),
            description: String::new(),
            approved: false,
            status: TopicStatus::Draft,
            reports: Vec::new(),
            observers: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub const fn id(&self) -> Uuid {
        self.id
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn author(&self) -> &Handle {
        &self.author
    }
    pub const fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }
    pub fn category(&self) -> &str {
        &self.category
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub const fn is_approved(&self) -> bool {
        self.approved
    }
    pub const fn status(&self) -> TopicStatus {
        self.status
    }
    pub fn reports(&self) -> &[TopicReport] {
        &self.reports
    }
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // ── Observer list ─────────────────────────────────────────────────────

    /// Append an observer to the notification list.
    pub fn bind(&mut self, observer: Arc<dyn TopicObserver>) {
        self.observers.push(observer);
    }

    /// Remove the first binding of `observer` (pointer identity).
    ///
    /// Returns `false`, and changes nothing, when it was not bound.
    pub fn unbind<O>(&mut self, observer: &Arc<O>) -> bool
    where
        O: TopicObserver + ?Sized,
    {
        let target = Arc::as_ptr(observer).cast::<()>();
        match self
            .observers
            .iter()
            .position(|bound| Arc::as_ptr(bound).cast::<()>() == target)
        {
            Some(index) => {
                self.observers.remove(index);
                true
            }
            None => false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Publish the topic and notify observers.
    pub fn create(&mut self, actor: &Handle) -> Result<Notified, NotificationError> {
        self.status = TopicStatus::Open;
        self.notify(actor, TopicChange::Created)
    }

    /// Replace the description and notify observers.
    pub fn edit(
        &mut self,
        actor: &Handle,
        description: impl Into<String>,
    ) -> Result<Notified, NotificationError> {
        self.description = description.into();
        self.notify(
            actor,
            TopicChange::Edited {
                description: self.description.clone(),
            },
        )
    }

    /// File a report and notify observers.
    pub fn report(
        &mut self,
        actor: &Handle,
        reason: impl Into<String>,
    ) -> Result<Notified, NotificationError> {
        let reason = reason.into();
        self.reports.push(TopicReport {
            reporter: actor.clone(),
            reason: reason.clone(),
        });
        self.notify(actor, TopicChange::Reported { reason })
    }

    /// Mark the topic approved and notify observers.
    pub fn approve(&mut self, actor: &Handle) -> Result<Notified, NotificationError> {
        self.approved = true;
        self.notify(actor, TopicChange::Approved)
    }

    fn notify(&self, actor: &Handle, change: TopicChange) -> Result<Notified, NotificationError> {
        let label = change.label();
        let event = TopicEvent {
            topic_id: self.id,
            title: self.title.clone(),
            actor: actor.clone(),
            change,
        };

        let failures: Vec<ObserverFailure> = self
            .observers
            .iter()
            .filter_map(|observer| {
                observer
                    .on_topic_changed(&event)
                    .err()
                    .map(|error| ObserverFailure {
                        observer: observer.observer_id(),
                        error,
                    })
            })
            .collect();

        if failures.is_empty() {
            Ok(Notified {
                delivered: self.observers.len(),
            })
        } else {
            Err(NotificationError {
                title: self.title.clone(),
                change: label,
                attempted: self.observers.len(),
                failures,
            })
        }
    }
}

impl fmt::Debug for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Topic")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("author", &self.author)
            .field("status", &self.status)
            .field("approved", &self.approved)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.category.is_empty() {
            write!(f, "Topic: {}", self.title)
        } else {
            write!(f, "Topic: {} ({})", self.title, self.category)
        }
    }
}
