//! Topic Board - keeps published topics and drives their lifecycle by title.
//!
//! The board owns its topics; callers bind observers through it and then
//! publish, edit, report or approve by title. Each call runs exactly one
//! notification pass on the topic. Observer failures are traced and returned
//! as [`ApplicationError::Notification`]; the topic change itself is kept.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::application::ApplicationError;
use crate::domain::{
    DomainError, Handle, NotificationError, Notified, Topic, TopicObserver,
};
use crate::error::CafeResult;

#[derive(Debug, Default)]
pub struct TopicBoard {
    topics: Vec<Topic>,
}

impl TopicBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `create` on the topic and keep it, even if some observers failed.
    #[instrument(skip_all, fields(title = %topic.title(), actor = %actor))]
    pub fn publish(&mut self, mut topic: Topic, actor: &Handle) -> CafeResult<Notified> {
        let outcome = topic.create(actor);
        self.topics.push(topic);
        deliver(outcome)
    }

    /// Bind an observer to a published topic.
    pub fn bind(&mut self, title: &str, observer: Arc<dyn TopicObserver>) -> CafeResult<()> {
        self.find_mut(title)?.bind(observer);
        Ok(())
    }

    #[instrument(skip(self, actor, description), fields(actor = %actor))]
    pub fn edit(
        &mut self,
        title: &str,
        actor: &Handle,
        description: impl Into<String>,
    ) -> CafeResult<Notified> {
        let outcome = self.find_mut(title)?.edit(actor, description);
        deliver(outcome)
    }

    #[instrument(skip(self, actor, reason), fields(actor = %actor))]
    pub fn report(
        &mut self,
        title: &str,
        actor: &Handle,
        reason: impl Into<String>,
    ) -> CafeResult<Notified> {
        let outcome = self.find_mut(title)?.report(actor, reason);
        deliver(outcome)
    }

    #[instrument(skip(self, actor), fields(actor = %actor))]
    pub fn approve(&mut self, title: &str, actor: &Handle) -> CafeResult<Notified> {
        let outcome = self.find_mut(title)?.approve(actor);
        deliver(outcome)
    }

    /// First published topic with this title.
    pub fn topic(&self, title: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.title() == title)
    }

    /// Every published topic, in publication order.
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    fn find_mut(&mut self, title: &str) -> Result<&mut Topic, DomainError> {
        self.topics
            .iter_mut()
            .find(|t| t.title() == title)
            .ok_or_else(|| DomainError::UnknownTopic {
                title: title.to_owned(),
            })
    }
}

fn deliver(outcome: Result<Notified, NotificationError>) -> CafeResult<Notified> {
    match outcome {
        Ok(notified) => {
            info!(delivered = notified.delivered, "Observers notified");
            Ok(notified)
        }
        Err(e) => {
            for failure in &e.failures {
                warn!(observer = %failure.observer, error = %failure.error, "Observer rejected topic event");
            }
            Err(ApplicationError::from(e).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::moderation::MockTopicObserver;
    use crate::domain::{ModerationState, Moderator, ObserverError};
    use crate::error::CafeError;

    fn topic(title: &str) -> Topic {
        let at = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        Topic::new(title, "joao123", at).with_category("Question")
    }

    #[test]
    fn lifecycle_by_title_reaches_moderators() {
        let ana = Arc::new(Moderator::new("ana_mod", 1));
        let joao = Handle::new("joao123");
        let mut board = TopicBoard::new();

        let mut first = topic("First Topic");
        first.bind(ana.clone());
        let mut second = topic("Second Topic");
        second.bind(ana.clone());

        board.publish(first, &joao).unwrap();
        board.publish(second, &joao).unwrap();
        board
            .edit("First Topic", &joao, "Updated description")
            .unwrap();
        board
            .report("Second Topic", &joao, "Inappropriate content")
            .unwrap();

        assert_eq!(ana.notification_count(), 4);
        assert_eq!(ana.topic_state("First Topic"), ModerationState::Edited);
        assert_eq!(ana.topic_state("Second Topic"), ModerationState::Reported);
        assert_eq!(
            board.topic("First Topic").unwrap().description(),
            "Updated description"
        );
        assert_eq!(board.topics().len(), 2);
    }

    #[test]
    fn unknown_title_is_not_found() {
        let mut board = TopicBoard::new();
        let err = board
            .approve("Missing", &Handle::new("ana_mod"))
            .unwrap_err();
        assert!(matches!(
            err,
            CafeError::Domain(DomainError::UnknownTopic { .. })
        ));
    }

    #[test]
    fn observer_failure_is_surfaced_but_topic_is_kept() {
        let mut broken = MockTopicObserver::new();
        broken
            .expect_on_topic_changed()
            .returning(|_| Err(ObserverError::new("offline")));
        broken
            .expect_observer_id()
            .return_const("broken".to_string());

        let mut t = topic("Fragile");
        t.bind(Arc::new(broken));
        let mut board = TopicBoard::new();

        let err = board.publish(t, &Handle::new("joao123")).unwrap_err();
        assert!(matches!(
            err,
            CafeError::Application(ApplicationError::Notification(_))
        ));
        assert!(board.topic("Fragile").is_some());
    }

    #[test]
    fn bind_after_publish() {
        let ana = Arc::new(Moderator::new("ana_mod", 1));
        let mut board = TopicBoard::new();
        board
            .publish(topic("Late"), &Handle::new("joao123"))
            .unwrap();
        board.bind("Late", ana.clone()).unwrap();
        board.approve("Late", &Handle::new("ana_mod")).unwrap();

        assert_eq!(ana.notification_count(), 1);
        assert!(board.topic("Late").unwrap().is_approved());
    }
}
