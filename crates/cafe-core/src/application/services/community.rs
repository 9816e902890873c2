//! Community Registry - the single authority over members and discussions.
//!
//! Every operation takes one mutex for validation, mutation and logging, so
//! concurrent callers are fully serialized and each mutating call writes
//! exactly one activity log line while the lock is held (lock order:
//! registry, then log).
//!
//! Rejections are returned as [`DomainError`] values and recorded at the
//! error's [`severity`](DomainError::severity); nothing here panics.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::application::services::activity_log::{ActivityLog, LogSnapshot};
use crate::domain::{
    Discussion, DomainError, Handle, Member, Message, NewDiscussion, Reply,
};

/// Successful outcome of a mutating registry call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    message: String,
    index: Option<usize>,
}

impl Receipt {
    fn new(message: String) -> Self {
        Self {
            message,
            index: None,
        }
    }

    fn with_index(message: String, index: usize) -> Self {
        Self {
            message,
            index: Some(index),
        }
    }

    /// The status line, as written to the activity log.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Position of the appended message or reply, when the call appended one.
    pub const fn index(&self) -> Option<usize> {
        self.index
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Default)]
struct CommunityState {
    members: HashMap<Handle, Member>,
    discussions: HashMap<String, Discussion>,
    /// Discussion titles in creation order.
    opened: Vec<String>,
}

impl CommunityState {
    fn require_member(&self, handle: &Handle) -> Result<(), DomainError> {
        if self.members.contains_key(handle) {
            Ok(())
        } else {
            Err(DomainError::UnknownMember {
                handle: handle.clone(),
            })
        }
    }

    fn discussion_mut(&mut self, title: &str) -> Result<&mut Discussion, DomainError> {
        self.discussions
            .get_mut(title)
            .ok_or_else(|| DomainError::UnknownDiscussion {
                title: title.to_owned(),
            })
    }

    fn message_mut(&mut self, title: &str, index: usize) -> Result<&mut Message, DomainError> {
        self.discussion_mut(title)?
            .message_mut(index)
            .ok_or_else(|| DomainError::UnknownMessage {
                title: title.to_owned(),
                index,
            })
    }

    fn add_member(&mut self, member: Member) -> Result<Receipt, DomainError> {
        let handle = member.handle().clone();
        if self.members.contains_key(&handle) {
            return Err(DomainError::AlreadyMember { handle });
        }
        self.members.insert(handle.clone(), member);
        Ok(Receipt::new(format!("Member {handle} registered")))
    }

    fn start_discussion(&mut self, new: NewDiscussion) -> Result<Receipt, DomainError> {
        self.require_member(&new.owner)?;
        if self.discussions.contains_key(&new.title) {
            return Err(DomainError::DuplicateDiscussion { title: new.title });
        }
        let receipt = Receipt::new(format!(
            "Discussion '{}' started by {}",
            new.title, new.owner
        ));
        self.opened.push(new.title.clone());
        self.discussions
            .insert(new.title.clone(), Discussion::open(new));
        Ok(receipt)
    }

    fn post_message(
        &mut self,
        title: &str,
        author: Handle,
        text: String,
    ) -> Result<Receipt, DomainError> {
        self.require_member(&author)?;
        let discussion = self.discussion_mut(title)?;
        let message = format!("Message posted to '{title}' by {author}");
        let index = discussion.push(Message::new(author, text));
        Ok(Receipt::with_index(message, index))
    }

    fn reply_to_message(
        &mut self,
        title: &str,
        index: usize,
        author: Handle,
        text: String,
    ) -> Result<Receipt, DomainError> {
        self.require_member(&author)?;
        let message = self.message_mut(title, index)?;
        let status = format!("Reply added by {author} to message #{index} in '{title}'");
        let reply_index = message.reply(Reply::new(author, text));
        Ok(Receipt::with_index(status, reply_index))
    }

    fn like_message(&mut self, title: &str, index: usize) -> Result<Receipt, DomainError> {
        let likes = self.message_mut(title, index)?.like();
        Ok(Receipt::with_index(
            format!("Message #{index} in '{title}' liked ({likes} total)"),
            index,
        ))
    }

    fn follow_discussion(&mut self, handle: &Handle, title: &str) -> Result<Receipt, DomainError> {
        self.require_member(handle)?;
        if !self.discussions.contains_key(title) {
            return Err(DomainError::UnknownDiscussion {
                title: title.to_owned(),
            });
        }
        let member = self
            .members
            .get_mut(handle)
            .ok_or_else(|| DomainError::UnknownMember {
                handle: handle.clone(),
            })?;
        let status = if member.follow_discussion(title) {
            format!("{handle} now follows '{title}'")
        } else {
            format!("{handle} already follows '{title}'")
        };
        Ok(Receipt::new(status))
    }

    fn follow_member(&mut self, handle: &Handle, other: Handle) -> Result<Receipt, DomainError> {
        self.require_member(&other)?;
        let member = self
            .members
            .get_mut(handle)
            .ok_or_else(|| DomainError::UnknownMember {
                handle: handle.clone(),
            })?;
        let status = if member.follow_member(other.clone()) {
            format!("{handle} now follows {other}")
        } else {
            format!("{handle} already follows {other}")
        };
        Ok(Receipt::new(status))
    }
}

/// Shared community state behind one lock.
///
/// Explicitly constructible for injection; the process-wide instance lives in
/// `cafe_adapters::global`.
pub struct CommunityRegistry {
    state: Mutex<CommunityState>,
    log: Arc<ActivityLog>,
}

impl CommunityRegistry {
    pub fn new(log: Arc<ActivityLog>) -> Self {
        Self {
            state: Mutex::new(CommunityState::default()),
            log,
        }
    }

    /// The activity log this registry records into.
    pub fn activity_log(&self) -> &Arc<ActivityLog> {
        &self.log
    }

    // ── Mutations ────────────────────────────────────────────────────────────

    #[instrument(skip_all, fields(handle = %member.handle()))]
    pub fn add_member(&self, member: Member) -> Result<Receipt, DomainError> {
        let mut state = self.lock();
        let outcome = state.add_member(member);
        self.settle(outcome)
    }

    #[instrument(skip_all, fields(title = %discussion.title, owner = %discussion.owner))]
    pub fn start_discussion(&self, discussion: NewDiscussion) -> Result<Receipt, DomainError> {
        let mut state = self.lock();
        let outcome = state.start_discussion(discussion);
        self.settle(outcome)
    }

    /// Append a message. The author is checked before the discussion.
    #[instrument(skip(self, author, text), fields(author = %author.as_ref()))]
    pub fn post_message(
        &self,
        title: &str,
        author: impl AsRef<str>,
        text: impl Into<String>,
    ) -> Result<Receipt, DomainError> {
        let mut state = self.lock();
        let outcome = state.post_message(title, Handle::new(author), text.into());
        self.settle(outcome)
    }

    #[instrument(skip(self, author, text), fields(author = %author.as_ref()))]
    pub fn reply_to_message(
        &self,
        title: &str,
        index: usize,
        author: impl AsRef<str>,
        text: impl Into<String>,
    ) -> Result<Receipt, DomainError> {
        let mut state = self.lock();
        let outcome = state.reply_to_message(title, index, Handle::new(author), text.into());
        self.settle(outcome)
    }

    #[instrument(skip(self))]
    pub fn like_message(&self, title: &str, index: usize) -> Result<Receipt, DomainError> {
        let mut state = self.lock();
        let outcome = state.like_message(title, index);
        self.settle(outcome)
    }

    pub fn follow_discussion(
        &self,
        handle: impl AsRef<str>,
        title: &str,
    ) -> Result<Receipt, DomainError> {
        let mut state = self.lock();
        let outcome = state.follow_discussion(&Handle::new(handle), title);
        self.settle(outcome)
    }

    pub fn follow_member(
        &self,
        handle: impl AsRef<str>,
        other: impl AsRef<str>,
    ) -> Result<Receipt, DomainError> {
        let mut state = self.lock();
        let outcome = state.follow_member(&Handle::new(handle), Handle::new(other));
        self.settle(outcome)
    }

    // ── Queries (not logged) ─────────────────────────────────────────────────

    pub fn member(&self, handle: impl AsRef<str>) -> Option<Member> {
        self.lock().members.get(&Handle::new(handle)).cloned()
    }

    pub fn member_count(&self) -> usize {
        self.lock().members.len()
    }

    pub fn discussion(&self, title: &str) -> Option<Discussion> {
        self.lock().discussions.get(title).cloned()
    }

    /// Titles in the order the discussions were started.
    pub fn discussion_titles(&self) -> Vec<String> {
        self.lock().opened.clone()
    }

    pub fn read_log(&self) -> LogSnapshot {
        self.log.read_log()
    }

    // ── Internal Helpers ─────────────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, CommunityState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Community registry lock was poisoned; continuing");
            PoisonError::into_inner(poisoned)
        })
    }

    /// Record the outcome in the activity log. Callers hold the state lock.
    fn settle(&self, outcome: Result<Receipt, DomainError>) -> Result<Receipt, DomainError> {
        match &outcome {
            Ok(receipt) => {
                debug!(status = %receipt, "Community operation accepted");
                self.log.log_success(receipt.message());
            }
            Err(rejection) => {
                debug!(%rejection, "Community operation rejected");
                self.log.record(rejection.severity(), &rejection.to_string());
            }
        }
        outcome
    }
}

impl fmt::Debug for CommunityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("CommunityRegistry")
            .field("members", &state.members.len())
            .field("discussions", &state.opened.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::application::ApplicationError;
    use crate::application::ports::{MockClock, MockLogSink};
    use crate::domain::{Credential, Severity};

    fn clock() -> Box<MockClock> {
        let mut clock = MockClock::new();
        clock.expect_now().returning(|| {
            NaiveDate::from_ymd_opt(2025, 6, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap()
        });
        Box::new(clock)
    }

    /// Sink that keeps every line in a shared vector.
    fn recording_log() -> (Arc<ActivityLog>, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let mut sink = MockLogSink::new();
        let appended = Arc::clone(&lines);
        sink.expect_append().returning(move |line| {
            appended.lock().unwrap().push(line.to_owned());
            Ok(())
        });
        let read = Arc::clone(&lines);
        sink.expect_read_all().returning(move || {
            let lines = read.lock().unwrap();
            Ok((!lines.is_empty()).then(|| lines.join("\n")))
        });
        (Arc::new(ActivityLog::new(Box::new(sink), clock())), lines)
    }

    fn member(handle: &str) -> Member {
        Member::new(handle, handle.to_uppercase(), Credential::new("pw"))
    }

    #[test]
    fn duplicate_member_is_a_warning() {
        let (log, lines) = recording_log();
        let registry = CommunityRegistry::new(log);

        assert!(registry.add_member(member("alice")).is_ok());
        let err = registry.add_member(member("alice")).unwrap_err();

        assert_eq!(err, DomainError::AlreadyMember { handle: Handle::new("alice") });
        assert_eq!(registry.member_count(), 1);
        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("WARNING - Member @alice is already registered"));
    }

    #[test]
    fn post_checks_member_before_discussion() {
        let (log, _) = recording_log();
        let registry = CommunityRegistry::new(log);

        let err = registry.post_message("nowhere", "ghost", "hi").unwrap_err();
        assert!(matches!(err, DomainError::UnknownMember { .. }));

        registry.add_member(member("bruno")).unwrap();
        let err = registry.post_message("nowhere", "bruno", "hi").unwrap_err();
        assert!(matches!(err, DomainError::UnknownDiscussion { .. }));
        assert_eq!(err.severity(), Severity::Error);
    }

    #[test]
    fn receipts_carry_indexes() {
        let (log, _) = recording_log();
        let registry = CommunityRegistry::new(log);
        registry.add_member(member("alice")).unwrap();
        registry
            .start_discussion(NewDiscussion::new("Brews", "alice").category("Discussion"))
            .unwrap();

        let first = registry.post_message("Brews", "alice", "one").unwrap();
        let second = registry.post_message("Brews", "@alice", "two").unwrap();
        assert_eq!((first.index(), second.index()), (Some(0), Some(1)));

        let reply = registry
            .reply_to_message("Brews", 1, "alice", "self reply")
            .unwrap();
        assert_eq!(reply.index(), Some(0));
        assert_eq!(
            reply.to_string(),
            "Reply added by @alice to message #1 in 'Brews'"
        );
    }

    #[test]
    fn replies_and_likes_need_an_existing_message() {
        let (log, lines) = recording_log();
        let registry = CommunityRegistry::new(log);
        registry.add_member(member("alice")).unwrap();
        registry
            .start_discussion(NewDiscussion::new("Brews", "alice"))
            .unwrap();

        assert_eq!(
            registry.like_message("Brews", 0),
            Err(DomainError::UnknownMessage {
                title: "Brews".into(),
                index: 0
            })
        );
        assert!(registry.reply_to_message("Brews", 3, "alice", "x").is_err());

        registry.post_message("Brews", "alice", "hello").unwrap();
        registry.like_message("Brews", 0).unwrap();
        let liked = registry.like_message("Brews", 0).unwrap();
        assert_eq!(liked.message(), "Message #0 in 'Brews' liked (2 total)");
        assert_eq!(registry.discussion("Brews").unwrap().messages()[0].likes(), 2);

        // one line per mutating call, rejected or not
        assert_eq!(lines.lock().unwrap().len(), 7);
    }

    #[test]
    fn follows_are_recorded_on_the_member() {
        let (log, _) = recording_log();
        let registry = CommunityRegistry::new(log);
        registry.add_member(member("alice")).unwrap();
        registry.add_member(member("bruno")).unwrap();
        registry
            .start_discussion(NewDiscussion::new("Brews", "alice"))
            .unwrap();

        registry.follow_discussion("bruno", "Brews").unwrap();
        let again = registry.follow_discussion("bruno", "Brews").unwrap();
        assert_eq!(again.message(), "@bruno already follows 'Brews'");
        registry.follow_member("bruno", "alice").unwrap();

        assert!(registry.follow_member("bruno", "ghost").is_err());
        assert!(registry.follow_discussion("bruno", "Nope").is_err());

        let bruno = registry.member("bruno").unwrap();
        assert_eq!(bruno.followed_discussions().collect::<Vec<_>>(), ["Brews"]);
        assert_eq!(
            bruno.followed_members().collect::<Vec<_>>(),
            [&Handle::new("alice")]
        );
    }

    #[test]
    fn follow_checks_member_before_discussion() {
        let (log, _) = recording_log();
        let registry = CommunityRegistry::new(log);

        let err = registry.follow_discussion("ghost", "Nope").unwrap_err();
        assert!(matches!(err, DomainError::UnknownMember { .. }));
    }

    #[test]
    fn newline_in_title_stays_one_entry() {
        let (log, lines) = recording_log();
        let registry = CommunityRegistry::new(log);
        registry.add_member(member("alice")).unwrap();
        registry
            .start_discussion(NewDiscussion::new(
                "Line one\n01/06/2025 09:00:00 - ERROR - forged",
                "alice",
            ))
            .unwrap();

        assert_eq!(lines.lock().unwrap().len(), 2);
        let snapshot = registry.read_log();
        assert_eq!(snapshot.entries().len(), 2);
        assert_eq!(snapshot.count(Severity::Error), 0);
        assert_eq!(snapshot.count(Severity::Success), 2);
    }

    #[test]
    fn failing_sink_does_not_change_outcomes() {
        let mut sink = MockLogSink::new();
        sink.expect_append().returning(|_| {
            Err(ApplicationError::LogSink {
                operation: "append",
                reason: "read-only filesystem".into(),
            }
            .into())
        });
        sink.expect_read_all().returning(|| Ok(None));
        let registry = CommunityRegistry::new(Arc::new(ActivityLog::new(Box::new(sink), clock())));

        assert!(registry.add_member(member("alice")).is_ok());
        assert!(registry.add_member(member("alice")).is_err());
        assert!(registry
            .start_discussion(NewDiscussion::new("X", "alice"))
            .is_ok());
        assert_eq!(registry.discussion_titles(), ["X"]);
        assert!(registry.read_log().is_empty());
    }
}
