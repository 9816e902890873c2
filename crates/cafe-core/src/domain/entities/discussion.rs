//! Discussions, their messages, and replies to messages.
//!
//! Messages and replies are append-only: once pushed, their author and text
//! never change. Only like counters move.

use serde::Serialize;

use crate::domain::value_objects::Handle;

/// Request to open a discussion.
///
/// Category and description are optional; the registry only cares about the
/// title and the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDiscussion {
    pub title: String,
    pub owner: Handle,
    pub category: String,
    pub description: String,
}

impl NewDiscussion {
    pub fn new(title: impl Into<String>, owner: impl Into<Handle>) -> Self {
        Self {
            title: title.into(),
            owner: owner.into(),
            category: String::new(),
            description: String::new(),
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A titled, owned, ordered collection of messages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discussion {
    title: String,
    owner: Handle,
    category: String,
    description: String,
    messages: Vec<Message>,
}

impl Discussion {
    pub(crate) fn open(request: NewDiscussion) -> Self {
        Self {
            title: request.title,
            owner: request.owner,
            category: request.category,
            description: request.description,
            messages: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn owner(&self) -> &Handle {
        &self.owner
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Append a message and return its index.
    pub(crate) fn push(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    pub(crate) fn message_mut(&mut self, index: usize) -> Option<&mut Message> {
        self.messages.get_mut(index)
    }
}

/// One post inside a discussion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    author: Handle,
    text: String,
    likes: u32,
    replies: Vec<Reply>,
}

impl Message {
    pub fn new(author: impl Into<Handle>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            likes: 0,
            replies: Vec::new(),
        }
    }

    pub fn author(&self) -> &Handle {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn likes(&self) -> u32 {
        self.likes
    }

    pub fn replies(&self) -> &[Reply] {
        &self.replies
    }

    /// First 40 characters of the text, for listings.
    pub fn preview(&self) -> String {
        preview(&self.text, 40)
    }

    pub(crate) fn like(&mut self) -> u32 {
        self.likes = self.likes.saturating_add(1);
        self.likes
    }

    pub(crate) fn reply(&mut self, reply: Reply) -> usize {
        self.replies.push(reply);
        self.replies.len() - 1
    }
}

/// A reply attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    author: Handle,
    text: String,
    likes: u32,
}

impl Reply {
    pub fn new(author: impl Into<Handle>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            likes: 0,
        }
    }

    pub fn author(&self) -> &Handle {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn likes(&self) -> u32 {
        self.likes
    }

    pub fn preview(&self) -> String {
        preview(&self.text, 30)
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}
