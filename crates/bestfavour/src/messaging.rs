//! Conversation list and the active chat thread.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

pub const OWN_SENDER: &str = "You";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversation {
    pub id: u32,
    pub name: String,
    pub last_message: String,
    pub timestamp: String,
    pub unread: u32,
}

impl Conversation {
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: u32,
    pub sender: String,
    pub content: String,
    pub timestamp: String,
    pub is_sent: bool,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MessagingError {
    #[error("conversation {0} not found")]
    UnknownConversation(u32),
}

#[derive(Debug, Clone)]
pub struct Inbox {
    conversations: Vec<Conversation>,
    active: u32,
    thread: Vec<ChatMessage>,
}

impl Inbox {
    /// Demo inbox with the first conversation open.
    pub fn seeded() -> Self {
        let conversations = seed_conversations();
        let active = conversations.first().map_or(0, |conversation| conversation.id);
        Self {
            conversations,
            active,
            thread: seed_thread(),
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn active(&self) -> Option<&Conversation> {
        self.conversations
            .iter()
            .find(|conversation| conversation.id == self.active)
    }

    pub fn thread(&self) -> &[ChatMessage] {
        &self.thread
    }

    pub fn unread_total(&self) -> u32 {
        self.conversations.iter().map(|c| c.unread).sum()
    }

    /// Opens a conversation, marks it read and reloads its thread.
    pub fn select(&mut self, id: u32) -> Result<&Conversation, MessagingError> {
        let conversation = self
            .conversations
            .iter_mut()
            .find(|conversation| conversation.id == id)
            .ok_or(MessagingError::UnknownConversation(id))?;
        conversation.unread = 0;
        self.active = id;
        // Every conversation shares the seeded thread until a backend exists.
        self.thread = seed_thread();
        debug!(conversation_id = id, "conversation selected");
        Ok(conversation)
    }

    /// Appends an outgoing message. Blank input is ignored.
    pub fn send(&mut self, text: &str, at: DateTime<Utc>) -> Option<&ChatMessage> {
        let content = text.trim();
        if content.is_empty() {
            return None;
        }

        let id = self.thread.len() as u32 + 1;
        self.thread.push(ChatMessage {
            id,
            sender: OWN_SENDER.to_string(),
            content: content.to_string(),
            timestamp: at.format("%H:%M").to_string(),
            is_sent: true,
        });
        debug!(message_id = id, conversation_id = self.active, "message sent");
        self.thread.last()
    }
}

impl Default for Inbox {
    fn default() -> Self {
        Self::seeded()
    }
}

fn seed_conversations() -> Vec<Conversation> {
    [
        (1, "John Doe", "Sure, I can help with that.", "10:30 AM", 2),
        (2, "Jane Smith", "What time works for you?", "Yesterday", 0),
        (3, "Mike Johnson", "The job is completed.", "Mon", 1),
    ]
    .into_iter()
    .map(|(id, name, last, timestamp, unread)| Conversation {
        id,
        name: name.to_string(),
        last_message: last.to_string(),
        timestamp: timestamp.to_string(),
        unread,
    })
    .collect()
}

fn seed_thread() -> Vec<ChatMessage> {
    [
        ("John Doe", "Hello! I saw your request for plumbing services.", "10:00 AM"),
        (OWN_SENDER, "Hi John! Yes, I have a leaky faucet that needs fixing.", "10:05 AM"),
        (
            "John Doe",
            "I can help with that. When would be a good time for me to come take a look?",
            "10:10 AM",
        ),
        (OWN_SENDER, "How about tomorrow afternoon, around 2 PM?", "10:15 AM"),
        ("John Doe", "Sure, I can do that. I'll be there at 2 PM tomorrow.", "10:20 AM"),
        (OWN_SENDER, "Great, thank you! See you then.", "10:25 AM"),
        ("John Doe", "You're welcome. See you tomorrow!", "10:30 AM"),
    ]
    .into_iter()
    .zip(1u32..)
    .map(|((sender, content, timestamp), id)| ChatMessage {
        id,
        sender: sender.to_string(),
        content: content.to_string(),
        timestamp: timestamp.to_string(),
        is_sent: sender == OWN_SENDER,
    })
    .collect()
}
