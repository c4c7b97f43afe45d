//! Message entity for conversations.
//!
//! Messages are immutable records of user/assistant exchanges within a
//! conversation. Each message has a role, content, and timestamp; a
//! conversation's history is append-only.

use crate::domain::foundation::{DomainError, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a message within a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Creates a new random MessageId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a MessageId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Human participant.
    User,
    /// The digital twin.
    Assistant,
}

/// An immutable message within a conversation.
///
/// # Invariants
///
/// - `content` is non-empty (validated at construction)
/// - `created_at` is set at construction and never changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for this message.
    id: MessageId,

    /// The role of the message sender.
    role: Role,

    /// The content of the message.
    content: String,

    /// When the message was created.
    created_at: Timestamp,
}

impl Message {
    /// Creates a new message with the given role and content.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty
    pub fn new(role: Role, content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        Self::validate_content(&content)?;

        Ok(Self {
            id: MessageId::new(),
            role,
            content,
            created_at: Timestamp::now(),
        })
    }

    /// Creates a user message.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty
    pub fn user(content: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty
    pub fn assistant(content: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Role::Assistant, content)
    }

    /// Returns the message ID.
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Returns the role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the content lowercased, as keyword matching expects it.
    pub fn content_lowercase(&self) -> String {
        self.content.to_lowercase()
    }

    /// Number of whitespace-separated words in the content.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Returns when the message was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns true if this message is from the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Returns true if this message is from the assistant.
    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }

    fn validate_content(content: &str) -> Result<(), DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::validation(
                "content",
                "Message content cannot be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn user_creates_user_message() {
            let msg = Message::user("Hello").unwrap();
            assert!(msg.is_user());
            assert!(!msg.is_assistant());
            assert_eq!(msg.content(), "Hello");
        }

        #[test]
        fn assistant_creates_assistant_message() {
            let msg = Message::assistant("Hi there").unwrap();
            assert!(msg.is_assistant());
            assert!(!msg.is_user());
        }

        #[test]
        fn rejects_empty_content() {
            assert!(Message::user("").is_err());
        }

        #[test]
        fn rejects_whitespace_only_content() {
            assert!(Message::user("   \n\t").is_err());
        }

        #[test]
        fn ids_are_unique() {
            let a = Message::user("one").unwrap();
            let b = Message::user("two").unwrap();
            assert_ne!(a.id(), b.id());
        }
    }

    mod content_helpers {
        use super::*;

        #[test]
        fn content_lowercase_lowers_everything() {
            let msg = Message::user("I Work At Northwind").unwrap();
            assert_eq!(msg.content_lowercase(), "i work at northwind");
        }

        #[test]
        fn word_count_splits_on_whitespace() {
            let msg = Message::user("one  two\tthree\nfour").unwrap();
            assert_eq!(msg.word_count(), 4);
        }
    }

    mod role {
        use super::*;

        #[test]
        fn serializes_to_snake_case() {
            assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
            assert_eq!(
                serde_json::to_string(&Role::Assistant).unwrap(),
                "\"assistant\""
            );
        }
    }
}
