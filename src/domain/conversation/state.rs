//! Per-conversation state.
//!
//! One [`ConversationState`] per conversation, owned by the caller and fed
//! to the driver each turn. The message log is append-only and the only
//! thing that carries between turns; `context`, `strategy` and the last
//! outputs are recomputed every turn and kept only for inspection.

use super::context::TurnContext;
use super::message::Message;
use super::strategy::Strategy;
use crate::domain::foundation::{ConversationId, UserId};
use crate::domain::profile::Profile;

/// State for a single conversation.
///
/// Not shared: concurrent conversations each own an independent instance.
#[derive(Debug, Clone)]
pub struct ConversationState {
    /// Identity of this conversation.
    conversation_id: ConversationId,

    /// The user whose twin is speaking.
    user_id: UserId,

    /// Full message history, append-only.
    messages: Vec<Message>,

    /// Profile snapshot taken at construction; read-only within a turn.
    profile: Profile,

    /// Classification of the most recent turn.
    context: TurnContext,

    /// Strategy chosen for the most recent turn.
    strategy: Option<Strategy>,

    /// Response produced by the most recent turn.
    last_response: Option<String>,

    /// Follow-up question produced by the most recent turn.
    last_question: Option<String>,
}

impl ConversationState {
    /// Creates state for a new conversation with a profile snapshot.
    pub fn new(user_id: UserId, profile: Profile) -> Self {
        Self {
            conversation_id: ConversationId::new(),
            user_id,
            messages: Vec::new(),
            profile,
            context: TurnContext::default(),
            strategy: None,
            last_response: None,
            last_question: None,
        }
    }

    /// Uses a caller-provided conversation id (e.g. resuming a transcript).
    pub fn with_conversation_id(mut self, conversation_id: ConversationId) -> Self {
        self.conversation_id = conversation_id;
        self
    }

    /// Appends a message to the history.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Returns the conversation id.
    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation_id
    }

    /// Returns the user id.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the full message history.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages in the history.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Returns the profile snapshot.
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Returns the classification of the most recent turn.
    pub fn context(&self) -> &TurnContext {
        &self.context
    }

    /// Returns the strategy chosen for the most recent turn.
    pub fn strategy(&self) -> Option<&Strategy> {
        self.strategy.as_ref()
    }

    /// Returns the most recent response, if a turn has completed.
    pub fn last_response(&self) -> Option<&str> {
        self.last_response.as_deref()
    }

    /// Returns the most recent follow-up question, if a turn has completed.
    pub fn last_question(&self) -> Option<&str> {
        self.last_question.as_deref()
    }

    /// Records the derived outputs of a completed turn.
    pub(crate) fn record_turn(
        &mut self,
        context: TurnContext,
        strategy: Strategy,
        response: String,
        question: String,
    ) {
        self.context = context;
        self.strategy = Some(strategy);
        self.last_response = Some(response);
        self.last_question = Some(question);
    }
}
