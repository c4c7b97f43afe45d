//! Conversation driver.
//!
//! Sequences the per-turn pipeline: append the user message, analyze the
//! history, select a strategy, compose the response, select the follow-up
//! question, append the assistant message. The profile snapshot is loaded
//! into [`ConversationState`] at construction; each turn is a straight-line
//! pass with no branching, suspended only at the provider call.

use std::sync::Arc;

use super::analyzer::TurnAnalyzer;
use super::composer::ResponseComposer;
use super::message::Message;
use super::questions::QuestionSelector;
use super::state::ConversationState;
use super::strategy::StrategySelector;
use crate::domain::foundation::DomainError;
use crate::ports::{AIProvider, RequestMetadata};

/// Output of one completed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// The agent's reply to the user's utterance.
    pub response: String,
    /// The follow-up question advancing the conversation.
    pub question: String,
}

/// Drives one conversation turn at a time.
///
/// Single-conversation, request/response: a turn runs start-to-finish before
/// the next is accepted. Concurrent conversations each get their own
/// [`ConversationState`]; drivers hold no cross-conversation state.
pub struct ConversationDriver {
    analyzer: TurnAnalyzer,
    strategy: StrategySelector,
    composer: ResponseComposer,
    questions: QuestionSelector,
}

impl ConversationDriver {
    /// Creates a driver backed by the given AI provider.
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            analyzer: TurnAnalyzer::new(),
            strategy: StrategySelector::new(),
            composer: ResponseComposer::new(provider),
            questions: QuestionSelector::new(),
        }
    }

    /// Seeds the question selector, for deterministic tests and replays.
    pub fn with_question_seed(mut self, seed: u64) -> Self {
        self.questions = QuestionSelector::with_seed(seed);
        self
    }

    /// Replaces the composer's persona prefix.
    pub fn with_persona_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.composer = self.composer.with_persona_prefix(prefix);
        self
    }

    /// Processes one user utterance and returns the reply plus follow-up
    /// question. Appends both the user and assistant messages to the state's
    /// history.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the utterance is empty. Every downstream
    ///   condition degrades instead of failing: missing profile context,
    ///   empty history and provider errors all still produce a best-effort
    ///   response.
    pub async fn chat(
        &mut self,
        state: &mut ConversationState,
        user_input: &str,
    ) -> Result<TurnOutcome, DomainError> {
        state.push(Message::user(user_input)?);

        // analyze_input
        let context = self.analyzer.analyze(state.messages());

        // select_strategy
        let strategy = self
            .strategy
            .select(&context, state.messages(), state.profile());

        // compose_response
        let metadata = RequestMetadata::new(state.user_id().clone(), *state.conversation_id());
        let response = self
            .composer
            .compose(state.profile(), &context, &strategy, state.messages(), metadata)
            .await;

        // select_question
        let question = self
            .questions
            .select_question(context.topic, context.depth, &strategy);

        state.push(Message::assistant(response.as_str())?);
        state.record_turn(context, strategy, response.clone(), question.clone());

        tracing::info!(
            conversation_id = %state.conversation_id(),
            turn_messages = state.message_count(),
            "turn completed"
        );

        Ok(TurnOutcome { response, question })
    }
}
