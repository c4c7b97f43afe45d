//! Conversation domain - the strategy engine.
//!
//! Per turn, the driver runs a straight-line pipeline over the conversation
//! state: the analyzer classifies the history, the strategy selector maps
//! that classification onto a policy bundle, the composer turns policy plus
//! persona into a reply via the AI provider, and the question selector picks
//! the follow-up. Classification and selection are pure and deterministic;
//! only question choice is randomized, behind a seedable source.

mod analyzer;
mod composer;
mod context;
mod driver;
mod message;
mod questions;
mod state;
mod strategy;

pub use analyzer::TurnAnalyzer;
pub use composer::{ResponseComposer, FALLBACK_RESPONSE};
pub use context::{Balance, Depth, SharingLevel, Topic, TurnContext};
pub use driver::{ConversationDriver, TurnOutcome};
pub use message::{Message, MessageId, Role};
pub use questions::QuestionSelector;
pub use state::ConversationState;
pub use strategy::{
    InfoGap, PrimaryGoal, QuestionStyle, ResponseApproach, SharingPriority, Strategy,
    StrategySelector,
};
