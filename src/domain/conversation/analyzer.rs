//! Turn analyzer.
//!
//! Classifies the current turn from the raw message history: topic of the
//! latest user message, conversational depth, how much the human has been
//! sharing, and who is carrying the dialogue. Pure and deterministic; empty
//! input yields the default classification rather than an error.

use super::context::{Balance, Depth, SharingLevel, Topic, TurnContext};
use super::message::Message;

/// Keyword sets tested in fixed priority order; first match wins.
/// Matching is substring containment on the lowercased latest user message.
const TOPIC_KEYWORDS: &[(Topic, &[&str])] = &[
    (Topic::Experience, &["experience", "work", "job", "career", "role"]),
    (Topic::Education, &["education", "school", "university", "degree", "study"]),
    (Topic::Skills, &["skills", "technical", "programming", "technology", "tools"]),
    (Topic::Projects, &["project", "portfolio", "github", "build", "created"]),
    (Topic::Interests, &["interest", "passionate", "excited", "goal", "future"]),
    (Topic::Networking, &["network", "connect", "meet", "mentor", "advice"]),
];

/// Phrases that signal direct personal/professional disclosure.
const DISCLOSURE_PHRASES: &[&str] = &[
    "i work",
    "i'm working",
    "my job",
    "my role",
    "my company",
    "i studied",
    "i graduated",
];

/// Phrases that signal affect or goals.
const AFFECT_PHRASES: &[&str] = &[
    "i like",
    "i enjoy",
    "i'm passionate",
    "i'm interested",
    "my goal",
    "i want",
];

/// Phrases that anchor the message in time.
const TEMPORAL_PHRASES: &[&str] = &[
    "currently",
    "recently",
    "last year",
    "next",
    "planning",
];

// Hand-tuned thresholds; kept literal for behavioral compatibility.
const DISCLOSURE_WEIGHT: u32 = 2;
const AFFECT_WEIGHT: u32 = 1;
const TEMPORAL_WEIGHT: u32 = 1;
const HIGH_SHARING_INDICATORS: u32 = 3;
const HIGH_SHARING_AVG_WORDS: f32 = 10.0;
const MEDIUM_SHARING_INDICATORS: u32 = 1;
const MEDIUM_SHARING_AVG_WORDS: f32 = 5.0;
const MIN_MESSAGES_FOR_SHARING: usize = 2;
const MIN_MESSAGES_FOR_BALANCE: usize = 4;
const AGENT_HEAVY_RATIO: f32 = 1.5;
const USER_QUESTIONING_FACTOR: f32 = 0.7;

/// Classifies the current turn from the message history.
///
/// Stateless; one instance can serve any number of conversations.
#[derive(Debug, Clone, Default)]
pub struct TurnAnalyzer;

impl TurnAnalyzer {
    /// Creates a new analyzer.
    pub fn new() -> Self {
        Self
    }

    /// Produces the classification for the current turn.
    ///
    /// Never fails: an empty history returns
    /// `{general, initial, minimal, balanced}`.
    pub fn analyze(&self, messages: &[Message]) -> TurnContext {
        let context = TurnContext {
            topic: self.detect_topic(messages),
            depth: Depth::from_message_count(messages.len()),
            sharing_level: self.assess_sharing_level(messages),
            balance: self.assess_balance(messages),
        };
        tracing::debug!(
            topic = %context.topic,
            depth = %context.depth,
            sharing_level = %context.sharing_level,
            balance = %context.balance,
            message_count = messages.len(),
            "turn classified"
        );
        context
    }

    /// Topic of the most recent user message, first keyword set to match wins.
    fn detect_topic(&self, messages: &[Message]) -> Topic {
        let Some(latest) = messages.iter().rev().find(|m| m.is_user()) else {
            return Topic::General;
        };
        let content = latest.content_lowercase();

        for (topic, keywords) in TOPIC_KEYWORDS {
            if keywords.iter().any(|kw| content.contains(kw)) {
                return *topic;
            }
        }
        Topic::General
    }

    /// Weighted phrase-count heuristic over user messages only.
    fn assess_sharing_level(&self, messages: &[Message]) -> SharingLevel {
        if messages.len() < MIN_MESSAGES_FOR_SHARING {
            return SharingLevel::Minimal;
        }

        let user_messages: Vec<&Message> = messages.iter().filter(|m| m.is_user()).collect();
        if user_messages.is_empty() {
            return SharingLevel::Minimal;
        }

        let mut indicators = 0u32;
        let mut total_words = 0usize;

        for msg in &user_messages {
            let content = msg.content_lowercase();
            total_words += msg.word_count();

            if DISCLOSURE_PHRASES.iter().any(|p| content.contains(p)) {
                indicators += DISCLOSURE_WEIGHT;
            }
            if AFFECT_PHRASES.iter().any(|p| content.contains(p)) {
                indicators += AFFECT_WEIGHT;
            }
            if TEMPORAL_PHRASES.iter().any(|p| content.contains(p)) {
                indicators += TEMPORAL_WEIGHT;
            }
        }

        let avg_words = total_words as f32 / user_messages.len() as f32;

        if indicators >= HIGH_SHARING_INDICATORS && avg_words > HIGH_SHARING_AVG_WORDS {
            SharingLevel::High
        } else if indicators >= MEDIUM_SHARING_INDICATORS && avg_words > MEDIUM_SHARING_AVG_WORDS {
            SharingLevel::Medium
        } else {
            SharingLevel::Low
        }
    }

    /// Assistant-to-user ratio and user question-rate heuristic.
    fn assess_balance(&self, messages: &[Message]) -> Balance {
        if messages.len() < MIN_MESSAGES_FOR_BALANCE {
            return Balance::Balanced;
        }

        let user_count = messages.iter().filter(|m| m.is_user()).count();
        let agent_count = messages.iter().filter(|m| m.is_assistant()).count();
        if user_count == 0 || agent_count == 0 {
            return Balance::Balanced;
        }

        let ratio = agent_count as f32 / user_count as f32;
        if ratio > AGENT_HEAVY_RATIO {
            return Balance::AgentHeavy;
        }

        let user_questions = messages
            .iter()
            .filter(|m| m.is_user() && m.content().contains('?'))
            .count();
        if user_questions as f32 > agent_count as f32 * USER_QUESTIONING_FACTOR {
            return Balance::UserQuestioning;
        }

        Balance::Balanced
    }
}
