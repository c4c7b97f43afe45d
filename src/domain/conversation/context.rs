//! Turn classification value objects.
//!
//! A [`TurnContext`] is the analyzer's read on the current turn: what the
//! conversation is about, how far along it is, how much the human has been
//! sharing, and who is carrying the dialogue. It is recomputed from scratch
//! every turn; nothing here persists between turns.

use serde::{Deserialize, Serialize};

/// Coarse subject classification of the current turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Experience,
    Education,
    Skills,
    Projects,
    Interests,
    Networking,
    #[default]
    General,
}

impl Topic {
    /// Snake-case tag used in prompts and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Experience => "experience",
            Topic::Education => "education",
            Topic::Skills => "skills",
            Topic::Projects => "projects",
            Topic::Interests => "interests",
            Topic::Networking => "networking",
            Topic::General => "general",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Conversational maturity bucket derived from message count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Depth {
    #[default]
    Initial,
    Medium,
    Deep,
}

/// Depth breakpoints over the total message count (user + assistant,
/// including the current user message). Tunable, kept literal for
/// behavioral compatibility.
pub const DEPTH_MEDIUM_AFTER: usize = 3;
pub const DEPTH_DEEP_AFTER: usize = 6;

impl Depth {
    /// Step function over total message count: <=3 initial, 4-6 medium, >6 deep.
    pub fn from_message_count(count: usize) -> Self {
        if count > DEPTH_DEEP_AFTER {
            Depth::Deep
        } else if count > DEPTH_MEDIUM_AFTER {
            Depth::Medium
        } else {
            Depth::Initial
        }
    }

    /// Snake-case tag used in prompts and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Depth::Initial => "initial",
            Depth::Medium => "medium",
            Depth::Deep => "deep",
        }
    }
}

impl std::fmt::Display for Depth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Heuristic estimate of how much personal/professional detail the human
/// participant has disclosed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharingLevel {
    #[default]
    Minimal,
    Low,
    Medium,
    High,
}

impl SharingLevel {
    /// Snake-case tag used in prompts and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SharingLevel::Minimal => "minimal",
            SharingLevel::Low => "low",
            SharingLevel::Medium => "medium",
            SharingLevel::High => "high",
        }
    }
}

impl std::fmt::Display for SharingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Heuristic estimate of whether the agent or the human is dominating the
/// conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Balance {
    #[default]
    Balanced,
    AgentHeavy,
    UserQuestioning,
}

impl Balance {
    /// Snake-case tag used in prompts and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Balance::Balanced => "balanced",
            Balance::AgentHeavy => "agent_heavy",
            Balance::UserQuestioning => "user_questioning",
        }
    }
}

impl std::fmt::Display for Balance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derived classification of the current turn.
///
/// A pure function of the message history as of the start of the turn;
/// `Default` is the empty-history classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnContext {
    pub topic: Topic,
    pub depth: Depth,
    pub sharing_level: SharingLevel,
    pub balance: Balance,
}
