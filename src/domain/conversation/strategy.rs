//! Conversation strategy selection.
//!
//! Maps the turn classification onto a strategy record: the goal for the
//! next utterance, how to approach it, what information to seek, how much to
//! share, and what style of question to ask. The selector is a deterministic
//! rule table evaluated top-to-bottom; the first matching rule wins, and the
//! ordering is a design commitment, not incidental.

use super::context::{Balance, Depth, SharingLevel, Topic, TurnContext};
use super::message::Message;
use crate::domain::profile::Profile;

/// High-level goal for the agent's next utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimaryGoal {
    EncourageSharing,
    ProvideValue,
    RebalanceConversation,
    DeepenConnection,
    MaintainNaturalFlow,
}

impl PrimaryGoal {
    /// Snake-case tag used in prompts and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryGoal::EncourageSharing => "encourage_sharing",
            PrimaryGoal::ProvideValue => "provide_value",
            PrimaryGoal::RebalanceConversation => "rebalance_conversation",
            PrimaryGoal::DeepenConnection => "deepen_connection",
            PrimaryGoal::MaintainNaturalFlow => "maintain_natural_flow",
        }
    }
}

impl std::fmt::Display for PrimaryGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the response should be shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseApproach {
    ShareRelatableExperienceFirst,
    GiveThoughtfulAdvice,
    BriefAndCurious,
    ShareInsightsAndConnect,
    BalancedSharingAndAsking,
}

impl ResponseApproach {
    /// Snake-case tag used in prompts and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseApproach::ShareRelatableExperienceFirst => "share_relatable_experience_first",
            ResponseApproach::GiveThoughtfulAdvice => "give_thoughtful_advice",
            ResponseApproach::BriefAndCurious => "brief_and_curious",
            ResponseApproach::ShareInsightsAndConnect => "share_insights_and_connect",
            ResponseApproach::BalancedSharingAndAsking => "balanced_sharing_and_asking",
        }
    }
}

impl std::fmt::Display for ResponseApproach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How much of the persona's own background to volunteer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SharingPriority {
    Low,
    Medium,
    High,
}

impl SharingPriority {
    /// Snake-case tag used in prompts and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SharingPriority::Low => "low",
            SharingPriority::Medium => "medium",
            SharingPriority::High => "high",
        }
    }
}

impl std::fmt::Display for SharingPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Style of the follow-up question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionStyle {
    OpenEnded,
    Clarifying,
    PersonalInterest,
    ThoughtfulFollowup,
    Conversational,
}

impl QuestionStyle {
    /// Snake-case tag used in prompts and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionStyle::OpenEnded => "open_ended",
            QuestionStyle::Clarifying => "clarifying",
            QuestionStyle::PersonalInterest => "personal_interest",
            QuestionStyle::ThoughtfulFollowup => "thoughtful_followup",
            QuestionStyle::Conversational => "conversational",
        }
    }
}

impl std::fmt::Display for QuestionStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A profile category or conversational thread the agent should ask about
/// next. Tags are produced by the rule-specific subroutines below and
/// consumed by the question selector and the prompt guidance block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoGap {
    // Career categories the human has not mentioned yet
    CurrentRoleAndCompany,
    EducationalBackground,
    TechnicalSkills,
    InterestingProjects,
    // Advice-mode clarifications
    ClarifyingDetails,
    ContextForAdvice,
    // Unexplored areas, indexed by current topic
    CareerMotivations,
    BiggestChallenges,
    FutureGoals,
    FavoriteSubjects,
    InfluentialExperiences,
    LearningPreferences,
    SkillDevelopmentJourney,
    MostEnjoyableTechnologies,
    LearningGoals,
    ProjectInspiration,
    CollaborationPreferences,
    ProudestAchievements,
    ProfessionalInterests,
    CareerJourney,
    IndustryPerspectives,
    // Deep-dive threads
    Motivations,
    Challenges,
    Aspirations,
    // Situational follow-ups from the latest user message
    CopingStrategies,
    WhatDrivesPassion,
    CollaborationStyle,
    UpcomingGoals,
    DeeperContext,
    // Degenerate histories
    BackgroundAndInterests,
    CurrentFocus,
}

impl InfoGap {
    /// Snake-case tag used in prompts and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoGap::CurrentRoleAndCompany => "current_role_and_company",
            InfoGap::EducationalBackground => "educational_background",
            InfoGap::TechnicalSkills => "technical_skills",
            InfoGap::InterestingProjects => "interesting_projects",
            InfoGap::ClarifyingDetails => "clarifying_details",
            InfoGap::ContextForAdvice => "context_for_advice",
            InfoGap::CareerMotivations => "career_motivations",
            InfoGap::BiggestChallenges => "biggest_challenges",
            InfoGap::FutureGoals => "future_goals",
            InfoGap::FavoriteSubjects => "favorite_subjects",
            InfoGap::InfluentialExperiences => "influential_experiences",
            InfoGap::LearningPreferences => "learning_preferences",
            InfoGap::SkillDevelopmentJourney => "skill_development_journey",
            InfoGap::MostEnjoyableTechnologies => "most_enjoyable_technologies",
            InfoGap::LearningGoals => "learning_goals",
            InfoGap::ProjectInspiration => "project_inspiration",
            InfoGap::CollaborationPreferences => "collaboration_preferences",
            InfoGap::ProudestAchievements => "proudest_achievements",
            InfoGap::ProfessionalInterests => "professional_interests",
            InfoGap::CareerJourney => "career_journey",
            InfoGap::IndustryPerspectives => "industry_perspectives",
            InfoGap::Motivations => "motivations",
            InfoGap::Challenges => "challenges",
            InfoGap::Aspirations => "aspirations",
            InfoGap::CopingStrategies => "coping_strategies",
            InfoGap::WhatDrivesPassion => "what_drives_passion",
            InfoGap::CollaborationStyle => "collaboration_style",
            InfoGap::UpcomingGoals => "upcoming_goals",
            InfoGap::DeeperContext => "deeper_context",
            InfoGap::BackgroundAndInterests => "background_and_interests",
            InfoGap::CurrentFocus => "current_focus",
        }
    }
}

impl std::fmt::Display for InfoGap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The selected policy bundle governing the agent's next utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    pub primary_goal: PrimaryGoal,
    pub response_approach: ResponseApproach,
    pub information_to_seek: Vec<InfoGap>,
    pub sharing_priority: SharingPriority,
    pub question_style: QuestionStyle,
}

/// At most this many gaps are pursued per turn.
const MAX_INFO_GAPS: usize = 2;

/// Keyword sets used to decide which career categories the human has
/// already mentioned (rule 1's gap scan).
const ROLE_MENTION_KEYWORDS: &[&str] = &["work", "job", "company", "role"];
const EDUCATION_MENTION_KEYWORDS: &[&str] = &["studied", "university", "degree", "school"];
const SKILL_MENTION_KEYWORDS: &[&str] = &["skill", "technology", "programming", "language"];
const PROJECT_MENTION_KEYWORDS: &[&str] = &["project", "built", "created", "developed"];

/// Deterministic rule table mapping turn context to strategy.
///
/// Stateless; one instance can serve any number of conversations.
#[derive(Debug, Clone, Default)]
pub struct StrategySelector;

impl StrategySelector {
    /// Creates a new selector.
    pub fn new() -> Self {
        Self
    }

    /// Selects the strategy for the current turn.
    ///
    /// Rules are mutually exclusive and evaluated in priority order:
    ///
    /// 1. low sharing in an initial conversation -> encourage sharing
    /// 2. high sharing while the user keeps asking -> provide value
    /// 3. agent-heavy exchange -> rebalance
    /// 4. deep non-general conversation -> deepen the connection
    /// 5. default -> maintain natural flow
    ///
    /// Never fails; empty history and empty profile fall through to the
    /// default rule with valid (possibly generic) gap tags.
    pub fn select(
        &self,
        context: &TurnContext,
        messages: &[Message],
        profile: &Profile,
    ) -> Strategy {
        let strategy = if context.sharing_level == SharingLevel::Low
            && context.depth == Depth::Initial
        {
            Strategy {
                primary_goal: PrimaryGoal::EncourageSharing,
                response_approach: ResponseApproach::ShareRelatableExperienceFirst,
                information_to_seek: self.missing_career_info(messages),
                sharing_priority: SharingPriority::Medium,
                question_style: QuestionStyle::OpenEnded,
            }
        } else if context.sharing_level == SharingLevel::High
            && context.balance == Balance::UserQuestioning
        {
            Strategy {
                primary_goal: PrimaryGoal::ProvideValue,
                response_approach: ResponseApproach::GiveThoughtfulAdvice,
                information_to_seek: vec![InfoGap::ClarifyingDetails, InfoGap::ContextForAdvice],
                sharing_priority: SharingPriority::High,
                question_style: QuestionStyle::Clarifying,
            }
        } else if context.balance == Balance::AgentHeavy {
            Strategy {
                primary_goal: PrimaryGoal::RebalanceConversation,
                response_approach: ResponseApproach::BriefAndCurious,
                information_to_seek: self.unexplored_areas(context.topic),
                sharing_priority: SharingPriority::Low,
                question_style: QuestionStyle::PersonalInterest,
            }
        } else if context.depth == Depth::Deep && context.topic != Topic::General {
            Strategy {
                primary_goal: PrimaryGoal::DeepenConnection,
                response_approach: ResponseApproach::ShareInsightsAndConnect,
                information_to_seek: vec![
                    InfoGap::Motivations,
                    InfoGap::Challenges,
                    InfoGap::Aspirations,
                ],
                sharing_priority: SharingPriority::Medium,
                question_style: QuestionStyle::ThoughtfulFollowup,
            }
        } else {
            Strategy {
                primary_goal: PrimaryGoal::MaintainNaturalFlow,
                response_approach: ResponseApproach::BalancedSharingAndAsking,
                information_to_seek: self.natural_followups(messages),
                sharing_priority: SharingPriority::Medium,
                question_style: QuestionStyle::Conversational,
            }
        };

        tracing::debug!(
            goal = %strategy.primary_goal,
            approach = %strategy.response_approach,
            question_style = %strategy.question_style,
            gaps = strategy.information_to_seek.len(),
            profile_empty = profile.is_empty(),
            "strategy selected"
        );
        strategy
    }

    /// Career categories the human has not mentioned yet, in fixed order,
    /// capped at [`MAX_INFO_GAPS`].
    fn missing_career_info(&self, messages: &[Message]) -> Vec<InfoGap> {
        let mut role_mentioned = false;
        let mut education_mentioned = false;
        let mut skills_mentioned = false;
        let mut projects_mentioned = false;

        for msg in messages.iter().filter(|m| m.is_user()) {
            let content = msg.content_lowercase();
            role_mentioned |= ROLE_MENTION_KEYWORDS.iter().any(|kw| content.contains(kw));
            education_mentioned |= EDUCATION_MENTION_KEYWORDS.iter().any(|kw| content.contains(kw));
            skills_mentioned |= SKILL_MENTION_KEYWORDS.iter().any(|kw| content.contains(kw));
            projects_mentioned |= PROJECT_MENTION_KEYWORDS.iter().any(|kw| content.contains(kw));
        }

        let mut missing = Vec::new();
        if !role_mentioned {
            missing.push(InfoGap::CurrentRoleAndCompany);
        }
        if !education_mentioned {
            missing.push(InfoGap::EducationalBackground);
        }
        if !skills_mentioned {
            missing.push(InfoGap::TechnicalSkills);
        }
        if !projects_mentioned {
            missing.push(InfoGap::InterestingProjects);
        }
        missing.truncate(MAX_INFO_GAPS);
        missing
    }

    /// Areas worth opening up next, indexed by the current topic.
    fn unexplored_areas(&self, topic: Topic) -> Vec<InfoGap> {
        let candidates: [InfoGap; 3] = match topic {
            Topic::Experience => [
                InfoGap::CareerMotivations,
                InfoGap::BiggestChallenges,
                InfoGap::FutureGoals,
            ],
            Topic::Education => [
                InfoGap::FavoriteSubjects,
                InfoGap::InfluentialExperiences,
                InfoGap::LearningPreferences,
            ],
            Topic::Skills => [
                InfoGap::SkillDevelopmentJourney,
                InfoGap::MostEnjoyableTechnologies,
                InfoGap::LearningGoals,
            ],
            Topic::Projects => [
                InfoGap::ProjectInspiration,
                InfoGap::CollaborationPreferences,
                InfoGap::ProudestAchievements,
            ],
            Topic::Interests | Topic::Networking | Topic::General => [
                InfoGap::ProfessionalInterests,
                InfoGap::CareerJourney,
                InfoGap::IndustryPerspectives,
            ],
        };
        candidates[..MAX_INFO_GAPS].to_vec()
    }

    /// Situational follow-ups derived from the latest user message.
    fn natural_followups(&self, messages: &[Message]) -> Vec<InfoGap> {
        if messages.is_empty() {
            return vec![InfoGap::BackgroundAndInterests];
        }

        let Some(latest) = messages.iter().rev().find(|m| m.is_user()) else {
            return vec![InfoGap::CurrentFocus];
        };
        let content = latest.content_lowercase();

        let mut followups = Vec::new();
        if content.contains("challenge") || content.contains("difficult") {
            followups.push(InfoGap::CopingStrategies);
        }
        if content.contains("exciting") || content.contains("love") {
            followups.push(InfoGap::WhatDrivesPassion);
        }
        if content.contains("team") || content.contains("colleague") {
            followups.push(InfoGap::CollaborationStyle);
        }
        if content.contains("future") || content.contains("next") {
            followups.push(InfoGap::UpcomingGoals);
        }

        if followups.is_empty() {
            vec![InfoGap::DeeperContext]
        } else {
            followups
        }
    }
}
