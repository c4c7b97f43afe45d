//! Response composition.
//!
//! Assembles the persona prompt for the turn — background summary, topic
//! context, strategy guidance — and obtains the reply from the AI provider.
//! Provider failure is recovered locally with a fixed fallback string; the
//! conversation never hard-fails visibly to the end user.

use std::sync::Arc;

use super::context::{Topic, TurnContext};
use super::message::{Message, Role};
use super::strategy::{PrimaryGoal, ResponseApproach, SharingPriority, Strategy};
use crate::domain::profile::Profile;
use crate::ports::{AIProvider, CompletionRequest, MessageRole, RequestMetadata};

/// Returned whenever the provider fails or produces nothing usable.
pub const FALLBACK_RESPONSE: &str =
    "I'm having trouble processing that right now. Could you tell me a bit about yourself?";

/// Personality preamble used when no stored prefix exists. `{name}` is
/// replaced with the persona's display name.
const DEFAULT_PERSONA_PREFIX: &str = "You are {name}, acting as a digital twin based on your professional background and career journey. You have a networking-oriented personality and are genuinely interested in learning about the person you're talking to.\n\nYour role is to engage in meaningful professional conversations, share insights from your experience, and build authentic connections.";

const RESPONSE_MAX_TOKENS: u32 = 300;
const RESPONSE_TEMPERATURE: f32 = 0.7;
/// Only this many trailing history messages ride along in the prompt, so
/// prompt size stays bounded even though history is unbounded.
const HISTORY_WINDOW: usize = 5;
/// Profile snippets are clipped to this many characters.
const SNIPPET_MAX_CHARS: usize = 200;

const MAX_DEGREES: usize = 2;
const MAX_ROLES: usize = 3;
const MAX_SKILL_CATEGORIES: usize = 3;
const MAX_SKILLS_PER_CATEGORY: usize = 4;
const MAX_INTERESTS: usize = 3;
const MAX_TOPIC_SKILLS: usize = 5;

/// Builds prompts and delegates text generation to the AI provider.
pub struct ResponseComposer {
    provider: Arc<dyn AIProvider>,
    persona_prefix: String,
}

impl ResponseComposer {
    /// Creates a composer with the default persona prefix.
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider,
            persona_prefix: DEFAULT_PERSONA_PREFIX.to_string(),
        }
    }

    /// Replaces the persona prefix (e.g. one generated offline for a user).
    pub fn with_persona_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.persona_prefix = prefix.into();
        self
    }

    /// Obtains the agent's reply for this turn.
    ///
    /// Never fails: provider errors and empty completions degrade to
    /// [`FALLBACK_RESPONSE`].
    pub async fn compose(
        &self,
        profile: &Profile,
        context: &TurnContext,
        strategy: &Strategy,
        messages: &[Message],
        metadata: RequestMetadata,
    ) -> String {
        let request = self.build_request(profile, context, strategy, messages, metadata);

        match self.provider.complete(request).await {
            Ok(response) if !response.content.trim().is_empty() => {
                tracing::debug!(
                    model = %response.model,
                    total_tokens = response.usage.total_tokens,
                    "response composed"
                );
                response.content
            }
            Ok(_) => {
                tracing::warn!("provider returned empty content, using fallback response");
                FALLBACK_RESPONSE.to_string()
            }
            Err(err) => {
                tracing::warn!(error = %err, "provider failed, using fallback response");
                FALLBACK_RESPONSE.to_string()
            }
        }
    }

    fn build_request(
        &self,
        profile: &Profile,
        context: &TurnContext,
        strategy: &Strategy,
        messages: &[Message],
        metadata: RequestMetadata,
    ) -> CompletionRequest {
        let mut request = CompletionRequest::new(metadata)
            .with_system_prompt(self.build_system_prompt(profile, context, strategy))
            .with_max_tokens(RESPONSE_MAX_TOKENS)
            .with_temperature(RESPONSE_TEMPERATURE);

        let window_start = messages.len().saturating_sub(HISTORY_WINDOW);
        for msg in &messages[window_start..] {
            let role = match msg.role() {
                Role::User => MessageRole::User,
                Role::Assistant => MessageRole::Assistant,
            };
            request = request.with_message(role, msg.content());
        }

        request
    }

    /// Assembles the full system prompt for the turn.
    pub fn build_system_prompt(
        &self,
        profile: &Profile,
        context: &TurnContext,
        strategy: &Strategy,
    ) -> String {
        let name = if profile.user.name.is_empty() {
            "a professional".to_string()
        } else {
            profile.user.name.clone()
        };
        let prefix = self.persona_prefix.replace("{name}", &name);

        let mut sections = vec![prefix];
        sections.push(format!("Your background:\n{}", persona_context(profile)));

        let topic_snippet = topic_context(profile, context.topic);
        if !topic_snippet.is_empty() {
            sections.push(topic_snippet);
        }

        sections.push(format!(
            "CONVERSATION STRATEGY:\n{}",
            strategy_guidance(strategy)
        ));

        sections.push(format!(
            "Topic focus: {}\nConversation depth: {}\nUser sharing level: {}\nConversation balance: {}",
            context.topic, context.depth, context.sharing_level, context.balance
        ));

        sections.push(
            "Guidelines for your response:\n\
             - Follow the conversation strategy above to be an excellent career conversationalist\n\
             - Be authentic and draw from your actual professional experiences\n\
             - Balance sharing your insights with genuine curiosity about the other person\n\
             - Advance the career dialogue in a natural, engaging way\n\
             - Keep responses concise but meaningful (2-3 sentences typically)"
                .to_string(),
        );

        sections.join("\n\n")
    }
}

/// Background summary built from the profile snapshot.
fn persona_context(profile: &Profile) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let (Some(role), Some(company)) =
        (&profile.user.current_role, &profile.user.current_company)
    {
        parts.push(format!("Currently working as {} at {}", role, company));
    }

    let degrees: Vec<String> = profile
        .education
        .iter()
        .take(MAX_DEGREES)
        .filter(|e| !e.degree.is_empty() && !e.institution.is_empty())
        .map(|e| format!("{} from {}", e.degree, e.institution))
        .collect();
    if !degrees.is_empty() {
        parts.push(format!("Educational background: {}", degrees.join("; ")));
    }

    let roles: Vec<String> = profile
        .work_experience
        .iter()
        .take(MAX_ROLES)
        .filter(|e| !e.role.is_empty() && !e.company.is_empty())
        .map(|e| format!("{} at {}", e.role, e.company))
        .collect();
    if !roles.is_empty() {
        parts.push(format!("Professional experience includes: {}", roles.join("; ")));
    }

    let categories: Vec<String> = profile
        .skills_by_category()
        .into_iter()
        .take(MAX_SKILL_CATEGORIES)
        .map(|(category, names)| {
            let top: Vec<&str> = names.into_iter().take(MAX_SKILLS_PER_CATEGORY).collect();
            format!("{}: {}", category, top.join(", "))
        })
        .collect();
    if !categories.is_empty() {
        parts.push(format!("Technical expertise: {}", categories.join("; ")));
    }

    let interests: Vec<&str> = profile
        .high_priority_interests()
        .into_iter()
        .take(MAX_INTERESTS)
        .map(|i| i.interest_name.as_str())
        .filter(|n| !n.is_empty())
        .collect();
    if !interests.is_empty() {
        parts.push(format!("Current professional interests: {}", interests.join(", ")));
    }

    if parts.is_empty() {
        "Professional background available.".to_string()
    } else {
        format!("{}.", parts.join(". "))
    }
}

/// Context snippet for the current topic, pulled from the most relevant
/// profile record. Empty when the profile has nothing to offer.
fn topic_context(profile: &Profile, topic: Topic) -> String {
    match topic {
        Topic::Experience => profile.work_experience.first().map_or(String::new(), |exp| {
            format!(
                "Recent experience context: Currently {} at {}. Key achievements: {}",
                exp.role,
                exp.company,
                truncate_chars(&exp.key_achievements, SNIPPET_MAX_CHARS)
            )
        }),
        Topic::Education => profile.education.first().map_or(String::new(), |edu| {
            format!(
                "Education context: {} from {}. {}",
                edu.degree,
                edu.institution,
                truncate_chars(&edu.achievements, SNIPPET_MAX_CHARS)
            )
        }),
        Topic::Skills => {
            let advanced: Vec<&str> = profile
                .advanced_skills()
                .into_iter()
                .take(MAX_TOPIC_SKILLS)
                .map(|s| s.skill_name.as_str())
                .collect();
            if advanced.is_empty() {
                String::new()
            } else {
                format!("Technical skills context: Expertise in {}", advanced.join(", "))
            }
        }
        Topic::Projects => profile.projects.first().map_or(String::new(), |project| {
            format!(
                "Project context: Recently worked on {}. {}",
                project.project_name,
                truncate_chars(&project.description, SNIPPET_MAX_CHARS)
            )
        }),
        Topic::Interests => profile
            .high_priority_interests()
            .first()
            .map_or(String::new(), |interest| {
                format!(
                    "Professional interest context: Passionate about {}. {}",
                    interest.interest_name,
                    truncate_chars(&interest.description, SNIPPET_MAX_CHARS)
                )
            }),
        Topic::Networking => profile.networking_goals.first().map_or(String::new(), |goal| {
            format!(
                "Networking context: Looking to {} - {}",
                goal.goal_type,
                truncate_chars(&goal.description, SNIPPET_MAX_CHARS)
            )
        }),
        Topic::General => String::new(),
    }
}

/// One canned guidance sentence per strategy enum value, plus the gap list.
fn strategy_guidance(strategy: &Strategy) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(match strategy.primary_goal {
        PrimaryGoal::EncourageSharing => {
            "PRIMARY GOAL: Encourage the other person to share more about their career journey by leading with a relatable experience from your own background.".to_string()
        }
        PrimaryGoal::ProvideValue => {
            "PRIMARY GOAL: Provide thoughtful insights and advice based on your experience to help the other person.".to_string()
        }
        PrimaryGoal::RebalanceConversation => {
            "PRIMARY GOAL: Rebalance the conversation by being more curious and asking about the other person rather than sharing extensively.".to_string()
        }
        PrimaryGoal::DeepenConnection => {
            "PRIMARY GOAL: Deepen the professional connection by sharing meaningful insights and exploring motivations behind career choices.".to_string()
        }
        PrimaryGoal::MaintainNaturalFlow => {
            "PRIMARY GOAL: Maintain natural flow while advancing the career conversation productively.".to_string()
        }
    });

    lines.push(match strategy.response_approach {
        ResponseApproach::ShareRelatableExperienceFirst => {
            "APPROACH: Start by sharing a brief, relatable experience from your background, then ask about their experience.".to_string()
        }
        ResponseApproach::GiveThoughtfulAdvice => {
            "APPROACH: Focus on providing valuable insights and advice based on your professional experience.".to_string()
        }
        ResponseApproach::BriefAndCurious => {
            "APPROACH: Keep your response brief and focus on asking thoughtful questions about their career.".to_string()
        }
        ResponseApproach::ShareInsightsAndConnect => {
            "APPROACH: Share deeper insights from your experience and draw connections to their situation.".to_string()
        }
        ResponseApproach::BalancedSharingAndAsking => {
            "APPROACH: Balance sharing relevant experiences with genuine curiosity about their career path.".to_string()
        }
    });

    if !strategy.information_to_seek.is_empty() {
        let tags: Vec<&str> = strategy
            .information_to_seek
            .iter()
            .map(|gap| gap.as_str())
            .collect();
        lines.push(format!("SEEK INFORMATION ABOUT: {}", tags.join(", ")));
    }

    lines.push(match strategy.sharing_priority {
        SharingPriority::High => {
            "SHARING LEVEL: Share more detailed experiences and insights from your background.".to_string()
        }
        SharingPriority::Medium => {
            "SHARING LEVEL: Share relevant experiences balanced with curiosity about them.".to_string()
        }
        SharingPriority::Low => {
            "SHARING LEVEL: Minimize sharing about yourself, focus on learning about them.".to_string()
        }
    });

    lines.join("\n")
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::conversation::strategy::{InfoGap, QuestionStyle};
    use crate::domain::foundation::{ConversationId, UserId};
    use crate::domain::profile::{
        Education, ProfessionalInterest, Priority, Proficiency, Skill, UserInfo, WorkExperience,
    };

    fn test_metadata() -> RequestMetadata {
        RequestMetadata::new(UserId::new("test-user").unwrap(), ConversationId::new())
    }

    fn sample_profile() -> Profile {
        Profile {
            user: UserInfo {
                name: "Alex Rivera".to_string(),
                current_role: Some("Staff Engineer".to_string()),
                current_company: Some("Northwind".to_string()),
                ..Default::default()
            },
            education: vec![Education {
                institution: "ETH Zurich".to_string(),
                degree: "MSc Computer Science".to_string(),
                ..Default::default()
            }],
            work_experience: vec![WorkExperience {
                company: "Northwind".to_string(),
                role: "Staff Engineer".to_string(),
                key_achievements: "Led the payments platform rebuild".to_string(),
                ..Default::default()
            }],
            skills: vec![Skill {
                skill_name: "Rust".to_string(),
                category: "languages".to_string(),
                proficiency_level: Proficiency::Expert,
            }],
            professional_interests: vec![ProfessionalInterest {
                interest_name: "Distributed systems".to_string(),
                description: "Consensus and replication".to_string(),
                priority: Priority::High,
            }],
            ..Default::default()
        }
    }

    fn natural_flow_strategy() -> Strategy {
        Strategy {
            primary_goal: PrimaryGoal::MaintainNaturalFlow,
            response_approach: ResponseApproach::BalancedSharingAndAsking,
            information_to_seek: vec![InfoGap::DeeperContext],
            sharing_priority: SharingPriority::Medium,
            question_style: QuestionStyle::Conversational,
        }
    }

    mod prompt_building {
        use super::*;

        #[test]
        fn system_prompt_carries_persona_and_strategy() {
            let composer = ResponseComposer::new(std::sync::Arc::new(MockAIProvider::new()));
            let prompt = composer.build_system_prompt(
                &sample_profile(),
                &TurnContext::default(),
                &natural_flow_strategy(),
            );

            assert!(prompt.contains("You are Alex Rivera"));
            assert!(prompt.contains("Currently working as Staff Engineer at Northwind"));
            assert!(prompt.contains("MSc Computer Science from ETH Zurich"));
            assert!(prompt.contains("CONVERSATION STRATEGY:"));
            assert!(prompt.contains("PRIMARY GOAL: Maintain natural flow"));
            assert!(prompt.contains("SEEK INFORMATION ABOUT: deeper_context"));
            assert!(prompt.contains("Topic focus: general"));
        }

        #[test]
        fn empty_profile_gets_generic_persona() {
            let composer = ResponseComposer::new(std::sync::Arc::new(MockAIProvider::new()));
            let prompt = composer.build_system_prompt(
                &Profile::default(),
                &TurnContext::default(),
                &natural_flow_strategy(),
            );

            assert!(prompt.contains("You are a professional"));
            assert!(prompt.contains("Professional background available."));
        }

        #[test]
        fn experience_topic_pulls_most_recent_role() {
            let context = TurnContext {
                topic: Topic::Experience,
                ..Default::default()
            };
            let composer = ResponseComposer::new(std::sync::Arc::new(MockAIProvider::new()));
            let prompt = composer.build_system_prompt(
                &sample_profile(),
                &context,
                &natural_flow_strategy(),
            );
            assert!(prompt.contains("Recent experience context: Currently Staff Engineer at Northwind"));
            assert!(prompt.contains("Led the payments platform rebuild"));
        }

        #[test]
        fn interests_topic_pulls_high_priority_interest() {
            let context = TurnContext {
                topic: Topic::Interests,
                ..Default::default()
            };
            let composer = ResponseComposer::new(std::sync::Arc::new(MockAIProvider::new()));
            let prompt = composer.build_system_prompt(
                &sample_profile(),
                &context,
                &natural_flow_strategy(),
            );
            assert!(prompt.contains("Passionate about Distributed systems"));
        }

        #[test]
        fn custom_prefix_replaces_default() {
            let composer = ResponseComposer::new(std::sync::Arc::new(MockAIProvider::new()))
                .with_persona_prefix("Persona notes for {name}.");
            let prompt = composer.build_system_prompt(
                &sample_profile(),
                &TurnContext::default(),
                &natural_flow_strategy(),
            );
            assert!(prompt.starts_with("Persona notes for Alex Rivera."));
        }

        #[test]
        fn long_snippets_are_clipped() {
            let mut profile = sample_profile();
            profile.work_experience[0].key_achievements = "x".repeat(500);
            let context = TurnContext {
                topic: Topic::Experience,
                ..Default::default()
            };
            let composer = ResponseComposer::new(std::sync::Arc::new(MockAIProvider::new()));
            let prompt =
                composer.build_system_prompt(&profile, &context, &natural_flow_strategy());
            assert!(!prompt.contains(&"x".repeat(SNIPPET_MAX_CHARS + 1)));
            assert!(prompt.contains(&"x".repeat(SNIPPET_MAX_CHARS)));
        }
    }

    mod completion {
        use super::*;

        #[tokio::test]
        async fn returns_provider_content() {
            let provider = std::sync::Arc::new(
                MockAIProvider::new().with_response("Great to meet you!"),
            );
            let composer = ResponseComposer::new(provider);
            let response = composer
                .compose(
                    &sample_profile(),
                    &TurnContext::default(),
                    &natural_flow_strategy(),
                    &[],
                    test_metadata(),
                )
                .await;
            assert_eq!(response, "Great to meet you!");
        }

        #[tokio::test]
        async fn provider_error_degrades_to_fallback() {
            let provider = std::sync::Arc::new(MockAIProvider::new().with_error(
                MockError::Unavailable {
                    message: "down".to_string(),
                },
            ));
            let composer = ResponseComposer::new(provider);
            let response = composer
                .compose(
                    &sample_profile(),
                    &TurnContext::default(),
                    &natural_flow_strategy(),
                    &[],
                    test_metadata(),
                )
                .await;
            assert_eq!(response, FALLBACK_RESPONSE);
        }

        #[tokio::test]
        async fn empty_completion_degrades_to_fallback() {
            let provider =
                std::sync::Arc::new(MockAIProvider::new().with_response("   "));
            let composer = ResponseComposer::new(provider);
            let response = composer
                .compose(
                    &Profile::default(),
                    &TurnContext::default(),
                    &natural_flow_strategy(),
                    &[],
                    test_metadata(),
                )
                .await;
            assert_eq!(response, FALLBACK_RESPONSE);
        }

        #[tokio::test]
        async fn only_recent_history_rides_along() {
            let provider = std::sync::Arc::new(MockAIProvider::new().with_response("ok"));
            let composer = ResponseComposer::new(provider.clone());

            let mut messages = Vec::new();
            for i in 0..8 {
                messages.push(Message::user(format!("message number {}", i)).unwrap());
            }
            composer
                .compose(
                    &Profile::default(),
                    &TurnContext::default(),
                    &natural_flow_strategy(),
                    &messages,
                    test_metadata(),
                )
                .await;

            let calls = provider.get_calls();
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0].messages.len(), HISTORY_WINDOW);
            assert_eq!(calls[0].messages[0].content, "message number 3");
            assert_eq!(calls[0].max_tokens, Some(RESPONSE_MAX_TOKENS));
            assert_eq!(calls[0].temperature, Some(RESPONSE_TEMPERATURE));
        }
    }

    mod strategy_guidance_block {
        use super::*;

        #[test]
        fn every_goal_has_a_distinct_sentence() {
            let mut strategy = natural_flow_strategy();
            let mut seen = std::collections::HashSet::new();
            for goal in [
                PrimaryGoal::EncourageSharing,
                PrimaryGoal::ProvideValue,
                PrimaryGoal::RebalanceConversation,
                PrimaryGoal::DeepenConnection,
                PrimaryGoal::MaintainNaturalFlow,
            ] {
                strategy.primary_goal = goal;
                let guidance = strategy_guidance(&strategy);
                let goal_line = guidance.lines().next().unwrap().to_string();
                assert!(goal_line.starts_with("PRIMARY GOAL:"));
                assert!(seen.insert(goal_line));
            }
        }

        #[test]
        fn gap_list_is_omitted_when_empty() {
            let mut strategy = natural_flow_strategy();
            strategy.information_to_seek.clear();
            let guidance = strategy_guidance(&strategy);
            assert!(!guidance.contains("SEEK INFORMATION ABOUT"));
        }
    }
}
