//! Follow-up question selection.
//!
//! Picks the agent's follow-up question for the turn. Gap-driven candidates
//! take priority; otherwise the topic/depth bank applies, post-processed by
//! the strategy's question style. Selection among candidates is
//! uniform-random over an injected seedable RNG so the conversation stays
//! varied while tests can pin exact picks.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;

use super::context::{Depth, Topic};
use super::strategy::{InfoGap, QuestionStyle, Strategy};

/// Last-resort question when every lookup comes back empty.
const DEFAULT_QUESTION: &str = "What brings you here today?";
const DEFAULT_CELL: &[&str] = &[DEFAULT_QUESTION];

/// Lead-ins used by the clarifying style.
const CLARIFYING_PREFIXES: &[&str] = &[
    "Can you tell me more about",
    "I'm curious about",
    "Help me understand",
];

/// Question openers filtered out by the open-ended style.
const CLOSED_OPENERS: &[&str] = &["Are you", "Do you"];

/// Topic x depth question bank, built once. Three questions per cell.
static QUESTION_BANK: Lazy<HashMap<(Topic, Depth), &'static [&'static str]>> = Lazy::new(|| {
    let mut bank: HashMap<(Topic, Depth), &'static [&'static str]> = HashMap::new();

    bank.insert(
        (Topic::Experience, Depth::Initial),
        &[
            "What kind of work do you do?",
            "What's your current role?",
            "What industry are you in?",
        ],
    );
    bank.insert(
        (Topic::Experience, Depth::Medium),
        &[
            "What's been the most interesting project you've worked on recently?",
            "How did you get started in your career?",
            "What do you enjoy most about your current role?",
        ],
    );
    bank.insert(
        (Topic::Experience, Depth::Deep),
        &[
            "What are the biggest challenges in your field right now?",
            "Where do you see your industry heading?",
            "What skills are you most excited to develop?",
        ],
    );

    bank.insert(
        (Topic::Education, Depth::Initial),
        &[
            "Where did you study?",
            "What was your field of study?",
            "What drew you to your field?",
        ],
    );
    bank.insert(
        (Topic::Education, Depth::Medium),
        &[
            "What was your favorite subject?",
            "Did you have any particularly influential professors?",
            "How has your education shaped your career?",
        ],
    );
    bank.insert(
        (Topic::Education, Depth::Deep),
        &[
            "What would you study differently if you could do it again?",
            "Are you considering any additional education or certifications?",
            "What advice would you give to students in your field?",
        ],
    );

    bank.insert(
        (Topic::Skills, Depth::Initial),
        &[
            "What technologies do you work with?",
            "What's your preferred tech stack?",
            "Are you learning any new skills lately?",
        ],
    );
    bank.insert(
        (Topic::Skills, Depth::Medium),
        &[
            "How do you stay current with technology?",
            "What's the most challenging technical problem you've solved?",
            "Which skills have been most valuable in your career?",
        ],
    );
    bank.insert(
        (Topic::Skills, Depth::Deep),
        &[
            "What emerging technologies are you most excited about?",
            "How do you approach learning complex new technologies?",
            "What technical skills do you think will be most important in the future?",
        ],
    );

    bank.insert(
        (Topic::Projects, Depth::Initial),
        &[
            "Are you working on any interesting projects?",
            "Do you have any side projects?",
            "What's your dream project to work on?",
        ],
    );
    bank.insert(
        (Topic::Projects, Depth::Medium),
        &[
            "What's the most challenging aspect of your current project?",
            "How do you approach project planning and execution?",
            "Do you prefer working on solo projects or with a team?",
        ],
    );
    bank.insert(
        (Topic::Projects, Depth::Deep),
        &[
            "What project are you most proud of and why?",
            "How do you balance technical excellence with project deadlines?",
            "What would you build if resources weren't a constraint?",
        ],
    );

    bank.insert(
        (Topic::Interests, Depth::Initial),
        &[
            "What are you most excited about in your field right now?",
            "What trends are you following?",
            "What brings you joy in your work?",
        ],
    );
    bank.insert(
        (Topic::Interests, Depth::Medium),
        &[
            "What problems in your industry are you passionate about solving?",
            "Are there any causes or missions that drive your work?",
            "What aspect of your work has the biggest impact?",
        ],
    );
    bank.insert(
        (Topic::Interests, Depth::Deep),
        &[
            "How do you see your field evolving in the next 5-10 years?",
            "What legacy do you want to leave in your profession?",
            "If you could solve one major problem in your industry, what would it be?",
        ],
    );

    bank.insert(
        (Topic::Networking, Depth::Initial),
        &[
            "How do you like to connect with other professionals?",
            "Are you part of any professional communities?",
            "What brings you to networking events?",
        ],
    );
    bank.insert(
        (Topic::Networking, Depth::Medium),
        &[
            "Who has been the most influential mentor in your career?",
            "How do you approach building professional relationships?",
            "What's the best career advice you've ever received?",
        ],
    );
    bank.insert(
        (Topic::Networking, Depth::Deep),
        &[
            "How do you pay it forward in your professional community?",
            "What would you want to teach or mentor others about?",
            "How has networking shaped your career trajectory?",
        ],
    );

    bank.insert(
        (Topic::General, Depth::Initial),
        &[
            "What brings you here today?",
            "What's keeping you busy these days?",
            "How are you finding the current state of your industry?",
        ],
    );
    bank.insert(
        (Topic::General, Depth::Medium),
        &[
            "What's something you're curious about lately?",
            "What's been surprising you about your field recently?",
            "How do you like to spend your free time?",
        ],
    );
    bank.insert(
        (Topic::General, Depth::Deep),
        &[
            "What's one thing you'd change about your industry if you could?",
            "What advice would you give to your younger self?",
            "What's the most important lesson you've learned in your career?",
        ],
    );

    bank
});

/// Questions that directly pursue a gap tag. Only the career-scan and
/// unexplored-experience tags carry questions; the rest fall through to the
/// topic/depth bank.
fn questions_for_gap(gap: InfoGap) -> &'static [&'static str] {
    match gap {
        InfoGap::CurrentRoleAndCompany => &[
            "What kind of work do you do?",
            "Where do you work?",
            "What's your current role?",
        ],
        InfoGap::EducationalBackground => {
            &["Where did you study?", "What was your field of study?"]
        }
        InfoGap::TechnicalSkills => &[
            "What technologies do you work with?",
            "What's your favorite tech stack?",
        ],
        InfoGap::CareerMotivations => &[
            "What drives you in your career?",
            "What aspects of work energize you most?",
        ],
        InfoGap::BiggestChallenges => &[
            "What's the biggest challenge you're facing right now?",
            "What keeps you up at night professionally?",
        ],
        InfoGap::FutureGoals => &[
            "Where do you see yourself in a few years?",
            "What are you working toward next?",
        ],
        _ => &[],
    }
}

/// Returns the bank cell for a topic/depth pair, falling back to the topic's
/// initial row and then to the general topic.
fn bank_questions(topic: Topic, depth: Depth) -> &'static [&'static str] {
    QUESTION_BANK
        .get(&(topic, depth))
        .or_else(|| QUESTION_BANK.get(&(topic, Depth::Initial)))
        .or_else(|| QUESTION_BANK.get(&(Topic::General, depth)))
        .or_else(|| QUESTION_BANK.get(&(Topic::General, Depth::Initial)))
        .copied()
        .unwrap_or(DEFAULT_CELL)
}

/// Picks follow-up questions using an owned, seedable random source.
#[derive(Debug)]
pub struct QuestionSelector {
    rng: StdRng,
}

impl QuestionSelector {
    /// Creates a selector seeded from the system entropy source.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a selector with a fixed seed, for deterministic tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Selects the follow-up question for the turn.
    ///
    /// Gap-driven candidates take priority; an empty gap pool falls through
    /// to the topic/depth bank with style post-processing.
    pub fn select_question(&mut self, topic: Topic, depth: Depth, strategy: &Strategy) -> String {
        if !strategy.information_to_seek.is_empty() {
            let pool: Vec<&'static str> = strategy
                .information_to_seek
                .iter()
                .flat_map(|gap| questions_for_gap(*gap).iter().copied())
                .collect();
            if let Some(question) = pool.choose(&mut self.rng) {
                return (*question).to_string();
            }
        }

        let candidates = bank_questions(topic, depth);
        match strategy.question_style {
            QuestionStyle::OpenEnded => {
                let open: Vec<&'static str> = candidates
                    .iter()
                    .copied()
                    .filter(|q| !CLOSED_OPENERS.iter().any(|opener| q.starts_with(opener)))
                    .collect();
                if open.is_empty() {
                    self.pick(candidates).to_string()
                } else {
                    self.pick(&open).to_string()
                }
            }
            QuestionStyle::Clarifying => {
                let base = self.pick(candidates);
                if base.contains('?') {
                    base.to_string()
                } else {
                    let prefix = self.pick(CLARIFYING_PREFIXES);
                    format!("{} {}?", prefix, base.to_lowercase())
                }
            }
            _ => self.pick(candidates).to_string(),
        }
    }

    fn pick(&mut self, candidates: &[&'static str]) -> &'static str {
        candidates
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(DEFAULT_QUESTION)
    }
}

impl Default for QuestionSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::strategy::{
        PrimaryGoal, ResponseApproach, SharingPriority,
    };

    fn strategy_with(gaps: Vec<InfoGap>, style: QuestionStyle) -> Strategy {
        Strategy {
            primary_goal: PrimaryGoal::MaintainNaturalFlow,
            response_approach: ResponseApproach::BalancedSharingAndAsking,
            information_to_seek: gaps,
            sharing_priority: SharingPriority::Medium,
            question_style: style,
        }
    }

    mod bank {
        use super::*;

        #[test]
        fn every_topic_and_depth_has_three_questions() {
            let topics = [
                Topic::Experience,
                Topic::Education,
                Topic::Skills,
                Topic::Projects,
                Topic::Interests,
                Topic::Networking,
                Topic::General,
            ];
            let depths = [Depth::Initial, Depth::Medium, Depth::Deep];
            for topic in topics {
                for depth in depths {
                    assert_eq!(
                        bank_questions(topic, depth).len(),
                        3,
                        "{:?}/{:?} should have 3 questions",
                        topic,
                        depth
                    );
                }
            }
        }
    }

    mod gap_priority {
        use super::*;

        #[test]
        fn gap_candidates_take_priority_over_bank() {
            let mut selector = QuestionSelector::with_seed(7);
            let strategy = strategy_with(
                vec![InfoGap::TechnicalSkills],
                QuestionStyle::Conversational,
            );
            for _ in 0..20 {
                let question =
                    selector.select_question(Topic::General, Depth::Deep, &strategy);
                assert!(
                    questions_for_gap(InfoGap::TechnicalSkills)
                        .contains(&question.as_str()),
                    "unexpected question: {}",
                    question
                );
            }
        }

        #[test]
        fn pool_spans_all_gaps() {
            let mut selector = QuestionSelector::with_seed(3);
            let strategy = strategy_with(
                vec![InfoGap::CurrentRoleAndCompany, InfoGap::FutureGoals],
                QuestionStyle::Conversational,
            );
            let valid: Vec<&str> = questions_for_gap(InfoGap::CurrentRoleAndCompany)
                .iter()
                .chain(questions_for_gap(InfoGap::FutureGoals))
                .copied()
                .collect();
            for _ in 0..20 {
                let question =
                    selector.select_question(Topic::Experience, Depth::Initial, &strategy);
                assert!(valid.contains(&question.as_str()));
            }
        }

        #[test]
        fn unmapped_gaps_fall_through_to_bank() {
            let mut selector = QuestionSelector::with_seed(11);
            let strategy =
                strategy_with(vec![InfoGap::DeeperContext], QuestionStyle::Conversational);
            let question = selector.select_question(Topic::Skills, Depth::Medium, &strategy);
            assert!(bank_questions(Topic::Skills, Depth::Medium).contains(&question.as_str()));
        }
    }

    mod bank_selection {
        use super::*;

        #[test]
        fn output_is_member_of_topic_depth_cell() {
            let mut selector = QuestionSelector::with_seed(42);
            let strategy = strategy_with(vec![], QuestionStyle::Conversational);
            for _ in 0..20 {
                let question =
                    selector.select_question(Topic::Networking, Depth::Deep, &strategy);
                assert!(
                    bank_questions(Topic::Networking, Depth::Deep).contains(&question.as_str())
                );
            }
        }

        #[test]
        fn fixed_seed_gives_repeatable_sequence() {
            let strategy = strategy_with(vec![], QuestionStyle::Conversational);
            let run = |seed: u64| -> Vec<String> {
                let mut selector = QuestionSelector::with_seed(seed);
                (0..5)
                    .map(|_| {
                        selector.select_question(Topic::Experience, Depth::Medium, &strategy)
                    })
                    .collect()
            };
            assert_eq!(run(99), run(99));
        }
    }

    mod open_ended_style {
        use super::*;

        #[test]
        fn filters_closed_openers() {
            // Projects/initial contains "Are you..." and "Do you..." picks.
            let mut selector = QuestionSelector::with_seed(5);
            let strategy = strategy_with(vec![], QuestionStyle::OpenEnded);
            for _ in 0..20 {
                let question =
                    selector.select_question(Topic::Projects, Depth::Initial, &strategy);
                assert!(!question.starts_with("Are you"));
                assert!(!question.starts_with("Do you"));
            }
        }

        #[test]
        fn singleton_after_filter_is_deterministic() {
            // Only one Projects/initial question survives the filter.
            let mut selector = QuestionSelector::with_seed(0);
            let strategy = strategy_with(vec![], QuestionStyle::OpenEnded);
            let question = selector.select_question(Topic::Projects, Depth::Initial, &strategy);
            assert_eq!(question, "What's your dream project to work on?");
        }
    }

    mod clarifying_style {
        use super::*;

        #[test]
        fn interrogative_pick_is_left_alone() {
            // Every bank question ends in "?", so the prefix never applies.
            let mut selector = QuestionSelector::with_seed(13);
            let strategy = strategy_with(vec![], QuestionStyle::Clarifying);
            let question = selector.select_question(Topic::Education, Depth::Medium, &strategy);
            assert!(bank_questions(Topic::Education, Depth::Medium)
                .contains(&question.as_str()));
        }
    }
}
