//! Professional profile snapshot types.
//!
//! A [`Profile`] is the structured output of the external attribute-extraction
//! pipeline (profile scraping, resume parsing). The conversation core reads a
//! snapshot at agent construction time and never writes back; a missing or
//! empty profile degrades the persona to generic defaults rather than failing.
//!
//! # Invariants
//!
//! - `education` and `work_experience` are ordered most-recent-first; the
//!   composer treats index 0 as the current entry.
//! - All collections may be empty; every consumer must tolerate that.

use serde::{Deserialize, Serialize};

/// Read-only snapshot of a user's professional profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Basic identity and current position.
    #[serde(default)]
    pub user: UserInfo,
    /// Degrees, most recent first.
    #[serde(default)]
    pub education: Vec<Education>,
    /// Roles held, most recent first.
    #[serde(default)]
    pub work_experience: Vec<WorkExperience>,
    /// Individual skills with category and proficiency.
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Notable projects, most recent first.
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Topics the person follows or cares about.
    #[serde(default)]
    pub professional_interests: Vec<ProfessionalInterest>,
    /// What the person wants out of networking.
    #[serde(default)]
    pub networking_goals: Vec<NetworkingGoal>,
}

impl Profile {
    /// Returns true if no persona context is available at all.
    pub fn is_empty(&self) -> bool {
        self.user.name.is_empty()
            && self.education.is_empty()
            && self.work_experience.is_empty()
            && self.skills.is_empty()
            && self.projects.is_empty()
            && self.professional_interests.is_empty()
            && self.networking_goals.is_empty()
    }

    /// One-line summary for banners and logs: "Name - Role at Company".
    pub fn summary(&self) -> String {
        let name = if self.user.name.is_empty() {
            "Professional".to_string()
        } else {
            self.user.name.clone()
        };
        match (&self.user.current_role, &self.user.current_company) {
            (Some(role), Some(company)) => format!("{} - {} at {}", name, role, company),
            _ => name,
        }
    }

    /// Groups skill names by category, preserving first-seen category order.
    pub fn skills_by_category(&self) -> Vec<(String, Vec<&str>)> {
        let mut groups: Vec<(String, Vec<&str>)> = Vec::new();
        for skill in &self.skills {
            if skill.skill_name.is_empty() {
                continue;
            }
            match groups.iter_mut().find(|(category, _)| *category == skill.category) {
                Some((_, names)) => names.push(&skill.skill_name),
                None => groups.push((skill.category.clone(), vec![&skill.skill_name])),
            }
        }
        groups
    }

    /// Skills at advanced or expert proficiency.
    pub fn advanced_skills(&self) -> Vec<&Skill> {
        self.skills
            .iter()
            .filter(|s| matches!(s.proficiency_level, Proficiency::Advanced | Proficiency::Expert))
            .collect()
    }

    /// Interests flagged as high priority.
    pub fn high_priority_interests(&self) -> Vec<&ProfessionalInterest> {
        self.professional_interests
            .iter()
            .filter(|i| i.priority == Priority::High)
            .collect()
    }
}

/// Identity and current position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Display name; empty means unknown.
    #[serde(default)]
    pub name: String,
    /// Current role title, if known.
    #[serde(default)]
    pub current_role: Option<String>,
    /// Current employer, if known.
    #[serde(default)]
    pub current_company: Option<String>,
    /// Profile headline, if the scrape produced one.
    #[serde(default)]
    pub headline: Option<String>,
    /// Location, if known.
    #[serde(default)]
    pub location: Option<String>,
}

/// A degree or study period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field_of_study: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub achievements: String,
}

/// A role held at a company.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub key_achievements: String,
    #[serde(default)]
    pub technologies: String,
}

/// A single skill with category and proficiency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub skill_name: String,
    /// Free-form grouping, e.g. "languages", "cloud", "data".
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub proficiency_level: Proficiency,
}

/// Self-assessed proficiency level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Proficiency {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

/// A notable project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: String,
}

/// A professional interest with priority.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalInterest {
    #[serde(default)]
    pub interest_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
}

/// Priority bucket for interests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// What the person hopes to get out of networking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkingGoal {
    /// e.g. "find_mentor", "explore_roles", "grow_network".
    #[serde(default)]
    pub goal_type: String,
    #[serde(default)]
    pub description: String,
}
