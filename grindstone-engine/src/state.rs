use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::badges::BadgeId;
use crate::constants::{DEFAULT_THEME, DEFAULT_USER_NAME, X_POST_DOMAINS};
use crate::numbers::sanitize_hours;

/// Self-reported mood attached to a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Mood {
    Unstoppable,
    #[default]
    Neutral,
    Tired,
}

impl Mood {
    pub const ALL: [Mood; 3] = [Mood::Unstoppable, Mood::Neutral, Mood::Tired];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unstoppable => "Unstoppable",
            Self::Neutral => "Neutral",
            Self::Tired => "Tired",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unstoppable" => Ok(Self::Unstoppable),
            "Neutral" => Ok(Self::Neutral),
            "Tired" => Ok(Self::Tired),
            _ => Err(()),
        }
    }
}

/// Lifecycle state of a portfolio project.
///
/// The wire strings are display strings; saves written before the status
/// enum existed already carry them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProjectStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [
        ProjectStatus::NotStarted,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Not Started" => Ok(Self::NotStarted),
            "In Progress" => Ok(Self::InProgress),
            "Completed" => Ok(Self::Completed),
            _ => Err(()),
        }
    }
}

/// A tracked skill with an hour target that marks mastery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub current_hours: f32,
    #[serde(default)]
    pub target_hours: f32,
    #[serde(default)]
    pub category: String,
}

impl Skill {
    #[must_use]
    pub fn is_mastered(&self) -> bool {
        self.current_hours >= self.target_hours
    }

    /// Add grind hours, clamping at the mastery target.
    ///
    /// Returns true when this call crossed the skill into mastery.
    pub fn log_hours(&mut self, hours: f32) -> bool {
        let was_mastered = self.is_mastered();
        let added = self.current_hours + sanitize_hours(hours);
        self.current_hours = added.min(self.target_hours);
        !was_mastered && self.is_mastered()
    }
}

/// A portfolio project linked to the skills it exercises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub linked_skills: Vec<String>,
}

/// Hours logged against one skill within a journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillHours {
    pub skill_id: String,
    pub hours: f32,
}

/// One daily journal record. Entries are kept most-recent-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Epoch-millisecond creation timestamp rendered as a string.
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub dominated_tasks: Vec<String>,
    #[serde(default)]
    pub hours_grinded: Vec<SkillHours>,
    #[serde(default)]
    pub projects_worked_on: String,
    #[serde(default)]
    pub challenges_to_crush: String,
    #[serde(default)]
    pub social_posts: Vec<String>,
    #[serde(default)]
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_feedback: Option<String>,
}

impl JournalEntry {
    /// Count linked posts pointing at X (or its former domain).
    #[must_use]
    pub fn x_post_count(&self) -> u32 {
        let mut count = 0;
        for post in &self.social_posts {
            let lower = post.to_lowercase();
            if X_POST_DOMAINS.iter().any(|domain| lower.contains(domain)) {
                count += 1;
            }
        }
        count
    }
}

/// Journal input as submitted by the caller, before the engine stamps
/// an id and timestamp onto it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalDraft {
    #[serde(default)]
    pub dominated_tasks: Vec<String>,
    #[serde(default)]
    pub hours_grinded: Vec<SkillHours>,
    #[serde(default)]
    pub projects_worked_on: String,
    #[serde(default)]
    pub challenges_to_crush: String,
    #[serde(default)]
    pub social_posts: Vec<String>,
    #[serde(default)]
    pub mood: Mood,
}

impl JournalDraft {
    /// Stamp the draft into a stored entry.
    ///
    /// Blank task lines and posts are dropped, and hour lines must name a
    /// skill and carry a positive finite amount to survive.
    #[must_use]
    pub fn into_entry(
        self,
        id: String,
        date: DateTime<Utc>,
        ai_feedback: Option<String>,
    ) -> JournalEntry {
        let dominated_tasks = self
            .dominated_tasks
            .into_iter()
            .map(|task| task.trim().to_string())
            .filter(|task| !task.is_empty())
            .collect();
        let hours_grinded = self
            .hours_grinded
            .into_iter()
            .filter(|line| !line.skill_id.is_empty() && sanitize_hours(line.hours) > 0.0)
            .collect();
        let social_posts = self
            .social_posts
            .into_iter()
            .map(|post| post.trim().to_string())
            .filter(|post| !post.is_empty())
            .collect();
        JournalEntry {
            id,
            date,
            dominated_tasks,
            hours_grinded,
            projects_worked_on: self.projects_worked_on,
            challenges_to_crush: self.challenges_to_crush,
            social_posts,
            mood: self.mood,
            ai_feedback,
        }
    }
}

/// Aggregate counters for public-presence tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SocialStats {
    #[serde(default)]
    pub x_posts: u32,
    #[serde(default)]
    pub medium_articles: u32,
    #[serde(default)]
    pub linked_in_connections: u32,
}

fn default_sound_effects() -> bool {
    true
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

fn default_socratic_ai() -> bool {
    false
}

/// User preferences persisted alongside progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_sound_effects")]
    pub sound_effects: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
    /// While set, journal submissions leave streak fields untouched.
    #[serde(default)]
    pub pause_streaks: bool,
    #[serde(default = "default_socratic_ai")]
    pub socratic_ai_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_effects: default_sound_effects(),
            theme: default_theme(),
            pause_streaks: false,
            socratic_ai_enabled: default_socratic_ai(),
        }
    }
}

fn default_level() -> u32 {
    1
}

fn default_user_name() -> String {
    DEFAULT_USER_NAME.to_string()
}

/// Starter skill roster for a fresh profile.
#[must_use]
pub fn default_skills() -> Vec<Skill> {
    let seed = [
        ("nlp", "Natural Language Processing", 100.0, "NLP"),
        ("rag", "Retrieval Augmented Generation", 80.0, "RAG"),
        ("langchain", "LangChain", 60.0, "Frameworks"),
        ("python", "Python for AI", 150.0, "Programming"),
        ("js", "JavaScript for AI/Frontend", 70.0, "Programming"),
        ("iot", "IoT with AI", 50.0, "Specialized"),
        ("agile", "Agile Methodologies", 30.0, "Methodology"),
        ("dbms", "DBMS for AI", 40.0, "Data"),
        ("healthcare_api", "Healthcare APIs & AI", 60.0, "Domain Specific"),
        ("transformers", "Transformer Models", 120.0, "Deep Learning"),
        ("agentic_ai", "Agentic AI Systems", 90.0, "Advanced AI"),
    ];
    seed.into_iter()
        .map(|(id, name, target_hours, category)| Skill {
            id: id.to_string(),
            name: name.to_string(),
            current_hours: 0.0,
            target_hours,
            category: category.to_string(),
        })
        .collect()
}

/// Starter project list for a fresh profile.
#[must_use]
pub fn default_projects() -> Vec<Project> {
    let seed = [
        (
            "proj1",
            "AI Chatbot for Healthcare",
            "Develop an NLP-powered chatbot for patient queries.",
            &["nlp", "python", "healthcare_api"][..],
        ),
        (
            "proj2",
            "RAG-based Document Q&A",
            "Build a system to answer questions from a large document corpus using RAG.",
            &["rag", "langchain", "transformers"][..],
        ),
        (
            "proj3",
            "IoT Predictive Maintenance",
            "Use AI to predict equipment failure in an IoT setup.",
            &["iot", "python", "dbms"][..],
        ),
    ];
    seed.into_iter()
        .map(|(id, name, description, linked)| Project {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            status: ProjectStatus::NotStarted,
            linked_skills: linked.iter().map(|s| (*s).to_string()).collect(),
        })
        .collect()
}

/// The full persisted profile: progression counters, skills, projects,
/// journal history, badges, and preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    #[serde(default)]
    pub xp: i64,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    /// Calendar day of the most recent streak-counted journal entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_journal_date: Option<NaiveDate>,
    #[serde(default = "default_skills")]
    pub skills: Vec<Skill>,
    #[serde(default = "default_projects")]
    pub projects: Vec<Project>,
    /// Most-recent-first.
    #[serde(default)]
    pub journal_entries: Vec<JournalEntry>,
    /// Insertion-ordered; a badge appears at most once.
    #[serde(default)]
    pub badges: Vec<BadgeId>,
    #[serde(default)]
    pub social_stats: SocialStats,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default = "default_user_name")]
    pub user_name: String,
    /// Ids of ticked roadmap tasks, in the order they were first completed.
    #[serde(default)]
    pub completed_roadmap_tasks: Vec<String>,
}

impl Default for UserState {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            current_streak: 0,
            longest_streak: 0,
            last_journal_date: None,
            skills: default_skills(),
            projects: default_projects(),
            journal_entries: Vec::new(),
            badges: Vec::new(),
            social_stats: SocialStats::default(),
            settings: Settings::default(),
            user_name: default_user_name(),
            completed_roadmap_tasks: Vec::new(),
        }
    }
}

impl UserState {
    /// Fresh profile owned by the given user.
    #[must_use]
    pub fn for_user(name: impl Into<String>) -> Self {
        Self {
            user_name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn find_skill(&self, id: &str) -> Option<&Skill> {
        self.skills.iter().find(|skill| skill.id == id)
    }

    pub fn find_skill_mut(&mut self, id: &str) -> Option<&mut Skill> {
        self.skills.iter_mut().find(|skill| skill.id == id)
    }

    #[must_use]
    pub fn find_project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn find_project_mut(&mut self, id: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|project| project.id == id)
    }

    #[must_use]
    pub fn has_badge(&self, id: BadgeId) -> bool {
        self.badges.contains(&id)
    }

    /// Record a badge, returning false when it was already held.
    pub fn award_badge(&mut self, id: BadgeId) -> bool {
        if self.has_badge(id) {
            return false;
        }
        self.badges.push(id);
        true
    }

    #[must_use]
    pub fn is_task_completed(&self, task_id: &str) -> bool {
        self.completed_roadmap_tasks.iter().any(|id| id == task_id)
    }

    /// Sum of logged hours across all skills.
    #[must_use]
    pub fn total_grind_hours(&self) -> f32 {
        self.skills.iter().map(|skill| skill.current_hours).sum()
    }

    #[must_use]
    pub fn mastered_skill_count(&self) -> usize {
        self.skills.iter().filter(|skill| skill.is_mastered()).count()
    }

    #[must_use]
    pub fn completed_project_count(&self) -> usize {
        self.projects
            .iter()
            .filter(|project| project.status == ProjectStatus::Completed)
            .count()
    }

    /// Repair invariants on a freshly loaded profile.
    ///
    /// Empty rosters are reseeded, the level is recomputed from XP, and
    /// the longest streak is raised to cover the current one.
    pub(crate) fn normalize(&mut self) {
        if self.skills.is_empty() {
            self.skills = default_skills();
        }
        if self.projects.is_empty() {
            self.projects = default_projects();
        }
        self.level = crate::levels::level_for(self.xp);
        self.longest_streak = self.longest_streak.max(self.current_streak);
    }
}
