//! Static learning-roadmap catalog embedded at build time.
//!
//! The catalog is read-only structural data; per-user completion lives in
//! [`crate::state::UserState::completed_roadmap_tasks`] as task ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::constants::DELIVERABLES_PHASE_ID;

const DEFAULT_ROADMAP_DATA: &str = include_str!("../assets/roadmap.json");

/// Flavor of a roadmap task, used for display grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    Skill,
    #[serde(rename = "AI Basics")]
    AiBasics,
    #[serde(rename = "Soft Skills")]
    SoftSkills,
    Resource,
    Project,
    Branding,
    EvilEdge,
    Milestone,
    #[serde(rename = "NLP")]
    Nlp,
    #[serde(rename = "System Design")]
    SystemDesign,
    #[serde(rename = "RAG")]
    Rag,
    #[serde(rename = "MLOps")]
    MlOps,
    #[serde(rename = "Agentic AI")]
    AgenticAi,
    #[serde(rename = "MCP")]
    Mcp,
    #[serde(rename = "Interview Prep")]
    InterviewPrep,
    Deliverables,
}

impl TaskKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Skill => "Skill",
            Self::AiBasics => "AI Basics",
            Self::SoftSkills => "Soft Skills",
            Self::Resource => "Resource",
            Self::Project => "Project",
            Self::Branding => "Branding",
            Self::EvilEdge => "EvilEdge",
            Self::Milestone => "Milestone",
            Self::Nlp => "NLP",
            Self::SystemDesign => "System Design",
            Self::Rag => "RAG",
            Self::MlOps => "MLOps",
            Self::AgenticAi => "Agentic AI",
            Self::Mcp => "MCP",
            Self::InterviewPrep => "Interview Prep",
            Self::Deliverables => "Deliverables",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One checkable roadmap task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapTask {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_text: Option<String>,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    /// XP granted on completion and clawed back when unticked.
    pub xp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Grouping of tasks under one heading within a phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapCategory {
    pub id: String,
    pub title: String,
    pub items: Vec<RoadmapTask>,
}

/// A roadmap phase holding categorized tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapPhase {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    pub categories: Vec<RoadmapCategory>,
}

impl RoadmapPhase {
    /// The deliverables pseudo-phase never earns a phase badge.
    #[must_use]
    pub fn is_deliverables(&self) -> bool {
        self.id == DELIVERABLES_PHASE_ID
    }

    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|category| category.items.iter().map(|task| task.id.as_str()))
    }

    #[must_use]
    pub fn task_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| category.items.len())
            .sum()
    }
}

/// The complete catalog across all phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Roadmap {
    pub phases: Vec<RoadmapPhase>,
}

impl Roadmap {
    /// Create an empty catalog (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self { phases: Vec::new() }
    }

    /// Load a catalog from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid roadmap data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_ROADMAP_DATA).unwrap_or_default()
    }

    /// Find a task by id across all phases and categories.
    #[must_use]
    pub fn find_task(&self, task_id: &str) -> Option<&RoadmapTask> {
        for phase in &self.phases {
            for category in &phase.categories {
                for task in &category.items {
                    if task.id == task_id {
                        return Some(task);
                    }
                }
            }
        }
        None
    }

    pub fn tasks(&self) -> impl Iterator<Item = &RoadmapTask> {
        self.phases.iter().flat_map(|phase| {
            phase
                .categories
                .iter()
                .flat_map(|category| category.items.iter())
        })
    }

    #[must_use]
    pub fn task_count(&self) -> usize {
        self.phases.iter().map(RoadmapPhase::task_count).sum()
    }

    /// XP earned by ticking every task in the catalog.
    #[must_use]
    pub fn total_xp(&self) -> i64 {
        self.tasks().map(|task| task.xp).sum()
    }
}

/// Shared default catalog parsed once from the embedded asset.
#[must_use]
pub fn catalog() -> &'static Roadmap {
    static CATALOG: OnceLock<Roadmap> = OnceLock::new();
    CATALOG.get_or_init(Roadmap::load_from_static)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_parses() {
        let roadmap = Roadmap::load_from_static();
        assert_eq!(roadmap.phases.len(), 5);
        assert_eq!(roadmap.task_count(), 67);
        assert_eq!(roadmap.total_xp(), 3_535);
    }

    #[test]
    fn find_task_resolves_nested_ids() {
        let roadmap = catalog();
        let task = roadmap.find_task("p1c1i1").unwrap();
        assert_eq!(task.xp, 50);
        assert_eq!(task.kind, TaskKind::Skill);
        let offers = roadmap.find_task("delc4i1").unwrap();
        assert_eq!(offers.xp, 500);
        assert!(roadmap.find_task("p9c9i9").is_none());
    }

    #[test]
    fn deliverables_phase_is_flagged() {
        let roadmap = catalog();
        let flagged: Vec<_> = roadmap
            .phases
            .iter()
            .filter(|phase| phase.is_deliverables())
            .collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].id, "deliverables");
        assert_eq!(flagged[0].task_count(), 4);
    }

    #[test]
    fn kind_strings_match_wire_values() {
        let json = r#"{"id": "t1", "text": "demo", "type": "System Design", "xp": 10}"#;
        let task: RoadmapTask = serde_json::from_str(json).unwrap();
        assert_eq!(task.kind, TaskKind::SystemDesign);
        assert_eq!(task.kind.to_string(), "System Design");
        let round = serde_json::to_string(&task).unwrap();
        assert!(round.contains("\"System Design\""));
    }

    #[test]
    fn phase_task_ids_cover_all_categories() {
        let roadmap = catalog();
        let phase1 = &roadmap.phases[0];
        let ids: Vec<&str> = phase1.task_ids().collect();
        assert_eq!(ids.len(), 15);
        assert!(ids.contains(&"p1c5i2"));
    }
}
