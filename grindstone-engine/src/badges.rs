//! Badge identifiers, display metadata, and unlock rules.
//!
//! Rules are pure predicates over the current profile and catalog. The
//! engine evaluates them after every mutation and awards whatever newly
//! passes, so no transition can skip a badge.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::constants::{
    GRIND_BADGE_HOURS_TIER1, GRIND_BADGE_HOURS_TIER2, JOURNAL_BADGE_ENTRIES_TIER1,
    JOURNAL_BADGE_ENTRIES_TIER2, MASTERY_BADGE_COUNT_TIER1, MASTERY_BADGE_COUNT_TIER2,
    PROJECT_BADGE_COUNT_TIER1, PROJECT_BADGE_COUNT_TIER2, RAG_SKILL_ID, STREAK_BADGE_DAYS_TIER1,
    STREAK_BADGE_DAYS_TIER2,
};
use crate::roadmap::Roadmap;
use crate::state::{Skill, UserState};

/// Stable badge identifier. The wire strings predate this enum and are
/// kept verbatim so existing saves stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BadgeId {
    #[serde(rename = "RAG_TITAN")]
    RagTitan,
    #[serde(rename = "STREAK_DEMON_5")]
    StreakDemon5,
    #[serde(rename = "STREAK_DEMON_10")]
    StreakDemon10,
    #[serde(rename = "PROJECT_NOVICE")]
    ProjectNovice,
    #[serde(rename = "PROJECT_ADEPT")]
    ProjectAdept,
    #[serde(rename = "GRIND_MASTER_50H")]
    GrindMaster50,
    #[serde(rename = "GRIND_MASTER_100H")]
    GrindMaster100,
    #[serde(rename = "JOURNALIST_5")]
    Journalist5,
    #[serde(rename = "JOURNALIST_10")]
    Journalist10,
    #[serde(rename = "SKILL_LEARNER")]
    SkillLearner,
    #[serde(rename = "SKILL_PRODIGY")]
    SkillProdigy,
    #[serde(rename = "PHASE_1_COMPLETE")]
    Phase1Complete,
    #[serde(rename = "PHASE_2_COMPLETE")]
    Phase2Complete,
    #[serde(rename = "PHASE_3_COMPLETE")]
    Phase3Complete,
    #[serde(rename = "PHASE_4_COMPLETE")]
    Phase4Complete,
    #[serde(rename = "ROADMAP_CONQUEROR")]
    RoadmapConqueror,
}

impl BadgeId {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RagTitan => "RAG_TITAN",
            Self::StreakDemon5 => "STREAK_DEMON_5",
            Self::StreakDemon10 => "STREAK_DEMON_10",
            Self::ProjectNovice => "PROJECT_NOVICE",
            Self::ProjectAdept => "PROJECT_ADEPT",
            Self::GrindMaster50 => "GRIND_MASTER_50H",
            Self::GrindMaster100 => "GRIND_MASTER_100H",
            Self::Journalist5 => "JOURNALIST_5",
            Self::Journalist10 => "JOURNALIST_10",
            Self::SkillLearner => "SKILL_LEARNER",
            Self::SkillProdigy => "SKILL_PRODIGY",
            Self::Phase1Complete => "PHASE_1_COMPLETE",
            Self::Phase2Complete => "PHASE_2_COMPLETE",
            Self::Phase3Complete => "PHASE_3_COMPLETE",
            Self::Phase4Complete => "PHASE_4_COMPLETE",
            Self::RoadmapConqueror => "ROADMAP_CONQUEROR",
        }
    }

    /// Display metadata for this badge.
    #[must_use]
    pub fn metadata(self) -> &'static Badge {
        ALL_BADGES
            .iter()
            .find(|badge| badge.id == self)
            .unwrap_or(&ALL_BADGES[0])
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static display data for one badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub id: BadgeId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const ALL_BADGES: [Badge; 16] = [
    Badge {
        id: BadgeId::RagTitan,
        name: "RAG Titan",
        description: "Mastered Retrieval Augmented Generation.",
        icon: "\u{1f3c6}",
    },
    Badge {
        id: BadgeId::StreakDemon5,
        name: "Streak Demon (5 Days)",
        description: "Maintained a 5-day journal streak.",
        icon: "\u{1f525}",
    },
    Badge {
        id: BadgeId::StreakDemon10,
        name: "Streak Demon (10 Days)",
        description: "Maintained a 10-day journal streak.",
        icon: "\u{1f525}\u{1f525}",
    },
    Badge {
        id: BadgeId::ProjectNovice,
        name: "Project Novice",
        description: "Completed your first project.",
        icon: "\u{1f6e0}\u{fe0f}",
    },
    Badge {
        id: BadgeId::ProjectAdept,
        name: "Project Adept",
        description: "Completed 3 projects.",
        icon: "\u{1f680}",
    },
    Badge {
        id: BadgeId::GrindMaster50,
        name: "Grind Master (50h)",
        description: "Logged 50 hours of grind.",
        icon: "\u{1f4aa}",
    },
    Badge {
        id: BadgeId::GrindMaster100,
        name: "Grind Master (100h)",
        description: "Logged 100 hours of grind.",
        icon: "\u{1f3cb}\u{fe0f}",
    },
    Badge {
        id: BadgeId::Journalist5,
        name: "Journalist (5 entries)",
        description: "Submitted 5 journal entries.",
        icon: "\u{270d}\u{fe0f}",
    },
    Badge {
        id: BadgeId::Journalist10,
        name: "Journalist (10 entries)",
        description: "Submitted 10 journal entries.",
        icon: "\u{1f4dc}",
    },
    Badge {
        id: BadgeId::SkillLearner,
        name: "Skill Learner",
        description: "Mastered your first skill.",
        icon: "\u{1f9e0}",
    },
    Badge {
        id: BadgeId::SkillProdigy,
        name: "Skill Prodigy",
        description: "Mastered 3 different skills.",
        icon: "\u{1f31f}",
    },
    Badge {
        id: BadgeId::Phase1Complete,
        name: "Phase 1 Vanguard",
        description: "Conquered Foundations Phase.",
        icon: "\u{1f6e1}\u{fe0f}",
    },
    Badge {
        id: BadgeId::Phase2Complete,
        name: "Phase 2 Dominator",
        description: "Dominated NLP & System Design.",
        icon: "\u{1f4e1}",
    },
    Badge {
        id: BadgeId::Phase3Complete,
        name: "Phase 3 Architect",
        description: "Engineered RAG & MLOps.",
        icon: "\u{1f3d7}\u{fe0f}",
    },
    Badge {
        id: BadgeId::Phase4Complete,
        name: "Phase 4 Overlord",
        description: "Mastered Agentic AI & Interviews.",
        icon: "\u{1f451}",
    },
    Badge {
        id: BadgeId::RoadmapConqueror,
        name: "Codex Conqueror",
        description: "Completed all directives in the mastery codex.",
        icon: "\u{1f30c}",
    },
];

/// Evaluation order. Lower tiers come first so that when several fire in
/// one transition the most impressive badge lands last.
const AWARD_ORDER: [BadgeId; 16] = [
    BadgeId::StreakDemon5,
    BadgeId::StreakDemon10,
    BadgeId::Journalist5,
    BadgeId::Journalist10,
    BadgeId::ProjectNovice,
    BadgeId::ProjectAdept,
    BadgeId::SkillLearner,
    BadgeId::SkillProdigy,
    BadgeId::GrindMaster50,
    BadgeId::GrindMaster100,
    BadgeId::RagTitan,
    BadgeId::Phase1Complete,
    BadgeId::Phase2Complete,
    BadgeId::Phase3Complete,
    BadgeId::Phase4Complete,
    BadgeId::RoadmapConqueror,
];

/// Badges newly earned by a single state transition.
pub type NewBadges = SmallVec<[BadgeId; 4]>;

/// Collect every badge that is unlocked but not yet held.
///
/// Tiers are checked independently, so a transition that jumps past
/// several thresholds earns all of them at once.
#[must_use]
pub fn evaluate(state: &UserState, roadmap: &Roadmap) -> NewBadges {
    AWARD_ORDER
        .into_iter()
        .filter(|id| !state.has_badge(*id) && unlocked(*id, state, roadmap))
        .collect()
}

fn unlocked(id: BadgeId, state: &UserState, roadmap: &Roadmap) -> bool {
    match id {
        BadgeId::StreakDemon5 => streak_reached(state, STREAK_BADGE_DAYS_TIER1),
        BadgeId::StreakDemon10 => streak_reached(state, STREAK_BADGE_DAYS_TIER2),
        BadgeId::Journalist5 => state.journal_entries.len() >= JOURNAL_BADGE_ENTRIES_TIER1,
        BadgeId::Journalist10 => state.journal_entries.len() >= JOURNAL_BADGE_ENTRIES_TIER2,
        BadgeId::ProjectNovice => state.completed_project_count() >= PROJECT_BADGE_COUNT_TIER1,
        BadgeId::ProjectAdept => state.completed_project_count() >= PROJECT_BADGE_COUNT_TIER2,
        BadgeId::SkillLearner => state.mastered_skill_count() >= MASTERY_BADGE_COUNT_TIER1,
        BadgeId::SkillProdigy => state.mastered_skill_count() >= MASTERY_BADGE_COUNT_TIER2,
        BadgeId::GrindMaster50 => state.total_grind_hours() >= GRIND_BADGE_HOURS_TIER1,
        BadgeId::GrindMaster100 => state.total_grind_hours() >= GRIND_BADGE_HOURS_TIER2,
        BadgeId::RagTitan => state.find_skill(RAG_SKILL_ID).is_some_and(Skill::is_mastered),
        BadgeId::Phase1Complete => phase_complete(state, roadmap, "phase1"),
        BadgeId::Phase2Complete => phase_complete(state, roadmap, "phase2"),
        BadgeId::Phase3Complete => phase_complete(state, roadmap, "phase3"),
        BadgeId::Phase4Complete => phase_complete(state, roadmap, "phase4"),
        BadgeId::RoadmapConqueror => {
            roadmap.task_count() > 0
                && roadmap.tasks().all(|task| state.is_task_completed(&task.id))
        }
    }
}

/// Streak badges freeze entirely while streak accrual is paused.
fn streak_reached(state: &UserState, days: u32) -> bool {
    !state.settings.pause_streaks && state.current_streak >= days
}

fn phase_complete(state: &UserState, roadmap: &Roadmap, phase_id: &str) -> bool {
    roadmap
        .phases
        .iter()
        .find(|phase| phase.id == phase_id)
        .is_some_and(|phase| {
            phase.task_count() > 0 && phase.task_ids().all(|id| state.is_task_completed(id))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roadmap;
    use crate::state::ProjectStatus;

    fn complete_phase(state: &mut UserState, phase_id: &str) {
        let phase = roadmap::catalog()
            .phases
            .iter()
            .find(|phase| phase.id == phase_id)
            .unwrap();
        for id in phase.task_ids() {
            state.completed_roadmap_tasks.push(id.to_string());
        }
    }

    #[test]
    fn wire_values_round_trip() {
        for badge in &ALL_BADGES {
            let json = serde_json::to_string(&badge.id).unwrap();
            assert_eq!(json, format!("\"{}\"", badge.id.as_str()));
            let back: BadgeId = serde_json::from_str(&json).unwrap();
            assert_eq!(back, badge.id);
        }
    }

    #[test]
    fn metadata_resolves_every_id() {
        assert_eq!(BadgeId::RagTitan.metadata().name, "RAG Titan");
        assert_eq!(BadgeId::GrindMaster50.metadata().description, "Logged 50 hours of grind.");
        for badge in &ALL_BADGES {
            assert_eq!(badge.id.metadata().id, badge.id);
        }
    }

    #[test]
    fn tiers_fire_together_when_jumped() {
        let mut state = UserState::default();
        for project in &mut state.projects {
            project.status = ProjectStatus::Completed;
        }
        let earned = evaluate(&state, roadmap::catalog());
        assert!(earned.contains(&BadgeId::ProjectNovice));
        assert!(earned.contains(&BadgeId::ProjectAdept));
        let novice = earned.iter().position(|id| *id == BadgeId::ProjectNovice);
        let adept = earned.iter().position(|id| *id == BadgeId::ProjectAdept);
        assert!(novice < adept);
    }

    #[test]
    fn streak_badges_respect_pause() {
        let mut state = UserState::default();
        state.current_streak = 7;
        state.settings.pause_streaks = true;
        assert!(evaluate(&state, roadmap::catalog()).is_empty());

        state.settings.pause_streaks = false;
        let earned = evaluate(&state, roadmap::catalog());
        assert_eq!(earned.as_slice(), &[BadgeId::StreakDemon5]);
    }

    #[test]
    fn rag_titan_requires_the_rag_skill() {
        let mut state = UserState::default();
        if let Some(skill) = state.find_skill_mut("nlp") {
            skill.current_hours = skill.target_hours;
        }
        let earned = evaluate(&state, roadmap::catalog());
        assert!(earned.contains(&BadgeId::SkillLearner));
        assert!(!earned.contains(&BadgeId::RagTitan));

        if let Some(skill) = state.find_skill_mut(RAG_SKILL_ID) {
            skill.current_hours = skill.target_hours;
        }
        let earned = evaluate(&state, roadmap::catalog());
        assert!(earned.contains(&BadgeId::RagTitan));
    }

    #[test]
    fn phase_badges_map_to_their_phase() {
        let mut state = UserState::default();
        complete_phase(&mut state, "phase1");
        let earned = evaluate(&state, roadmap::catalog());
        assert!(earned.contains(&BadgeId::Phase1Complete));
        assert!(!earned.contains(&BadgeId::Phase2Complete));
        assert!(!earned.contains(&BadgeId::RoadmapConqueror));
    }

    #[test]
    fn conqueror_needs_every_task_including_deliverables() {
        let mut state = UserState::default();
        for phase_id in ["phase1", "phase2", "phase3", "phase4"] {
            complete_phase(&mut state, phase_id);
        }
        let earned = evaluate(&state, roadmap::catalog());
        assert!(!earned.contains(&BadgeId::RoadmapConqueror));

        complete_phase(&mut state, "deliverables");
        let earned = evaluate(&state, roadmap::catalog());
        assert!(earned.contains(&BadgeId::RoadmapConqueror));
    }

    #[test]
    fn empty_catalog_awards_nothing_structural() {
        let state = UserState::default();
        let earned = evaluate(&state, &Roadmap::empty());
        assert!(earned.is_empty());
    }

    #[test]
    fn held_badges_never_return() {
        let mut state = UserState::default();
        state.current_streak = 12;
        let first = evaluate(&state, roadmap::catalog());
        assert_eq!(
            first.as_slice(),
            &[BadgeId::StreakDemon5, BadgeId::StreakDemon10]
        );
        for id in first {
            state.award_badge(id);
        }
        assert!(evaluate(&state, roadmap::catalog()).is_empty());
    }
}
