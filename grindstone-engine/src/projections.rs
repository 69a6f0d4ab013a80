//! Read-only projections consumed by charts and report output.
//!
//! Everything here derives from [`UserState`] and the catalog without
//! mutating either; renderers take these instead of walking raw state.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::constants::HEATMAP_WINDOW_DAYS;
use crate::numbers::{clamp_f64_to_f32, i64_from_usize, i64_to_f64};
use crate::roadmap::{Roadmap, RoadmapPhase};
use crate::state::{Skill, UserState};

/// Entry count for one calendar day of the consistency heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapDay {
    pub date: NaiveDate,
    pub count: u32,
}

/// Completed-versus-total tally for the catalog or a single phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoadmapProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: f32,
}

impl RoadmapProgress {
    fn tally(completed: usize, total: usize) -> Self {
        let percent = if total > 0 {
            let ratio = i64_to_f64(i64_from_usize(completed)) / i64_to_f64(i64_from_usize(total));
            clamp_f64_to_f32(ratio * 100.0)
        } else {
            0.0
        };
        Self {
            completed,
            total,
            percent,
        }
    }
}

/// Percentage of the mastery target reached, clamped to 0..=100.
///
/// A skill without a positive target reports 0 rather than dividing by it.
#[must_use]
pub fn skill_completion_pct(skill: &Skill) -> f32 {
    if skill.target_hours > 0.0 {
        ((skill.current_hours / skill.target_hours) * 100.0).min(100.0)
    } else {
        0.0
    }
}

/// Distinct skill categories in first-seen roster order.
#[must_use]
pub fn skill_categories(state: &UserState) -> Vec<&str> {
    let mut categories: Vec<&str> = Vec::new();
    for skill in &state.skills {
        if !categories.contains(&skill.category.as_str()) {
            categories.push(&skill.category);
        }
    }
    categories
}

/// Journal entries per day over the trailing window ending at `today`.
///
/// Returns one point per day in ascending date order, zero-count days
/// included, so the grid renders a fixed-width strip.
#[must_use]
pub fn journal_heatmap(state: &UserState, today: NaiveDate) -> Vec<HeatmapDay> {
    let start = today - Duration::days(HEATMAP_WINDOW_DAYS - 1);
    let mut days: Vec<HeatmapDay> = (0..HEATMAP_WINDOW_DAYS)
        .map(|offset| HeatmapDay {
            date: start + Duration::days(offset),
            count: 0,
        })
        .collect();
    for entry in &state.journal_entries {
        let offset = (entry.date.date_naive() - start).num_days();
        let Ok(index) = usize::try_from(offset) else {
            continue;
        };
        if let Some(day) = days.get_mut(index) {
            day.count += 1;
        }
    }
    days
}

/// Catalog-wide completion tally. Ids in the completed set that no longer
/// exist in the catalog are not counted.
#[must_use]
pub fn roadmap_progress(state: &UserState, roadmap: &Roadmap) -> RoadmapProgress {
    let completed = roadmap
        .tasks()
        .filter(|task| state.is_task_completed(&task.id))
        .count();
    RoadmapProgress::tally(completed, roadmap.task_count())
}

/// Completion tally for one phase.
#[must_use]
pub fn phase_progress(state: &UserState, phase: &RoadmapPhase) -> RoadmapProgress {
    let completed = phase
        .task_ids()
        .filter(|task_id| state.is_task_completed(task_id))
        .count();
    RoadmapProgress::tally(completed, phase.task_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roadmap;
    use crate::state::{JournalEntry, Mood};
    use chrono::{TimeZone, Utc};

    fn entry_on(year: i32, month: u32, day: u32) -> JournalEntry {
        let date = Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap();
        JournalEntry {
            id: date.timestamp_millis().to_string(),
            date,
            dominated_tasks: Vec::new(),
            hours_grinded: Vec::new(),
            projects_worked_on: String::new(),
            challenges_to_crush: String::new(),
            social_posts: Vec::new(),
            mood: Mood::Neutral,
            ai_feedback: None,
        }
    }

    #[test]
    fn completion_pct_clamps_and_guards_zero_target() {
        let mut skill = Skill {
            id: "nlp".into(),
            name: "NLP".into(),
            current_hours: 25.0,
            target_hours: 100.0,
            category: "NLP".into(),
        };
        assert!((skill_completion_pct(&skill) - 25.0).abs() < f32::EPSILON);

        skill.current_hours = 250.0;
        assert!((skill_completion_pct(&skill) - 100.0).abs() < f32::EPSILON);

        skill.target_hours = 0.0;
        assert!(skill_completion_pct(&skill).abs() < f32::EPSILON);
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let state = UserState::default();
        let categories = skill_categories(&state);
        assert_eq!(categories.first(), Some(&"NLP"));
        let unique: std::collections::HashSet<&&str> = categories.iter().collect();
        assert_eq!(unique.len(), categories.len());
    }

    #[test]
    fn heatmap_spans_fixed_window_ascending() {
        let mut state = UserState::default();
        let today = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap();
        state.journal_entries.push(entry_on(2025, 3, 30));
        state.journal_entries.push(entry_on(2025, 3, 30));
        state.journal_entries.push(entry_on(2025, 3, 15));
        // outside the window, must not be counted
        state.journal_entries.push(entry_on(2025, 2, 1));

        let days = journal_heatmap(&state, today);
        assert_eq!(days.len(), 30);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(days[29].date, today);
        assert_eq!(days[29].count, 2);
        let mid = days
            .iter()
            .find(|day| day.date == NaiveDate::from_ymd_opt(2025, 3, 15).unwrap())
            .unwrap();
        assert_eq!(mid.count, 1);
        assert_eq!(days.iter().map(|day| day.count).sum::<u32>(), 3);
    }

    #[test]
    fn window_start_boundary_is_inclusive() {
        let mut state = UserState::default();
        let today = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap();
        state.journal_entries.push(entry_on(2025, 3, 1));
        state.journal_entries.push(entry_on(2025, 2, 28));

        let days = journal_heatmap(&state, today);
        assert_eq!(days[0].count, 1);
    }

    #[test]
    fn roadmap_tally_counts_only_catalog_ids() {
        let roadmap = roadmap::catalog();
        let mut state = UserState::default();
        state.completed_roadmap_tasks.push("p1c1i1".into());
        state.completed_roadmap_tasks.push("ghost-task".into());

        let progress = roadmap_progress(&state, roadmap);
        assert_eq!(progress.completed, 1);
        assert_eq!(progress.total, 67);
        assert!(progress.percent > 0.0 && progress.percent < 2.0);
    }

    #[test]
    fn phase_tally_and_empty_catalog_guard() {
        let roadmap = roadmap::catalog();
        let mut state = UserState::default();
        for task_id in roadmap.phases[0].task_ids() {
            state.completed_roadmap_tasks.push(task_id.to_string());
        }

        let full = phase_progress(&state, &roadmap.phases[0]);
        assert_eq!(full.completed, full.total);
        assert!((full.percent - 100.0).abs() < f32::EPSILON);

        let untouched = phase_progress(&state, &roadmap.phases[1]);
        assert_eq!(untouched.completed, 0);
        assert!(untouched.percent.abs() < f32::EPSILON);

        let empty = roadmap_progress(&state, &Roadmap::empty());
        assert_eq!(empty.total, 0);
        assert!(empty.percent.abs() < f32::EPSILON);
    }
}
