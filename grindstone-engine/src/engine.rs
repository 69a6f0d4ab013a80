//! The gamification state engine.
//!
//! [`TrackerEngine`] owns the profile plus the transient session pieces
//! (notices, Socratic dialog, focus timer) and exposes every state
//! transition as one atomic read-modify-write: mutate, recompute derived
//! fields, sweep badges, persist. Persistence failures degrade to log
//! warnings per the fail-soft storage contract in [`crate::persist`].

use log::info;

use crate::badges::{self, BadgeId};
use crate::constants::{
    XP_PER_FOCUS_SESSION, XP_PER_HOUR_GRIND, XP_PER_JOURNAL_ENTRY, XP_PER_PROJECT_COMPLETED,
    XP_PER_SKILL_MASTERED, XP_PER_SOCIAL_POST,
};
use crate::focus::{FocusPhase, FocusTimer};
use crate::levels::{self, LevelProgress};
use crate::numbers::{
    clamp_f64_to_f32, i64_from_usize, i64_to_f64, round_f32_to_i64, sanitize_hours,
};
use crate::persist;
use crate::roadmap::{self, Roadmap, RoadmapTask};
use crate::socratic::SocraticDialog;
use crate::state::{JournalDraft, ProjectStatus, UserState};
use crate::streak;
use crate::{Clock, StateStore};

/// Transient UI notifications. Each is last-write-wins; the surface layer
/// clears them after its display window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Notices {
    pub last_earned_xp: Option<i64>,
    pub newly_awarded_badge: Option<BadgeId>,
}

/// Outcome of flipping a roadmap task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskToggle {
    pub task_id: String,
    /// True when the toggle completed the task, false when it unticked it.
    pub completed: bool,
    pub xp_delta: i64,
}

/// XP earned for a logged stretch of grind hours.
fn hours_xp(hours: f32) -> i64 {
    let hours = f64::from(sanitize_hours(hours));
    round_f32_to_i64(clamp_f64_to_f32(hours * i64_to_f64(XP_PER_HOUR_GRIND)))
}

/// One engine instance per process, owning the injected store and clock.
pub struct TrackerEngine<S, C>
where
    S: StateStore,
    C: Clock,
{
    store: S,
    clock: C,
    roadmap: Roadmap,
    state: UserState,
    notices: Notices,
    socratic: SocraticDialog,
    focus: FocusTimer,
}

impl<S, C> TrackerEngine<S, C>
where
    S: StateStore,
    S::Error: Into<anyhow::Error>,
    C: Clock,
{
    /// Boot against the embedded catalog without a first-run name prompt.
    pub fn new(store: S, clock: C) -> Self {
        Self::with_prompt(store, clock, || None)
    }

    /// Boot against the embedded catalog. On a true first run the prompt
    /// closure is asked once for a user name; see [`persist::load_or_default`].
    pub fn with_prompt<F>(store: S, clock: C, prompt_user_name: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        Self::build(store, clock, roadmap::catalog().clone(), prompt_user_name)
    }

    /// Boot against a caller-supplied catalog.
    pub fn with_roadmap(store: S, clock: C, roadmap: Roadmap) -> Self {
        Self::build(store, clock, roadmap, || None)
    }

    fn build<F>(store: S, clock: C, roadmap: Roadmap, prompt_user_name: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        let state = persist::load_or_default(&store, prompt_user_name);
        Self {
            store,
            clock,
            roadmap,
            state,
            notices: Notices::default(),
            socratic: SocraticDialog::default(),
            focus: FocusTimer::new(),
        }
    }

    /// Grant (or claw back) XP and persist.
    pub fn add_xp(&mut self, amount: i64) {
        self.apply_xp(amount);
        self.commit();
    }

    /// Record a journal submission and return the stored entry's id.
    ///
    /// Runs the full pipeline: streak update, entry stamping, per-skill
    /// hour and mastery XP, social-post XP, X-post counter.
    pub fn log_journal_entry(
        &mut self,
        draft: JournalDraft,
        ai_feedback: Option<String>,
    ) -> String {
        let now = self.clock.now();
        streak::record_journal_day(&mut self.state, now.date_naive());

        let entry = draft.into_entry(now.timestamp_millis().to_string(), now, ai_feedback);

        let mut gained = XP_PER_JOURNAL_ENTRY;
        for line in &entry.hours_grinded {
            // Lines naming a skill outside the roster earn nothing.
            let Some(skill) = self.state.find_skill_mut(&line.skill_id) else {
                continue;
            };
            let crossed = skill.log_hours(line.hours);
            gained += hours_xp(line.hours);
            if crossed {
                gained += XP_PER_SKILL_MASTERED;
            }
        }
        gained += i64_from_usize(entry.social_posts.len()) * XP_PER_SOCIAL_POST;

        self.state.social_stats.x_posts += entry.x_post_count();
        let entry_id = entry.id.clone();
        self.state.journal_entries.insert(0, entry);
        self.apply_xp(gained);
        self.commit();
        entry_id
    }

    /// Log hours directly against one skill.
    ///
    /// Hour XP follows the requested amount even at the mastery cap; only
    /// `current_hours` clamps. An unknown skill id changes nothing.
    pub fn update_skill_progress(&mut self, skill_id: &str, hours_to_add: f32) {
        let Some(skill) = self.state.find_skill_mut(skill_id) else {
            return;
        };
        let crossed = skill.log_hours(hours_to_add);
        let mut gained = hours_xp(hours_to_add);
        if crossed {
            gained += XP_PER_SKILL_MASTERED;
        }
        self.apply_xp(gained);
        self.commit();
    }

    /// Set a project's status. The completion bonus fires only on the
    /// transition into `Completed`; re-setting or leaving it pays nothing
    /// and claws back nothing.
    pub fn update_project_status(&mut self, project_id: &str, status: ProjectStatus) {
        let Some(project) = self.state.find_project_mut(project_id) else {
            return;
        };
        let entered_completed =
            status == ProjectStatus::Completed && project.status != ProjectStatus::Completed;
        project.status = status;
        if entered_completed {
            self.apply_xp(XP_PER_PROJECT_COMPLETED);
        }
        self.commit();
    }

    /// Tick or untick a catalog task, applying its XP with matching sign.
    ///
    /// Completing a task while Socratic AI is enabled opens the reflection
    /// dialog for it. Returns `None` when the id is not in the catalog.
    pub fn toggle_roadmap_task(&mut self, task_id: &str) -> Option<TaskToggle> {
        let task = self.roadmap.find_task(task_id)?.clone();
        let toggle = if self.state.is_task_completed(&task.id) {
            self.state.completed_roadmap_tasks.retain(|id| id != &task.id);
            TaskToggle {
                task_id: task.id.clone(),
                completed: false,
                xp_delta: -task.xp,
            }
        } else {
            self.state.completed_roadmap_tasks.push(task.id.clone());
            TaskToggle {
                task_id: task.id.clone(),
                completed: true,
                xp_delta: task.xp,
            }
        };
        if toggle.completed && self.state.settings.socratic_ai_enabled {
            self.socratic.open(task);
        }
        self.apply_xp(toggle.xp_delta);
        self.commit();
        Some(toggle)
    }

    pub fn toggle_sound_effects(&mut self) {
        self.state.settings.sound_effects = !self.state.settings.sound_effects;
        self.commit();
    }

    /// Flip streak pausing. Unpausing onto a stale anchor zeroes the
    /// streak immediately instead of letting it linger until the next
    /// journal entry.
    pub fn toggle_pause_streaks(&mut self) {
        self.state.settings.pause_streaks = !self.state.settings.pause_streaks;
        if !self.state.settings.pause_streaks {
            streak::reset_stale_streak(&mut self.state, self.clock.today());
        }
        self.commit();
    }

    pub fn toggle_socratic_ai(&mut self) {
        self.state.settings.socratic_ai_enabled = !self.state.settings.socratic_ai_enabled;
        self.commit();
    }

    /// Set the display name verbatim. Validation is the caller's job.
    pub fn update_user_name(&mut self, name: impl Into<String>) {
        self.state.user_name = name.into();
        self.commit();
    }

    /// Wipe progress back to a fresh profile, keeping the remembered name,
    /// and drop all transient session state.
    pub fn reset_all(&mut self) {
        self.state = persist::reset(&self.store);
        self.notices = Notices::default();
        self.socratic.close();
        self.focus = FocusTimer::new();
    }

    /// Patch coach feedback onto an already-committed entry. Returns false
    /// when the entry no longer exists.
    pub fn attach_journal_feedback(&mut self, entry_id: &str, feedback: impl Into<String>) -> bool {
        let Some(entry) = self
            .state
            .journal_entries
            .iter_mut()
            .find(|entry| entry.id == entry_id)
        else {
            return false;
        };
        entry.ai_feedback = Some(feedback.into());
        self.commit();
        true
    }

    pub fn toggle_focus_timer(&mut self) {
        self.focus.toggle();
    }

    pub fn reset_focus_timer(&mut self) {
        self.focus.reset();
    }

    /// Advance the focus timer, paying the session bonus when a work
    /// phase completes. Break completions earn nothing.
    pub fn advance_focus_timer(&mut self, secs: u32) -> Option<FocusPhase> {
        let completed = self.focus.advance(secs);
        if completed == Some(FocusPhase::Work) {
            self.apply_xp(XP_PER_FOCUS_SESSION);
            self.commit();
        }
        completed
    }

    pub fn tick_focus_timer(&mut self) -> Option<FocusPhase> {
        self.advance_focus_timer(1)
    }

    /// Open the Socratic dialog for a task outside the toggle flow.
    pub fn open_socratic(&mut self, task: RoadmapTask) {
        self.socratic.open(task);
    }

    pub fn close_socratic(&mut self) {
        self.socratic.close();
    }

    /// Hand a resolved coach question to the waiting dialog.
    pub fn deliver_socratic_question(&mut self, question: impl Into<String>) {
        self.socratic.deliver_question(question);
    }

    pub fn set_socratic_reflection(&mut self, text: impl Into<String>) {
        self.socratic.set_reflection(text);
    }

    #[must_use]
    pub fn state(&self) -> &UserState {
        &self.state
    }

    #[must_use]
    pub fn roadmap(&self) -> &Roadmap {
        &self.roadmap
    }

    #[must_use]
    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    #[must_use]
    pub fn socratic(&self) -> &SocraticDialog {
        &self.socratic
    }

    #[must_use]
    pub fn focus(&self) -> &FocusTimer {
        &self.focus
    }

    /// XP-bar projection for the current total.
    #[must_use]
    pub fn level_progress(&self) -> LevelProgress {
        levels::level_progress(self.state.xp)
    }

    pub fn clear_xp_notice(&mut self) {
        self.notices.last_earned_xp = None;
    }

    pub fn clear_badge_notice(&mut self) {
        self.notices.newly_awarded_badge = None;
    }

    /// Apply an XP delta and recompute the level. Zero deltas change
    /// nothing, not even the notice.
    fn apply_xp(&mut self, amount: i64) {
        if amount == 0 {
            return;
        }
        self.state.xp += amount;
        let level = levels::level_for(self.state.xp);
        if level > self.state.level {
            info!("level up: reached level {level}");
        }
        self.state.level = level;
        self.notices.last_earned_xp = Some(amount);
    }

    /// Badge sweep plus persistence, run after every mutation.
    fn commit(&mut self) {
        for badge in badges::evaluate(&self.state, &self.roadmap) {
            if self.state.award_badge(badge) {
                info!("badge awarded: {badge}");
                self.notices.newly_awarded_badge = Some(badge);
            }
        }
        persist::save(&self.store, &self.state);
    }
}
