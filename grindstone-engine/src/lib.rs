//! Grindstone Engine
//!
//! Platform-agnostic core for the Grindstone progress tracker. This crate
//! owns every progression rule (XP, levels, streaks, badges, the roadmap
//! catalog) and the persistence flow, without UI or platform-specific
//! dependencies. Surfaces inject a [`StateStore`] and a [`Clock`] and drive
//! a [`TrackerEngine`].

pub mod badges;
pub mod coach;
pub mod constants;
pub mod engine;
pub mod focus;
pub mod levels;
pub mod motivation;
pub mod numbers;
pub mod persist;
pub mod projections;
pub mod roadmap;
pub mod socratic;
pub mod state;
mod streak;

// Re-export commonly used types
pub use badges::{ALL_BADGES, Badge, BadgeId, NewBadges};
pub use coach::{Coach, CoachError, OfflineCoach};
pub use engine::{Notices, TaskToggle, TrackerEngine};
pub use focus::{FocusPhase, FocusTimer};
pub use levels::{LEVEL_XP_THRESHOLDS, LevelProgress, level_for, level_progress};
pub use motivation::{PostTemplate, SOCIAL_POST_TEMPLATES, THREAT_QUOTES};
pub use projections::{HeatmapDay, RoadmapProgress};
pub use roadmap::{Roadmap, RoadmapCategory, RoadmapPhase, RoadmapTask, TaskKind};
pub use socratic::SocraticDialog;
pub use state::{
    JournalDraft, JournalEntry, Mood, Project, ProjectStatus, Settings, Skill, SkillHours,
    SocialStats, UserState,
};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

/// Trait for abstracting profile persistence
/// Platform-specific implementations should provide this
pub trait StateStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Write `value` under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove any value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

/// Trait for abstracting time so tests and simulations can drive it
pub trait Clock {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date, derived from [`Clock::now`].
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for tests and simulations.
///
/// Clones share one instant, so a handle kept by the caller moves time
/// forward underneath an engine that owns another handle.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    #[must_use]
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get() + delta);
    }

    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

/// In-memory store for tests and headless runs. Clones share contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Rc<RefCell<HashMap<String, String>>>,
}

impl StateStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.data.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }
}
