//! Shared plumbing the scenarios run on: deterministic time, seeded
//! randomness, store selection, and an offline coach.

use std::convert::Infallible;
use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use grindstone_engine::constants::{STATE_KEY, USER_NAME_KEY};
use grindstone_engine::{
    Clock, Coach, CoachError, JournalEntry, ManualClock, MemoryStore, RoadmapTask, StateStore,
    TrackerEngine,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Engine wired to the tester's store and clock.
pub type SimEngine = TrackerEngine<ScenarioStore, SimClock>;

fn sim_epoch() -> DateTime<Utc> {
    // 2025-01-06 09:00 UTC, a Monday.
    Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0)
        .single()
        .expect("fixed UTC timestamp is unambiguous")
}

/// Stepping sim time. Every run starts at the same Monday morning so
/// streak math and heatmap windows come out identical across seeds.
///
/// Clones share one instant, like the engine's manual clock.
#[derive(Debug, Clone)]
pub struct SimClock {
    inner: ManualClock,
}

impl SimClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: ManualClock::starting_at(sim_epoch()),
        }
    }

    /// Step to the next calendar day at the canonical morning hour.
    pub fn next_day(&self) {
        self.jump_days(1);
    }

    /// Jump forward whole days, landing on the canonical morning hour.
    /// Re-anchoring keeps intra-day ticks from drifting a long run
    /// across midnight.
    pub fn jump_days(&self, days: i64) {
        let date = self.inner.today() + Duration::days(days);
        if let Some(morning) = date.and_hms_opt(9, 0, 0) {
            self.inner.set(morning.and_utc());
        }
    }

    /// Nudge time forward within the current day. Journal entry ids are
    /// timestamp-derived, so back-to-back submissions need this between
    /// them to stay distinct.
    pub fn tick_minutes(&self, minutes: i64) {
        self.inner.advance(Duration::minutes(minutes));
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SimClock {
    fn now(&self) -> DateTime<Utc> {
        self.inner.now()
    }
}

/// Key-value store persisted as one file per key under a directory.
///
/// Stands in for the browser's localStorage when a run should leave its
/// saves on disk for inspection or survive process boundaries.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn file_for(&self, key: &str) -> PathBuf {
        // Keys map straight to file names; separators are flattened so no
        // key can escape the directory.
        let name: String = key
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.dir.join(name)
    }
}

impl StateStore for JsonFileStore {
    type Error = io::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        match fs::read_to_string(self.file_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        fs::write(self.file_for(key), value)
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        match fs::remove_file(self.file_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    }
}

/// A `MemoryStore` operation can never fail; unwrap its `Infallible` error.
fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Store selected per run: memory by default, disk under `--save-dir`.
#[derive(Debug, Clone)]
pub enum ScenarioStore {
    Memory(MemoryStore),
    Disk(JsonFileStore),
}

impl StateStore for ScenarioStore {
    type Error = io::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        match self {
            Self::Memory(store) => Ok(infallible(store.get(key))),
            Self::Disk(store) => store.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        match self {
            Self::Memory(store) => {
                infallible(store.set(key, value));
                Ok(())
            }
            Self::Disk(store) => store.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        match self {
            Self::Memory(store) => {
                infallible(store.remove(key));
                Ok(())
            }
            Self::Disk(store) => store.remove(key),
        }
    }
}

/// Everything one scenario run gets to work with.
#[derive(Debug, Clone)]
pub struct ScenarioCtx {
    pub scenario: &'static str,
    pub seed: u64,
    pub days: u32,
    pub verbose: bool,
    save_dir: Option<PathBuf>,
}

impl ScenarioCtx {
    #[must_use]
    pub fn new(
        scenario: &'static str,
        seed: u64,
        days: u32,
        verbose: bool,
        save_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            scenario,
            seed,
            days,
            verbose,
            save_dir,
        }
    }

    /// Seeded choice RNG; the same seed replays the same run exactly.
    #[must_use]
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }

    #[must_use]
    pub fn clock(&self) -> SimClock {
        SimClock::new()
    }

    /// Open this run's store, wiped back to a blank profile.
    ///
    /// Disk stores are laid out per scenario and seed; stale saves from a
    /// previous invocation are removed so assertions start from zero.
    ///
    /// # Errors
    ///
    /// Returns an error when the save directory cannot be prepared.
    pub fn store(&self) -> Result<ScenarioStore> {
        let store = match &self.save_dir {
            Some(base) => {
                let dir = base.join(self.scenario).join(format!("seed-{}", self.seed));
                let store = JsonFileStore::open(&dir)
                    .with_context(|| format!("failed to open save dir {}", dir.display()))?;
                ScenarioStore::Disk(store)
            }
            None => ScenarioStore::Memory(MemoryStore::default()),
        };
        store.remove(STATE_KEY)?;
        store.remove(USER_NAME_KEY)?;
        Ok(store)
    }
}

/// Canned coach for offline runs. Replies are pure functions of their
/// input, so enrichment never drags a network service into a scenario.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedCoach;

impl Coach for ScriptedCoach {
    fn is_available(&self) -> bool {
        true
    }

    fn journal_feedback(&self, entry: &JournalEntry) -> Result<String, CoachError> {
        Ok(format!(
            "Logged, titan. {} tasks crushed, {} posts shipped. The grid remembers.",
            entry.dominated_tasks.len(),
            entry.social_posts.len()
        ))
    }

    fn socratic_question(&self, task: &RoadmapTask) -> Result<String, CoachError> {
        Ok(format!(
            "What would break first if '{}' had to run at ten times the scale?",
            task.text
        ))
    }
}
