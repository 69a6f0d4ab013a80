//! Centralized reward and tuning constants for Grindstone engine logic.
//!
//! These values define the deterministic math for XP awards, streaks, and
//! badge thresholds. Keeping them together ensures progression can only be
//! adjusted via code changes reviewed in version control, rather than
//! through external assets.

// Storage keys ---------------------------------------------------------------
pub const STATE_KEY: &str = "grindstone.save";
pub const USER_NAME_KEY: &str = "grindstone.username";

// XP awards ------------------------------------------------------------------
pub const XP_PER_HOUR_GRIND: i64 = 10;
pub const XP_PER_JOURNAL_ENTRY: i64 = 50;
pub const XP_PER_PROJECT_COMPLETED: i64 = 200;
pub const XP_PER_SKILL_MASTERED: i64 = 150;
pub const XP_PER_SOCIAL_POST: i64 = 20;
pub const XP_PER_FOCUS_SESSION: i64 = 25;

// Badge thresholds -----------------------------------------------------------
pub(crate) const STREAK_BADGE_DAYS_TIER1: u32 = 5;
pub(crate) const STREAK_BADGE_DAYS_TIER2: u32 = 10;
pub(crate) const JOURNAL_BADGE_ENTRIES_TIER1: usize = 5;
pub(crate) const JOURNAL_BADGE_ENTRIES_TIER2: usize = 10;
pub(crate) const PROJECT_BADGE_COUNT_TIER1: usize = 1;
pub(crate) const PROJECT_BADGE_COUNT_TIER2: usize = 3;
pub(crate) const MASTERY_BADGE_COUNT_TIER1: usize = 1;
pub(crate) const MASTERY_BADGE_COUNT_TIER2: usize = 3;
pub(crate) const GRIND_BADGE_HOURS_TIER1: f32 = 50.0;
pub(crate) const GRIND_BADGE_HOURS_TIER2: f32 = 100.0;

// Identity and catalog anchors -----------------------------------------------
pub const DEFAULT_USER_NAME: &str = "Operative";
pub const DEFAULT_THEME: &str = "cyberpunk-default";
/// Skill whose mastery unlocks the RAG Titan badge.
pub const RAG_SKILL_ID: &str = "rag";
/// Pseudo-phase excluded from per-phase completion badges.
pub const DELIVERABLES_PHASE_ID: &str = "deliverables";

// Social platform detection --------------------------------------------------
/// Domains counted toward the X-post counter (case-insensitive substring).
pub const X_POST_DOMAINS: [&str; 2] = ["x.com", "twitter.com"];

// Transient notices (cleared by the UI after these windows) -------------------
pub const XP_NOTICE_SECS: u64 = 3;
pub const BADGE_NOTICE_SECS: u64 = 5;

// Focus protocol -------------------------------------------------------------
pub const FOCUS_WORK_MINUTES: u32 = 25;
pub const FOCUS_BREAK_MINUTES: u32 = 5;

// Journal heatmap window -----------------------------------------------------
pub const HEATMAP_WINDOW_DAYS: i64 = 30;

// Level progress bar ---------------------------------------------------------
/// Synthetic XP span shown past the final level threshold.
pub(crate) const MAX_LEVEL_XP_SPAN: i64 = 500;
