//! Pluggable AI-coach seam.
//!
//! The engine never talks to a model itself. Callers fetch feedback or a
//! Socratic question through this trait on their own schedule and hand
//! the text back to the engine (`attach_journal_feedback`,
//! `deliver_socratic_question`). Implementations are synchronous; an
//! async frontend wraps its client and blocks or bridges as it sees fit.

use thiserror::Error;

use crate::roadmap::RoadmapTask;
use crate::state::JournalEntry;

/// Persona instruction for journal feedback backends.
pub const JOURNAL_COACH_SYSTEM_INSTRUCTION: &str = "You are a menacing but motivating AI coach for a B.Tech CS student on a quest for 'god-tier' AI engineer status. Their goal is to dominate the AI field by 2027. Respond to their daily journal entry with a cyberpunk vibe, using strong, motivating language. If they mention specific skills (like NLP, RAG, LangChain), give targeted feedback. Keep it brief, 2-3 sentences. Refer to them as 'titan', 'operative', or 'architect of the future'.";

/// Boot-time warning when no coach credentials are present.
pub const MISSING_API_KEY_WARNING: &str =
    "API_KEY environment variable not set. AI features will be disabled.";

#[derive(Debug, Error)]
pub enum CoachError {
    /// No backing service is configured at all.
    #[error("coach unavailable: no API key configured")]
    Unavailable,
    /// The backing service was reachable but the request failed.
    #[error("coach request failed: {0}")]
    Request(String),
}

/// A motivation coach that reacts to journal entries and completed tasks.
pub trait Coach {
    fn is_available(&self) -> bool;

    /// Feedback on a submitted journal entry.
    ///
    /// # Errors
    ///
    /// Returns an error if no backend is configured or the request fails.
    fn journal_feedback(&self, entry: &JournalEntry) -> Result<String, CoachError>;

    /// One reflective question about a just-completed roadmap task.
    ///
    /// # Errors
    ///
    /// Returns an error if no backend is configured or the request fails.
    fn socratic_question(&self, task: &RoadmapTask) -> Result<String, CoachError>;
}

/// Stand-in coach used when no AI backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineCoach;

impl Coach for OfflineCoach {
    fn is_available(&self) -> bool {
        false
    }

    fn journal_feedback(&self, _entry: &JournalEntry) -> Result<String, CoachError> {
        Err(CoachError::Unavailable)
    }

    fn socratic_question(&self, _task: &RoadmapTask) -> Result<String, CoachError> {
        Err(CoachError::Unavailable)
    }
}

/// User-facing text shown in place of journal feedback when the coach fails.
#[must_use]
pub fn feedback_fallback(err: &CoachError) -> &'static str {
    match err {
        CoachError::Unavailable => "AI feedback disabled: API key not configured.",
        CoachError::Request(_) => "Error connecting to AI coach. Are you connected to the matrix?",
    }
}

/// User-facing text shown in place of a Socratic question when the coach fails.
#[must_use]
pub fn question_fallback(err: &CoachError) -> &'static str {
    match err {
        CoachError::Unavailable => "Socratic AI disabled: API key not configured.",
        CoachError::Request(_) => "Error connecting to Socratic AI. Perhaps the Oracle is busy?",
    }
}

fn or_none(text: &str) -> &str {
    if text.is_empty() { "None specified" } else { text }
}

/// Render a journal entry as the prompt body a feedback backend receives.
#[must_use]
pub fn journal_prompt(entry: &JournalEntry) -> String {
    let hours_summary = entry
        .hours_grinded
        .iter()
        .map(|line| format!("{}: {}h", line.skill_id, line.hours))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Student's Journal Entry:\n\
         - Tasks Dominated: {}\n\
         - Hours of Grind: {}\n\
         - Projects Worked On: {}\n\
         - Challenges to Crush Next: {}\n\
         - Social Posts (URLs): {}\n\
         - Current Mood: {}",
        or_none(&entry.dominated_tasks.join(", ")),
        or_none(&hours_summary),
        or_none(&entry.projects_worked_on),
        or_none(&entry.challenges_to_crush),
        or_none(&entry.social_posts.join(", ")),
        entry.mood,
    )
}

/// Render the system instruction a Socratic backend receives for a task.
#[must_use]
pub fn socratic_instruction(task: &RoadmapTask) -> String {
    let detail = task
        .sub_text
        .as_ref()
        .map(|sub| format!(" ({sub})"))
        .unwrap_or_default();
    format!(
        "You are a Socratic AI Tutor. A student has just reported completing a task related to \
         '{}' described as: '{}{}'. Ask them one concise, insightful, open-ended Socratic \
         question to help them reflect deeply on what they've learned or how they approached it. \
         The question should stimulate critical thinking and be under 200 characters. Do not ask \
         for a summary of the task. Frame it as a direct question to the student.",
        task.kind, task.text, detail,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roadmap;
    use crate::state::{JournalDraft, Mood, SkillHours};
    use chrono::{TimeZone, Utc};

    fn entry_with(hours: Vec<SkillHours>, tasks: Vec<String>) -> JournalEntry {
        JournalDraft {
            dominated_tasks: tasks,
            hours_grinded: hours,
            mood: Mood::Unstoppable,
            ..JournalDraft::default()
        }
        .into_entry(
            "1".to_string(),
            Utc.with_ymd_and_hms(2026, 8, 21, 8, 0, 0).unwrap(),
            None,
        )
    }

    #[test]
    fn offline_coach_reports_unavailable() {
        let coach = OfflineCoach;
        assert!(!coach.is_available());
        let err = coach.journal_feedback(&entry_with(vec![], vec![])).unwrap_err();
        assert!(matches!(err, CoachError::Unavailable));
    }

    #[test]
    fn fallbacks_distinguish_missing_key_from_failure() {
        assert_eq!(
            feedback_fallback(&CoachError::Unavailable),
            "AI feedback disabled: API key not configured."
        );
        assert_eq!(
            feedback_fallback(&CoachError::Request("timeout".to_string())),
            "Error connecting to AI coach. Are you connected to the matrix?"
        );
        assert_eq!(
            question_fallback(&CoachError::Unavailable),
            "Socratic AI disabled: API key not configured."
        );
        assert_eq!(
            question_fallback(&CoachError::Request("500".to_string())),
            "Error connecting to Socratic AI. Perhaps the Oracle is busy?"
        );
    }

    #[test]
    fn journal_prompt_lists_fields_with_placeholders() {
        let entry = entry_with(
            vec![SkillHours {
                skill_id: "rag".to_string(),
                hours: 2.5,
            }],
            vec!["built retriever".to_string()],
        );
        let prompt = journal_prompt(&entry);
        assert!(prompt.contains("- Tasks Dominated: built retriever"));
        assert!(prompt.contains("- Hours of Grind: rag: 2.5h"));
        assert!(prompt.contains("- Projects Worked On: None specified"));
        assert!(prompt.contains("- Current Mood: Unstoppable"));
    }

    #[test]
    fn socratic_instruction_includes_subtext_when_present() {
        let with_sub = roadmap::catalog().find_task("p1c1i1").unwrap();
        let text = socratic_instruction(with_sub);
        assert!(text.contains("'Skill'"));
        assert!(text.contains("(Python (Pandas, FastAPI)"));

        let without_sub = roadmap::catalog().find_task("p1c4i1").unwrap();
        let text = socratic_instruction(without_sub);
        assert!(text.contains("'Create GitHub/LinkedIn/X profiles.'"));
        assert!(!text.contains("()"));
    }
}
