//! Reflection-dialog state for completed roadmap tasks.
//!
//! Completing a task can open a dialog that asks one Socratic question
//! about the work. The engine only tracks the dialog's position in the
//! flow; fetching the question text is the caller's business (see
//! [`crate::coach`]).

use crate::roadmap::RoadmapTask;

/// Dialog flow: closed, waiting on a question, or collecting a reflection.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SocraticDialog {
    #[default]
    Closed,
    AwaitingQuestion {
        task: RoadmapTask,
    },
    Reflecting {
        task: RoadmapTask,
        question: String,
        reflection: String,
    },
}

impl SocraticDialog {
    /// Open the dialog for a task, discarding any previous interaction.
    pub fn open(&mut self, task: RoadmapTask) {
        *self = Self::AwaitingQuestion { task };
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Hand the fetched (or fallback) question to a waiting dialog.
    ///
    /// No-op unless a question is currently awaited.
    pub fn deliver_question(&mut self, question: impl Into<String>) {
        if let Self::AwaitingQuestion { task } = self {
            *self = Self::Reflecting {
                task: task.clone(),
                question: question.into(),
                reflection: String::new(),
            };
        }
    }

    /// Update the free-text reflection. No-op before the question arrives.
    pub fn set_reflection(&mut self, text: impl Into<String>) {
        if let Self::Reflecting { reflection, .. } = self {
            *reflection = text.into();
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    #[must_use]
    pub fn task(&self) -> Option<&RoadmapTask> {
        match self {
            Self::Closed => None,
            Self::AwaitingQuestion { task } | Self::Reflecting { task, .. } => Some(task),
        }
    }

    #[must_use]
    pub fn question(&self) -> Option<&str> {
        match self {
            Self::Reflecting { question, .. } => Some(question),
            _ => None,
        }
    }

    #[must_use]
    pub fn reflection(&self) -> Option<&str> {
        match self {
            Self::Reflecting { reflection, .. } => Some(reflection),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roadmap;

    fn sample_task() -> RoadmapTask {
        roadmap::catalog().find_task("p1c1i1").unwrap().clone()
    }

    #[test]
    fn flow_walks_open_question_reflection_close() {
        let mut dialog = SocraticDialog::default();
        assert!(!dialog.is_open());

        dialog.open(sample_task());
        assert!(dialog.is_open());
        assert_eq!(dialog.task().map(|t| t.id.as_str()), Some("p1c1i1"));
        assert!(dialog.question().is_none());

        dialog.deliver_question("What tripped you up?");
        assert_eq!(dialog.question(), Some("What tripped you up?"));
        assert_eq!(dialog.reflection(), Some(""));

        dialog.set_reflection("Borrow checker, twice.");
        assert_eq!(dialog.reflection(), Some("Borrow checker, twice."));

        dialog.close();
        assert_eq!(dialog, SocraticDialog::Closed);
    }

    #[test]
    fn question_only_lands_while_awaited() {
        let mut dialog = SocraticDialog::default();
        dialog.deliver_question("into the void");
        assert_eq!(dialog, SocraticDialog::Closed);

        dialog.open(sample_task());
        dialog.deliver_question("first");
        dialog.deliver_question("second");
        assert_eq!(dialog.question(), Some("first"));
    }

    #[test]
    fn reopening_discards_previous_reflection() {
        let mut dialog = SocraticDialog::default();
        dialog.open(sample_task());
        dialog.deliver_question("q");
        dialog.set_reflection("half-written thought");

        dialog.open(sample_task());
        assert!(dialog.question().is_none());
        assert!(dialog.reflection().is_none());
    }

    #[test]
    fn reflection_ignored_before_question() {
        let mut dialog = SocraticDialog::default();
        dialog.open(sample_task());
        dialog.set_reflection("too eager");
        assert!(dialog.reflection().is_none());
    }
}
