use std::fmt;

use crate::{all_events, AgentKind, AgentWorkflow, DerivedEvent, InterviewRecord, RecordId, SelectionState};

/// The user action a blocking alert reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedAction {
    LoadInterviews,
    SubmitInterview,
    SubmitReview,
    RunAgent(AgentKind),
}

impl fmt::Display for FailedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailedAction::LoadInterviews => write!(f, "Failed to load interviews"),
            FailedAction::SubmitInterview => write!(f, "Failed to parse and store interview"),
            FailedAction::SubmitReview => write!(f, "Failed to save review"),
            FailedAction::RunAgent(kind) => write!(f, "Agent call failed ({})", kind.label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub action: FailedAction,
    pub detail: String,
}

impl Alert {
    pub fn message(&self) -> String {
        if self.detail.is_empty() {
            self.action.to_string()
        } else {
            format!("{}: {}", self.action, self.detail)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) records: Vec<InterviewRecord>,
    pub(crate) selection: SelectionState,
    pub(crate) agent: AgentWorkflow,
    pub(crate) input: String,
    pub(crate) submitting: bool,
    pub(crate) review_open: bool,
    pub(crate) review_saving: bool,
    pub(crate) alert: Option<Alert>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[InterviewRecord] {
        &self.records
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn agent(&self) -> &AgentWorkflow {
        &self.agent
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// The selected record, or `None` if nothing is selected or the selection
    /// no longer exists in the collection.
    pub fn current_record(&self) -> Option<&InterviewRecord> {
        self.selection.resolve(&self.records)
    }

    /// Calendar events, recomputed from the current collection on every call.
    pub fn events(&self) -> Vec<DerivedEvent<'_>> {
        all_events(&self.records)
    }

    pub(crate) fn has_record(&self, record_id: &RecordId) -> bool {
        self.records.iter().any(|record| &record.id == record_id)
    }

    pub(crate) fn raise(&mut self, action: FailedAction, detail: String) {
        self.alert = Some(Alert { action, detail });
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
