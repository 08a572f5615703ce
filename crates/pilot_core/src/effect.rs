use crate::{AgentKind, RecordId, ReviewInput, Ticket};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadInterviews,
    SubmitInterview {
        text: String,
    },
    SubmitReview {
        record_id: RecordId,
        review: ReviewInput,
    },
    RunAgent {
        ticket: Ticket,
        kind: AgentKind,
        record_id: RecordId,
    },
    /// Bring the record's timeline card into view once the timeline settles.
    FocusRecord {
        record_id: RecordId,
    },
}
