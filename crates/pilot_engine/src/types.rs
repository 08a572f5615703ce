use pilot_core::{AgentKind, AgentReport, InterviewRecord, Ticket};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    InterviewsLoaded(Result<Vec<InterviewRecord>, BackendError>),
    InterviewSubmitted(Result<(), BackendError>),
    ReviewSubmitted(Result<(), BackendError>),
    AgentCompleted {
        ticket: Ticket,
        kind: AgentKind,
        result: Result<AgentReport, BackendError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct BackendError {
    pub kind: FailureKind,
    pub message: String,
}

impl BackendError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureKind {
    #[error("invalid url")]
    InvalidUrl,
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("timeout")]
    Timeout,
    #[error("undecodable response")]
    Decode,
    #[error("cancelled")]
    Cancelled,
    #[error("network error")]
    Network,
}
