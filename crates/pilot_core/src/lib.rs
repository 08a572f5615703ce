//! Interview pilot core: pure state machine, date handling and view-model helpers.
mod agent;
mod date;
mod effect;
mod events;
mod model;
mod msg;
mod selection;
mod state;
mod update;
mod view_model;

pub use agent::{
    AgentKind, AgentReport, AgentResult, AgentWorkflow, DecisionAdvice, DecisionMatrix,
    MatrixColumn, MockQuestion, PrepPlan, ProgressReport, Rating, ReviewAnalysis, Ticket,
    REVIEW_TRIGGER_TEXT,
};
pub use date::{format_display_date, normalize_date, DateKey};
pub use effect::Effect;
pub use events::{all_events, event_days, events_on, DerivedEvent};
pub use model::{
    Company, InterviewData, InterviewRecord, Position, Process, RecordId, ReviewInput,
    TimelineEntry,
};
pub use msg::{Msg, SelectSource};
pub use selection::{SelectionState, View};
pub use state::{Alert, AppState, FailedAction};
pub use update::update;
pub use view_model::{
    record_anchor, AgentsView, AppViewModel, EntryView, EventView, RecordCardView,
    ReviewDrawerView, COMPLETED_STATUS,
};
