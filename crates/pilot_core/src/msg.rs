use crate::{AgentKind, AgentReport, DateKey, InterviewRecord, RecordId, ReviewInput, Ticket, View};

/// What triggered a calendar selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectSource {
    /// The user clicked a day cell.
    Date,
    /// The month panel was changed.
    Month,
    /// The year panel was changed.
    Year,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Client started; fetch the record collection.
    Startup,
    /// User asked to reload the collection.
    RefreshRequested,
    /// Backend answered `GET /interviews`.
    RecordsLoaded(Result<Vec<InterviewRecord>, String>),
    /// User edited the free-text intake box.
    InputChanged(String),
    /// User asked to parse and store the intake text.
    SubmitClicked,
    /// Backend answered `POST /interviews`.
    SubmitFinished(Result<(), String>),
    /// User switched tabs.
    ViewSelected(View),
    /// Calendar selection on a day cell (or a panel change).
    CalendarDateSelected { date: DateKey, source: SelectSource },
    /// User clicked one event inside a day cell. Never also a date selection.
    CalendarEventClicked { record_id: RecordId },
    /// User clicked a card in the timeline.
    TimelineCardClicked { record_id: RecordId },
    /// User pressed the agents button on a card.
    AgentsRequested { record_id: RecordId },
    /// User pressed the review button on a card.
    ReviewRequested { record_id: RecordId },
    ReviewDrawerClosed,
    ReviewSubmitted(ReviewInput),
    /// Backend answered `POST /interviews/{id}/review`.
    ReviewFinished(Result<(), String>),
    /// User picked an analysis in the workbench; runs it.
    AgentKindSelected(AgentKind),
    /// Backend answered `POST /agents/{kind}/{id}`.
    AgentFinished {
        ticket: Ticket,
        result: Result<AgentReport, String>,
    },
    AlertDismissed,
}
