use crate::{
    event_days, format_display_date, AgentKind, AgentResult, AppState, DateKey, InterviewRecord,
    RecordId, View,
};

/// Timeline status the backend uses for finished stages.
pub const COMPLETED_STATUS: &str = "完成";

/// Anchor name of a record's timeline card.
pub fn record_anchor(record_id: &RecordId) -> String {
    format!("interview-card-{record_id}")
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub active_view: View,
    pub input: String,
    pub submitting: bool,
    pub record_count: usize,
    pub events: Vec<EventView>,
    /// Days with at least one event, in first-seen order.
    pub busy_days: Vec<DateKey>,
    pub timeline: Vec<RecordCardView>,
    pub agents: AgentsView,
    pub review_drawer: Option<ReviewDrawerView>,
    pub alert: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventView {
    pub date_key: DateKey,
    pub title: String,
    pub time: String,
    pub record_id: RecordId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCardView {
    pub record_id: RecordId,
    pub anchor: String,
    pub heading: String,
    pub department: Option<String>,
    pub keywords: Vec<String>,
    pub jd_summary: Option<String>,
    pub entries: Vec<EntryView>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub headline: String,
    pub status: String,
    pub completed: bool,
    pub link: Option<url::Url>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AgentsView {
    /// Nothing selected: prompt the user to pick a record in the timeline.
    #[default]
    NoSelection,
    Workbench {
        record_id: RecordId,
        company: String,
        active_kind: AgentKind,
        loading: bool,
        result: Option<AgentResult>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDrawerView {
    pub record_id: RecordId,
    pub company: String,
    pub saving: bool,
}

impl AppState {
    pub fn view(&self) -> AppViewModel {
        let current = self.current_record();
        let current_id = current.map(|record| &record.id);

        let derived = self.events();
        let busy_days = event_days(&derived);
        let events = derived
            .into_iter()
            .map(|event| EventView {
                date_key: event.date_key,
                title: event.title,
                time: event.time.to_string(),
                record_id: event.record.id.clone(),
            })
            .collect();

        let timeline = self
            .records
            .iter()
            .map(|record| card_view(record, current_id == Some(&record.id)))
            .collect();

        let agents = match current {
            Some(record) => AgentsView::Workbench {
                record_id: record.id.clone(),
                company: record.company_name().to_string(),
                active_kind: self.agent.active_kind(),
                loading: self.agent.is_loading(),
                result: self.agent.last_result().cloned(),
            },
            None => AgentsView::NoSelection,
        };

        let review_drawer = match (self.review_open, current) {
            (true, Some(record)) => Some(ReviewDrawerView {
                record_id: record.id.clone(),
                company: record.company_name().to_string(),
                saving: self.review_saving,
            }),
            _ => None,
        };

        AppViewModel {
            active_view: self.selection.active_view(),
            input: self.input.clone(),
            submitting: self.submitting,
            record_count: self.records.len(),
            events,
            busy_days,
            timeline,
            agents,
            review_drawer,
            alert: self.alert.as_ref().map(|alert| alert.message()),
        }
    }
}

fn card_view(record: &InterviewRecord, selected: bool) -> RecordCardView {
    let position = record.position();
    RecordCardView {
        record_id: record.id.clone(),
        anchor: record_anchor(&record.id),
        heading: format!("{} - {}", record.company_name(), position.title),
        department: position.department.clone().filter(|d| !d.is_empty()),
        keywords: position.jd_keywords.clone(),
        jd_summary: position.jd_summary.clone().filter(|s| !s.is_empty()),
        entries: record
            .timeline()
            .iter()
            .map(|entry| EntryView {
                headline: format!(
                    "{} · {}",
                    format_display_date(&entry.date, entry.time.as_deref()),
                    entry.stage
                ),
                status: entry.status.clone(),
                completed: entry.status == COMPLETED_STATUS,
                link: entry.link_url(),
            })
            .collect(),
        selected,
    }
}
