use pilot_logging::{pilot_debug, pilot_warn};

use crate::agent::Completion;
use crate::{AppState, Effect, FailedAction, Msg, SelectSource};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let focus_before = state.selection.timeline_focus(&state.records);

    let mut effects = match msg {
        Msg::Startup | Msg::RefreshRequested => vec![Effect::LoadInterviews],
        Msg::RecordsLoaded(Ok(records)) => {
            state.records = records;
            state.mark_dirty();
            Vec::new()
        }
        Msg::RecordsLoaded(Err(detail)) => {
            state.raise(FailedAction::LoadInterviews, detail);
            state.mark_dirty();
            Vec::new()
        }
        Msg::InputChanged(text) => {
            if state.input != text {
                state.input = text;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            let text = state.input.trim();
            if text.is_empty() || state.submitting {
                pilot_debug!("Ignoring submit: empty input or submission in flight");
                return (state, Vec::new());
            }
            let text = text.to_string();
            state.submitting = true;
            state.mark_dirty();
            vec![Effect::SubmitInterview { text }]
        }
        Msg::SubmitFinished(result) => {
            state.submitting = false;
            state.mark_dirty();
            match result {
                Ok(()) => {
                    state.input.clear();
                    vec![Effect::LoadInterviews]
                }
                Err(detail) => {
                    state.raise(FailedAction::SubmitInterview, detail);
                    Vec::new()
                }
            }
        }
        Msg::ViewSelected(view) => {
            if state.selection.switch_view(view) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CalendarDateSelected { date, source } => {
            if source != SelectSource::Date {
                return (state, Vec::new());
            }
            let events = crate::all_events(&state.records);
            if state.selection.select_date(&events, date) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CalendarEventClicked { record_id } => {
            if state.has_record(&record_id) {
                state.selection.select_event(record_id);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::TimelineCardClicked { record_id } => {
            if state.has_record(&record_id) {
                state.selection.focus_card(record_id);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::AgentsRequested { record_id } => {
            if state.has_record(&record_id) {
                state.selection.open_agents(record_id);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ReviewRequested { record_id } => {
            if state.has_record(&record_id) {
                state.selection.focus_card(record_id);
                state.review_open = true;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ReviewDrawerClosed => {
            if state.review_open {
                state.review_open = false;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ReviewSubmitted(review) => {
            if !state.review_open {
                pilot_debug!("Ignoring review: drawer is closed");
                return (state, Vec::new());
            }
            let Some(record_id) = state.current_record().map(|record| record.id.clone()) else {
                pilot_debug!("Ignoring review: no record selected");
                return (state, Vec::new());
            };
            let Some(review) = review.sanitized() else {
                pilot_debug!("Ignoring review: summary is blank");
                return (state, Vec::new());
            };
            if state.review_saving {
                return (state, Vec::new());
            }
            state.review_saving = true;
            state.mark_dirty();
            vec![Effect::SubmitReview { record_id, review }]
        }
        Msg::ReviewFinished(result) => {
            state.review_saving = false;
            state.mark_dirty();
            match result {
                Ok(()) => {
                    state.review_open = false;
                    vec![Effect::LoadInterviews]
                }
                Err(detail) => {
                    state.raise(FailedAction::SubmitReview, detail);
                    Vec::new()
                }
            }
        }
        Msg::AgentKindSelected(kind) => {
            let Some(record_id) = state.current_record().map(|record| record.id.clone()) else {
                pilot_debug!("Ignoring {kind} agent: no record selected");
                return (state, Vec::new());
            };
            if let Some(superseded) = state.agent.pending_ticket() {
                pilot_debug!("Agent ticket {superseded} superseded by a new {kind} run");
            }
            let ticket = state.agent.begin(kind, record_id.clone());
            state.mark_dirty();
            vec![Effect::RunAgent {
                ticket,
                kind,
                record_id,
            }]
        }
        Msg::AgentFinished { ticket, result } => {
            let failure = result.as_ref().err().cloned();
            match state.agent.complete(ticket, result) {
                Completion::Stored => state.mark_dirty(),
                Completion::Failed => {
                    let kind = state.agent.active_kind();
                    state.raise(FailedAction::RunAgent(kind), failure.unwrap_or_default());
                    state.mark_dirty();
                }
                Completion::Superseded => {
                    pilot_warn!("Discarding completion of superseded agent ticket {ticket}");
                }
            }
            Vec::new()
        }
        Msg::AlertDismissed => {
            if state.alert.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
    };

    let focus_after = state.selection.timeline_focus(&state.records);
    if let Some(record_id) = focus_after {
        if focus_before.as_ref() != Some(&record_id) {
            effects.push(Effect::FocusRecord { record_id });
        }
    }

    (state, effects)
}
