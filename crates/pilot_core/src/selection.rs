use crate::{events_on, DateKey, DerivedEvent, InterviewRecord, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Calendar,
    Timeline,
    Agents,
}

/// Active view plus the selected-record cursor.
///
/// The cursor is an id, not a record: reading it always goes through
/// [`SelectionState::resolve`], so a record dropped by a refresh reads as none.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    active_view: View,
    current: Option<RecordId>,
}

impl SelectionState {
    pub fn active_view(&self) -> View {
        self.active_view
    }

    pub fn resolve<'a>(&self, records: &'a [InterviewRecord]) -> Option<&'a InterviewRecord> {
        let current = self.current.as_ref()?;
        records.iter().find(|record| &record.id == current)
    }

    /// Date-cell click: jump to the first event of that day, if any.
    pub(crate) fn select_date(&mut self, events: &[DerivedEvent<'_>], date: DateKey) -> bool {
        let Some(first) = events_on(events, date).next() else {
            return false;
        };
        self.current = Some(first.record.id.clone());
        self.active_view = View::Timeline;
        true
    }

    /// Click on one event inside a date cell.
    pub(crate) fn select_event(&mut self, record_id: RecordId) {
        self.current = Some(record_id);
        self.active_view = View::Timeline;
    }

    /// Click on a timeline card; the view stays where it is.
    pub(crate) fn focus_card(&mut self, record_id: RecordId) {
        self.current = Some(record_id);
    }

    pub(crate) fn open_agents(&mut self, record_id: RecordId) {
        self.current = Some(record_id);
        self.active_view = View::Agents;
    }

    pub(crate) fn switch_view(&mut self, view: View) -> bool {
        if self.active_view == view {
            return false;
        }
        self.active_view = view;
        true
    }

    /// Record the timeline should bring into view, if the timeline is showing
    /// a resolvable selection.
    pub(crate) fn timeline_focus(&self, records: &[InterviewRecord]) -> Option<RecordId> {
        if self.active_view != View::Timeline {
            return None;
        }
        self.resolve(records).map(|record| record.id.clone())
    }
}
