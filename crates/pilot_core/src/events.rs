use crate::{DateKey, InterviewRecord};

/// A timeline entry projected onto a calendar day.
///
/// Borrows the record it came from, so the list cannot outlive (or go stale
/// against) the collection it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedEvent<'a> {
    pub date_key: DateKey,
    pub title: String,
    pub time: &'a str,
    pub record: &'a InterviewRecord,
}

/// Flattens every timeline entry of every record into calendar events.
///
/// Records keep input order, entries keep their order within a record. Entries
/// whose date does not normalize are dropped without a trace.
pub fn all_events(records: &[InterviewRecord]) -> Vec<DerivedEvent<'_>> {
    records
        .iter()
        .flat_map(|record| {
            record.timeline().iter().filter_map(move |entry| {
                let date_key = DateKey::parse(&entry.date)?;
                Some(DerivedEvent {
                    date_key,
                    title: format!("{} · {}", record.company_name(), entry.stage),
                    time: entry.time.as_deref().unwrap_or(""),
                    record,
                })
            })
        })
        .collect()
}

/// Events falling on `date`, in aggregation order.
pub fn events_on<'e, 'a>(
    events: &'e [DerivedEvent<'a>],
    date: DateKey,
) -> impl Iterator<Item = &'e DerivedEvent<'a>> {
    events.iter().filter(move |event| event.date_key == date)
}

/// Distinct event days in first-seen order.
pub fn event_days(events: &[DerivedEvent<'_>]) -> Vec<DateKey> {
    let mut days: Vec<DateKey> = Vec::new();
    for event in events {
        if !days.contains(&event.date_key) {
            days.push(event.date_key);
        }
    }
    days
}
