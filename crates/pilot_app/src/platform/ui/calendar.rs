//! Month grid for the calendar view.

use chrono::{Datelike, Local, Months, NaiveDate};
use pilot_core::{DateKey, EventView};

const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];
const BUSY_MARK: char = '*';

/// The month the calendar panel is showing. Always the first of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self::containing(today)
    }

    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    pub fn month(self) -> u32 {
        self.first.month()
    }

    /// Moves by whole months; stays put if the result is out of chrono's range.
    pub fn shift(&mut self, months: i32) {
        let step = Months::new(months.unsigned_abs());
        let moved = if months >= 0 {
            self.first.checked_add_months(step)
        } else {
            self.first.checked_sub_months(step)
        };
        if let Some(first) = moved {
            self.first = first;
        }
    }

    pub fn days_in_month(self) -> u32 {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map_or(31, |last| last.day())
    }

    /// Calendar key of `day` in this month, if the day exists.
    pub fn date_for_day(self, day: u32) -> Option<DateKey> {
        let date = self.first.with_day(day)?;
        Some(DateKey::new(
            u16::try_from(date.year()).ok()?,
            u8::try_from(date.month()).ok()?,
            u8::try_from(date.day()).ok()?,
        ))
    }

    fn contains(self, key: DateKey) -> bool {
        i32::from(key.year()) == self.year() && u32::from(key.month()) == self.month()
    }
}

/// Events of one day in this month, in derivation order.
pub fn events_for_day<'a>(
    cursor: MonthCursor,
    events: &'a [EventView],
    day: u32,
) -> Vec<&'a EventView> {
    let Some(key) = cursor.date_for_day(day) else {
        return Vec::new();
    };
    events.iter().filter(|event| event.date_key == key).collect()
}

/// Renders the month grid followed by the month's events, numbered per day.
pub fn render_month(
    cursor: MonthCursor,
    events: &[EventView],
    busy_days: &[DateKey],
) -> Vec<String> {
    let mut lines = vec![format!("{:^28}", cursor.first.format("%B %Y").to_string())];
    lines.push(WEEKDAYS.iter().map(|name| format!("{name:>3} ")).collect());

    let lead = cursor.first.weekday().num_days_from_monday() as usize;
    let mut row = "    ".repeat(lead);
    let mut column = lead;
    for day in 1..=cursor.days_in_month() {
        let busy = cursor
            .date_for_day(day)
            .is_some_and(|key| busy_days.contains(&key));
        let mark = if busy { BUSY_MARK } else { ' ' };
        row.push_str(&format!("{day:>3}{mark}"));
        column += 1;
        if column == WEEKDAYS.len() {
            lines.push(std::mem::take(&mut row).trim_end().to_string());
            column = 0;
        }
    }
    if !row.is_empty() {
        lines.push(row.trim_end().to_string());
    }

    if !busy_days.iter().any(|key| cursor.contains(*key)) {
        lines.push(String::new());
        lines.push("No interviews this month.".to_string());
        return lines;
    }

    lines.push(String::new());
    for day in 1..=cursor.days_in_month() {
        for (index, event) in events_for_day(cursor, events, day).into_iter().enumerate() {
            let time = if event.time.is_empty() {
                String::new()
            } else {
                format!(" {}", event.time)
            };
            lines.push(format!("{:>2} [{}] {}{}", day, index + 1, event.title, time));
        }
    }
    lines
}
