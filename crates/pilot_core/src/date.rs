use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

static ISO_PREFIX_RE: OnceLock<Regex> = OnceLock::new();
static LONG_FORM_RE: OnceLock<Regex> = OnceLock::new();
static EMBEDDED_CLOCK_RE: OnceLock<Regex> = OnceLock::new();

/// Canonical `YYYY-MM-DD` calendar key.
///
/// Only the shape is checked, not the calendar: `2024-02-31` is a valid key if
/// that is what the record says.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey {
    year: u16,
    month: u8,
    day: u8,
}

impl DateKey {
    pub fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Recognizes a leading ISO date first, then the `2024年3月5日` long form.
    pub fn parse(raw: &str) -> Option<Self> {
        let iso = ISO_PREFIX_RE
            .get_or_init(|| Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})").unwrap());
        if let Some(caps) = iso.captures(raw) {
            return Self::from_parts(&caps[1], &caps[2], &caps[3]);
        }

        let long_form = LONG_FORM_RE.get_or_init(|| {
            Regex::new(r"([0-9]{4})年([0-9]{1,2})月([0-9]{1,2})日").unwrap()
        });
        let caps = long_form.captures(raw)?;
        Self::from_parts(&caps[1], &caps[2], &caps[3])
    }

    fn from_parts(year: &str, month: &str, day: &str) -> Option<Self> {
        Some(Self {
            year: year.parse().ok()?,
            month: month.parse().ok()?,
            day: day.parse().ok()?,
        })
    }

    pub fn year(self) -> u16 {
        self.year
    }

    pub fn month(self) -> u8 {
        self.month
    }

    pub fn day(self) -> u8 {
        self.day
    }

    /// `2024年3月5日`: no zero padding on month and day.
    pub fn long_form(self) -> String {
        format!("{}年{}月{}日", self.year, self.month, self.day)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Normalizes raw date text to its canonical key, or an empty string when
/// neither recognized shape matches. Empty means unparseable, never a key.
pub fn normalize_date(raw: &str) -> String {
    DateKey::parse(raw)
        .map(|key| key.to_string())
        .unwrap_or_default()
}

/// Human-readable date for the timeline.
///
/// Falls back to `raw` untouched when it cannot be normalized. A non-empty
/// explicit `time` wins over a clock embedded in `raw` after a `T`.
pub fn format_display_date(raw: &str, time: Option<&str>) -> String {
    let Some(key) = DateKey::parse(raw) else {
        return raw.to_string();
    };
    let date = key.long_form();

    if let Some(time) = time.filter(|time| !time.is_empty()) {
        return format!("{date} {time}");
    }
    match embedded_clock(raw) {
        Some(clock) => format!("{date} {clock}"),
        None => date,
    }
}

/// `HH:MM` directly after a `T` separator, as in `2024-03-15T10:00:00`.
fn embedded_clock(raw: &str) -> Option<&str> {
    let clock = EMBEDDED_CLOCK_RE
        .get_or_init(|| Regex::new(r"T([0-9]{2}:[0-9]{2})").unwrap());
    clock
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
