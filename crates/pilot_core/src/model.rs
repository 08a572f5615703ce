use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Backend-assigned record identifier.
///
/// The backend currently hands out integers, but the client never does
/// arithmetic on ids, so both numbers and strings are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "WireId", into = "String")]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<RecordId> for String {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Number(i64),
    Text(String),
}

impl From<WireId> for RecordId {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Number(n) => Self(n.to_string()),
            WireId::Text(text) => Self(text),
        }
    }
}

/// One stored interview as returned by `GET /interviews`.
///
/// The parsed fields live under `interview_data`; `created_at` and
/// `original_text` are carried along but not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(rename = "interview_data")]
    pub data: InterviewData,
}

impl InterviewRecord {
    pub fn company_name(&self) -> &str {
        &self.data.company.name
    }

    pub fn position(&self) -> &Position {
        &self.data.position
    }

    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.data.process.timeline
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InterviewData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: Company,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: Position,
    #[serde(default, deserialize_with = "null_as_default")]
    pub process: Process,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Company {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub jd_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jd_summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Process {
    #[serde(default, deserialize_with = "null_as_default")]
    pub timeline: Vec<TimelineEntry>,
}

/// One stage of an interview process. `date` and `time` are free text exactly
/// as the parser produced them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimelineEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stage: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl TimelineEntry {
    /// The meeting/details link, if it is an absolute URL.
    pub fn link_url(&self) -> Option<url::Url> {
        self.link
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
            .and_then(|link| url::Url::parse(link).ok())
    }
}

/// Body of `POST /interviews/{id}/review`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReviewInput {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvement: Option<String>,
}

pub const MAX_REVIEW_SCORE: u8 = 5;

impl ReviewInput {
    /// Trims text fields, drops empty optionals and clamps the score.
    /// Returns `None` when the required summary is blank.
    pub(crate) fn sanitized(self) -> Option<Self> {
        let summary = self.summary.trim().to_string();
        if summary.is_empty() {
            return None;
        }
        let improvement = self
            .improvement
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        Some(Self {
            summary,
            score: self.score.map(|score| score.min(MAX_REVIEW_SCORE)),
            improvement,
        })
    }
}

/// LLM-produced payloads sometimes carry explicit `null`s; treat them as absent.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
