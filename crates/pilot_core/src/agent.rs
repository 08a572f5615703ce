use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::RecordId;

/// Sequence number of one agent invocation.
pub type Ticket = u64;

/// Body sent with a review analysis request.
pub const REVIEW_TRIGGER_TEXT: &str = "用户触发分析";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AgentKind {
    #[default]
    Progress,
    Prep,
    Review,
    Decision,
}

impl AgentKind {
    pub const ALL: [AgentKind; 4] = [
        AgentKind::Progress,
        AgentKind::Prep,
        AgentKind::Review,
        AgentKind::Decision,
    ];

    /// Segment used in `POST /agents/{kind}/{id}`.
    pub fn path_segment(self) -> &'static str {
        match self {
            AgentKind::Progress => "progress",
            AgentKind::Prep => "prep",
            AgentKind::Review => "review",
            AgentKind::Decision => "decision",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.path_segment().eq_ignore_ascii_case(segment.trim()))
    }

    pub fn label(self) -> &'static str {
        match self {
            AgentKind::Progress => "Progress commander",
            AgentKind::Prep => "Prep coach",
            AgentKind::Review => "Review analyst",
            AgentKind::Decision => "Decision advisor",
        }
    }

    pub fn request_body(self) -> Value {
        match self {
            AgentKind::Review => serde_json::json!({ "text": REVIEW_TRIGGER_TEXT }),
            AgentKind::Progress | AgentKind::Prep | AgentKind::Decision => {
                Value::Object(Map::new())
            }
        }
    }

    /// Decodes a response body against this kind's schema.
    pub fn parse_response(self, body: &[u8]) -> Result<AgentReport, serde_json::Error> {
        Ok(match self {
            AgentKind::Progress => AgentReport::Progress(serde_json::from_slice(body)?),
            AgentKind::Prep => AgentReport::Prep(serde_json::from_slice(body)?),
            AgentKind::Review => AgentReport::Review(serde_json::from_slice(body)?),
            AgentKind::Decision => AgentReport::Decision(serde_json::from_slice(body)?),
        })
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentReport {
    Progress(ProgressReport),
    Prep(PrepPlan),
    Review(ReviewAnalysis),
    Decision(DecisionAdvice),
}

impl AgentReport {
    pub fn kind(&self) -> AgentKind {
        match self {
            AgentReport::Progress(_) => AgentKind::Progress,
            AgentReport::Prep(_) => AgentKind::Prep,
            AgentReport::Review(_) => AgentKind::Review,
            AgentReport::Decision(_) => AgentKind::Decision,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressReport {
    #[serde(default)]
    pub reminders: Vec<String>,
    #[serde(default)]
    pub conflicts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrepPlan {
    #[serde(default)]
    pub checklist: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_script: Option<Vec<MockQuestion>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MockQuestion {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub intent: String,
    #[serde(default)]
    pub star_guide: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReviewAnalysis {
    #[serde(default)]
    pub skills: BTreeMap<String, Rating>,
    #[serde(default)]
    pub weakness: String,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// Skill rating on a 0–5 scale. Fractional or out-of-range numbers from the
/// model are rounded and clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Ok(Self(raw.round().clamp(0.0, f64::from(Self::MAX)) as u8))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecisionAdvice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<DecisionMatrix>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecisionMatrix {
    #[serde(default)]
    pub columns: Vec<MatrixColumn>,
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatrixColumn {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "dataIndex", default)]
    pub data_index: String,
}

impl DecisionMatrix {
    /// Cell text per row, in column order. Missing cells render empty.
    pub fn text_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| match row.get(&column.data_index) {
                        None | Some(Value::Null) => String::new(),
                        Some(Value::String(text)) => text.clone(),
                        Some(other) => other.to_string(),
                    })
                    .collect()
            })
            .collect()
    }
}

/// A finished analysis, tagged with the record it was run for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentResult {
    pub record_id: RecordId,
    pub report: AgentReport,
}

impl AgentResult {
    pub fn kind(&self) -> AgentKind {
        self.report.kind()
    }
}

/// Workbench state: which analysis is active, whether one is in flight, and
/// the last result.
///
/// Every invocation takes a new ticket; only the completion carrying the
/// latest ticket is applied, older ones are discarded as superseded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgentWorkflow {
    active_kind: AgentKind,
    last_result: Option<AgentResult>,
    loading: bool,
    pending: Option<(Ticket, RecordId)>,
    issued: Ticket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Completion {
    Stored,
    Failed,
    Superseded,
}

impl AgentWorkflow {
    pub fn active_kind(&self) -> AgentKind {
        self.active_kind
    }

    pub fn last_result(&self) -> Option<&AgentResult> {
        self.last_result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Ticket of the invocation currently awaited, if any.
    pub fn pending_ticket(&self) -> Option<Ticket> {
        self.pending.as_ref().map(|(ticket, _)| *ticket)
    }

    pub(crate) fn begin(&mut self, kind: AgentKind, record_id: RecordId) -> Ticket {
        self.issued += 1;
        self.active_kind = kind;
        self.last_result = None;
        self.loading = true;
        self.pending = Some((self.issued, record_id));
        self.issued
    }

    pub(crate) fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<AgentReport, String>,
    ) -> Completion {
        let record_id = match self.pending.take() {
            Some((pending, record_id)) if pending == ticket => record_id,
            other => {
                self.pending = other;
                return Completion::Superseded;
            }
        };
        self.loading = false;
        match result {
            Ok(report) => {
                self.last_result = Some(AgentResult { record_id, report });
                Completion::Stored
            }
            Err(_) => Completion::Failed,
        }
    }
}
