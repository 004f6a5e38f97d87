//! Structures consumed from the external collaborators: the transport's
//! turn events and the NLU recognition result attached to message turns.

use serde::Deserialize;

pub const LIST_PUBLIC_HOLIDAYS: &str = "list_public_holidays";
pub const LIST_FLEXIBLE_HOLIDAYS: &str = "list_flexible_holidays";
pub const LEAVE_REQUEST: &str = "leave_request";
pub const SUBMITTED_REQUESTS: &str = "submitted_requests";

/// Closed set of intents the router handles. Unknown labels become
/// `Unrecognized`, so the router's exhaustive match stays total and a new
/// intent kind cannot be added without handling it there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    ListPublicHolidays,
    ListFlexibleHolidays,
    LeaveRequest,
    SubmittedRequests,
    Unrecognized,
}

impl IntentKind {
    pub fn from_label(label: &str) -> Self {
        match label {
            LIST_PUBLIC_HOLIDAYS => IntentKind::ListPublicHolidays,
            LIST_FLEXIBLE_HOLIDAYS => IntentKind::ListFlexibleHolidays,
            LEAVE_REQUEST => IntentKind::LeaveRequest,
            SUBMITTED_REQUESTS => IntentKind::SubmittedRequests,
            _ => IntentKind::Unrecognized,
        }
    }
}

/// Result of the external NLU pass over one message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizedResult {
    #[serde(default)]
    pub top_intent: String,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl RecognizedResult {
    pub fn intent(&self) -> IntentKind {
        IntentKind::from_label(&self.top_intent)
    }

    pub fn has_date_entity(&self) -> bool {
        self.entities
            .iter()
            .any(|e| matches!(e, Entity::Date { .. } | Entity::Daterange { .. }))
    }

    /// Candidate readings of the first date-like entity. A single date is
    /// treated as a degenerate range with start = end.
    pub fn date_candidates(&self) -> Vec<RangeCandidate> {
        for entity in &self.entities {
            match entity {
                Entity::Date { resolution } | Entity::Daterange { resolution } => {
                    return resolution
                        .values
                        .iter()
                        .map(RangeCandidate::from)
                        .collect();
                }
                _ => {}
            }
        }
        Vec::new()
    }

    /// First category entity, if any.
    pub fn category(&self) -> Option<LedgerCategory> {
        self.entities.iter().find_map(|e| match e {
            Entity::Category { value } => Some(*value),
            _ => None,
        })
    }
}

/// One extracted entity. Entity types outside the closed set collapse into
/// `Other` and carry nothing.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entity {
    Date {
        #[serde(default)]
        resolution: Resolution,
    },
    Daterange {
        #[serde(default)]
        resolution: Resolution,
    },
    Category {
        value: LedgerCategory,
    },
    #[serde(other)]
    Other,
}

/// Which side of the ledger a listing request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerCategory {
    Flexible,
    Planned,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Resolution {
    #[serde(default)]
    pub values: Vec<ResolutionValue>,
}

/// One candidate reading of a date entity, as delivered by the recognizer.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResolutionValue {
    Single {
        value: String,
    },
    Range {
        #[serde(default)]
        start: Option<String>,
        #[serde(default)]
        end: Option<String>,
    },
}

/// A (start, end) reading normalized for disambiguation. Either bound may
/// be absent; absent bounds default to the year window at the call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeCandidate {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl From<&ResolutionValue> for RangeCandidate {
    fn from(value: &ResolutionValue) -> Self {
        match value {
            ResolutionValue::Single { value } => Self {
                start: Some(value.clone()),
                end: Some(value.clone()),
            },
            ResolutionValue::Range { start, end } => Self {
                start: start.clone(),
                end: end.clone(),
            },
        }
    }
}

// ── Turn events ──────────────────────────────────────────────────

/// One transport turn event. The `kind` string is kept verbatim so turn
/// types outside the known set can be acknowledged by name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub conversation: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub recognized: Option<RecognizedResult>,
    #[serde(default)]
    pub members_added: Vec<String>,
    #[serde(default)]
    pub recipient: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Message,
    ConversationUpdate,
    Other,
}

impl Activity {
    pub fn kind(&self) -> ActivityKind {
        match self.kind.as_str() {
            "message" => ActivityKind::Message,
            "conversation_update" => ActivityKind::ConversationUpdate,
            _ => ActivityKind::Other,
        }
    }

    /// Message turn carrying a recognition result.
    pub fn message(
        conversation: &str,
        user: &str,
        text: &str,
        recognized: Option<RecognizedResult>,
    ) -> Self {
        Self {
            kind: "message".into(),
            conversation: conversation.into(),
            user: user.into(),
            text: text.into(),
            recognized,
            ..Self::default()
        }
    }
}
