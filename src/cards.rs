//! Pure builders for the structured payloads handed to the transport.
//! Rendering is the host's job; rows are synthesized fresh from typed
//! records, with no aliasing between output rows and any template.

use serde::Serialize;

use crate::model::LeaveDay;

/// Fixed column set of every tabular listing.
pub const COLUMNS: [&str; 3] = ["date", "reason", "day"];

/// One outbound payload produced by a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outbound {
    Text { text: String },
    Card { card: TableCard },
    Options { options: OptionList },
}

impl Outbound {
    pub fn text(text: impl Into<String>) -> Self {
        Outbound::Text { text: text.into() }
    }

    pub fn card(card: TableCard) -> Self {
        Outbound::Card { card }
    }

    pub fn options(options: OptionList) -> Self {
        Outbound::Options { options }
    }
}

/// Tabular listing with the fixed {date, reason, day} columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCard {
    pub title: String,
    pub columns: [&'static str; 3],
    pub rows: Vec<CardRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardRow {
    pub date: String,
    pub reason: String,
    pub day: String,
}

/// Index-keyed selectable options; the index is what a later turn's
/// numeric selection refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionList {
    pub title: String,
    pub text: String,
    pub options: Vec<CardOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardOption {
    pub index: usize,
    pub title: String,
}

pub fn table_card(title: &str, days: &[LeaveDay]) -> TableCard {
    TableCard {
        title: title.to_string(),
        columns: COLUMNS,
        rows: days
            .iter()
            .map(|d| CardRow {
                date: d.date.to_string(),
                reason: d.reason.clone(),
                day: d.day.clone(),
            })
            .collect(),
    }
}

pub fn option_list(title: &str, text: &str, days: &[LeaveDay]) -> OptionList {
    OptionList {
        title: title.to_string(),
        text: text.to_string(),
        options: days
            .iter()
            .enumerate()
            .map(|(index, d)| CardOption {
                index,
                title: format!("{} || {} || {}", d.date, d.reason, d.day),
            })
            .collect(),
    }
}
