use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single day off. Identity for dedup purposes is the date alone; `day`
/// is a human-facing weekday label and `reason` is free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDay {
    pub date: NaiveDate,
    pub reason: String,
    pub day: String,
}

impl LeaveDay {
    pub fn on(date: NaiveDate, reason: impl Into<String>) -> Self {
        Self {
            date,
            reason: reason.into(),
            day: weekday_label(date),
        }
    }
}

/// Full weekday name, e.g. "Monday".
pub fn weekday_label(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Per-user record of availed holidays. Created lazily as an empty ledger
/// and mutated only through `LedgerService` whole-value overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayLedger {
    pub flexible: Vec<LeaveDay>,
    pub planned: Vec<LeaveDay>,
}

impl HolidayLedger {
    /// Date-only membership across both categories.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.flexible
            .iter()
            .chain(self.planned.iter())
            .any(|d| d.date == date)
    }

    /// ISO dates of the flexible entries, in booking order.
    pub fn flexible_dates(&self) -> Vec<String> {
        self.flexible.iter().map(|d| d.date.to_string()).collect()
    }
}

/// Static reference record from the holiday calendar dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarHoliday {
    pub date: NaiveDate,
    pub day: String,
    pub reason: String,
}

impl From<&CalendarHoliday> for LeaveDay {
    fn from(h: &CalendarHoliday) -> Self {
        Self {
            date: h.date,
            reason: h.reason.clone(),
            day: h.day.clone(),
        }
    }
}

/// Which waterfall a session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogKind {
    Flexible,
    LeaveRequest,
}

/// Progress of a two-step waterfall. A step that issues a prompt suspends
/// the machine until a later turn delivers the answer to the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaterfallState {
    Created,
    AwaitingStep1Input,
    AwaitingStep2Input,
    Ended,
}

/// A suspended waterfall plus the candidate list it is bound to. Selections
/// in a later turn index into exactly this list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveDialog {
    pub kind: DialogKind,
    pub state: WaterfallState,
    pub candidates: Vec<LeaveDay>,
}

/// Per-conversation dialog state, persisted across turns under the
/// conversation scope key. At most one dialog is active at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogSession {
    pub active: Option<ActiveDialog>,
}

impl DialogSession {
    /// End the active dialog if it is of the given kind, discarding its
    /// candidates. Dialogs of other kinds are left running.
    pub fn end_dialog(&mut self, kind: DialogKind) {
        if self.active.as_ref().is_some_and(|d| d.kind == kind) {
            self.active = None;
        }
    }

    pub fn is_active(&self, kind: DialogKind) -> bool {
        self.active.as_ref().is_some_and(|d| d.kind == kind)
    }
}
