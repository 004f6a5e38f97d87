use chrono::NaiveDate;

/// Turn-scoped failure conditions. None are fatal: every variant resolves
/// within the turn that raised it, worst case as an unchanged ledger plus
/// an explanatory message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Selection index outside the candidate list emitted earlier in the
    /// dialog. The dialog re-prompts instead of indexing out of range.
    InvalidSelection { index: usize, len: usize },
    /// Selection input did not parse as a number at all.
    NotANumber(String),
    /// Chosen flexible date is already booked.
    DuplicateSelection(NaiveDate),
    /// Flexible cap reached.
    FlexibleQuotaExceeded,
    /// Committing the batch would push the planned list over its cap.
    PlannedQuotaExceeded { planned: usize, batch: usize },
    /// Inbound turn payload could not be read.
    BadActivity(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidSelection { index, len } => {
                write!(f, "selection {index} outside candidate list of {len}")
            }
            EngineError::NotANumber(raw) => write!(f, "not a numeric selection: {raw:?}"),
            EngineError::DuplicateSelection(date) => {
                write!(f, "flexible holiday already availed on {date}")
            }
            EngineError::FlexibleQuotaExceeded => write!(f, "flexible holiday cap reached"),
            EngineError::PlannedQuotaExceeded { planned, batch } => {
                write!(f, "planned cap exceeded: {planned} held + {batch} requested")
            }
            EngineError::BadActivity(e) => write!(f, "bad activity: {e}"),
        }
    }
}

impl std::error::Error for EngineError {}
