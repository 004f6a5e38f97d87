use crate::limits::{MAX_FLEXIBLE_LEAVES, MAX_PLANNED_LEAVES};
use crate::model::{HolidayLedger, LeaveDay};

use super::EngineError;

/// Room for one more flexible holiday.
pub fn can_add_flexible(ledger: &HolidayLedger) -> bool {
    ledger.flexible.len() < MAX_FLEXIBLE_LEAVES
}

/// Date-only duplicate check against the flexible list.
pub fn is_duplicate_flexible(ledger: &HolidayLedger, day: &LeaveDay) -> bool {
    ledger.flexible.iter().any(|d| d.date == day.date)
}

/// All-or-nothing admission for a planned batch: either the whole batch
/// fits under the cap or none of it commits.
pub fn can_commit_planned(ledger: &HolidayLedger, batch: &[LeaveDay]) -> bool {
    ledger.planned.len() + batch.len() <= MAX_PLANNED_LEAVES
}

/// Validate a flexible selection. Duplicates win over the cap, so
/// re-selecting a booked date is reported as such even at capacity.
pub fn check_flexible(ledger: &HolidayLedger, day: &LeaveDay) -> Result<(), EngineError> {
    if is_duplicate_flexible(ledger, day) {
        return Err(EngineError::DuplicateSelection(day.date));
    }
    if !can_add_flexible(ledger) {
        return Err(EngineError::FlexibleQuotaExceeded);
    }
    Ok(())
}

/// Validate a planned batch against the cap.
pub fn check_planned(ledger: &HolidayLedger, batch: &[LeaveDay]) -> Result<(), EngineError> {
    if !can_commit_planned(ledger, batch) {
        return Err(EngineError::PlannedQuotaExceeded {
            planned: ledger.planned.len(),
            batch: batch.len(),
        });
    }
    Ok(())
}
