use crate::model::HolidayLedger;
use crate::store::{self, StateStore};

/// Get/overwrite access to per-user ledgers, the only path that touches
/// ledger state. Callers read the whole value, modify it, and write the
/// whole value back; there are no partial merges.
pub struct LedgerService<'a> {
    store: &'a StateStore,
}

impl<'a> LedgerService<'a> {
    pub fn new(store: &'a StateStore) -> Self {
        Self { store }
    }

    /// Stored ledger, or a fresh empty one. Absence is never observable
    /// above this layer.
    pub fn get(&self, user: &str) -> HolidayLedger {
        self.store.get_or_default(&store::user_key(user))
    }

    /// Atomic overwrite of the full ledger value.
    pub fn set(&self, user: &str, ledger: &HolidayLedger) {
        self.store.set(&store::user_key(user), ledger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LeaveDay;
    use chrono::NaiveDate;

    #[test]
    fn first_access_is_empty() {
        let store = StateStore::new();
        let svc = LedgerService::new(&store);
        let ledger = svc.get("alice");
        assert!(ledger.flexible.is_empty());
        assert!(ledger.planned.is_empty());
    }

    #[test]
    fn read_modify_write_persists() {
        let store = StateStore::new();
        let svc = LedgerService::new(&store);
        let mut ledger = svc.get("alice");
        ledger.planned.push(LeaveDay::on(
            NaiveDate::from_ymd_opt(2019, 3, 4).unwrap(),
            "trip",
        ));
        svc.set("alice", &ledger);

        let reloaded = svc.get("alice");
        assert_eq!(reloaded, ledger);
        // Other users still see a fresh ledger.
        assert!(svc.get("bob").planned.is_empty());
    }
}
