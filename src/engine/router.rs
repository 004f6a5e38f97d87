use tracing::debug;

use crate::calendar;
use crate::cards::{self, Outbound};
use crate::intent::{IntentKind, LedgerCategory, RecognizedResult};
use crate::model::{DialogKind, DialogSession, LeaveDay};
use crate::observability;

use super::ledger::LedgerService;
use super::{Engine, dates};

impl Engine {
    /// Route one recognized message turn. Exhaustive over `IntentKind`: a
    /// new intent kind cannot compile until it is handled here.
    pub(super) fn dispatch(
        &self,
        user: &str,
        text: &str,
        recognized: &RecognizedResult,
        session: &mut DialogSession,
        out: &mut Vec<Outbound>,
    ) {
        let intent = recognized.intent();
        metrics::counter!(
            observability::INTENTS_TOTAL,
            "intent" => observability::intent_label(intent)
        )
        .increment(1);
        debug!(intent = observability::intent_label(intent), "routing turn");

        match intent {
            IntentKind::ListPublicHolidays => {
                // Preempts both waterfalls.
                session.end_dialog(DialogKind::Flexible);
                session.end_dialog(DialogKind::LeaveRequest);
                let (start, end) = dates::resolve_window(&recognized.date_candidates());
                let rows: Vec<LeaveDay> = self
                    .calendar
                    .between(calendar::PUBLIC_HOLIDAYS, start, end)
                    .iter()
                    .map(LeaveDay::from)
                    .collect();
                out.push(Outbound::card(cards::table_card("Public holidays", &rows)));
            }
            IntentKind::ListFlexibleHolidays => {
                session.end_dialog(DialogKind::LeaveRequest);
                let (start, end) = dates::resolve_window(&recognized.date_candidates());
                let rows: Vec<LeaveDay> = self
                    .calendar
                    .between(calendar::FLEXIBLE, start, end)
                    .iter()
                    .map(LeaveDay::from)
                    .collect();
                out.push(Outbound::options(cards::option_list(
                    "Flexible holidays",
                    "Click on them to avail.",
                    &rows,
                )));
                self.begin_dialog(session, DialogKind::Flexible, rows, out);
            }
            IntentKind::LeaveRequest => {
                session.end_dialog(DialogKind::Flexible);
                let ledger = LedgerService::new(&self.store).get(user);
                let candidates = if recognized.has_date_entity() {
                    let (start, end) = dates::resolve_window(&recognized.date_candidates());
                    dates::business_days(start, end, &ledger)
                } else {
                    Vec::new()
                };
                self.begin_dialog(session, DialogKind::LeaveRequest, candidates, out);
            }
            IntentKind::SubmittedRequests => {
                let ledger = LedgerService::new(&self.store).get(user);
                let (start, end) = dates::resolve_window(&recognized.date_candidates());
                let flexible = dates::within_window(&ledger.flexible, start, end);
                let planned = dates::within_window(&ledger.planned, start, end);
                match recognized.category() {
                    Some(LedgerCategory::Flexible) => {
                        out.push(Outbound::card(cards::table_card(
                            "Your flexible holidays",
                            &flexible,
                        )));
                    }
                    Some(LedgerCategory::Planned) => {
                        out.push(Outbound::card(cards::table_card(
                            "Your planned holidays",
                            &planned,
                        )));
                    }
                    None => {
                        out.push(Outbound::card(cards::table_card(
                            "Your flexible holidays",
                            &flexible,
                        )));
                        out.push(Outbound::card(cards::table_card(
                            "Your planned holidays",
                            &planned,
                        )));
                    }
                }
            }
            IntentKind::Unrecognized => {
                if session.active.is_some() {
                    self.continue_dialog(user, session, text, out);
                } else {
                    // No actionable branch and nothing suspended: no-op turn.
                    debug!("unrecognized intent with no active dialog, ignoring");
                }
            }
        }
    }
}
