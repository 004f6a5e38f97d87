use tracing::debug;

use crate::cards::Outbound;
use crate::limits::{MAX_FLEXIBLE_LEAVES, MAX_PLANNED_LEAVES, MAX_REASON_LEN};
use crate::model::{ActiveDialog, DialogKind, DialogSession, LeaveDay, WaterfallState};
use crate::observability;

use super::ledger::LedgerService;
use super::{Engine, EngineError, quota};

pub const FLEXIBLE_PROMPT: &str = "Select to avail any flexible leave";
pub const REASON_PROMPT: &str = "Reason behind these leaves?";
pub const PLANNED_GRANTED: &str =
    "Planned leaves were granted and they got added to your total holidays.";

/// Separator between dates in the flexible confirmation messages.
pub const DATE_SEPARATOR: &str = " || ";

impl Engine {
    /// Begin a waterfall bound to this turn's candidate list, replacing any
    /// dialog already active for the conversation, and run its prompt step.
    pub(super) fn begin_dialog(
        &self,
        session: &mut DialogSession,
        kind: DialogKind,
        candidates: Vec<LeaveDay>,
        out: &mut Vec<Outbound>,
    ) {
        session.active = Some(ActiveDialog {
            kind,
            state: WaterfallState::Created,
            candidates,
        });
        metrics::counter!(
            observability::DIALOGS_STARTED_TOTAL,
            "dialog" => observability::dialog_label(kind)
        )
        .increment(1);
        self.run_prompt_step(session, out);
    }

    /// Step 1 of either waterfall: emit the prompt and suspend until a
    /// later turn delivers the answer for step 2.
    fn run_prompt_step(&self, session: &mut DialogSession, out: &mut Vec<Outbound>) {
        let Some(active) = session.active.as_mut() else {
            return;
        };
        match active.kind {
            DialogKind::Flexible => out.push(Outbound::text(FLEXIBLE_PROMPT)),
            DialogKind::LeaveRequest => out.push(Outbound::text(REASON_PROMPT)),
        }
        active.state = WaterfallState::AwaitingStep2Input;
    }

    /// Deliver a turn's raw input to the suspended waterfall. Called from
    /// the router when the turn carried no actionable intent of its own.
    pub(super) fn continue_dialog(
        &self,
        user: &str,
        session: &mut DialogSession,
        input: &str,
        out: &mut Vec<Outbound>,
    ) {
        let Some(active) = session.active.as_ref() else {
            return;
        };
        match active.state {
            // Begun but never prompted: issue the prompt now.
            WaterfallState::Created | WaterfallState::AwaitingStep1Input => {
                self.run_prompt_step(session, out);
            }
            WaterfallState::AwaitingStep2Input => match active.kind {
                DialogKind::Flexible => self.acknowledge_selection(user, session, input, out),
                DialogKind::LeaveRequest => self.acknowledge_reason(user, session, input, out),
            },
            WaterfallState::Ended => session.active = None,
        }
    }

    /// FlexibleDialog step 2: resolve the numeric selection into the
    /// candidate list and try to book it. Ends the dialog on any outcome
    /// except an invalid selection, which re-prompts.
    fn acknowledge_selection(
        &self,
        user: &str,
        session: &mut DialogSession,
        input: &str,
        out: &mut Vec<Outbound>,
    ) {
        let candidates = session
            .active
            .as_ref()
            .map(|a| a.candidates.clone())
            .unwrap_or_default();
        let selected = match parse_selection(input, &candidates) {
            Ok(day) => day,
            Err(err) => {
                debug!(%err, "flexible selection rejected, re-prompting");
                out.push(Outbound::text(FLEXIBLE_PROMPT));
                return;
            }
        };

        let service = LedgerService::new(&self.store);
        let mut ledger = service.get(user);
        match quota::check_flexible(&ledger, &selected) {
            Ok(()) => {
                ledger.flexible.push(selected);
                service.set(user, &ledger);
                metrics::counter!(observability::LEDGER_COMMITS_TOTAL, "category" => "flexible")
                    .increment(1);
                out.push(Outbound::text(format!(
                    "Availed this day as flexible holiday. Your flexible holidays are on {}",
                    ledger.flexible_dates().join(DATE_SEPARATOR)
                )));
            }
            Err(EngineError::DuplicateSelection(date)) => {
                debug!(%date, "flexible selection already availed");
                out.push(Outbound::text(format!(
                    "You have already availed this holiday. Your flexible holidays are on {}",
                    ledger.flexible_dates().join(DATE_SEPARATOR)
                )));
            }
            Err(err) => {
                metrics::counter!(observability::QUOTA_REJECTIONS_TOTAL, "category" => "flexible")
                    .increment(1);
                debug!(%err, "flexible selection rejected");
                out.push(Outbound::text(format!(
                    "You already avail {MAX_FLEXIBLE_LEAVES} flexible holidays"
                )));
            }
        }
        self.end_active_dialog(session);
    }

    /// LeaveRequestDialog step 2: attach the captured reason to every
    /// candidate and commit the batch, all-or-nothing.
    fn acknowledge_reason(
        &self,
        user: &str,
        session: &mut DialogSession,
        input: &str,
        out: &mut Vec<Outbound>,
    ) {
        let reason: String = input.trim().chars().take(MAX_REASON_LEN).collect();
        let batch: Vec<LeaveDay> = session
            .active
            .as_ref()
            .map(|a| a.candidates.clone())
            .unwrap_or_default()
            .into_iter()
            .map(|mut d| {
                d.reason = reason.clone();
                d
            })
            .collect();

        let service = LedgerService::new(&self.store);
        let mut ledger = service.get(user);
        match quota::check_planned(&ledger, &batch) {
            Ok(()) => {
                let committed = batch.len();
                ledger.planned.extend(batch);
                service.set(user, &ledger);
                metrics::counter!(observability::LEDGER_COMMITS_TOTAL, "category" => "planned")
                    .increment(committed as u64);
                out.push(Outbound::text(PLANNED_GRANTED));
            }
            Err(err) => {
                metrics::counter!(observability::QUOTA_REJECTIONS_TOTAL, "category" => "planned")
                    .increment(1);
                debug!(%err, "planned batch rejected, ledger unchanged");
                out.push(Outbound::text(format!(
                    "You can only avail max of {MAX_PLANNED_LEAVES} planned holidays."
                )));
            }
        }
        self.end_active_dialog(session);
    }

    /// End whichever dialog is active, discarding its candidates.
    fn end_active_dialog(&self, session: &mut DialogSession) {
        if let Some(active) = session.active.take() {
            metrics::counter!(
                observability::DIALOGS_ENDED_TOTAL,
                "dialog" => observability::dialog_label(active.kind)
            )
            .increment(1);
        }
    }
}

/// Resolve raw prompt input to a candidate. Bounds are checked against the
/// list emitted earlier in this dialog; never indexes out of range.
fn parse_selection(input: &str, candidates: &[LeaveDay]) -> Result<LeaveDay, EngineError> {
    let raw = input.trim();
    let index: usize = raw
        .parse()
        .map_err(|_| EngineError::NotANumber(raw.to_string()))?;
    candidates
        .get(index)
        .cloned()
        .ok_or(EngineError::InvalidSelection {
            index,
            len: candidates.len(),
        })
}
