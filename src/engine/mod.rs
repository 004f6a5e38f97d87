mod dates;
mod dialog;
mod error;
mod ledger;
mod quota;
mod router;

pub use dates::{business_days, disambiguate, parse_iso_day, resolve_window, year_window};
pub use dialog::{DATE_SEPARATOR, FLEXIBLE_PROMPT, PLANNED_GRANTED, REASON_PROMPT};
pub use error::EngineError;
pub use ledger::LedgerService;
pub use quota::{can_add_flexible, can_commit_planned, is_duplicate_flexible};

use std::time::Instant;

use tracing::debug;

use crate::calendar::CalendarSet;
use crate::cards::Outbound;
use crate::intent::{Activity, ActivityKind};
use crate::model::DialogSession;
use crate::observability;
use crate::store::{self, StateStore};

/// Greeting sent when a new member joins a conversation.
pub const GREETING: &str =
    "Welcome to the leave desk! Ask about holidays, avail a flexible one, or request leaves.";

/// Conversational leave-management engine. One instance serves every
/// conversation; calendar data is read-only and all mutable state lives in
/// the scope-keyed store.
pub struct Engine {
    pub(crate) calendar: CalendarSet,
    pub(crate) store: StateStore,
}

impl Engine {
    pub fn new(calendar: CalendarSet) -> Self {
        Self {
            calendar,
            store: StateStore::new(),
        }
    }

    /// Run one turn to completion: read the turn's state, route it, flush.
    ///
    /// Contract: the caller delivers turns for a given conversation one at
    /// a time, in order (single writer per scope). The engine holds no lock
    /// across a suspension; dialog state lives in the store between turns,
    /// so concurrent turns for the *same* conversation would race on the
    /// read-modify-write of its session and ledger.
    pub fn process_turn(&self, activity: &Activity) -> Vec<Outbound> {
        let started = Instant::now();
        let mut out = Vec::new();

        match activity.kind() {
            ActivityKind::Message => {
                metrics::counter!(observability::TURNS_TOTAL, "activity" => "message")
                    .increment(1);
                let session_key = store::conversation_key(&activity.conversation);
                let mut session: DialogSession = self.store.get_or_default(&session_key);
                let recognized = activity.recognized.clone().unwrap_or_default();
                self.dispatch(
                    &activity.user,
                    &activity.text,
                    &recognized,
                    &mut session,
                    &mut out,
                );
                // End-of-turn flush for the conversation scope. The user
                // scope is flushed by LedgerService at the commit site.
                self.store.set(&session_key, &session);
            }
            ActivityKind::ConversationUpdate => {
                metrics::counter!(observability::TURNS_TOTAL, "activity" => "conversation_update")
                    .increment(1);
                // Greet the joining member, not the echo of our own join.
                if activity
                    .members_added
                    .first()
                    .is_some_and(|member| *member != activity.recipient)
                {
                    out.push(Outbound::text(GREETING));
                }
            }
            ActivityKind::Other => {
                metrics::counter!(observability::TURNS_TOTAL, "activity" => "other").increment(1);
                debug!(kind = %activity.kind, "unrecognized activity type");
                out.push(Outbound::text(format!(
                    "[{}]-type activity detected.",
                    activity.kind
                )));
            }
        }

        metrics::histogram!(observability::TURN_DURATION_SECONDS)
            .record(started.elapsed().as_secs_f64());
        out
    }
}
