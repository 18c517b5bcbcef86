//! # Tab-scoped record synchronizer
//!
//! [`RecordSync`] holds the active [`Tab`] and the last record set fetched for
//! it. It never caches across tabs: [`RecordSync::select`] drops the current set
//! and every refresh goes back to the server.
//!
//! Each fetch is issued a [`Ticket`]. Only the ticket from the most recent
//! [`RecordSync::begin`] may write results, so a slow response for a tab the
//! user already left (or an older fetch for the same tab) is discarded instead
//! of overwriting the newer view.
//!
//! A failed fetch keeps whatever is displayed and records the error; the error
//! clears when the next fetch starts.

use api::{ApiError, Gateway, ParkingRecord, Tab, Transport};
use store::CredentialStore;

use crate::state::StateCell;

/// Identifies one fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub tab: Tab,
    generation: u64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordSync {
    tab: Tab,
    records: Vec<ParkingRecord>,
    generation: u64,
    loading: bool,
    error: Option<String>,
}

impl RecordSync {
    pub fn new(tab: Tab) -> Self {
        Self {
            tab,
            ..Self::default()
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn records(&self) -> &[ParkingRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Switch tabs. Returns `false` if `tab` is already active.
    pub fn select(&mut self, tab: Tab) -> bool {
        if self.tab == tab {
            return false;
        }
        self.tab = tab;
        self.records.clear();
        true
    }

    /// Start a fetch for the active tab, superseding any fetch in flight.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        Ticket {
            tab: self.tab,
            generation: self.generation,
        }
    }

    /// Store a fetch result. Returns `false` when the ticket is stale and the
    /// result was dropped.
    pub fn apply(&mut self, ticket: Ticket, result: Result<Vec<ParkingRecord>, ApiError>) -> bool {
        if ticket.generation != self.generation || ticket.tab != self.tab {
            tracing::debug!(tab = %ticket.tab, "discarding stale record fetch");
            return false;
        }
        self.loading = false;
        match result {
            Ok(records) => {
                self.records = records;
            }
            Err(error) => {
                self.error = Some(error.message);
            }
        }
        true
    }
}

/// Fetch the active tab's records into `cell`.
///
/// Returns `Ok(true)` when the result was applied, `Ok(false)` when a newer
/// fetch superseded it, and the error when the applied fetch failed (so the
/// caller can react to an expired session).
pub async fn refresh<C, T, S>(cell: &mut C, gateway: &Gateway<T, S>) -> Result<bool, ApiError>
where
    C: StateCell<RecordSync>,
    T: Transport,
    S: CredentialStore,
{
    let Some(ticket) = cell.update(RecordSync::begin) else {
        return Ok(false);
    };
    tracing::debug!(tab = %ticket.tab, "fetching records");

    let result = gateway.records(ticket.tab).await;
    let failure = result.as_ref().err().cloned();
    let applied = cell
        .update(|sync| sync.apply(ticket, result))
        .unwrap_or(false);

    match failure {
        Some(error) if applied => Err(error),
        _ => Ok(applied),
    }
}
