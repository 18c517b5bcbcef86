//! # Mutation workflow
//!
//! Every action that changes server state (login, vehicle entry and exit, profile
//! rename, user create/update/delete/toggle) goes through [`submit`]:
//!
//! 1. The caller's local check runs first. A failure sets the error and returns
//!    [`Rejected::Invalid`]; nothing is sent.
//! 2. [`Workflow::begin`] clears the previous error and enters `Pending`, which is
//!    what disables the triggering controls. A second submission while pending
//!    is refused with [`Rejected::Busy`].
//! 3. The request runs.
//! 4. Success moves to `Done`; failure stores the message and goes back to `Idle`
//!    so the next attempt starts clean.
//!
//! A drop guard leaves `Pending` even if the request future is abandoned
//! mid-flight, so the busy flag is never stuck on.
//!
//! What to do on success (clear fields, close a modal, re-sync a list) belongs to
//! the per-control drivers in [`crate::actions`].

use std::future::Future;

use api::ApiError;

use crate::state::StateCell;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Done,
}

/// Request lifecycle for one control (or one group of controls).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Workflow {
    phase: Phase,
    error: Option<String>,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True exactly while a request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Enter `Pending`. Returns `false` if a request is already outstanding.
    pub fn begin(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.phase = Phase::Pending;
        self.error = None;
        true
    }

    /// Local validation failed; no request was made.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn succeed(&mut self) {
        self.phase = Phase::Done;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = Phase::Idle;
        self.error = Some(message.into());
    }

    /// Leave `Pending` without an outcome.
    pub fn release(&mut self) {
        if self.is_busy() {
            self.phase = Phase::Idle;
        }
    }

    /// Drop the error, e.g. when the panel showing it is closed.
    pub fn dismiss(&mut self) {
        self.error = None;
    }
}

/// Why a submission produced no value.
#[derive(Clone, Debug, PartialEq)]
pub enum Rejected {
    /// Local validation failed with this message.
    Invalid(String),
    /// A request from the same control is still outstanding.
    Busy,
    Failed(ApiError),
}

impl Rejected {
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Rejected::Failed(error) => Some(error),
            _ => None,
        }
    }
}

struct PendingGuard<'a, C: StateCell<Workflow>> {
    cell: &'a mut C,
}

impl<C: StateCell<Workflow>> PendingGuard<'_, C> {
    fn finish<T>(self, outcome: Result<T, ApiError>) -> Result<T, Rejected> {
        match outcome {
            Ok(value) => {
                self.cell.update(Workflow::succeed);
                Ok(value)
            }
            Err(error) => {
                self.cell.update(|workflow| workflow.fail(error.message.clone()));
                Err(Rejected::Failed(error))
            }
        }
    }
}

impl<C: StateCell<Workflow>> Drop for PendingGuard<'_, C> {
    fn drop(&mut self) {
        self.cell.update(Workflow::release);
    }
}

/// Run one mutation through the workflow held in `cell`.
///
/// `check` is the result of the caller's local validation. `request` is not
/// polled unless the check passes and the workflow was idle.
pub async fn submit<C, T, F>(cell: &mut C, check: Result<(), String>, request: F) -> Result<T, Rejected>
where
    C: StateCell<Workflow>,
    F: Future<Output = Result<T, ApiError>>,
{
    if let Err(message) = check {
        cell.update(|workflow| workflow.reject(message.clone()));
        return Err(Rejected::Invalid(message));
    }
    if cell.update(Workflow::begin) != Some(true) {
        return Err(Rejected::Busy);
    }

    let guard = PendingGuard { cell };
    let outcome = request.await;
    guard.finish(outcome)
}
