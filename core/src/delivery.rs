//! How an `Outcome` reaches the caller.
//!
//! # Design
//! Two strategies exist and the choice is made in the type of
//! `RequestOptions`:
//! - `Returned`: `execute` resolves to the `Outcome`.
//! - `Callbacks`: the outcome goes to `on_success` / `on_error` and `execute`
//!   resolves to `Dispatched`, which only carries the outcome back when no
//!   callback was registered for that branch.
//!
//! A success handed to `on_success` ends the request; no error value is ever
//! built from a successful response.

use std::fmt;

use crate::types::{Failure, Outcome, Success};

/// A result-delivery strategy.
pub trait Delivery {
    type Output;

    fn deliver(self, outcome: Outcome) -> Self::Output;
}

/// Hand the outcome back as the return value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Returned;

impl Delivery for Returned {
    type Output = Outcome;

    fn deliver(self, outcome: Outcome) -> Outcome {
        outcome
    }
}

type SuccessHandler = Box<dyn FnOnce(Success) + Send>;
type FailureHandler = Box<dyn FnOnce(Failure) + Send>;

/// Fire-and-forget callbacks.
#[derive(Default)]
pub struct Callbacks {
    on_success: Option<SuccessHandler>,
    on_error: Option<FailureHandler>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_success<F>(mut self, handler: F) -> Self
    where
        F: FnOnce(Success) + Send + 'static,
    {
        self.on_success = Some(Box::new(handler));
        self
    }

    /// Receives HTTP errors and Network Errors alike.
    pub fn on_error<F>(mut self, handler: F) -> Self
    where
        F: FnOnce(Failure) + Send + 'static,
    {
        self.on_error = Some(Box::new(handler));
        self
    }
}

impl Delivery for Callbacks {
    type Output = Dispatched;

    fn deliver(self, outcome: Outcome) -> Dispatched {
        match outcome {
            Outcome::Success(success) => match self.on_success {
                Some(handler) => {
                    handler(success);
                    Dispatched::Handled
                }
                None => Dispatched::Unhandled(Outcome::Success(success)),
            },
            Outcome::Failure(failure) => match self.on_error {
                Some(handler) => {
                    handler(failure);
                    Dispatched::Handled
                }
                None => Dispatched::Unhandled(Outcome::Failure(failure)),
            },
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Result of a callback-style request.
#[must_use]
#[derive(Debug)]
pub enum Dispatched {
    /// A callback received the outcome.
    Handled,
    /// No callback was registered for this branch.
    Unhandled(Outcome),
}

impl Dispatched {
    pub fn is_handled(&self) -> bool {
        matches!(self, Dispatched::Handled)
    }

    pub fn into_outcome(self) -> Option<Outcome> {
        match self {
            Dispatched::Handled => None,
            Dispatched::Unhandled(outcome) => Some(outcome),
        }
    }
}
