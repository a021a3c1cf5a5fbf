//! Single-emission result channel of one dispatched call
//!
//! Each call produces exactly one [`CallOutcome`]. Besides a value or an
//! error, a call may be [`CallOutcome::Abandoned`]: the classifier decided
//! that the caller must not react to this call at all (a request that was
//! never sent, or an expired session). Abandonment is a typed terminal
//! state, so callers can match on it instead of waiting forever.

use serde_json::Value;
use tokio::sync::oneshot;

use courier_domain::NormalizedError;

/// Why a call settles with neither a value nor an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbandonReason {
    /// The request was never sent. The error is kept for diagnostics only.
    SystemFault(NormalizedError),
    /// The session expired; the login flow takes over.
    SessionExpired,
    /// The call's task ended without reporting an outcome.
    Interrupted,
}

/// Terminal outcome of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The call succeeded with this (possibly unwrapped) payload.
    Settled(Value),
    /// The call failed with a normalized error.
    Failed(NormalizedError),
    /// The call ended without anything for the caller.
    Abandoned(AbandonReason),
}

impl CallOutcome {
    /// Returns the caller-visible result, or `None` if abandoned.
    #[must_use]
    pub fn into_result(self) -> Option<Result<Value, NormalizedError>> {
        match self {
            Self::Settled(value) => Some(Ok(value)),
            Self::Failed(error) => Some(Err(error)),
            Self::Abandoned(_) => None,
        }
    }

    const fn state(&self) -> ChannelState {
        match self {
            Self::Settled(_) => ChannelState::Settled,
            Self::Failed(_) => ChannelState::Failed,
            Self::Abandoned(_) => ChannelState::Abandoned,
        }
    }
}

/// Observable state of a [`ResultChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    /// The call is still in flight.
    Pending,
    /// A value was emitted.
    Settled,
    /// An error was emitted.
    Failed,
    /// The call ended with no emission.
    Abandoned,
}

/// Receiving side of a call.
#[derive(Debug)]
pub struct ResultChannel {
    call_id: String,
    receiver: oneshot::Receiver<CallOutcome>,
    received: Option<CallOutcome>,
}

impl ResultChannel {
    /// Returns the identifier the call logs under.
    #[must_use]
    pub fn call_id(&self) -> &str {
        &self.call_id
    }

    /// Returns the current state without waiting.
    pub fn state(&mut self) -> ChannelState {
        if self.received.is_none() {
            match self.receiver.try_recv() {
                Ok(outcome) => self.received = Some(outcome),
                Err(oneshot::error::TryRecvError::Empty) => return ChannelState::Pending,
                Err(oneshot::error::TryRecvError::Closed) => {
                    self.received = Some(CallOutcome::Abandoned(AbandonReason::Interrupted));
                }
            }
        }
        self.received
            .as_ref()
            .map_or(ChannelState::Pending, CallOutcome::state)
    }

    /// Waits for the call's outcome.
    pub async fn outcome(self) -> CallOutcome {
        if let Some(outcome) = self.received {
            return outcome;
        }
        self.receiver
            .await
            .unwrap_or(CallOutcome::Abandoned(AbandonReason::Interrupted))
    }

    /// Waits for the caller-visible result; `None` if the call was abandoned.
    pub async fn result(self) -> Option<Result<Value, NormalizedError>> {
        self.outcome().await.into_result()
    }
}

/// Sending side of a call. Consumed by its single emission.
#[derive(Debug)]
pub(crate) struct ResultSender {
    sender: oneshot::Sender<CallOutcome>,
}

impl ResultSender {
    pub(crate) fn settle(self, value: Value) {
        self.emit(CallOutcome::Settled(value));
    }

    pub(crate) fn fail(self, error: NormalizedError) {
        self.emit(CallOutcome::Failed(error));
    }

    pub(crate) fn abandon(self, reason: AbandonReason) {
        self.emit(CallOutcome::Abandoned(reason));
    }

    fn emit(self, outcome: CallOutcome) {
        // The caller may have dropped its channel; nobody is left to tell.
        let _ = self.sender.send(outcome);
    }
}

/// Creates the two ends for the call `call_id`.
pub(crate) fn result_channel(call_id: String) -> (ResultSender, ResultChannel) {
    let (sender, receiver) = oneshot::channel();
    (
        ResultSender { sender },
        ResultChannel {
            call_id,
            receiver,
            received: None,
        },
    )
}
