//! Simulated settlement sequencing
//!
//! The terminal replays a fixed table of progress steps between `Idle` and
//! `Success`. The state value itself gates re-triggering: a screen that is
//! already `Processing` (or settled) rejects another tap. There is no failure
//! transition on this path; a failed result only ever arrives at the
//! standalone receipt screen via its query parameter.

use crate::services::clock::Clock;
use crate::session::SessionStore;
use std::time::Duration;
use thiserror::Error;

/// Screen-level transaction state, one instance per terminal session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransactionStatus {
    #[default]
    Idle,
    Processing {
        message: &'static str,
    },
    Success,
    Failure,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Idle => "idle",
            TransactionStatus::Processing { .. } => "processing",
            TransactionStatus::Success => "success",
            TransactionStatus::Failure => "failure",
        }
    }

    /// Progress message shown while processing
    pub fn message(&self) -> Option<&'static str> {
        match self {
            TransactionStatus::Processing { message } => Some(message),
            _ => None,
        }
    }
}

/// One step of the simulated settlement sequence
#[derive(Debug, Clone, Copy)]
pub struct SettlementStep {
    pub message: &'static str,
    pub delay: Duration,
}

/// The fixed progress sequence replayed on every settlement
pub const SETTLEMENT_SEQUENCE: &[SettlementStep] = &[
    SettlementStep {
        message: "Device connected...",
        delay: Duration::from_millis(800),
    },
    SettlementStep {
        message: "Processing payment...",
        delay: Duration::from_millis(1500),
    },
    SettlementStep {
        message: "Verifying funds...",
        delay: Duration::from_millis(1200),
    },
];

/// Errors raised when a settlement cannot start
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettlementError {
    #[error("No payment is active on this terminal")]
    NoActivePayment,

    #[error("Settlement already in progress")]
    InFlight,

    #[error("Payment already settled; reset the terminal for a new payment")]
    AlreadySettled,

    #[error("Unknown terminal session")]
    UnknownSession,
}

/// Drive the settlement sequence for the session's current payment
///
/// Advances `Idle → Processing (per-step message) → Success`, sleeping
/// through the injected clock between steps. Returns the replayed progress
/// messages. Once started the sequence completes unconditionally.
pub async fn run_settlement(
    sessions: &SessionStore,
    token: &str,
    clock: &dyn Clock,
) -> Result<Vec<&'static str>, SettlementError> {
    // Claim the machine; only an idle screen with an active payment may start
    sessions
        .with_terminal(token, |terminal| {
            if terminal.intent.is_none() {
                return Err(SettlementError::NoActivePayment);
            }
            match terminal.status {
                TransactionStatus::Idle => {
                    terminal.status = TransactionStatus::Processing {
                        message: SETTLEMENT_SEQUENCE[0].message,
                    };
                    Ok(())
                }
                TransactionStatus::Processing { .. } => Err(SettlementError::InFlight),
                TransactionStatus::Success | TransactionStatus::Failure => {
                    Err(SettlementError::AlreadySettled)
                }
            }
        })
        .await
        .ok_or(SettlementError::UnknownSession)??;

    let mut replayed = Vec::with_capacity(SETTLEMENT_SEQUENCE.len());
    for (idx, step) in SETTLEMENT_SEQUENCE.iter().enumerate() {
        if idx > 0 {
            sessions
                .with_terminal(token, |terminal| {
                    terminal.status = TransactionStatus::Processing {
                        message: step.message,
                    };
                })
                .await;
        }

        tracing::info!(step = step.message, "Settlement progress");
        clock.sleep(step.delay).await;
        replayed.push(step.message);
    }

    sessions
        .with_terminal(token, |terminal| {
            terminal.status = TransactionStatus::Success;
        })
        .await;

    tracing::info!("Settlement complete");
    Ok(replayed)
}
