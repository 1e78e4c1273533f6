//! One-shot warm-up of the remote model.
//!
//! Hosted models may cold-start on first use. Before the first chat request
//! is handled, one throwaway query forces the remote side to load the model.
//! The gate moves `Uninitialized → Initializing → Done` exactly once; a
//! request that finds warm-up already in progress does not wait for it.

use std::sync::atomic::{AtomicU8, Ordering};
use tracing::{debug, info};

use crate::metrics::WARMUP_CALLS_TOTAL;
use crate::qa::QaClient;

const UNINITIALIZED: u8 = 0;
const INITIALIZING: u8 = 1;
const DONE: u8 = 2;

/// Throwaway question sent during warm-up.
const WARMUP_QUESTION: &str = "What is this?";
/// Throwaway context sent during warm-up.
const WARMUP_CONTEXT: &str = "This is a warm-up request.";

/// Lifecycle of the warm-up gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarmupState {
    Uninitialized,
    Initializing,
    Done,
}

/// Process-wide warm-up flag. Never reset.
#[derive(Debug, Default)]
pub struct WarmupGate {
    state: AtomicU8,
}

impl WarmupGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WarmupState {
        match self.state.load(Ordering::Acquire) {
            UNINITIALIZED => WarmupState::Uninitialized,
            INITIALIZING => WarmupState::Initializing,
            _ => WarmupState::Done,
        }
    }

    pub fn is_done(&self) -> bool {
        self.state() == WarmupState::Done
    }

    /// Warm the remote model if this is the first call; otherwise return at once.
    ///
    /// Returns true if this call performed the warm-up. The gate ends up
    /// `Done` whether or not the remote query succeeded.
    pub async fn ensure_warm(&self, qa: &dyn QaClient) -> bool {
        if self
            .state
            .compare_exchange(UNINITIALIZED, INITIALIZING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        if qa.has_credential() {
            info!(
                provider = qa.provider(),
                model = qa.model(),
                "Warming up remote model"
            );
            WARMUP_CALLS_TOTAL.inc();
            let result = qa.query(WARMUP_QUESTION, WARMUP_CONTEXT).await;
            info!(outcome = result.outcome_label(), "Warm-up finished");
        } else {
            debug!("No API token configured, skipping warm-up call");
        }

        self.state.store(DONE, Ordering::Release);
        true
    }
}
