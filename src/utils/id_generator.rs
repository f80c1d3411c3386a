//! Run, session, and node identifier generation.
//!
//! Wraps [`crate::utils::deterministic_rng::DeterministicRng`] so callers can
//! opt into reproducible IDs (useful for golden-file tests and replay) while
//! defaulting to process-random seeds in production.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use super::deterministic_rng::DeterministicRng;

/// Configuration for an [`IdGenerator`].
#[derive(Debug, Clone, Copy)]
pub struct IdConfig {
    /// Fixed seed for reproducible ID sequences. `None` picks a random seed.
    pub seed: Option<u64>,
    /// Append a monotonic counter to each generated ID, guaranteeing
    /// uniqueness even if the underlying RNG ever repeats.
    pub use_counter: bool,
}

impl Default for IdConfig {
    fn default() -> Self {
        Self {
            seed: None,
            use_counter: false,
        }
    }
}

/// Generates string IDs for runs, sessions, and other workflow entities.
pub struct IdGenerator {
    rng: Mutex<DeterministicRng>,
    counter: AtomicU64,
    use_counter: bool,
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(IdConfig::default())
    }

    #[must_use]
    pub fn with_config(config: IdConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            rng: Mutex::new(DeterministicRng::new(seed)),
            counter: AtomicU64::new(0),
            use_counter: config.use_counter,
        }
    }

    /// Generates a bare ID (no prefix).
    pub fn generate_id(&self) -> String {
        let rand_part = {
            let mut rng = self.rng.lock().expect("id generator rng poisoned");
            rng.random_u64()
        };
        if self.use_counter {
            let n = self.counter.fetch_add(1, Ordering::SeqCst);
            format!("{rand_part:x}-{n}")
        } else {
            format!("{rand_part:x}")
        }
    }

    /// Generates a run ID, prefixed for readability in logs and traces.
    pub fn generate_run_id(&self) -> String {
        format!("run-{}", self.generate_id())
    }

    /// Generates a session ID, prefixed for readability in logs and traces.
    pub fn generate_session_id(&self) -> String {
        format!("session-{}", self.generate_id())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
