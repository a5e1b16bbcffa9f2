//! Rate limiter deciding when the detector runs.

use tracing::trace;

/// Throttles detector invocations to at most one per `interval_secs`.
///
/// Frames arriving in between skip inference and are rendered from the last
/// known state.
#[derive(Debug, Clone)]
pub struct SamplingGovernor {
    interval_secs: f64,
    last_invocation: Option<f64>,
    attempts: u64,
    invocations: u64,
}

/// Counters describing how often inference actually ran.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GovernorStats {
    pub attempts: u64,
    pub invocations: u64,
}

impl GovernorStats {
    /// Fraction of frames that ran inference.
    pub fn inference_ratio(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.invocations as f64 / self.attempts as f64
        }
    }
}

impl SamplingGovernor {
    pub fn new(interval_secs: f64) -> Self {
        Self {
            interval_secs,
            last_invocation: None,
            attempts: 0,
            invocations: 0,
        }
    }

    pub fn interval_secs(&self) -> f64 {
        self.interval_secs
    }

    /// Returns true iff more than the interval has passed since the last run.
    /// The first call always runs.
    pub fn should_run(&mut self, now: f64) -> bool {
        self.attempts += 1;

        let run = match self.last_invocation {
            None => true,
            Some(last) => now - last > self.interval_secs,
        };

        if run {
            self.last_invocation = Some(now);
            self.invocations += 1;
        }
        trace!(now, run, "sampling decision");
        run
    }

    pub fn last_invocation(&self) -> Option<f64> {
        self.last_invocation
    }

    pub fn stats(&self) -> GovernorStats {
        GovernorStats {
            attempts: self.attempts,
            invocations: self.invocations,
        }
    }

    /// Forget the last invocation so the next call runs.
    pub fn reset(&mut self) {
        self.last_invocation = None;
        self.attempts = 0;
        self.invocations = 0;
    }
}
