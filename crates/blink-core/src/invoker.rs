//! Periodic Invoker - Disarmed/Armed timer state machine
//!
//! The invoker never sleeps on its own. Whoever owns the execution context
//! asks for [`PeriodicInvoker::next_deadline`], waits until then and calls
//! [`PeriodicInvoker::poll`]. The callback runs inside `poll`, so firings are
//! serialized by construction.

use embassy_time::{Duration, Instant};

/// Zero-argument timer callback.
///
/// Plain function pointers carry no environment. State the callback needs
/// must live in process-wide storage.
pub type TimerCallback = fn();

/// Documented ceiling for a single callback run before the platform watchdog
/// may reset the chip.
pub const WATCHDOG_BUDGET: Duration = Duration::from_millis(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvokerError {
    /// Operation requires the timer to be disarmed first
    Armed,
    /// No callback bound yet
    NoCallback,
    /// Period must be at least one tick
    ZeroPeriod,
}

/// Invoker lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvokerState {
    Disarmed,
    Armed {
        /// When the next firing is due
        deadline: Instant,
        period: Duration,
        repeat: bool,
    },
}

/// Record of one callback invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Firing {
    /// Deadline the firing was scheduled for
    pub scheduled: Instant,
    /// Time passed to `poll`, i.e. when the firing was serviced
    pub started: Instant,
    /// Wall time spent inside the callback
    pub elapsed: Duration,
}

impl Firing {
    /// How late the firing was serviced relative to its deadline
    pub fn latency(&self) -> Duration {
        self.started.saturating_duration_since(self.scheduled)
    }

    pub fn within_watchdog_budget(&self) -> bool {
        self.elapsed < WATCHDOG_BUDGET
    }
}

pub struct PeriodicInvoker {
    callback: Option<TimerCallback>,
    state: InvokerState,
}

impl Default for PeriodicInvoker {
    fn default() -> Self {
        Self::new()
    }
}

impl PeriodicInvoker {
    pub const fn new() -> Self {
        Self {
            callback: None,
            state: InvokerState::Disarmed,
        }
    }

    pub fn state(&self) -> InvokerState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, InvokerState::Armed { .. })
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            InvokerState::Armed { deadline, .. } => Some(deadline),
            InvokerState::Disarmed => None,
        }
    }

    /// Stop any pending firing. Safe to call in any state.
    pub fn disarm(&mut self) {
        self.state = InvokerState::Disarmed;
    }

    /// Bind the function to invoke on each firing.
    pub fn bind_callback(&mut self, callback: TimerCallback) -> Result<(), InvokerError> {
        if self.is_armed() {
            return Err(InvokerError::Armed);
        }
        self.callback = Some(callback);
        Ok(())
    }

    /// Schedule the first firing `period` after `now`.
    ///
    /// With `repeat` the timer re-arms itself after every firing until
    /// [`disarm`](Self::disarm); otherwise it disarms after one firing.
    pub fn arm(&mut self, period: Duration, repeat: bool, now: Instant) -> Result<(), InvokerError> {
        if self.is_armed() {
            return Err(InvokerError::Armed);
        }
        if self.callback.is_none() {
            return Err(InvokerError::NoCallback);
        }
        if period == Duration::from_ticks(0) {
            return Err(InvokerError::ZeroPeriod);
        }

        self.state = InvokerState::Armed {
            deadline: now + period,
            period,
            repeat,
        };
        Ok(())
    }

    /// Fire the callback once if the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Firing> {
        self.take_due(now).map(Due::run)
    }

    /// Advance the state machine past a due deadline without running the
    /// callback yet.
    ///
    /// Lets a caller release whatever lock guards the invoker before the
    /// callback runs. A repeating timer that fell a whole period behind is
    /// rescheduled from `now` instead of replaying the missed firings.
    pub fn take_due(&mut self, now: Instant) -> Option<Due> {
        let InvokerState::Armed {
            deadline,
            period,
            repeat,
        } = self.state
        else {
            return None;
        };
        if now < deadline {
            return None;
        }
        let callback = self.callback?;

        self.state = if repeat {
            let mut next = deadline + period;
            if next <= now {
                next = now + period;
            }
            InvokerState::Armed {
                deadline: next,
                period,
                repeat,
            }
        } else {
            InvokerState::Disarmed
        };

        Some(Due {
            callback,
            scheduled: deadline,
            started: now,
        })
    }
}

/// A firing that is due but has not run yet
#[must_use]
pub struct Due {
    callback: TimerCallback,
    scheduled: Instant,
    started: Instant,
}

impl Due {
    /// Invoke the callback and measure how long it held the CPU.
    pub fn run(self) -> Firing {
        let entered = Instant::now();
        (self.callback)();
        let elapsed = Instant::now().saturating_duration_since(entered);

        Firing {
            scheduled: self.scheduled,
            started: self.started,
            elapsed,
        }
    }
}
