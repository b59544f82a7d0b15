use core::cell::RefCell;

use embassy_futures::select::{Either, select};
use embassy_sync::{
    blocking_mutex::{Mutex, raw::CriticalSectionRawMutex},
    signal::Signal,
};
use embassy_time::{Duration, Instant, Timer};

use crate::invoker::{Firing, InvokerError, InvokerState, PeriodicInvoker, TimerCallback};

/// Process-wide periodic invoker.
///
/// Lives in a `static` and is serviced by a single task running
/// [`SharedInvoker::run`] on the same executor as everything else. The
/// callback runs outside the critical section, so it may itself call
/// [`disarm`](Self::disarm).
pub struct SharedInvoker {
    invoker: Mutex<CriticalSectionRawMutex, RefCell<PeriodicInvoker>>,
    /// Wakes the runner when the schedule changes under it
    schedule_changed: Signal<CriticalSectionRawMutex, ()>,
}

impl Default for SharedInvoker {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedInvoker {
    pub const fn new() -> Self {
        Self {
            invoker: Mutex::new(RefCell::new(PeriodicInvoker::new())),
            schedule_changed: Signal::new(),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut PeriodicInvoker) -> R) -> R {
        self.invoker.lock(|cell| f(&mut cell.borrow_mut()))
    }

    pub fn state(&self) -> InvokerState {
        self.with(|invoker| invoker.state())
    }

    pub fn is_armed(&self) -> bool {
        self.with(|invoker| invoker.is_armed())
    }

    pub fn disarm(&self) {
        self.with(PeriodicInvoker::disarm);
        self.schedule_changed.signal(());
    }

    pub fn bind_callback(&self, callback: TimerCallback) -> Result<(), InvokerError> {
        self.with(|invoker| invoker.bind_callback(callback))
    }

    /// Arm relative to the current time. See [`PeriodicInvoker::arm`].
    pub fn arm(&self, period: Duration, repeat: bool) -> Result<(), InvokerError> {
        self.with(|invoker| invoker.arm(period, repeat, Instant::now()))?;
        self.schedule_changed.signal(());
        Ok(())
    }

    /// Wait for the next deadline and fire once.
    ///
    /// Returns `None` when the wait was cut short by a schedule change.
    pub async fn step(&self) -> Option<Firing> {
        let Some(deadline) = self.with(|invoker| invoker.next_deadline()) else {
            self.schedule_changed.wait().await;
            return None;
        };

        if let Either::Second(()) =
            select(Timer::at(deadline), self.schedule_changed.wait()).await
        {
            return None;
        }

        let due = self.with(|invoker| invoker.take_due(Instant::now()))?;
        Some(due.run())
    }

    /// Service the invoker forever, handing each firing to `on_firing`.
    pub async fn run(&self, mut on_firing: impl FnMut(&Firing)) -> ! {
        loop {
            if let Some(firing) = self.step().await {
                on_firing(&firing);
            }
        }
    }
}
