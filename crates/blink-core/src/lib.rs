#![no_std]

//! Blink core - pin control and timer-driven re-entry
//!
//! Layers:
//! - `pin` - Hardware seam ([`GpioBank`] trait) and the single-pin [`PinController`]
//! - `invoker` - Disarmed/Armed [`PeriodicInvoker`] state machine
//! - `runner` - Process-wide [`SharedInvoker`] serviced on the embassy executor
//!
//! Everything here is generic over the register bank so it runs on the host.

pub mod invoker;
pub mod pin;
pub mod runner;

pub use invoker::{
    Due, Firing, InvokerError, InvokerState, PeriodicInvoker, TimerCallback, WATCHDOG_BUDGET,
};
pub use pin::{GpioBank, Level, PinController, PinId};
pub use runner::SharedInvoker;
