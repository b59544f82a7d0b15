//! Infrastructure layer - hardware-backed implementations
//!
//! Registers, process-wide storage and the embassy task that keeps the
//! software timer serviced.

pub mod drivers;
pub mod services;
pub mod tasks;
