use blink_core::{Level, PinId};

/// On-board LED of the devkit
pub const BLINK_PIN: PinId = PinId::new(2);
pub const INITIAL_LEVEL: Level = Level::Low;

pub const BLINK_PERIOD_MS: u64 = 1000;
pub const BLINK_REPEAT: bool = true;

/// Busy delay at the end of every timer callback, leaves the CPU to
/// background work before the next firing
pub const CALLBACK_YIELD_US: u32 = 100;

pub const BUILD_VERSION: &str = env!("BUILD_VERSION");
