//! Single-pin digital output control
//!
//! The pin level lives in the hardware output register, not in memory.
//! [`PinController`] never keeps a shadow copy: every read goes to the bank.

use core::ops::Not;

/// Number of pins addressable through one 32-bit output register
pub const PINS_PER_BANK: u8 = 32;

/// Logic level of a digital output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Self::Output {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(value: bool) -> Self {
        if value { Level::High } else { Level::Low }
    }
}

impl From<Level> for bool {
    fn from(value: Level) -> Self {
        value.is_high()
    }
}

/// GPIO number within the output register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinId(u8);

impl PinId {
    /// Panics (at compile time in const context) on numbers outside the bank.
    pub const fn new(number: u8) -> Self {
        assert!(number < PINS_PER_BANK, "pin number outside the output register");
        Self(number)
    }

    pub const fn number(self) -> u8 {
        self.0
    }

    /// Single-bit mask of this pin in the output register (`BIT2` for pin 2)
    pub const fn mask(self) -> u32 {
        1 << self.0
    }
}

/// Memory-mapped GPIO register bank
///
/// Implementations are thin wrappers around volatile register access.
/// None of the operations can fail on a valid pin.
pub trait GpioBank {
    /// Bring up the GPIO subsystem. Called once before any other access.
    fn init(&mut self);

    /// Route `pin` to its plain GPIO function, overriding any other mux setting.
    fn select_gpio_function(&mut self, pin: PinId);

    /// Combined output write.
    ///
    /// Bits in `set_mask` are driven high, bits in `clear_mask` driven low,
    /// bits in `enable_mask` become outputs and bits in `disable_mask` become
    /// inputs. Bits outside all four masks are left untouched.
    fn output_set(&mut self, set_mask: u32, clear_mask: u32, enable_mask: u32, disable_mask: u32);

    /// Raw read of the output register
    fn read_output(&self) -> u32;
}

/// Owner of one digital output line
pub struct PinController<B: GpioBank> {
    bank: B,
    pin: PinId,
}

impl<B: GpioBank> PinController<B> {
    pub const fn new(bank: B, pin: PinId) -> Self {
        Self { bank, pin }
    }

    pub fn pin(&self) -> PinId {
        self.pin
    }

    pub fn bank(&self) -> &B {
        &self.bank
    }

    #[cfg(test)]
    pub(crate) fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }

    /// Select the GPIO function and enable the output driver.
    ///
    /// Must run before the first level operation. Repeated calls leave the
    /// pin in the same state as a single call.
    pub fn configure_as_output(&mut self) {
        self.bank.select_gpio_function(self.pin);
        self.bank.output_set(0, 0, self.pin.mask(), 0);
    }

    /// Drive the pin to `level` without touching any other output bit.
    pub fn set_level(&mut self, level: Level) {
        let mask = self.pin.mask();
        match level {
            Level::High => self.bank.output_set(mask, 0, mask, 0),
            Level::Low => self.bank.output_set(0, mask, mask, 0),
        }
    }

    /// Current level as reported by the output register
    pub fn level(&self) -> Level {
        Level::from(self.bank.read_output() & self.pin.mask() != 0)
    }

    /// Invert the pin and return the level that was written.
    pub fn toggle(&mut self) -> Level {
        let next = !self.level();
        self.set_level(next);
        next
    }
}
