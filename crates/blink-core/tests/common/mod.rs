//! Register file standing in for the memory-mapped GPIO block.

use blink_core::{GpioBank, PinId};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    pub out: u32,
    pub enable: u32,
    pub func_gpio: u32,
    pub initialized: bool,
}

impl RegisterFile {
    /// Register contents at power-on are whatever the last run left behind.
    pub const fn with_output(out: u32) -> Self {
        Self {
            out,
            enable: 0,
            func_gpio: 0,
            initialized: false,
        }
    }

    pub fn bit(&self, pin: PinId) -> u32 {
        (self.out & pin.mask()) >> pin.number()
    }
}

impl GpioBank for RegisterFile {
    fn init(&mut self) {
        self.initialized = true;
    }

    fn select_gpio_function(&mut self, pin: PinId) {
        self.func_gpio |= pin.mask();
    }

    fn output_set(&mut self, set_mask: u32, clear_mask: u32, enable_mask: u32, disable_mask: u32) {
        self.out = (self.out | set_mask) & !clear_mask;
        self.enable = (self.enable | enable_mask) & !disable_mask;
    }

    fn read_output(&self) -> u32 {
        self.out
    }
}
