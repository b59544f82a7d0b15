use blink_core::{GpioBank, PinId};
use esp_hal::peripherals::{GPIO, GPIO2, IO_MUX};

/// GPIO matrix output signal that drives the pad straight from `GPIO_OUT`
const SIG_GPIO_OUT_IDX: u16 = 256;

/// `MCU_SEL` value routing a pad to its plain GPIO function
const PIN_FUNC_GPIO: u8 = 2;

/// `IO_MUX` pad registers are laid out in pad order, not GPIO order.
/// Index of each GPIO's pad register, `None` where the pad does not exist.
const IO_MUX_INDEX: [Option<usize>; 32] = [
    Some(16), Some(33), Some(15), Some(32), Some(17), Some(26), Some(23), Some(24), // 0..=7
    Some(25), Some(20), Some(21), Some(22), Some(12), Some(13), Some(11), Some(14), // 8..=15
    Some(18), Some(19), Some(27), Some(28), Some(29), Some(30), Some(31), Some(34), // 16..=23
    None, Some(8), Some(9), Some(10), None, None, None, None, // 24..=31
];

/// Low GPIO bank (GPIO 0..=31) through the `esp_hal` register blocks.
///
/// Holds the `GPIO2` peripheral so no `esp_hal` driver can claim the LED pin
/// while the timer callback writes it.
pub struct EspGpioBank {
    _led: GPIO2<'static>,
}

impl EspGpioBank {
    pub fn new(led: GPIO2<'static>) -> Self {
        Self { _led: led }
    }
}

impl GpioBank for EspGpioBank {
    fn init(&mut self) {
        // esp_hal::init already released the GPIO matrix from reset
    }

    fn select_gpio_function(&mut self, pin: PinId) {
        let number = usize::from(pin.number());
        let Some(pad) = IO_MUX_INDEX[number] else {
            return;
        };

        IO_MUX::regs()
            .gpio(pad)
            .modify(|_, w| unsafe { w.mcu_sel().bits(PIN_FUNC_GPIO) });
        GPIO::regs()
            .func_out_sel_cfg(number)
            .write(|w| unsafe { w.out_sel().bits(SIG_GPIO_OUT_IDX) });
    }

    fn output_set(&mut self, set_mask: u32, clear_mask: u32, enable_mask: u32, disable_mask: u32) {
        let gpio = GPIO::regs();

        // W1TS/W1TC registers only touch the bits written as 1
        if set_mask != 0 {
            gpio.out_w1ts().write(|w| unsafe { w.bits(set_mask) });
        }
        if clear_mask != 0 {
            gpio.out_w1tc().write(|w| unsafe { w.bits(clear_mask) });
        }
        if enable_mask != 0 {
            gpio.enable_w1ts().write(|w| unsafe { w.bits(enable_mask) });
        }
        if disable_mask != 0 {
            gpio.enable_w1tc().write(|w| unsafe { w.bits(disable_mask) });
        }
    }

    fn read_output(&self) -> u32 {
        GPIO::regs().out().read().bits()
    }
}
