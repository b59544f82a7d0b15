use core::cell::RefCell;

use blink_core::{GpioBank, PinController};
use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};
use embedded_hal::delay::DelayNs;
use esp_hal::delay::Delay;

use crate::config::{BLINK_PIN, CALLBACK_YIELD_US, INITIAL_LEVEL};
use crate::infrastructure::drivers::EspGpioBank;

type BlinkPin = PinController<EspGpioBank>;

/// LED pin, reachable from the argument-less timer callback
static BLINK: Mutex<CriticalSectionRawMutex, RefCell<Option<BlinkPin>>> =
    Mutex::new(RefCell::new(None));

/// Bring up GPIO, route the LED pin to plain output and drive it to the
/// initial level.
pub fn init_blink_pin(mut bank: EspGpioBank) {
    bank.init();

    let mut pin = PinController::new(bank, BLINK_PIN);
    pin.configure_as_output();
    pin.set_level(INITIAL_LEVEL);

    BLINK.lock(|cell| {
        cell.borrow_mut().replace(pin);
    });
}

/// Timer callback: invert the LED, then give the CPU back briefly.
///
/// Runs on the executor that also services the radio and must return well
/// inside the watchdog budget.
pub fn toggle_blink_pin() {
    BLINK.lock(|cell| {
        if let Some(pin) = cell.borrow_mut().as_mut() {
            pin.toggle();
        }
    });

    Delay::new().delay_us(CALLBACK_YIELD_US);
}
