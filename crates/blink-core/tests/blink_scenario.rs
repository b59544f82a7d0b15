//! Boot-to-blink scenarios driven with simulated time.

mod common;

use core::cell::RefCell;

use blink_core::{GpioBank, Level, PeriodicInvoker, PinController, PinId, WATCHDOG_BUDGET};
use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};
use embassy_time::{Duration, Instant};

use common::RegisterFile;

const PIN2: PinId = PinId::new(2);
const PERIOD: Duration = Duration::from_millis(1000);

type SharedPin = Mutex<CriticalSectionRawMutex, RefCell<Option<PinController<RegisterFile>>>>;

fn toggle(cell: &SharedPin) {
    cell.lock(|pin| {
        if let Some(pin) = pin.borrow_mut().as_mut() {
            pin.toggle();
        }
    });
}

fn bit2(cell: &SharedPin) -> u32 {
    cell.lock(|pin| pin.borrow().as_ref().map_or(0, |pin| pin.bank().bit(PIN2)))
}

fn boot(cell: &SharedPin, power_on_output: u32) {
    let mut bank = RegisterFile::with_output(power_on_output);
    bank.init();
    let mut pin = PinController::new(bank, PIN2);
    pin.configure_as_output();
    pin.set_level(Level::Low);
    cell.lock(|slot| *slot.borrow_mut() = Some(pin));
}

#[test]
fn blinks_from_low_on_each_firing() {
    static PIN: SharedPin = Mutex::new(RefCell::new(None));
    fn on_tick() {
        toggle(&PIN);
    }

    // Undefined power-on level: pin 2 happens to be high
    boot(&PIN, 0b100);
    assert_eq!(bit2(&PIN), 0);
    assert!(PIN.lock(|pin| pin.borrow().as_ref().is_some_and(|pin| pin.bank().initialized)));

    let mut invoker = PeriodicInvoker::new();
    invoker.disarm();
    invoker.bind_callback(on_tick).unwrap();
    invoker.arm(PERIOD, true, Instant::from_millis(0)).unwrap();

    assert!(invoker.poll(Instant::from_millis(999)).is_none());
    assert_eq!(bit2(&PIN), 0);

    invoker.poll(Instant::from_millis(1000)).unwrap();
    assert_eq!(bit2(&PIN), 1);
    invoker.poll(Instant::from_millis(2000)).unwrap();
    assert_eq!(bit2(&PIN), 0);
    invoker.poll(Instant::from_millis(3000)).unwrap();
    assert_eq!(bit2(&PIN), 1);
}

#[test]
fn other_output_bits_survive_blinking() {
    static PIN: SharedPin = Mutex::new(RefCell::new(None));
    fn on_tick() {
        toggle(&PIN);
    }

    let neighbours = 0xF0F0_0F0B & !PIN2.mask();
    boot(&PIN, neighbours);

    let mut invoker = PeriodicInvoker::new();
    invoker.bind_callback(on_tick).unwrap();
    invoker.arm(PERIOD, true, Instant::from_millis(0)).unwrap();

    for tick in 1..=6u64 {
        invoker.poll(Instant::from_millis(tick * 1000)).unwrap();
        let out = PIN.lock(|pin| pin.borrow().as_ref().map(|pin| pin.bank().out)).unwrap();
        assert_eq!(out & !PIN2.mask(), neighbours);
    }
}

#[test]
fn repeating_timer_fires_every_period_until_disarmed() {
    static PIN: SharedPin = Mutex::new(RefCell::new(None));
    fn on_tick() {
        toggle(&PIN);
    }

    boot(&PIN, 0);
    let mut invoker = PeriodicInvoker::new();
    invoker.bind_callback(on_tick).unwrap();
    invoker.arm(PERIOD, true, Instant::from_millis(0)).unwrap();

    // Step the clock in 10 ms slices, as a busy executor would
    let mut fired_at = Vec::new();
    for now in (0..=5000u64).step_by(10) {
        if let Some(firing) = invoker.poll(Instant::from_millis(now)) {
            fired_at.push(firing.started.as_millis());
        }
    }
    assert_eq!(fired_at, vec![1000, 2000, 3000, 4000, 5000]);

    invoker.disarm();
    for now in (5000..=10_000u64).step_by(10) {
        assert!(invoker.poll(Instant::from_millis(now)).is_none());
    }
    assert_eq!(bit2(&PIN), 1);
}

#[test]
fn single_shot_toggles_exactly_once() {
    static PIN: SharedPin = Mutex::new(RefCell::new(None));
    fn on_tick() {
        toggle(&PIN);
    }

    boot(&PIN, 0);
    let mut invoker = PeriodicInvoker::new();
    invoker.bind_callback(on_tick).unwrap();
    invoker.arm(PERIOD, false, Instant::from_millis(0)).unwrap();

    let firings = (0..=10_000u64)
        .step_by(50)
        .filter_map(|now| invoker.poll(Instant::from_millis(now)))
        .count();

    assert_eq!(firings, 1);
    assert!(!invoker.is_armed());
    assert_eq!(bit2(&PIN), 1);
}

#[test]
fn toggle_callback_stays_within_watchdog_budget() {
    static PIN: SharedPin = Mutex::new(RefCell::new(None));
    fn on_tick() {
        toggle(&PIN);
    }

    boot(&PIN, 0);
    let mut invoker = PeriodicInvoker::new();
    invoker.bind_callback(on_tick).unwrap();
    invoker.arm(PERIOD, true, Instant::from_millis(0)).unwrap();

    for tick in 1..=100u64 {
        let firing = invoker.poll(Instant::from_millis(tick * 1000)).unwrap();
        assert!(
            firing.elapsed < WATCHDOG_BUDGET,
            "firing {tick} took {} us",
            firing.elapsed.as_micros()
        );
    }
}

#[test]
fn reconfiguring_before_first_level_is_harmless() {
    let mut once = PinController::new(RegisterFile::with_output(0x10), PIN2);
    once.configure_as_output();
    once.set_level(Level::Low);
    once.toggle();

    let mut thrice = PinController::new(RegisterFile::with_output(0x10), PIN2);
    thrice.configure_as_output();
    thrice.configure_as_output();
    thrice.configure_as_output();
    thrice.set_level(Level::Low);
    thrice.toggle();

    assert_eq!(once.bank().out, thrice.bank().out);
    assert_eq!(once.bank().enable, thrice.bank().enable);
    assert_eq!(once.bank().func_gpio, thrice.bank().func_gpio);
}
