use blink_core::{Firing, InvokerError, SharedInvoker, TimerCallback};
use embassy_time::Duration;

use crate::config::{BLINK_PERIOD_MS, BLINK_REPEAT};

/// Process-wide software timer
pub static THE_TIMER: SharedInvoker = SharedInvoker::new();

/// Disarm, bind `callback` and arm the blink period.
pub fn start_blink_timer(callback: TimerCallback) -> Result<(), InvokerError> {
    THE_TIMER.disarm();
    THE_TIMER.bind_callback(callback)?;
    THE_TIMER.arm(Duration::from_millis(BLINK_PERIOD_MS), BLINK_REPEAT)
}

/// Task servicing the software timer.
/// Every firing runs its callback here, one at a time.
#[embassy_executor::task]
pub async fn periodic_invoker_task(timer: &'static SharedInvoker) -> ! {
    #[cfg(feature = "log")]
    esp_println::println!("timer: servicing periodic invoker");

    timer.run(report_firing).await
}

fn report_firing(firing: &Firing) {
    #[cfg(feature = "log")]
    if !firing.within_watchdog_budget() {
        esp_println::println!(
            "timer: callback held the cpu for {} us (budget {} us, fired {} us late)",
            firing.elapsed.as_micros(),
            blink_core::WATCHDOG_BUDGET.as_micros(),
            firing.latency().as_micros()
        );
    }
    #[cfg(not(feature = "log"))]
    let _ = firing;
}
