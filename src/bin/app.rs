#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::Duration;

use esp_backtrace as _;
use esp_hal::{clock::CpuClock, peripherals::GPIO2, timer::timg::TimerGroup};

use esp_blink::infrastructure::drivers::EspGpioBank;
use esp_blink::infrastructure::services::{init_blink_pin, toggle_blink_pin};
use esp_blink::infrastructure::tasks::{THE_TIMER, periodic_invoker_task, start_blink_timer};

esp_bootloader_esp_idf::esp_app_desc!();

/// Configure the LED and arm the blink timer, then return.
///
/// Nothing here waits for the rest of the system to come up.
fn user_init(led: GPIO2<'static>) {
    init_blink_pin(EspGpioBank::new(led));

    if let Err(_err) = start_blink_timer(toggle_blink_pin) {
        #[cfg(feature = "log")]
        esp_println::println!("app: failed to arm blink timer: {:?}", _err);
    }
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();

    // Initialize hardware
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Start rtos
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    #[cfg(feature = "log")]
    esp_println::println!("app: esp-blink {}", esp_blink::config::BUILD_VERSION);

    user_init(peripherals.GPIO2);
    spawner.spawn(periodic_invoker_task(&THE_TIMER)).ok();

    loop {
        embassy_time::Timer::after(Duration::from_secs(5)).await;
    }
}
