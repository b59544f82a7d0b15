mod blink;

pub use blink::{init_blink_pin, toggle_blink_pin};
