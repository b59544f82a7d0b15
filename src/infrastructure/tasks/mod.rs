mod timer;

pub use timer::{THE_TIMER, periodic_invoker_task, start_blink_timer};
