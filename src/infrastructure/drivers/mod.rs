mod gpio_registers;

pub use gpio_registers::EspGpioBank;
