//! Driver for APA102 / SK9822 led strings on a clock + data bus.

mod error;
pub mod frame;
mod led_string;
mod pixel;
pub mod sink;

pub use error::{Error, Result};
pub use led_string::LedString;
pub use pixel::{Pixel, RGB};
pub use sink::{available_ports, ByteSink};
