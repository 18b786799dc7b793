//! Build-time settings for the demo blink.

use crate::pin::Pin;

/// Bit of the LED within its port.
pub const LED_PIN: Pin = Pin::new(5);

/// Spin iterations the LED stays lit each cycle.
pub const DELAY_ITERATIONS: u32 = 100_000;
