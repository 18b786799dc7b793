//! Register-level LED blinking for bare-metal targets.
//!
//! Two primitives do all the work: a volatile byte write to a memory-mapped
//! register ([`RegisterBus`]) and a busy-wait that cannot be optimized away
//! ([`Delay`]). [`Blinker`] composes them into the configure, assert, wait,
//! deassert cycle and repeats it forever.
//!
//! The crate is `no_std`. Host tests substitute the `trace` recorder for
//! real memory.

#![cfg_attr(not(any(test, feature = "trace")), no_std)]

pub mod blink;
pub mod config;
pub mod delay;
pub mod pin;
pub mod port;
pub mod register;
#[cfg(any(test, feature = "trace"))]
pub mod trace;

pub use blink::{BlinkState, Blinker};
pub use delay::{Delay, SpinDelay};
pub use pin::{Pin, PinOutOfRange};
pub use port::{BitPerPin, PortLayout};
pub use register::{Mmio, Register, RegisterAddress, RegisterBus};
