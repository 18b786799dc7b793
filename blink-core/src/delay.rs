//! Busy-wait delays.

/// Time passing without a timer.
pub trait Delay {
    /// Burn `iterations` loop iterations. More iterations never take less
    /// time, but the wall-clock length depends on the core clock.
    fn spin_delay(&mut self, iterations: u32);
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn spin_delay(&mut self, iterations: u32) {
        (**self).spin_delay(iterations)
    }
}

/// Spin loop kept alive by a volatile tick counter.
///
/// Every iteration reads and writes the counter through volatile accesses,
/// which the optimizer may not remove, so the loop cannot collapse to nothing.
#[derive(Debug, Default)]
pub struct SpinDelay {
    ticks: u32,
}

impl SpinDelay {
    pub const fn new() -> Self {
        SpinDelay { ticks: 0 }
    }

    /// Iterations spun so far, wrapping at `u32::MAX`.
    pub fn ticks(&self) -> u32 {
        // SAFETY: `self.ticks` is a live, aligned field.
        unsafe { core::ptr::read_volatile(&self.ticks) }
    }
}

impl Delay for SpinDelay {
    fn spin_delay(&mut self, iterations: u32) {
        let ticks = &raw mut self.ticks;
        for _ in 0..iterations {
            // SAFETY: `ticks` points at a field of `self`, borrowed mutably here.
            unsafe { ticks.write_volatile(ticks.read_volatile().wrapping_add(1)) };
            nop();
        }
    }
}

#[cfg(target_arch = "arm")]
#[inline(always)]
fn nop() {
    cortex_m::asm::nop();
}

#[cfg(not(target_arch = "arm"))]
#[inline(always)]
fn nop() {
    core::hint::spin_loop();
}
