//! The blink loop.

use crate::{delay::Delay, pin::Pin, port::PortLayout, register::RegisterBus};

/// Where the LED pin is in its cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkState {
    /// Nothing written yet; the pin may still be an input.
    Unconfigured,
    High,
    Low,
}

/// Drives one pin high and low forever.
///
/// Each [`cycle`](Blinker::cycle) performs three writes in this order:
///
/// 1. the output-mode write for the pin,
/// 2. the pin's mask to the data register,
/// 3. `0` to the data register,
///
/// with `iterations` of spin delay between the second and third write. The
/// mode write is repeated every cycle, so a pin reconfigured behind our back
/// recovers on the next pass.
///
/// The deassert writes `0` to the whole data register, clearing every pin of
/// the port and not just ours.
pub struct Blinker<B, D, L> {
    bus: B,
    delay: D,
    layout: L,
    pin: Pin,
    iterations: u32,
    state: BlinkState,
}

impl<B, D, L> Blinker<B, D, L>
where
    B: RegisterBus,
    D: Delay,
    L: PortLayout,
{
    pub fn new(bus: B, delay: D, layout: L, pin: Pin, iterations: u32) -> Self {
        Blinker {
            bus,
            delay,
            layout,
            pin,
            iterations,
            state: BlinkState::Unconfigured,
        }
    }

    pub fn state(&self) -> BlinkState {
        self.state
    }

    pub fn pin(&self) -> Pin {
        self.pin
    }

    /// One full on/off pass. The pin ends low.
    pub fn cycle(&mut self) {
        self.configure();
        self.assert();
        self.delay.spin_delay(self.iterations);
        self.deassert();
    }

    /// Blink until reset or power loss.
    pub fn run(mut self) -> ! {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "blinking pin {=u8} every {=u32} iterations",
            self.pin.index(),
            self.iterations
        );

        loop {
            self.cycle();
        }
    }

    /// Takes the bus, delay and layout back out.
    pub fn release(self) -> (B, D, L) {
        (self.bus, self.delay, self.layout)
    }

    fn configure(&mut self) {
        let (address, value) = self.layout.output_mode(self.pin);
        self.bus.write_register(address, value);
    }

    fn assert(&mut self) {
        self.bus.write_register(self.layout.data(), self.pin.mask());
        self.transition(BlinkState::High);
    }

    fn deassert(&mut self) {
        self.bus.write_register(self.layout.data(), 0);
        self.transition(BlinkState::Low);
    }

    fn transition(&mut self, next: BlinkState) {
        #[cfg(feature = "defmt")]
        defmt::trace!("{} -> {}", self.state, next);

        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use super::*;
    use crate::{
        config::{DELAY_ITERATIONS, LED_PIN},
        port::BitPerPin,
        trace::{Event, Halt, Trace, TraceBus, TraceDelay},
    };

    const CYCLE: [(usize, u8); 3] = [(0x04, 0x20), (0x05, 0x20), (0x05, 0x00)];

    fn demo(trace: &Trace, pin: Pin) -> Blinker<TraceBus, TraceDelay, BitPerPin> {
        Blinker::new(
            trace.bus(),
            trace.delay(),
            BitPerPin::DEMO,
            pin,
            DELAY_ITERATIONS,
        )
    }

    #[test]
    fn one_cycle_writes_configure_assert_deassert() {
        let trace = Trace::new();
        let mut blinker = demo(&trace, LED_PIN);

        blinker.cycle();

        assert_eq!(trace.pairs(), CYCLE);
    }

    #[test]
    fn every_cycle_repeats_the_pattern() {
        let trace = Trace::new();
        let mut blinker = demo(&trace, LED_PIN);

        for _ in 0..5 {
            blinker.cycle();
        }

        let pairs = trace.pairs();
        assert_eq!(pairs.len(), 15);
        for cycle in pairs.chunks(3) {
            assert_eq!(cycle, CYCLE);
        }
    }

    #[test]
    fn delay_sits_between_assert_and_deassert() {
        let trace = Trace::new();
        let mut blinker = demo(&trace, LED_PIN);

        blinker.cycle();
        blinker.cycle();

        let events = trace.events();
        assert_eq!(events.len(), 8);
        for cycle in events.chunks(4) {
            match cycle {
                [
                    Event::Write(direction),
                    Event::Write(assert),
                    Event::Spin { iterations, .. },
                    Event::Write(deassert),
                ] => {
                    assert_eq!(direction.pair(), (0x04, 0x20));
                    assert_eq!(assert.pair(), (0x05, 0x20));
                    assert_eq!(*iterations, DELAY_ITERATIONS);
                    assert_eq!(deassert.pair(), (0x05, 0x00));
                }
                other => panic!("unexpected cycle {other:?}"),
            }
        }
    }

    #[test]
    fn direction_write_precedes_data_writes() {
        let trace = Trace::new();
        let mut blinker = demo(&trace, LED_PIN);

        for _ in 0..3 {
            blinker.cycle();
        }

        let writes = trace.writes();
        for cycle in writes.chunks(3) {
            let direction = &cycle[0];
            assert_eq!(direction.address.get(), 0x04);
            assert!(cycle[1..].iter().all(|w| w.sequence > direction.sequence));
        }
        assert!(writes.windows(2).all(|w| w[0].sequence < w[1].sequence));
    }

    #[test]
    fn pin_zero_shifts_every_mask() {
        let trace = Trace::new();
        let mut blinker = demo(&trace, Pin::new(0));

        blinker.cycle();

        assert_eq!(trace.pairs(), [(0x04, 0x01), (0x05, 0x01), (0x05, 0x00)]);
    }

    #[test]
    fn state_follows_the_pin() {
        let trace = Trace::new();
        let mut blinker = demo(&trace, LED_PIN);
        assert_eq!(blinker.state(), BlinkState::Unconfigured);

        blinker.cycle();
        assert_eq!(blinker.state(), BlinkState::Low);

        let (_, delay, _) = blinker.release();
        assert_eq!(delay.ticks(), DELAY_ITERATIONS);
    }

    #[test]
    fn run_never_returns() {
        const CYCLES: usize = 4;
        let trace = Trace::with_write_limit(CYCLES * 3);
        let blinker = Blinker::new(trace.bus(), trace.delay(), BitPerPin::DEMO, LED_PIN, 10);

        let halted: Result<(), _> =
            panic::catch_unwind(AssertUnwindSafe(|| blinker.run()));

        let payload = halted.expect_err("run returned");
        assert!(payload.is::<Halt>());
        let pairs = trace.pairs();
        assert_eq!(pairs.len(), CYCLES * 3);
        for cycle in pairs.chunks(3) {
            assert_eq!(cycle, CYCLE);
        }
    }
}
