//! Host-side stand-in for hardware registers.
//!
//! A [`Trace`] hands out a [`TraceBus`] and a [`TraceDelay`] that log into
//! the same timeline, so tests can check both which writes happened and how
//! long the controller spun between them.

use std::{cell::RefCell, panic, rc::Rc};

use crate::{
    delay::{Delay, SpinDelay},
    register::{RegisterAddress, RegisterBus},
};

/// One recorded register write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Write {
    pub address: RegisterAddress,
    pub value: u8,
    pub sequence: usize,
}

impl Write {
    pub fn pair(&self) -> (usize, u8) {
        (self.address.get(), self.value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Write(Write),
    /// A delay call and the iterations it actually spun.
    Spin { iterations: u32, sequence: usize },
}

/// Panic payload raised once the write limit is reached.
#[derive(Debug)]
pub struct Halt;

#[derive(Debug, Default)]
struct Log {
    events: Vec<Event>,
    writes: usize,
    limit: Option<usize>,
}

/// Shared timeline of writes and delays.
#[derive(Clone, Debug, Default)]
pub struct Trace {
    log: Rc<RefCell<Log>>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the controller by unwinding with [`Halt`] after `limit` writes.
    pub fn with_write_limit(limit: usize) -> Self {
        let trace = Self::new();
        trace.log.borrow_mut().limit = Some(limit);
        trace
    }

    pub fn bus(&self) -> TraceBus {
        TraceBus { log: self.log.clone() }
    }

    pub fn delay(&self) -> TraceDelay {
        TraceDelay {
            log: self.log.clone(),
            spin: SpinDelay::new(),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().events.clone()
    }

    pub fn writes(&self) -> Vec<Write> {
        self.log
            .borrow()
            .events
            .iter()
            .filter_map(|event| match event {
                Event::Write(write) => Some(*write),
                Event::Spin { .. } => None,
            })
            .collect()
    }

    /// Writes as `(address, value)`.
    pub fn pairs(&self) -> Vec<(usize, u8)> {
        self.writes().iter().map(Write::pair).collect()
    }
}

/// Records writes instead of performing them.
#[derive(Debug)]
pub struct TraceBus {
    log: Rc<RefCell<Log>>,
}

impl RegisterBus for TraceBus {
    fn write_register(&mut self, address: RegisterAddress, value: u8) {
        let halt = {
            let mut log = self.log.borrow_mut();
            let sequence = log.events.len();
            log.events.push(Event::Write(Write {
                address,
                value,
                sequence,
            }));
            log.writes += 1;
            log.limit.is_some_and(|limit| log.writes >= limit)
        };

        if halt {
            panic::panic_any(Halt);
        }
    }
}

/// Spins for real and records how many iterations went by.
#[derive(Debug)]
pub struct TraceDelay {
    log: Rc<RefCell<Log>>,
    spin: SpinDelay,
}

impl TraceDelay {
    /// Total iterations spun through this delay.
    pub fn ticks(&self) -> u32 {
        self.spin.ticks()
    }
}

impl Delay for TraceDelay {
    fn spin_delay(&mut self, iterations: u32) {
        let before = self.spin.ticks();
        self.spin.spin_delay(iterations);
        let elapsed = self.spin.ticks().wrapping_sub(before);

        let mut log = self.log.borrow_mut();
        let sequence = log.events.len();
        log.events.push(Event::Spin {
            iterations: elapsed,
            sequence,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_and_delay_share_a_timeline() {
        let trace = Trace::new();
        let mut bus = trace.bus();
        let mut delay = trace.delay();

        bus.write_register(RegisterAddress::new(0x05), 0x20);
        delay.spin_delay(7);
        bus.write_register(RegisterAddress::new(0x05), 0x00);

        let events = trace.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[1], Event::Spin { iterations: 7, sequence: 1 }));
        assert_eq!(trace.writes()[1].sequence, 2);
        assert_eq!(trace.pairs(), [(0x05, 0x20), (0x05, 0x00)]);
    }

    #[test]
    fn repeated_identical_writes_are_all_kept() {
        let trace = Trace::new();
        let mut bus = trace.bus();

        for _ in 0..3 {
            bus.write_register(RegisterAddress::new(0x05), 0x00);
        }

        assert_eq!(trace.writes().len(), 3);
    }

    #[test]
    #[should_panic]
    fn limit_halts_on_last_write() {
        let trace = Trace::with_write_limit(2);
        let mut bus = trace.bus();
        bus.write_register(RegisterAddress::new(0x04), 0x20);
        bus.write_register(RegisterAddress::new(0x05), 0x20);
    }
}
