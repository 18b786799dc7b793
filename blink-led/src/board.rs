//! Nucleo-F446RE wiring.

use blink_core::{Pin, PortLayout, RegisterAddress};

/// LD2, the green user LED, sits on PA5.
pub const LED: Pin = blink_core::config::LED_PIN;

pub const GPIOA: Moder = Moder::new(RegisterAddress::new(0x4002_0000));

const MODER: usize = 0x00;
const ODR: usize = 0x14;

/// General-purpose output in a MODER field.
const MODE_OUTPUT: u8 = 0b01;

/// STM32 GPIO port: two mode bits per pin in MODER, one level bit per pin in
/// ODR.
///
/// Both registers are 32 bits wide but take byte writes. The mode write hits
/// the MODER byte holding the pin's field, which also resets the other three
/// pins in that byte to input. Data writes go to the low ODR byte, pins 0-7.
#[derive(Clone, Copy, Debug)]
pub struct Moder {
    base: RegisterAddress,
}

impl Moder {
    pub const fn new(base: RegisterAddress) -> Self {
        Moder { base }
    }
}

impl PortLayout for Moder {
    fn output_mode(&self, pin: Pin) -> (RegisterAddress, u8) {
        let byte = usize::from(pin.index() / 4);
        let shift = (pin.index() % 4) * 2;
        (self.base.offset(MODER + byte), MODE_OUTPUT << shift)
    }

    fn data(&self) -> RegisterAddress {
        self.base.offset(ODR)
    }
}
