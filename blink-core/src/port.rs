//! How a port's registers drive its pins.

use crate::{pin::Pin, register::RegisterAddress};

/// Register map of one GPIO port.
///
/// The blink protocol is the same everywhere: put the pin in output mode,
/// drive the data register, clear it. Only the addresses and the shape of the
/// mode write differ between chips.
pub trait PortLayout {
    /// The write that switches `pin` to output mode.
    fn output_mode(&self, pin: Pin) -> (RegisterAddress, u8);

    /// Register holding the driven level of every pin in the port.
    fn data(&self) -> RegisterAddress;
}

impl<L: PortLayout + ?Sized> PortLayout for &L {
    fn output_mode(&self, pin: Pin) -> (RegisterAddress, u8) {
        (**self).output_mode(pin)
    }

    fn data(&self) -> RegisterAddress {
        (**self).data()
    }
}

/// Port with one direction bit per pin: a set bit makes the pin an output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitPerPin {
    pub direction: RegisterAddress,
    pub data: RegisterAddress,
}

impl BitPerPin {
    /// Direction register at `0x04`, data register at `0x05`.
    pub const DEMO: BitPerPin =
        BitPerPin::new(RegisterAddress::new(0x04), RegisterAddress::new(0x05));

    pub const fn new(direction: RegisterAddress, data: RegisterAddress) -> Self {
        BitPerPin { direction, data }
    }
}

impl PortLayout for BitPerPin {
    fn output_mode(&self, pin: Pin) -> (RegisterAddress, u8) {
        (self.direction, pin.mask())
    }

    fn data(&self) -> RegisterAddress {
        self.data
    }
}
