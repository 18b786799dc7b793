//! Pin indices within an 8-bit port.

use core::fmt;

/// Number of pins addressed by one 8-bit register.
pub const PORT_WIDTH: u8 = 8;

/// A bit position within a port register, always below [`PORT_WIDTH`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin(u8);

impl Pin {
    /// Panics if `index` does not fit the port. In a `const` this is a
    /// compile error.
    pub const fn new(index: u8) -> Self {
        assert!(index < PORT_WIDTH, "pin index out of range for an 8-bit port");
        Pin(index)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Single-bit pattern selecting this pin.
    pub const fn mask(self) -> u8 {
        1 << self.0
    }
}

impl TryFrom<u8> for Pin {
    type Error = PinOutOfRange;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        if index < PORT_WIDTH {
            Ok(Pin(index))
        } else {
            Err(PinOutOfRange(index))
        }
    }
}

/// Returned when a pin index does not fit an 8-bit port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinOutOfRange(pub u8);

impl fmt::Display for PinOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pin {} does not exist on an {}-bit port",
            self.0, PORT_WIDTH
        )
    }
}

impl core::error::Error for PinOutOfRange {}
