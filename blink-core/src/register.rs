//! Memory-mapped register writes.

use core::{fmt, ptr};

/// Address of an 8-bit memory-mapped register.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterAddress(usize);

impl RegisterAddress {
    pub const fn new(address: usize) -> Self {
        RegisterAddress(address)
    }

    pub const fn get(self) -> usize {
        self.0
    }

    /// The register `offset` bytes past this one.
    pub const fn offset(self, offset: usize) -> Self {
        RegisterAddress(self.0 + offset)
    }
}

impl fmt::Debug for RegisterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// Anything that can take a byte write at a register address.
///
/// Every call is a distinct observable event. Implementations must not
/// cache, merge, reorder or drop writes, even when two consecutive writes
/// hit the same address with the same value.
pub trait RegisterBus {
    fn write_register(&mut self, address: RegisterAddress, value: u8);
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    #[inline(always)]
    fn write_register(&mut self, address: RegisterAddress, value: u8) {
        (**self).write_register(address, value)
    }
}

/// Handle to a single write-only register.
///
/// Wraps an address and exposes nothing but [`Register::write`], which is
/// compiled to exactly one volatile store.
#[derive(Debug)]
pub struct Register {
    address: RegisterAddress,
}

impl Register {
    /// # Safety
    ///
    /// `address` must be valid for byte writes for as long as the handle is
    /// used. Nothing checks this: a wrong address silently writes whatever
    /// lives there.
    pub const unsafe fn at(address: RegisterAddress) -> Self {
        Register { address }
    }

    pub const fn address(&self) -> RegisterAddress {
        self.address
    }

    #[inline(always)]
    pub fn write(&self, value: u8) {
        let ptr = ptr::with_exposed_provenance_mut::<u8>(self.address.get());
        // SAFETY: guaranteed by the caller of `Register::at`.
        unsafe { ptr::write_volatile(ptr, value) }
    }
}

/// The physical address space, written through volatile stores.
#[derive(Debug)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// # Safety
    ///
    /// Every address later passed to [`RegisterBus::write_register`] must be
    /// valid for byte writes. See [`Register::at`].
    pub const unsafe fn new() -> Self {
        Mmio { _private: () }
    }
}

impl RegisterBus for Mmio {
    #[inline(always)]
    fn write_register(&mut self, address: RegisterAddress, value: u8) {
        // SAFETY: guaranteed by the caller of `Mmio::new`.
        unsafe { Register::at(address) }.write(value)
    }
}
