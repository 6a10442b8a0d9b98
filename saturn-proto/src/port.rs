//! Saturn control-port line abstraction.
//!
//! The protocol layer never touches GPIO registers directly; it drives the
//! port through this trait. Firmware implements it on real pins, host tests
//! implement it with a scripted fake peripheral.

/// Bit position of the TL (acknowledge) line in a [`read_lines`] sample.
///
/// TL is wired separately from the data nibble but is folded into bit 4 of
/// every sample, because some peripherals use it as a fifth data bit (the
/// analog pad's digital-submode marker is a 5-bit value).
///
/// [`read_lines`]: SaturnPort::read_lines
pub const TL: u8 = 1 << 4;

/// Mask selecting the D0-D3 data nibble in a [`read_lines`] sample.
///
/// [`read_lines`]: SaturnPort::read_lines
pub const DATA_MASK: u8 = 0x0F;

/// The six lines of a Saturn controller port.
///
/// Two host-driven select lines (TH, TR) and five peripheral-driven inputs
/// (D0-D3 and TL). Which physical pins these map to is the implementor's
/// concern; pull-ups must be enabled on the inputs so an absent peripheral
/// reads as all-high.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap
/// allocation.
pub trait SaturnPort {
    /// Drive the TH select line.
    fn set_th(&mut self, high: bool);

    /// Drive the TR select/strobe line.
    fn set_tr(&mut self, high: bool);

    /// Sample all input lines at once.
    ///
    /// Bit layout: bit 0 = D0 (up), bit 1 = D1 (down), bit 2 = D2 (left),
    /// bit 3 = D3 (right), bit 4 = TL. Bits 5-7 are zero.
    fn read_lines(&mut self) -> u8;

    /// Busy-wait for the given number of microseconds.
    fn delay_us(&mut self, us: u32);
}
