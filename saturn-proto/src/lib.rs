//! Sega Saturn controller-port protocol, chip-agnostic.
//!
//! Saturn peripherals talk over a parallel-style handshake bus: the host
//! drives two select lines (TH, TR) and the peripheral answers on four data
//! lines (D0-D3) plus an acknowledge line (TL). This crate implements the
//! full line-level protocol without touching any hardware, so it can be
//! unit-tested on the host and reused by any firmware that provides a
//! [`SaturnPort`] implementation.
//!
//! # Overview
//!
//! - [`port`]: the [`SaturnPort`] line abstraction the firmware implements
//! - [`xfer`]: nibble handshake with bounded busy-wait ([`read_nibble`],
//!   [`read_burst`])
//! - [`detect`]: peripheral classification from the idle probe pattern
//! - [`decode`]: the digital-pad, analog-pad, and mouse decoders
//! - [`remap`]: power-on-latched button permutation ([`RemapEngine`])
//! - [`report`]: fixed-layout report buffers ([`JoystickReport`],
//!   [`MouseReport`])
//!
//! # Protocol
//!
//! With TH and TR both high the peripheral presents an identification
//! pattern on the data lines; [`detect`](detect::detect) classifies it.
//! Digital pads are then read with four plain line-state samples, while
//! analog pads (14 nibbles) and mice (8 nibbles) are clocked out one nibble
//! per TR edge, the peripheral acknowledging each edge by mirroring it on
//! TL. A TL acknowledge that does not arrive within the
//! [timing budget](xfer::TL_POLL_BUDGET) aborts the whole transaction and
//! leaves the previous report untouched.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod decode;
pub mod detect;
pub mod port;
pub mod remap;
pub mod report;
pub mod xfer;

#[cfg(test)]
mod testutil;

// Re-export main types at crate root
pub use decode::{read_analog_pad, read_digital_pad, read_mouse};
pub use detect::{classify, detect, PeripheralKind};
pub use port::SaturnPort;
pub use remap::{ButtonMapping, RemapEngine};
pub use report::{JoystickReport, MouseReport, SaturnButtons};
pub use xfer::{read_burst, read_nibble, XferError};
