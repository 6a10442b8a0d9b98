//! Saturn peripheral session layer: report cache, device object, and the
//! capability contract a USB transport consumes.
//!
//! [`saturn_proto`] knows how to talk to the peripheral; this crate owns
//! everything that persists between polling cycles - the double-buffered
//! report cache, the latched button mapping, and the session's report
//! model - and exposes it through the [`HidSource`] trait.
//!
//! # Overview
//!
//! - [`source`]: the [`HidSource`] capability contract
//!   (init / update / changed / build_report)
//! - [`cache`]: built-vs-sent report pairs with change detection
//! - [`device`]: [`SaturnDevice`], the session object running one
//!   detect + decode + remap + cache cycle per update
//! - [`descriptor`]: byte-exact static HID report descriptors
//!
//! # Report models
//!
//! Two firmware variants share this crate:
//!
//! - **Dual-report**: one HID interface carrying a 7-byte joystick report
//!   (ID 1) and a 4-byte mouse report (ID 2), both cached independently.
//! - **Consolidated**: a single report without an embedded ID byte. The
//!   bus is probed once at init; a mouse session uses the 3-byte mouse
//!   layout, anything else the 6-byte joystick layout, fixed until reset.
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

pub mod cache;
pub mod descriptor;
pub mod device;
pub mod source;

// Re-export main types at crate root
pub use cache::{ReportCache, MAX_REPORT_SIZE};
pub use device::{ReportModel, SaturnDevice};
pub use source::HidSource;
