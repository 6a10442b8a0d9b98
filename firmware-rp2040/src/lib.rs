//! Sega Saturn controller to USB HID adapter for RP2040.
//!
//! The firmware polls a Saturn peripheral (digital pad, 3D/analog pad, or
//! mouse) over six GPIO lines and presents it to the host as a USB HID
//! device. All protocol logic lives in the platform-agnostic
//! [`saturn_proto`]/[`saturn_core`] crates; this crate only supplies the
//! GPIO port implementation and the USB plumbing.
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Direction | Description                  |
//! |----------|------|-----------|------------------------------|
//! | TH       | 2    | Out       | Select line                  |
//! | TR       | 3    | Out       | Select/strobe line           |
//! | D0       | 4    | In (pull-up) | Data bit 0 / up           |
//! | D1       | 5    | In (pull-up) | Data bit 1 / down         |
//! | D2       | 6    | In (pull-up) | Data bit 2 / left         |
//! | D3       | 7    | In (pull-up) | Data bit 3 / right        |
//! | TL       | 8    | In (pull-up) | Acknowledge / data bit 4  |
//!
//! # Architecture
//!
//! Two Embassy tasks: one runs the USB device stack, the other polls the
//! controller port on a fixed tick, then forwards whichever cached reports
//! changed to the HID writer.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development
//! - **`prod-panic`**: Use `panic-reset` for production
//! - **`dual-report`** (default): joystick + mouse reports with report IDs
//! - **`consolidated-report`**: one report, layout probed once at boot

#![no_std]

// Ensure mutually exclusive report model features
#[cfg(all(feature = "dual-report", feature = "consolidated-report"))]
compile_error!("Cannot enable both `dual-report` and `consolidated-report` features - they define conflicting report layouts");

// Re-export core types for convenience
pub use saturn_core::{HidSource, ReportModel, SaturnDevice, MAX_REPORT_SIZE};
pub use saturn_proto::{PeripheralKind, SaturnPort};

pub mod port;
pub mod usb;

pub use port::SaturnLines;
pub use usb::configure_usb_hid;
