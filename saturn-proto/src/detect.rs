//! Peripheral detection from the idle probe pattern.
//!
//! With TH and TR both high every Saturn peripheral presents a fixed
//! identification pattern on D0-D3/TL. Peripherals are hot-swappable, so
//! classification is re-run at the start of every update cycle.

use crate::port::SaturnPort;
use crate::xfer::SETTLE_US;

/// Probe pattern of a 3D/analog pad.
pub const PROBE_ANALOG: u8 = 0x11;

/// Probe pattern of a mouse.
pub const PROBE_MOUSE: u8 = 0x10;

/// Mask for the digital-pad probe pattern: `1L100`, where bit 3 carries
/// the live L-button state and is ignored for classification.
pub const PROBE_PAD_MASK: u8 = 0x17;

/// Expected digital-pad probe pattern under [`PROBE_PAD_MASK`].
pub const PROBE_PAD: u8 = 0x14;

/// Protocol variant of the attached peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralKind {
    /// Plain digital pad (also HORIPAD SS and similar).
    DigitalPad,
    /// 3D control pad / analog joystick.
    AnalogPad,
    /// Saturn mouse.
    Mouse,
    /// Nothing attached, or a pattern we do not recognize.
    Idle,
}

/// Classify a raw probe sample.
///
/// Candidates are tried in fixed priority order, first match wins. Any
/// pattern outside the known set - including bus noise and the all-high
/// pattern of an empty port - classifies as [`PeripheralKind::Idle`].
#[must_use]
pub const fn classify(probe: u8) -> PeripheralKind {
    if probe == PROBE_ANALOG {
        PeripheralKind::AnalogPad
    } else if probe & PROBE_PAD_MASK == PROBE_PAD {
        PeripheralKind::DigitalPad
    } else if probe == PROBE_MOUSE {
        PeripheralKind::Mouse
    } else {
        PeripheralKind::Idle
    }
}

/// Drive both select lines high, settle, and classify the probe sample.
pub fn detect<P: SaturnPort>(port: &mut P) -> PeripheralKind {
    port.set_th(true);
    port.set_tr(true);
    port.delay_us(SETTLE_US);
    classify(port.read_lines())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakePeripheral;

    #[test]
    fn test_classify_known_patterns() {
        assert_eq!(classify(0x11), PeripheralKind::AnalogPad);
        assert_eq!(classify(0x10), PeripheralKind::Mouse);
        // L released and L held both classify as a digital pad.
        assert_eq!(classify(0x14), PeripheralKind::DigitalPad);
        assert_eq!(classify(0x1C), PeripheralKind::DigitalPad);
    }

    #[test]
    fn test_classify_unknown_patterns_are_idle() {
        for probe in [0x00, 0x07, 0x0F, 0x12, 0x15, 0x16, 0x1F, 0xFF] {
            assert_eq!(classify(probe), PeripheralKind::Idle, "probe {probe:#04x}");
        }
    }

    #[test]
    fn test_detect_raises_selects_before_sampling() {
        let mut port = FakePeripheral::with_nibbles(&[]);
        port.probe_data = 0x1; // TL high + 0b0001 = analog pattern
        port.th = false;
        port.tr = false;

        assert_eq!(detect(&mut port), PeripheralKind::AnalogPad);
        assert!(port.th && port.tr);
    }
}
