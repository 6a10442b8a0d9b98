//! Per-peripheral decoders.
//!
//! Each decoder runs its line transactions through [`xfer`](crate::xfer)
//! and, only on success, replaces the target report wholesale - first reset
//! to idle, then active bits OR'd in, so no stale bit survives from a
//! previous, differently-shaped report. A timeout aborts the decode and
//! leaves the caller's report untouched.
//!
//! All button and direction inputs are active-low on the wire.

use crate::port::{SaturnPort, DATA_MASK};
use crate::report::{JoystickReport, MouseReport, SaturnButtons, AXIS_MAX, AXIS_MIN};
use crate::xfer::{read_burst, XferError, ANALOG_NIBBLES, MOUSE_NIBBLES, SETTLE_US};

/// Rebuild an axis byte from its two stream nibbles, high nibble first.
#[inline]
#[must_use]
pub const fn byte_from_nibbles(hi: u8, lo: u8) -> u8 {
    (hi << 4) | (lo & DATA_MASK)
}

/// Apply the shared button nibbles common to digital and analog pads.
///
/// `start_group` carries B/C/A/Start in bits 0-3, `shoulder_group` carries
/// Z/Y/X/R in bits 0-3, and bit 3 of `l_group` is the L button.
fn apply_pad_buttons(report: &mut JoystickReport, start_group: u8, shoulder_group: u8, l_group: u8) {
    if start_group & 0x04 == 0 {
        report.press(SaturnButtons::A);
    }
    if start_group & 0x01 == 0 {
        report.press(SaturnButtons::B);
    }
    if start_group & 0x02 == 0 {
        report.press(SaturnButtons::C);
    }

    if shoulder_group & 0x04 == 0 {
        report.press(SaturnButtons::X);
    }
    if shoulder_group & 0x02 == 0 {
        report.press(SaturnButtons::Y);
    }
    if shoulder_group & 0x01 == 0 {
        report.press(SaturnButtons::Z);
    }

    if start_group & 0x08 == 0 {
        report.press(SaturnButtons::START);
    }

    if l_group & 0x08 == 0 {
        report.press(SaturnButtons::L);
    }
    if shoulder_group & 0x08 == 0 {
        report.press(SaturnButtons::R);
    }
}

/// Write the directional nibble (up/down/left/right in bits 0-3) as axis
/// sentinel bytes.
fn apply_direction_sentinels(report: &mut JoystickReport, directions: u8) {
    if directions & 0x08 == 0 {
        report.set_x(AXIS_MAX); // right
    }
    if directions & 0x04 == 0 {
        report.set_x(AXIS_MIN); // left
    }
    if directions & 0x02 == 0 {
        report.set_y(AXIS_MAX); // down
    }
    if directions & 0x01 == 0 {
        report.set_y(AXIS_MIN); // up
    }
}

/// Decode a plain digital pad with four line-state samples.
///
/// No handshake is involved, so this cannot time out. The (TH,TR) = (1,1)
/// nibble must be sampled first, before any toggling - the HORIPAD SS
/// refuses to answer otherwise.
pub fn read_digital_pad<P: SaturnPort>(port: &mut P, report: &mut JoystickReport) {
    port.set_th(true);
    port.set_tr(true);
    port.delay_us(SETTLE_US);
    let l_group = port.read_lines(); // 0 0 1 L

    port.set_th(false);
    port.set_tr(false);
    port.delay_us(SETTLE_US);
    let shoulder_group = port.read_lines(); // Z Y X R

    port.set_th(true);
    port.set_tr(false);
    port.delay_us(SETTLE_US);
    let start_group = port.read_lines(); // B C A St

    port.set_th(false);
    port.set_tr(true);
    port.delay_us(SETTLE_US);
    let directions = port.read_lines(); // Up Dn Lf Rt

    let mut out = JoystickReport::idle();
    apply_direction_sentinels(&mut out, directions);
    apply_pad_buttons(&mut out, start_group, shoulder_group, l_group);
    *report = out;
}

/// Decode a 3D/analog pad from its 14-nibble stream.
///
/// If the stream carries the digital-submode marker at index 1 the pad's
/// stick is in its digital detent: the burst is truncated to 8 nibbles and
/// directions become axis sentinels instead of raw analog bytes.
pub fn read_analog_pad<P: SaturnPort>(
    port: &mut P,
    report: &mut JoystickReport,
) -> Result<(), XferError> {
    let burst = read_burst(port, ANALOG_NIBBLES)?;
    let nib = &burst.nibbles;

    let mut out = JoystickReport::idle();
    apply_pad_buttons(&mut out, nib[3], nib[4], nib[5]);

    if burst.digital_submode {
        apply_direction_sentinels(&mut out, nib[2]);
    } else {
        // Stick in the analog position: directions report as buttons, and
        // each axis byte arrives as a high/low nibble pair.
        if nib[2] & 0x08 == 0 {
            out.press(SaturnButtons::DIR_RIGHT);
        }
        if nib[2] & 0x04 == 0 {
            out.press(SaturnButtons::DIR_LEFT);
        }
        if nib[2] & 0x02 == 0 {
            out.press(SaturnButtons::DIR_DOWN);
        }
        if nib[2] & 0x01 == 0 {
            out.press(SaturnButtons::DIR_UP);
        }

        out.set_x(byte_from_nibbles(nib[6], nib[7]));
        out.set_y(byte_from_nibbles(nib[8], nib[9]));
        out.set_rx(byte_from_nibbles(nib[10], nib[11]));
        out.set_rz(byte_from_nibbles(nib[12], nib[13]));
    }

    *report = out;
    Ok(())
}

/// Decode a Saturn mouse from its 8-nibble stream.
///
/// The peripheral reports Y with the opposite sign convention from the
/// report layout, so the reconstructed byte is negated (256 - y).
pub fn read_mouse<P: SaturnPort>(port: &mut P, report: &mut MouseReport) -> Result<(), XferError> {
    let burst = read_burst(port, MOUSE_NIBBLES)?;
    let nib = &burst.nibbles;

    let mut out = MouseReport::idle();
    out.set_buttons(nib[3] & DATA_MASK);
    out.set_dx(byte_from_nibbles(nib[4], nib[5]));
    out.set_dy(byte_from_nibbles(nib[6], nib[7]).wrapping_neg());

    *report = out;
    Ok(())
}
