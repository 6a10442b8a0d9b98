//! Fixed-layout report buffers.
//!
//! Layouts are part of the external contract and byte-exact: the joystick
//! report is `[id, x, y, rx, rz, buttons_lo, buttons_hi]`, the mouse report
//! is `[id, buttons, dx, dy]`. The single-report firmware variant ships the
//! same bytes without the leading report-ID byte (see
//! [`payload`](JoystickReport::payload)).

use core::ops::{BitOr, BitOrAssign};

/// HID report ID of the joystick report.
pub const JOYSTICK_REPORT_ID: u8 = 1;

/// HID report ID of the mouse report.
pub const MOUSE_REPORT_ID: u8 = 2;

/// Joystick report size including the report-ID byte.
pub const JOYSTICK_REPORT_SIZE: usize = 7;

/// Mouse report size including the report-ID byte.
pub const MOUSE_REPORT_SIZE: usize = 4;

/// Axis sentinel: direction held towards the minimum (left/up).
pub const AXIS_MIN: u8 = 0x00;

/// Axis sentinel: direction centered / released.
pub const AXIS_CENTER: u8 = 0x7F;

/// Axis sentinel: direction held towards the maximum (right/down).
pub const AXIS_MAX: u8 = 0xFF;

/// Saturn button state as a bitfield.
///
/// Bits 0-8 are the nine physical buttons in wire order; bits 10-13 carry
/// the analog pad's directional switches when the stick is in its analog
/// position (directions become buttons instead of axis sentinels).
///
/// # Example
///
/// ```
/// use saturn_proto::SaturnButtons;
///
/// let held = SaturnButtons::A | SaturnButtons::START;
/// assert!(held.contains(SaturnButtons::A));
/// assert!(!held.contains(SaturnButtons::B));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SaturnButtons(pub u16);

impl SaturnButtons {
    pub const A: Self = Self(1 << 0);
    pub const B: Self = Self(1 << 1);
    pub const C: Self = Self(1 << 2);
    pub const X: Self = Self(1 << 3);
    pub const Y: Self = Self(1 << 4);
    pub const Z: Self = Self(1 << 5);
    pub const START: Self = Self(1 << 6);
    pub const L: Self = Self(1 << 7);
    pub const R: Self = Self(1 << 8);
    pub const DIR_RIGHT: Self = Self(1 << 10);
    pub const DIR_LEFT: Self = Self(1 << 11);
    pub const DIR_DOWN: Self = Self(1 << 12);
    pub const DIR_UP: Self = Self(1 << 13);

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Check if the given button(s) are pressed.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: SaturnButtons) -> bool {
        (self.0 & button.0) == button.0
    }

    /// Get the raw u16 value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl BitOr for SaturnButtons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SaturnButtons {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// The 7-byte joystick report (digital and analog pads).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickReport([u8; JOYSTICK_REPORT_SIZE]);

impl JoystickReport {
    /// Neutral report: all axes centered, no buttons.
    #[must_use]
    pub const fn idle() -> Self {
        Self([
            JOYSTICK_REPORT_ID,
            AXIS_CENTER,
            AXIS_CENTER,
            AXIS_CENTER,
            AXIS_CENTER,
            0,
            0,
        ])
    }

    #[inline]
    pub fn set_x(&mut self, value: u8) {
        self.0[1] = value;
    }

    #[inline]
    pub fn set_y(&mut self, value: u8) {
        self.0[2] = value;
    }

    #[inline]
    pub fn set_rx(&mut self, value: u8) {
        self.0[3] = value;
    }

    #[inline]
    pub fn set_rz(&mut self, value: u8) {
        self.0[4] = value;
    }

    #[inline]
    #[must_use]
    pub const fn x(&self) -> u8 {
        self.0[1]
    }

    #[inline]
    #[must_use]
    pub const fn y(&self) -> u8 {
        self.0[2]
    }

    #[inline]
    #[must_use]
    pub const fn rx(&self) -> u8 {
        self.0[3]
    }

    #[inline]
    #[must_use]
    pub const fn rz(&self) -> u8 {
        self.0[4]
    }

    /// OR the given button(s) into the report.
    #[inline]
    pub fn press(&mut self, button: SaturnButtons) {
        self.set_buttons(SaturnButtons(self.buttons().0 | button.0));
    }

    /// Current button bitfield.
    #[inline]
    #[must_use]
    pub fn buttons(&self) -> SaturnButtons {
        SaturnButtons(u16::from_le_bytes([self.0[5], self.0[6]]))
    }

    /// Replace the whole button bitfield.
    #[inline]
    pub fn set_buttons(&mut self, buttons: SaturnButtons) {
        let [lo, hi] = buttons.0.to_le_bytes();
        self.0[5] = lo;
        self.0[6] = hi;
    }

    /// The full report, report-ID byte included.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The report without its report-ID byte (single-report variant).
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.0[1..]
    }
}

impl Default for JoystickReport {
    fn default() -> Self {
        Self::idle()
    }
}

/// The 4-byte mouse report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport([u8; MOUSE_REPORT_SIZE]);

impl MouseReport {
    /// Neutral report: no buttons, no motion.
    #[must_use]
    pub const fn idle() -> Self {
        Self([MOUSE_REPORT_ID, 0, 0, 0])
    }

    /// Set the four button bits (start, middle, right, left in bits 3-0).
    #[inline]
    pub fn set_buttons(&mut self, nibble: u8) {
        self.0[1] = nibble & 0x0F;
    }

    #[inline]
    #[must_use]
    pub const fn buttons(&self) -> u8 {
        self.0[1]
    }

    /// Relative X motion, already in report sign convention.
    #[inline]
    pub fn set_dx(&mut self, value: u8) {
        self.0[2] = value;
    }

    /// Relative Y motion, already in report sign convention.
    #[inline]
    pub fn set_dy(&mut self, value: u8) {
        self.0[3] = value;
    }

    #[inline]
    #[must_use]
    pub const fn dx(&self) -> u8 {
        self.0[2]
    }

    #[inline]
    #[must_use]
    pub const fn dy(&self) -> u8 {
        self.0[3]
    }

    /// The full report, report-ID byte included.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The report without its report-ID byte (single-report variant).
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.0[1..]
    }
}

impl Default for MouseReport {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_joystick_is_centered() {
        let report = JoystickReport::idle();
        assert_eq!(
            report.as_bytes(),
            &[JOYSTICK_REPORT_ID, 0x7F, 0x7F, 0x7F, 0x7F, 0, 0]
        );
    }

    #[test]
    fn test_press_accumulates_bits() {
        let mut report = JoystickReport::idle();
        report.press(SaturnButtons::A);
        report.press(SaturnButtons::R);
        assert_eq!(report.buttons(), SaturnButtons::A | SaturnButtons::R);
        // R lands in the high button byte.
        assert_eq!(report.as_bytes()[6], 0x01);
    }

    #[test]
    fn test_mouse_payload_skips_report_id() {
        let mut report = MouseReport::idle();
        report.set_buttons(0x5);
        report.set_dx(10);
        assert_eq!(report.as_bytes(), &[MOUSE_REPORT_ID, 0x5, 10, 0]);
        assert_eq!(report.payload(), &[0x5, 10, 0]);
    }
}
