//! The Saturn session object.
//!
//! [`SaturnDevice`] owns everything with process lifetime: the port, the
//! report buffers, the latched button mapping, and the cache. One
//! [`update`](HidSource::update) call runs a complete
//! detect + decode + remap + cache cycle; the transport then pulls bytes
//! out through the [`HidSource`] contract.

use crate::cache::ReportCache;
use crate::descriptor::{
    DUAL_REPORT_DESCRIPTOR, MOUSE_REPORT_DESCRIPTOR, PAD_REPORT_DESCRIPTOR,
};
use crate::source::HidSource;
use saturn_proto::detect::{detect, PeripheralKind};
use saturn_proto::decode::{read_analog_pad, read_digital_pad, read_mouse};
use saturn_proto::port::SaturnPort;
use saturn_proto::remap::RemapEngine;
use saturn_proto::report::{
    JoystickReport, MouseReport, JOYSTICK_REPORT_SIZE, MOUSE_REPORT_SIZE,
};

/// How reports are laid out towards the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportModel {
    /// Joystick (ID 1) and mouse (ID 2) reports cached independently,
    /// each carrying its report-ID byte.
    Dual,
    /// One report without an ID byte; the active layout (pad or mouse) is
    /// probed once at init and fixed for the session.
    Consolidated,
}

/// Active layout of a consolidated session, latched at init.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionKind {
    Pad,
    Mouse,
}

/// Consolidated pad report length (joystick report minus the ID byte).
const CONSOLIDATED_PAD_LEN: usize = JOYSTICK_REPORT_SIZE - 1;

/// Consolidated mouse report length (mouse report minus the ID byte).
const CONSOLIDATED_MOUSE_LEN: usize = MOUSE_REPORT_SIZE - 1;

/// A Saturn controller port session.
///
/// Generic over [`SaturnPort`], so the whole update cycle runs on the host
/// against a scripted port in tests. Single-threaded use only: `update`
/// and `build_report` touch the same cache buffers and must come from the
/// same caller.
pub struct SaturnDevice<P: SaturnPort> {
    port: P,
    model: ReportModel,
    session: SessionKind,
    joystick: JoystickReport,
    mouse: MouseReport,
    remap: RemapEngine,
    cache: ReportCache<2>,
}

impl<P: SaturnPort> SaturnDevice<P> {
    /// Create a session over the given port.
    #[must_use]
    pub fn new(port: P, model: ReportModel) -> Self {
        let lengths = match model {
            ReportModel::Dual => [JOYSTICK_REPORT_SIZE, MOUSE_REPORT_SIZE],
            ReportModel::Consolidated => [CONSOLIDATED_PAD_LEN, 0],
        };
        Self {
            port,
            model,
            session: SessionKind::Pad,
            joystick: JoystickReport::idle(),
            mouse: MouseReport::idle(),
            remap: RemapEngine::new(),
            cache: ReportCache::new(lengths),
        }
    }

    /// Get a reference to the port.
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Get a mutable reference to the port.
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Decompose the session into its port.
    pub fn into_port(self) -> P {
        self.port
    }

    fn store_reports(&mut self) {
        match self.model {
            ReportModel::Dual => {
                self.cache.store(0, self.joystick.as_bytes());
                self.cache.store(1, self.mouse.as_bytes());
            }
            ReportModel::Consolidated => match self.session {
                SessionKind::Pad => self.cache.store(0, self.joystick.payload()),
                SessionKind::Mouse => self.cache.store(0, self.mouse.payload()),
            },
        }
    }
}

impl<P: SaturnPort> HidSource for SaturnDevice<P> {
    fn init(&mut self) {
        self.joystick = JoystickReport::idle();
        self.mouse = MouseReport::idle();

        if self.model == ReportModel::Consolidated {
            // Probe once; the session's report layout is fixed from here on.
            self.session = match detect(&mut self.port) {
                PeripheralKind::Mouse => SessionKind::Mouse,
                _ => SessionKind::Pad,
            };
            let len = match self.session {
                SessionKind::Pad => CONSOLIDATED_PAD_LEN,
                SessionKind::Mouse => CONSOLIDATED_MOUSE_LEN,
            };
            self.cache.set_len(0, len);
        }

        self.store_reports();
    }

    fn update(&mut self) {
        match detect(&mut self.port) {
            PeripheralKind::AnalogPad => {
                self.mouse = MouseReport::idle();
                if read_analog_pad(&mut self.port, &mut self.joystick).is_ok() {
                    self.remap.apply(&mut self.joystick);
                }
            }
            PeripheralKind::DigitalPad => {
                self.mouse = MouseReport::idle();
                read_digital_pad(&mut self.port, &mut self.joystick);
                self.remap.apply(&mut self.joystick);
            }
            PeripheralKind::Mouse => {
                self.joystick = JoystickReport::idle();
                let _ = read_mouse(&mut self.port, &mut self.mouse);
            }
            PeripheralKind::Idle => {
                self.joystick = JoystickReport::idle();
                self.mouse = MouseReport::idle();
            }
        }

        self.store_reports();
    }

    fn changed(&mut self, report_id: u8) -> bool {
        self.cache.changed(report_id)
    }

    fn build_report(&mut self, buffer: Option<&mut [u8]>, report_id: u8) -> usize {
        self.cache.build_report(buffer, report_id)
    }

    fn num_reports(&self) -> u8 {
        match self.model {
            ReportModel::Dual => 2,
            ReportModel::Consolidated => 1,
        }
    }

    fn report_descriptor(&self) -> &'static [u8] {
        match (self.model, self.session) {
            (ReportModel::Dual, _) => DUAL_REPORT_DESCRIPTOR,
            (ReportModel::Consolidated, SessionKind::Pad) => PAD_REPORT_DESCRIPTOR,
            (ReportModel::Consolidated, SessionKind::Mouse) => MOUSE_REPORT_DESCRIPTOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MAX_REPORT_SIZE;

    // Scripted peripheral-side view of the bus, enough to exercise every
    // detect/decode path from the device above.
    enum Attached {
        Nothing,
        // Line samples indexed by (th << 1) | tr; the (1,1) entry doubles
        // as the identification pattern.
        Pad([u8; 4]),
        Analog { nibbles: [u8; 14], ack: bool },
        Mouse { nibbles: [u8; 8], ack: bool },
    }

    struct FakeBus {
        attached: Attached,
        th: bool,
        tr: bool,
        steps: usize,
    }

    impl FakeBus {
        fn new(attached: Attached) -> Self {
            Self {
                attached,
                th: true,
                tr: true,
                steps: 0,
            }
        }

        fn released_pad() -> Attached {
            // L released: probe reads 1L100 with L high.
            Attached::Pad([0x1F, 0x1F, 0x1F, 0x1C])
        }

        fn burst_sample(&self, nibbles: &[u8], ack: bool) -> u8 {
            let index = self.steps.saturating_sub(1);
            let data = nibbles.get(index).map_or(0xF, |n| n & 0x0F);
            let tl_high = if ack { self.tr } else { !self.tr };
            data | if tl_high { 0x10 } else { 0 }
        }
    }

    impl SaturnPort for FakeBus {
        fn set_th(&mut self, high: bool) {
            if !high && self.th {
                self.steps = 0;
            }
            self.th = high;
        }

        fn set_tr(&mut self, high: bool) {
            if high != self.tr {
                self.tr = high;
                if !self.th {
                    self.steps += 1;
                }
            }
        }

        fn read_lines(&mut self) -> u8 {
            match &self.attached {
                Attached::Nothing => 0x1F,
                Attached::Pad(samples) => {
                    samples[((self.th as usize) << 1) | self.tr as usize] & 0x1F
                }
                Attached::Analog { nibbles, ack } => {
                    if self.th {
                        0x11
                    } else {
                        self.burst_sample(nibbles, *ack)
                    }
                }
                Attached::Mouse { nibbles, ack } => {
                    if self.th {
                        0x10
                    } else {
                        self.burst_sample(nibbles, *ack)
                    }
                }
            }
        }

        fn delay_us(&mut self, _us: u32) {}
    }

    fn analog_nibbles(axes: [u8; 4]) -> [u8; 14] {
        let mut nib = [0xF; 14];
        nib[0] = 0x1;
        nib[1] = 0x6;
        for (i, axis) in axes.iter().enumerate() {
            nib[6 + 2 * i] = axis >> 4;
            nib[7 + 2 * i] = axis & 0x0F;
        }
        nib
    }

    fn build(device: &mut SaturnDevice<FakeBus>, id: u8) -> ([u8; MAX_REPORT_SIZE], usize) {
        let mut buf = [0u8; MAX_REPORT_SIZE];
        let len = device.build_report(Some(&mut buf), id);
        (buf, len)
    }

    #[test]
    fn test_idle_bus_reports_neutral() {
        let mut device = SaturnDevice::new(FakeBus::new(Attached::Nothing), ReportModel::Dual);
        device.init();
        device.update();

        let (joy, len) = build(&mut device, 1);
        assert_eq!(len, 7);
        assert_eq!(&joy[..7], &[1, 0x7F, 0x7F, 0x7F, 0x7F, 0, 0]);

        let (mouse, len) = build(&mut device, 2);
        assert_eq!(len, 4);
        assert_eq!(&mouse[..4], &[2, 0, 0, 0]);
    }

    #[test]
    fn test_first_changed_forced_then_settles() {
        let mut device = SaturnDevice::new(FakeBus::new(Attached::Nothing), ReportModel::Dual);
        device.init();
        device.update();

        assert!(device.changed(1));
        let _ = build(&mut device, 1);
        assert!(!device.changed(1));

        // Another update with identical state stays unchanged.
        device.update();
        assert!(!device.changed(1));
    }

    #[test]
    fn test_first_changed_is_forced_even_for_unknown_id() {
        let mut device = SaturnDevice::new(FakeBus::new(Attached::Nothing), ReportModel::Dual);
        device.init();
        device.update();

        // The first-poll latch is consumed before any range check, so even
        // an id nothing produces reports a change exactly once.
        assert!(device.changed(9));
        assert!(!device.changed(9));
        // Report 1 is still undelivered and therefore dirty.
        assert!(device.changed(1));
    }

    #[test]
    fn test_digital_pad_cycle_with_l_and_up_held() {
        let mut samples = [0x1F; 4];
        samples[3] = 0x14; // (1,1): probe pattern with L held
        samples[1] = 0x1E; // (0,1): up held
        let mut device = SaturnDevice::new(
            FakeBus::new(Attached::Pad(samples)),
            ReportModel::Dual,
        );
        device.init();
        device.update();

        let (joy, _) = build(&mut device, 1);
        // Up pegs Y to its minimum sentinel; X stays centered.
        assert_eq!(joy[1], 0x7F);
        assert_eq!(joy[2], 0x00);
        // Layout A latched (no face button held): L lands on button 7.
        assert_eq!(joy[5], 0x40);
        assert_eq!(joy[6], 0x00);
    }

    #[test]
    fn test_analog_pad_axes_reach_report() {
        let bus = FakeBus::new(Attached::Analog {
            nibbles: analog_nibbles([0x3A, 0x80, 0x7F, 0x7F]),
            ack: true,
        });
        let mut device = SaturnDevice::new(bus, ReportModel::Dual);
        device.init();
        device.update();

        let (joy, _) = build(&mut device, 1);
        assert_eq!(joy[1], 0x3A);
        assert_eq!(joy[2], 0x80);
    }

    #[test]
    fn test_timeout_keeps_previous_built_report() {
        let bus = FakeBus::new(Attached::Analog {
            nibbles: analog_nibbles([0x20, 0x30, 0x40, 0x50]),
            ack: true,
        });
        let mut device = SaturnDevice::new(bus, ReportModel::Dual);
        device.init();
        device.update();
        assert!(device.changed(1)); // consume the forced first poll
        let (before, _) = build(&mut device, 1);

        // Peripheral stops acknowledging: the decode aborts mid-stream and
        // the built report must stay byte-identical.
        if let Attached::Analog { ack, .. } = &mut device.port_mut().attached {
            *ack = false;
        }
        device.update();

        assert!(!device.changed(1));
        let (after, _) = build(&mut device, 1);
        assert_eq!(before, after);
    }

    #[test]
    fn test_hot_swap_pad_to_mouse_resets_joystick() {
        let mut samples = [0x1F; 4];
        samples[3] = 0x14;
        let mut device = SaturnDevice::new(
            FakeBus::new(Attached::Pad(samples)),
            ReportModel::Dual,
        );
        device.init();
        device.update();
        assert!(device.changed(1));
        let _ = build(&mut device, 1);

        // Mouse buttons are active-high on the wire; 0 means none held.
        let mut nibbles = [0x0; 8];
        nibbles[5] = 0x5; // dx = 5
        nibbles[7] = 0x2; // dy raw = 2
        device.port_mut().attached = Attached::Mouse { nibbles, ack: true };
        device.update();

        // Joystick went back to neutral, mouse picked up the motion.
        assert!(device.changed(1));
        let (joy, _) = build(&mut device, 1);
        assert_eq!(&joy[..7], &[1, 0x7F, 0x7F, 0x7F, 0x7F, 0, 0]);
        let (mouse, _) = build(&mut device, 2);
        assert_eq!(&mouse[..4], &[2, 0, 5, 254]);
    }

    #[test]
    fn test_mapping_latched_on_first_pad_decode() {
        let mut samples = [0x1F; 4];
        samples[3] = 0x1C;
        samples[2] = 0x1F & !0x01; // (1,0): B held
        let mut device = SaturnDevice::new(
            FakeBus::new(Attached::Pad(samples)),
            ReportModel::Dual,
        );
        device.init();
        device.update();
        // Layout B latched: B stays on its own bit.
        let (joy, _) = build(&mut device, 1);
        assert_eq!(joy[5], 0x02);

        // Releasing B and holding C later must not re-select.
        if let Attached::Pad(samples) = &mut device.port_mut().attached {
            samples[2] = 0x1F & !0x02; // C held
        }
        device.update();
        let (joy, _) = build(&mut device, 1);
        // C permutes per layout B (identity on bit 2), not Identity latch.
        assert_eq!(joy[5], 0x04);

        // And a third cycle with A held still permutes per layout B.
        if let Attached::Pad(samples) = &mut device.port_mut().attached {
            samples[2] = 0x1F & !0x04; // A held
        }
        device.update();
        let (joy, _) = build(&mut device, 1);
        assert_eq!(joy[5], 0x01);
    }

    #[test]
    fn test_consolidated_pad_session() {
        let mut device = SaturnDevice::new(
            FakeBus::new(FakeBus::released_pad()),
            ReportModel::Consolidated,
        );
        device.init();
        assert_eq!(device.num_reports(), 1);
        assert_eq!(
            device.report_descriptor().as_ptr(),
            PAD_REPORT_DESCRIPTOR.as_ptr()
        );

        device.update();
        let (report, len) = build(&mut device, 1);
        // Six bytes, no report-ID byte in front.
        assert_eq!(len, 6);
        assert_eq!(&report[..6], &[0x7F, 0x7F, 0x7F, 0x7F, 0, 0]);

        // The second report ID does not exist in this model.
        assert_eq!(device.build_report(None, 2), 0);
        let _ = device.changed(1);
        assert!(!device.changed(2));
    }

    #[test]
    fn test_consolidated_mouse_session() {
        let mut nibbles = [0x0; 8];
        nibbles[3] = 0x1; // left button held (active high)
        let mut device = SaturnDevice::new(
            FakeBus::new(Attached::Mouse { nibbles, ack: true }),
            ReportModel::Consolidated,
        );
        device.init();
        assert_eq!(
            device.report_descriptor().as_ptr(),
            MOUSE_REPORT_DESCRIPTOR.as_ptr()
        );

        device.update();
        let (report, len) = build(&mut device, 1);
        assert_eq!(len, 3);
        assert_eq!(&report[..3], &[0x1, 0, 0]);
    }
}
