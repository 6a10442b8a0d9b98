//! GPIO implementation of the Saturn control port.

use embassy_rp::gpio::{Input, Level, Output};
use embassy_time::{block_for, Duration};
use saturn_proto::SaturnPort;

/// The six controller-port lines, driven through embassy-rp GPIO.
///
/// Construct the pins inside [`cortex_m::interrupt::free`] so the one-time
/// direction/pull-up setup is not interleaved with interrupt handlers that
/// share the GPIO bank; the previous interrupt state is restored when the
/// closure returns.
pub struct SaturnLines<'d> {
    th: Output<'d>,
    tr: Output<'d>,
    d0: Input<'d>,
    d1: Input<'d>,
    d2: Input<'d>,
    d3: Input<'d>,
    tl: Input<'d>,
}

impl<'d> SaturnLines<'d> {
    /// Assemble the port from configured pins.
    ///
    /// Both outputs should start high (the idle/detect state); the inputs
    /// must have pull-ups enabled so an absent peripheral reads all-high.
    pub fn new(
        th: Output<'d>,
        tr: Output<'d>,
        d0: Input<'d>,
        d1: Input<'d>,
        d2: Input<'d>,
        d3: Input<'d>,
        tl: Input<'d>,
    ) -> Self {
        Self {
            th,
            tr,
            d0,
            d1,
            d2,
            d3,
            tl,
        }
    }
}

impl SaturnPort for SaturnLines<'_> {
    fn set_th(&mut self, high: bool) {
        self.th.set_level(if high { Level::High } else { Level::Low });
    }

    fn set_tr(&mut self, high: bool) {
        self.tr.set_level(if high { Level::High } else { Level::Low });
    }

    fn read_lines(&mut self) -> u8 {
        let mut sample = 0;
        if self.d0.is_high() {
            sample |= 1 << 0;
        }
        if self.d1.is_high() {
            sample |= 1 << 1;
        }
        if self.d2.is_high() {
            sample |= 1 << 2;
        }
        if self.d3.is_high() {
            sample |= 1 << 3;
        }
        if self.tl.is_high() {
            sample |= 1 << 4;
        }
        sample
    }

    fn delay_us(&mut self, us: u32) {
        block_for(Duration::from_micros(us as u64));
    }
}
