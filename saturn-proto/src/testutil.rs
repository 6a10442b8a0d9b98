//! Scripted fake peripherals for host tests.

use crate::port::{SaturnPort, TL};
use crate::xfer::MAX_BURST;

/// A well-behaved handshake peripheral (analog pad or mouse).
///
/// Presents `probe_data` on the data lines while TH is high, and clocks
/// out one scripted nibble per TR transition while TH is low, mirroring
/// TR on TL unless acknowledgement is disabled.
pub struct FakePeripheral {
    pub th: bool,
    pub tr: bool,
    /// Data nibble presented while TH is high (identification pattern).
    pub probe_data: u8,
    /// Nibble stream clocked out during a burst.
    pub nibbles: [u8; MAX_BURST],
    pub nibble_count: usize,
    /// Handshake steps (TR transitions with TH low) seen so far.
    pub steps: usize,
    /// Whether TL follows TR at all.
    pub ack: bool,
    /// Stop acknowledging from this step onward (mid-stream timeout).
    pub ack_until: Option<usize>,
    /// Number of `read_lines` calls, for poll-budget assertions.
    pub reads: usize,
}

impl FakePeripheral {
    pub fn with_nibbles(nibbles: &[u8]) -> Self {
        let mut buf = [0xF; MAX_BURST];
        buf[..nibbles.len()].copy_from_slice(nibbles);
        Self {
            th: true,
            tr: true,
            probe_data: 0xF,
            nibbles: buf,
            nibble_count: nibbles.len(),
            steps: 0,
            ack: true,
            ack_until: None,
            reads: 0,
        }
    }

    fn index(&self) -> usize {
        self.steps.saturating_sub(1)
    }

    fn acks_now(&self) -> bool {
        self.ack && self.ack_until.map_or(true, |limit| self.index() < limit)
    }
}

impl SaturnPort for FakePeripheral {
    fn set_th(&mut self, high: bool) {
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
        self.reads += 1;
        if self.th {
            return (self.probe_data & 0x0F) | TL;
        }
        let data = if self.index() < self.nibble_count {
            self.nibbles[self.index()] & 0x0F
        } else {
            0x0F
        };
        let tl_high = if self.acks_now() { self.tr } else { !self.tr };
        data | if tl_high { TL } else { 0 }
    }

    fn delay_us(&mut self, _us: u32) {}
}

/// A digital pad: answers each (TH, TR) select combination with a fixed
/// line sample, no handshake involved.
pub struct FakePad {
    /// Samples indexed by `(th << 1) | tr`.
    pub samples: [u8; 4],
    pub th: bool,
    pub tr: bool,
}

impl FakePad {
    /// All lines released (nothing pressed, L up, TL high).
    pub fn released() -> Self {
        Self {
            samples: [0x1F; 4],
            th: true,
            tr: true,
        }
    }

    pub fn set(&mut self, th: bool, tr: bool, sample: u8) {
        self.samples[((th as usize) << 1) | tr as usize] = sample;
    }
}

impl SaturnPort for FakePad {
    fn set_th(&mut self, high: bool) {
        self.th = high;
    }

    fn set_tr(&mut self, high: bool) {
        self.tr = high;
    }

    fn read_lines(&mut self) -> u8 {
        self.samples[((self.th as usize) << 1) | self.tr as usize] & 0x1F
    }

    fn delay_us(&mut self, _us: u32) {}
}
