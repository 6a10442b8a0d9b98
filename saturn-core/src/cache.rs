//! Double-buffered report cache with change detection.
//!
//! Each slot pairs the most recently decoded ("built") report with the
//! last value delivered to the host ("sent"). "Changed" is plain byte-wise
//! inequality between the two. Buffers are fixed-size and mutated in
//! place; nothing is allocated after construction.

/// Largest report any slot has to hold.
pub const MAX_REPORT_SIZE: usize = 8;

/// One built/sent report pair.
#[derive(Debug, Clone, Copy)]
struct ReportSlot {
    built: [u8; MAX_REPORT_SIZE],
    sent: [u8; MAX_REPORT_SIZE],
    len: usize,
}

impl ReportSlot {
    const fn new(len: usize) -> Self {
        Self {
            built: [0; MAX_REPORT_SIZE],
            sent: [0; MAX_REPORT_SIZE],
            len,
        }
    }

    fn is_dirty(&self) -> bool {
        self.built[..self.len] != self.sent[..self.len]
    }
}

/// Report cache over `N` report slots, indexed by 1-based report ID.
#[derive(Debug, Clone, Copy)]
pub struct ReportCache<const N: usize> {
    slots: [ReportSlot; N],
    first_poll: bool,
}

impl<const N: usize> ReportCache<N> {
    /// Create a cache with the given per-slot report lengths.
    ///
    /// # Panics
    ///
    /// Panics if any length exceeds [`MAX_REPORT_SIZE`].
    #[must_use]
    pub fn new(lengths: [usize; N]) -> Self {
        let mut slots = [ReportSlot::new(0); N];
        for (slot, len) in slots.iter_mut().zip(lengths) {
            assert!(len <= MAX_REPORT_SIZE);
            slot.len = len;
        }
        Self {
            slots,
            first_poll: true,
        }
    }

    /// Change a slot's report length (consolidated model, fixed at init).
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds [`MAX_REPORT_SIZE`].
    pub fn set_len(&mut self, index: usize, len: usize) {
        assert!(len <= MAX_REPORT_SIZE);
        self.slots[index].len = len;
    }

    /// Store freshly decoded bytes into a slot's built buffer.
    pub fn store(&mut self, index: usize, bytes: &[u8]) {
        let slot = &mut self.slots[index];
        debug_assert_eq!(bytes.len(), slot.len);
        slot.built[..slot.len].copy_from_slice(bytes);
    }

    /// Whether the slot's built report differs from its sent report.
    ///
    /// The very first call after construction reports `true` regardless of
    /// content (and before any range check), forcing an initial delivery.
    pub fn changed(&mut self, report_id: u8) -> bool {
        if self.first_poll {
            self.first_poll = false;
            return true;
        }
        match self.index_of(report_id) {
            Some(index) => self.slots[index].is_dirty(),
            None => false,
        }
    }

    /// Copy the built report out and commit it as sent.
    ///
    /// The commit happens even when no output buffer is supplied, so a
    /// host that merely acknowledges delivery still settles the slot.
    /// Returns the report length, or 0 for an out-of-range ID.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is supplied but shorter than the slot's report
    /// length; a [`MAX_REPORT_SIZE`] buffer always fits.
    pub fn build_report(&mut self, buffer: Option<&mut [u8]>, report_id: u8) -> usize {
        let Some(index) = self.index_of(report_id) else {
            return 0;
        };
        let slot = &mut self.slots[index];
        if let Some(buffer) = buffer {
            buffer[..slot.len].copy_from_slice(&slot.built[..slot.len]);
        }
        slot.sent = slot.built;
        slot.len
    }

    /// Report length of the given slot, 0 if out of range.
    #[must_use]
    pub fn report_len(&self, report_id: u8) -> usize {
        self.index_of(report_id).map_or(0, |i| self.slots[i].len)
    }

    fn index_of(&self, report_id: u8) -> Option<usize> {
        if report_id < 1 || report_id as usize > N {
            return None;
        }
        Some(report_id as usize - 1)
    }
}
