//! Nibble handshake with bounded busy-wait and timeout.
//!
//! Analog pads and mice clock their data out one nibble per TR edge: the
//! host toggles TR, the peripheral mirrors the new level on TL once the
//! next nibble is valid on D0-D3. A peripheral that never acknowledges is
//! declared non-responsive after a fixed polling budget; the caller then
//! abandons the whole transaction.

use crate::port::{SaturnPort, TL};

/// Maximum TL polling iterations before declaring a timeout.
///
/// Polls are spaced [`TL_POLL_STEP_US`] apart, so this bounds the wait at
/// roughly 100 us per nibble.
pub const TL_POLL_BUDGET: u32 = 100;

/// Delay between TL polls, in microseconds.
pub const TL_POLL_STEP_US: u32 = 1;

/// Settle time around select-line transitions, in microseconds.
pub const SETTLE_US: u32 = 4;

/// Delay between the TL acknowledge and the data sample, in microseconds.
pub const SAMPLE_DELAY_US: u32 = 2;

/// Marker nibble an analog pad embeds at stream index 1 when its stick is
/// in the digital detent (TL high + data `0b0010`).
pub const DIGITAL_SUBMODE_MARKER: u8 = 0x12;

/// Longest nibble burst any peripheral produces (analog pad, stick active).
pub const MAX_BURST: usize = 14;

/// Nibble count for a full analog-pad transaction.
pub const ANALOG_NIBBLES: usize = 14;

/// Nibble count for a mouse transaction (and for an analog pad whose
/// stream carries the digital-submode marker).
pub const MOUSE_NIBBLES: usize = 8;

/// Error type for line transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum XferError {
    /// The peripheral did not acknowledge a TR edge within
    /// [`TL_POLL_BUDGET`] polls.
    Timeout,
}

/// Wait until TL reaches the given level, within the polling budget.
fn wait_tl<P: SaturnPort>(port: &mut P, high: bool) -> Result<(), XferError> {
    let mut budget = TL_POLL_BUDGET;
    loop {
        if ((port.read_lines() & TL) != 0) == high {
            return Ok(());
        }
        port.delay_us(TL_POLL_STEP_US);
        budget -= 1;
        if budget == 0 {
            return Err(XferError::Timeout);
        }
    }
}

/// Request and sample one nibble.
///
/// Drives TR to `high`, waits for the peripheral to mirror that level on
/// TL, then samples the lines after a short settle delay. The returned
/// value is a full 5-bit line sample (data nibble + TL in bit 4).
///
/// On timeout no sample is taken; the caller must abort the transaction
/// and leave its report buffer untouched for this cycle.
pub fn read_nibble<P: SaturnPort>(port: &mut P, high: bool) -> Result<u8, XferError> {
    port.set_tr(high);
    wait_tl(port, high)?;
    port.delay_us(SAMPLE_DELAY_US);
    Ok(port.read_lines())
}

/// A completed nibble burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Burst {
    /// Raw 5-bit line samples, one per handshake step. Only the first
    /// [`len`](Self::len) entries are valid.
    pub nibbles: [u8; MAX_BURST],
    /// Number of nibbles actually transferred.
    pub len: usize,
    /// True if the digital-submode marker was seen at stream index 1.
    pub digital_submode: bool,
}

/// Run a ping-pong nibble burst of up to `count` nibbles.
///
/// Pulls TH low to start the transaction, then alternates the TR level for
/// each nibble, starting low. If the sample at stream index 1 equals
/// [`DIGITAL_SUBMODE_MARKER`] the burst is truncated to
/// [`MOUSE_NIBBLES`] - the peripheral is an analog pad reporting in its
/// digital detent and sends the short form of its stream.
///
/// On success both select lines are returned high, releasing the bus. On
/// timeout the lines are left as they are; the next detect cycle restores
/// them.
pub fn read_burst<P: SaturnPort>(port: &mut P, count: usize) -> Result<Burst, XferError> {
    debug_assert!(count <= MAX_BURST);

    port.delay_us(SETTLE_US);
    port.set_th(false);
    port.delay_us(SETTLE_US);

    let mut nibbles = [0u8; MAX_BURST];
    let mut remaining = count;
    let mut digital_submode = false;
    let mut tr = false;
    let mut i = 0;
    while i < remaining {
        nibbles[i] = read_nibble(port, tr)?;
        tr = !tr;

        if i >= 1 && nibbles[1] == DIGITAL_SUBMODE_MARKER {
            digital_submode = true;
            remaining = MOUSE_NIBBLES;
        }
        i += 1;
    }

    port.set_tr(true);
    port.delay_us(SETTLE_US);
    port.set_th(true);
    port.delay_us(SETTLE_US);

    Ok(Burst {
        nibbles,
        len: remaining,
        digital_submode,
    })
}
