//! The peripheral capability contract.

/// Uniform interface between a decoded peripheral and the host transport.
///
/// The transport layer drives this in a single-threaded loop: [`update`]
/// once per polling tick, then [`changed`]/[`build_report`] per report ID
/// to pull out bytes worth sending. Report IDs are 1-based; IDs outside
/// the supported range read as unchanged (except for the one-shot
/// first-poll latch, see [`changed`]) and build zero bytes.
///
/// [`update`]: HidSource::update
/// [`changed`]: HidSource::changed
/// [`build_report`]: HidSource::build_report
pub trait HidSource {
    /// One-time session setup. May probe the bus once to fix the active
    /// report layout (consolidated model).
    fn init(&mut self);

    /// Run one full detect + decode + remap cycle, mutating the built
    /// report cache. Never fails: a non-responsive peripheral simply
    /// leaves the previous report in place.
    fn update(&mut self);

    /// Whether the built report differs from the last one delivered.
    ///
    /// The very first call after startup always reports `true`, forcing
    /// an initial report even when the peripheral is idle.
    fn changed(&mut self, report_id: u8) -> bool;

    /// Copy the built report into `buffer` (when supplied) and commit it
    /// as delivered, whether or not the caller consumed the bytes.
    ///
    /// A supplied `buffer` must hold at least the report's size;
    /// [`MAX_REPORT_SIZE`](crate::MAX_REPORT_SIZE) always suffices.
    ///
    /// Returns the report size in bytes, or 0 for an out-of-range ID.
    fn build_report(&mut self, buffer: Option<&mut [u8]>, report_id: u8) -> usize;

    /// Number of report IDs this source produces.
    fn num_reports(&self) -> u8;

    /// The HID report descriptor matching the active report layout.
    ///
    /// Stable after [`init`](HidSource::init).
    fn report_descriptor(&self) -> &'static [u8];
}
