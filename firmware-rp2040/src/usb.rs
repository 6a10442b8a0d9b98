//! USB HID plumbing.

use embassy_usb::class::hid::{HidWriter, State};
use embassy_usb::Builder;

/// Configure the USB HID class in the USB builder.
///
/// The report descriptor comes from the device session
/// ([`HidSource::report_descriptor`](saturn_core::HidSource::report_descriptor)),
/// so it already matches the active report model. Returns the HID writer
/// for use by the polling task.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, embassy_rp::usb::Driver<'d, embassy_rp::peripherals::USB>>,
    state: &'d mut State<'d>,
    report_descriptor: &'static [u8],
) -> HidWriter<'d, embassy_rp::usb::Driver<'d, embassy_rp::peripherals::USB>, 8> {
    let config = embassy_usb::class::hid::Config {
        report_descriptor,
        request_handler: None,
        poll_ms: 4,
        max_packet_size: 8,
        hid_subclass: embassy_usb::class::hid::HidSubclass::No,
        hid_boot_protocol: embassy_usb::class::hid::HidBootProtocol::None,
    };

    embassy_usb::class::hid::HidWriter::new(builder, state, config)
}
