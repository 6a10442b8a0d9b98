#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_time::{Duration, Ticker};
use embassy_usb::class::hid::{HidWriter, State};
use embassy_usb::{Builder, Config as UsbConfig};
use static_cell::StaticCell;
use saturn_to_usb_rp2040::{
    configure_usb_hid, HidSource, ReportModel, SaturnDevice, SaturnLines, MAX_REPORT_SIZE,
};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

#[cfg(feature = "consolidated-report")]
const REPORT_MODEL: ReportModel = ReportModel::Consolidated;
#[cfg(not(feature = "consolidated-report"))]
const REPORT_MODEL: ReportModel = ReportModel::Dual;

/// Controller-port polling interval.
const POLL_INTERVAL: Duration = Duration::from_millis(4);

/// USB device configuration buffers.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Saturn-to-USB starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- Controller port setup ---
    // Pin directions and pull-ups are configured as one atomic block;
    // interrupts are masked for its duration and restored afterwards.
    let lines = cortex_m::interrupt::free(|_| {
        SaturnLines::new(
            Output::new(p.PIN_2, Level::High), // TH
            Output::new(p.PIN_3, Level::High), // TR
            Input::new(p.PIN_4, Pull::Up),     // D0
            Input::new(p.PIN_5, Pull::Up),     // D1
            Input::new(p.PIN_6, Pull::Up),     // D2
            Input::new(p.PIN_7, Pull::Up),     // D3
            Input::new(p.PIN_8, Pull::Up),     // TL
        )
    });

    let mut device = SaturnDevice::new(lines, REPORT_MODEL);
    // Probes the bus once; in the consolidated model this also fixes the
    // active report layout (pad vs mouse) for the session.
    device.init();

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    usb_config.manufacturer = Some("Saturn Adapter");
    usb_config.product = Some("Saturn-to-USB");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure HID class with the descriptor matching the active session
    let hid_state = HID_STATE.init(State::new());
    let hid_writer = configure_usb_hid(&mut builder, hid_state, device.report_descriptor());

    // Build the USB device
    let usb_device = builder.build();

    spawner.spawn(usb_task(usb_device)).unwrap();
    spawner.spawn(poll_task(device, hid_writer)).unwrap();

    info!("Saturn-to-USB initialized, polling controller port...");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Polling task - runs one decode cycle per tick and forwards whichever
/// cached reports changed.
#[embassy_executor::task]
async fn poll_task(
    mut device: SaturnDevice<SaturnLines<'static>>,
    mut writer: HidWriter<'static, Driver<'static, USB>, 8>,
) {
    // Nothing to deliver until the host has enumerated us.
    writer.ready().await;
    info!("USB HID ready, forwarding controller state...");

    let mut ticker = Ticker::every(POLL_INTERVAL);
    loop {
        ticker.next().await;
        device.update();

        for report_id in 1..=device.num_reports() {
            if device.changed(report_id) {
                let mut buf = [0u8; MAX_REPORT_SIZE];
                let len = device.build_report(Some(&mut buf), report_id);
                if len > 0 {
                    let _ = writer.write(&buf[..len]).await;
                }
            }
        }
    }
}
