//! Logging must not reach a UART while its divisor latch is open.
//!
//! The global logger and the code under test share one recorded port bus,
//! the way `klog` and the boot code share COM1.

use khal::fixed::U16;
use khal::port::{InPort, OutPort, PortWrite};
use khal::serial::{self, LineStatus, SerialPort, UartConfig};
use klog::SerialLogger;
use log::LevelFilter;
use spin::Mutex;

static BUS: Mutex<Vec<PortWrite>> = Mutex::new(Vec::new());

/// Every handle writes to the same recorded bus.
struct Bus;

impl OutPort for Bus {
    fn outb(&mut self, port: u16, value: u8) {
        BUS.lock().push(PortWrite::new(port, value));
    }
}

impl InPort for Bus {
    fn inb(&mut self, _port: u16) -> u8 {
        LineStatus::TRANSMIT_EMPTY.bits()
    }
}

fn take_writes() -> Vec<PortWrite> {
    core::mem::take(&mut *BUS.lock())
}

#[test]
fn configuring_the_logged_uart() {
    let logger: &'static SerialLogger<Bus> =
        Box::leak(Box::new(SerialLogger::new(LevelFilter::Trace)));
    logger.attach(SerialPort::new(Bus, U16::new(0x3F8)));
    log::set_logger(logger).unwrap();
    log::set_max_level(LevelFilter::Trace);

    log::info!("ready");
    assert!(!take_writes().is_empty());

    // The divisor sequence is exactly three writes, even with a live logger.
    serial::configure_baud_rate(&mut Bus, U16::new(0x3F8), U16::new(0x0C00));
    assert_eq!(
        take_writes(),
        vec![
            PortWrite::new(0x3FB, 0x80),
            PortWrite::new(0x3F8, 0x0C),
            PortWrite::new(0x3F8, 0x00),
        ]
    );

    // A full init may log, but only after the line format clears DLAB.
    let mut uart = SerialPort::new(Bus, U16::new(0x3F8));
    uart.init(UartConfig::new(U16::new(0x3F8), U16::new(0x0C00)));
    let writes = take_writes();
    assert_eq!(
        &writes[..6],
        &[
            PortWrite::new(0x3FB, 0x80),
            PortWrite::new(0x3F8, 0x0C),
            PortWrite::new(0x3F8, 0x00),
            PortWrite::new(0x3FB, 0x03),
            PortWrite::new(0x3FA, 0xC7),
            PortWrite::new(0x3FC, 0x03),
        ]
    );
    assert!(writes.len() > 6);
    assert!(writes[6..].iter().all(|w| w.port == 0x3F8));
}
