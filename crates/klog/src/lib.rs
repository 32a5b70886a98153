//! Kernel logging backend.
//!
//! Implements [`log::Log`] on top of a polled serial port, so the `log`
//! macros used across the workspace end up on COM1. Records are formatted
//! as `<color>[LEVEL]<reset> target: message` followed by a newline.
#![cfg_attr(not(test), no_std)]

use core::fmt::{self, Write};

use khal::port::{InPort, OutPort};
use khal::serial::{SerialPort, UartConfig};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::{Mutex, Once};

const RESET: &str = "\x1b[0m";

/// Fixed-width tag printed in front of each record.
pub fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Trace => "TRACE",
        Level::Debug => "DEBUG",
        Level::Info => " INFO",
        Level::Warn => " WARN",
        Level::Error => "ERROR",
    }
}

/// ANSI color escape for a level.
pub fn level_color(level: Level) -> &'static str {
    match level {
        Level::Trace => "\x1b[90m", // Gray
        Level::Debug => "\x1b[36m", // Cyan
        Level::Info => "\x1b[32m",  // Green
        Level::Warn => "\x1b[33m",  // Yellow
        Level::Error => "\x1b[31m", // Red
    }
}

/// Write one formatted record line to `out`.
pub fn write_record<W: Write>(
    out: &mut W,
    level: Level,
    target: &str,
    args: fmt::Arguments<'_>,
) -> fmt::Result {
    write!(out, "{}[{}]{} ", level_color(level), level_tag(level), RESET)?;
    if !target.is_empty() {
        write!(out, "{}: ", target)?;
    }
    out.write_fmt(args)?;
    out.write_str("\n")
}

/// A `log` backend writing to one serial port.
///
/// The port sits behind a spinlock; the logger is `Sync` as long as the
/// port handle is `Send`.
pub struct SerialLogger<P> {
    serial: Mutex<Option<SerialPort<P>>>,
    level: LevelFilter,
}

impl<P> SerialLogger<P> {
    /// A logger with no port attached. Records are discarded until
    /// [`SerialLogger::attach`] is called.
    pub const fn new(level: LevelFilter) -> Self {
        Self {
            serial: Mutex::new(None),
            level,
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }
}

impl<P: OutPort + InPort> SerialLogger<P> {
    /// Start writing records to `serial`. The port must already be set up.
    pub fn attach(&self, serial: SerialPort<P>) {
        *self.serial.lock() = Some(serial);
    }

    /// Take the port back, leaving the logger silent.
    pub fn detach(&self) -> Option<SerialPort<P>> {
        self.serial.lock().take()
    }
}

impl<P: OutPort + InPort + Send> Log for SerialLogger<P> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(serial) = self.serial.lock().as_mut() {
            let _ = write_record(serial, record.level(), record.target(), *record.args());
        }
    }

    fn flush(&self) {}
}

/// Why a logger was not installed. Hardware is untouched in both cases.
#[derive(Debug)]
pub enum InitError {
    /// A logger already occupies the slot.
    AlreadyInstalled,
    /// The `log` facade refused the logger.
    SetLogger(SetLoggerError),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::AlreadyInstalled => write!(f, "serial logger already installed"),
            InitError::SetLogger(err) => write!(f, "{}", err),
        }
    }
}

/// Create the logger in `slot`, register it, then bring up the UART.
///
/// `register` runs before any port is written, so every error path leaves
/// the UART and an existing logger as they were. Once `slot` is filled,
/// later calls fail with [`InitError::AlreadyInstalled`].
pub fn install<P, F>(
    slot: &'static Once<SerialLogger<P>>,
    ports: P,
    config: UartConfig,
    level: LevelFilter,
    register: F,
) -> Result<&'static SerialLogger<P>, InitError>
where
    P: OutPort + InPort + Send,
    F: FnOnce(&'static SerialLogger<P>) -> Result<(), SetLoggerError>,
{
    if slot.is_completed() {
        return Err(InitError::AlreadyInstalled);
    }
    let logger = slot.call_once(|| SerialLogger::new(level));
    register(logger).map_err(InitError::SetLogger)?;

    let mut serial = SerialPort::new(ports, config.port);
    serial.init(config);
    logger.attach(serial);
    Ok(logger)
}

#[cfg(target_arch = "x86_64")]
mod global {
    use khal::port::IoSpace;
    use khal::serial::UartConfig;
    use log::LevelFilter;
    use spin::Once;

    use super::{install, InitError, SerialLogger};

    static LOGGER: Once<SerialLogger<IoSpace>> = Once::new();

    /// Configure the UART in `config` and install it as the global logger.
    ///
    /// # Safety
    ///
    /// Touches the UART's I/O ports directly; see [`IoSpace::new`].
    pub unsafe fn init(config: UartConfig, level: LevelFilter) -> Result<(), InitError> {
        install(&LOGGER, IoSpace::new(), config, level, |logger| {
            log::set_logger(logger)
        })?;
        log::set_max_level(level);
        log::info!("klog: serial logger on {:#x}", config.port.raw());
        Ok(())
    }
}

#[cfg(target_arch = "x86_64")]
pub use global::init;

#[cfg(test)]
mod tests {
    use super::*;
    use khal::fixed::U16;
    use khal::port::{PortLog, PortWrite};
    use khal::serial::LineStatus;

    fn ready_port() -> SerialPort<PortLog<256>> {
        SerialPort::new(
            PortLog::with_input(LineStatus::TRANSMIT_EMPTY.bits()),
            U16::new(0x3F8),
        )
    }

    fn sent(serial: &SerialPort<PortLog<256>>) -> String {
        serial
            .ports()
            .writes()
            .iter()
            .map(|w| w.value as char)
            .collect()
    }

    #[test]
    fn record_line_format() {
        let mut line = String::new();
        write_record(&mut line, Level::Warn, "kdisplay", format_args!("x = {}", 3)).unwrap();
        assert_eq!(line, "\x1b[33m[ WARN]\x1b[0m kdisplay: x = 3\n");
    }

    #[test]
    fn empty_target_is_omitted() {
        let mut line = String::new();
        write_record(&mut line, Level::Error, "", format_args!("halt")).unwrap();
        assert_eq!(line, "\x1b[31m[ERROR]\x1b[0m halt\n");
    }

    #[test]
    fn logger_writes_to_attached_port() {
        let logger = SerialLogger::new(LevelFilter::Debug);
        logger.attach(ready_port());

        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("boot")
                .args(format_args!("ok"))
                .build(),
        );

        let serial = logger.detach().unwrap();
        assert_eq!(sent(&serial), "\x1b[32m[ INFO]\x1b[0m boot: ok\r\n");
    }

    #[test]
    fn records_above_level_are_dropped() {
        let logger = SerialLogger::new(LevelFilter::Info);
        logger.attach(ready_port());

        logger.log(
            &Record::builder()
                .level(Level::Trace)
                .target("boot")
                .args(format_args!("noise"))
                .build(),
        );

        let serial = logger.detach().unwrap();
        assert!(serial.ports().writes().is_empty());
        assert_eq!(logger.level(), LevelFilter::Info);
    }

    #[test]
    fn second_install_leaves_uart_and_logger_alone() {
        static SLOT: Once<SerialLogger<PortLog<64>>> = Once::new();

        let com1 = UartConfig::new(U16::new(0x3F8), U16::new(1));
        let logger = install(&SLOT, PortLog::new(), com1, LevelFilter::Debug, |_| Ok(())).unwrap();
        assert_eq!(logger.level(), LevelFilter::Debug);

        let mut registered = false;
        let com2 = UartConfig::new(U16::new(0x2F8), U16::new(3));
        let result = install(&SLOT, PortLog::new(), com2, LevelFilter::Trace, |_| {
            registered = true;
            Ok(())
        });
        assert!(matches!(result, Err(InitError::AlreadyInstalled)));
        assert!(!registered);
        assert_eq!(logger.level(), LevelFilter::Debug);

        // Still the first port, programmed once.
        let serial = logger.detach().unwrap();
        assert_eq!(serial.ports().issued(), 6);
        assert_eq!(serial.ports().writes()[0], PortWrite::new(0x3FB, 0x80));
        assert!(serial.ports().writes().iter().all(|w| w.port & 0xFFF8 == 0x3F8));
    }

    #[test]
    fn init_error_messages() {
        assert_eq!(
            InitError::AlreadyInstalled.to_string(),
            "serial logger already installed"
        );
    }

    #[test]
    fn detached_logger_is_silent() {
        let logger: SerialLogger<PortLog<4>> = SerialLogger::new(LevelFilter::Trace);
        logger.log(&Record::builder().args(format_args!("dropped")).build());
        assert!(logger.detach().is_none());
    }
}
