//! 16550 UART configuration.
//!
//! The core of this module is [`configure_baud_rate`], the classic divisor
//! latch sequence. Everything else (line format, FIFOs, the polled
//! transmitter) builds on the same [`OutPort`] handle.
//!
//! ```text
//!   Port │ Write                 │ With DLAB = 1
//!   ─────┼───────────────────────┼──────────────────
//!   +0   │ Transmit Holding      │ Divisor Latch
//!   +1   │ Interrupt Enable      │ Divisor Latch
//!   +2   │ FIFO Control          │
//!   +3   │ Line Control          │
//!   +4   │ Modem Control         │
//!   +5   │ Line Status (read)    │
//! ```

use core::fmt;

use bitflags::bitflags;

use crate::fixed::U16;
use crate::port::{InPort, OutPort};

/// Base port of COM1.
pub const COM1: u16 = 0x3F8;

/// UART input clock divided by 16. The divisor for a rate is this over the rate.
pub const BASE_BAUD: u32 = 115_200;

/// How many times `write_byte` polls the line status before giving up.
pub const TX_POLL_LIMIT: u32 = 100_000;

bitflags! {
    /// Line Control Register (+3).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LineControl: u8 {
        const WORD_LENGTH_0 = 1 << 0;
        const WORD_LENGTH_1 = 1 << 1;
        const TWO_STOP_BITS = 1 << 2;
        const PARITY_ENABLE = 1 << 3;
        const EVEN_PARITY = 1 << 4;
        const STICK_PARITY = 1 << 5;
        const BREAK = 1 << 6;
        /// Divisor Latch Access Bit: ports +0/+1 carry the baud divisor.
        const DLAB = 1 << 7;

        /// 8 data bits, no parity, one stop bit.
        const EIGHT_N_ONE = Self::WORD_LENGTH_0.bits() | Self::WORD_LENGTH_1.bits();
    }
}

bitflags! {
    /// FIFO Control Register (+2).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FifoControl: u8 {
        const ENABLE = 1 << 0;
        const CLEAR_RECEIVE = 1 << 1;
        const CLEAR_TRANSMIT = 1 << 2;
        const TRIGGER_LOW = 1 << 6;
        const TRIGGER_HIGH = 1 << 7;

        /// Enabled, both queues cleared, 14-byte receive trigger.
        const DEFAULT = 0xC7;
    }
}

bitflags! {
    /// Modem Control Register (+4).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ModemControl: u8 {
        const DTR = 1 << 0;
        const RTS = 1 << 1;
        const OUT1 = 1 << 2;
        const OUT2 = 1 << 3;
        const LOOPBACK = 1 << 4;
    }
}

bitflags! {
    /// Line Status Register (+5).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LineStatus: u8 {
        const DATA_READY = 1 << 0;
        const OVERRUN = 1 << 1;
        const PARITY_ERROR = 1 << 2;
        const FRAMING_ERROR = 1 << 3;
        const BREAK = 1 << 4;
        const TRANSMIT_EMPTY = 1 << 5;
        const IDLE = 1 << 6;
        const FIFO_ERROR = 1 << 7;
    }
}

/// Register addresses of one UART, derived from its base port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartPorts {
    base: u16,
}

impl UartPorts {
    pub const fn new(base: u16) -> Self {
        Self { base }
    }

    pub const fn data(self) -> u16 {
        self.base
    }

    pub const fn fifo_command(self) -> u16 {
        self.base.wrapping_add(2)
    }

    pub const fn line_command(self) -> u16 {
        self.base.wrapping_add(3)
    }

    pub const fn modem_command(self) -> u16 {
        self.base.wrapping_add(4)
    }

    pub const fn line_status(self) -> u16 {
        self.base.wrapping_add(5)
    }
}

/// Why a baud rate could not be turned into a divisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError {
    ZeroBaud,
    BaudTooHigh(u32),
    InexactDivisor(u32),
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerialError::ZeroBaud => write!(f, "baud rate must be non-zero"),
            SerialError::BaudTooHigh(baud) => {
                write!(f, "baud rate {} exceeds {}", baud, BASE_BAUD)
            }
            SerialError::InexactDivisor(baud) => {
                write!(f, "baud rate {} does not divide {}", baud, BASE_BAUD)
            }
        }
    }
}

/// Port base and baud divisor for one configuration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    pub port: U16,
    pub divisor: U16,
}

impl UartConfig {
    pub fn new(port: U16, divisor: U16) -> Self {
        Self { port, divisor }
    }

    /// Config for `baud` on `port`, with divisor `BASE_BAUD / baud`.
    pub fn from_baud(port: U16, baud: u32) -> Result<Self, SerialError> {
        if baud == 0 {
            return Err(SerialError::ZeroBaud);
        }
        if baud > BASE_BAUD {
            return Err(SerialError::BaudTooHigh(baud));
        }
        if BASE_BAUD % baud != 0 {
            return Err(SerialError::InexactDivisor(baud));
        }
        Ok(Self::new(port, U16::new(BASE_BAUD / baud)))
    }

    pub fn ports(&self) -> UartPorts {
        UartPorts::new(self.port.as_u16())
    }

    /// Program the divisor latch. See [`configure_baud_rate`].
    pub fn apply<P: OutPort>(&self, ports: &mut P) {
        configure_baud_rate(ports, self.port, self.divisor);
    }
}

/// Program a UART's baud divisor.
///
/// Issues exactly three writes:
///
/// 1. `0x80` (DLAB) to the line command port, `com_port + 3`;
/// 2. the divisor's high byte to `com_port`;
/// 3. the divisor's low byte to `com_port`.
///
/// Nothing is read back. A wrong base address or a missing UART produces no
/// error here. DLAB stays set until the line format is written, so nothing
/// in between may send bytes to `com_port`; this function does not log.
pub fn configure_baud_rate<P: OutPort>(ports: &mut P, com_port: U16, divisor: U16) {
    let uart = UartPorts::new(com_port.as_u16());
    let divisor = divisor.as_u16();

    ports.outb(uart.line_command(), LineControl::DLAB.bits());
    ports.outb(uart.data(), ((divisor >> 8) & 0x00FF) as u8);
    ports.outb(uart.data(), (divisor & 0x00FF) as u8);
}

/// Write the line format. Clears DLAB unless `line` contains it.
pub fn configure_line<P: OutPort>(ports: &mut P, com_port: U16, line: LineControl) {
    ports.outb(UartPorts::new(com_port.as_u16()).line_command(), line.bits());
}

pub fn configure_fifo<P: OutPort>(ports: &mut P, com_port: U16, fifo: FifoControl) {
    ports.outb(UartPorts::new(com_port.as_u16()).fifo_command(), fifo.bits());
}

pub fn configure_modem<P: OutPort>(ports: &mut P, com_port: U16, modem: ModemControl) {
    ports.outb(UartPorts::new(com_port.as_u16()).modem_command(), modem.bits());
}

/// A polled, transmit-only 16550 driver.
pub struct SerialPort<P> {
    ports: P,
    uart: UartPorts,
    dropped: usize,
}

impl<P: OutPort + InPort> SerialPort<P> {
    /// Wraps `ports` without touching hardware. Call [`SerialPort::init`].
    pub fn new(ports: P, base: U16) -> Self {
        Self {
            ports,
            uart: UartPorts::new(base.as_u16()),
            dropped: 0,
        }
    }

    /// Configure the UART: divisor, 8N1, FIFOs on, DTR + RTS.
    pub fn init(&mut self, config: UartConfig) {
        self.uart = config.ports();
        config.apply(&mut self.ports);
        configure_line(&mut self.ports, config.port, LineControl::EIGHT_N_ONE);
        configure_fifo(&mut self.ports, config.port, FifoControl::DEFAULT);
        configure_modem(
            &mut self.ports,
            config.port,
            ModemControl::DTR | ModemControl::RTS,
        );

        // DLAB is clear again; a record routed to this UART is safe now.
        log::debug!(
            "serial: port {:#05x} divisor {:#06x}",
            config.port.raw(),
            config.divisor.raw()
        );
    }

    fn transmit_empty(&mut self) -> bool {
        LineStatus::from_bits_retain(self.ports.inb(self.uart.line_status()))
            .contains(LineStatus::TRANSMIT_EMPTY)
    }

    /// Send one byte once the transmitter is free.
    ///
    /// Gives up after [`TX_POLL_LIMIT`] polls and drops the byte, so a
    /// missing UART cannot hang the boot path.
    pub fn write_byte(&mut self, byte: u8) {
        for _ in 0..TX_POLL_LIMIT {
            if self.transmit_empty() {
                self.ports.outb(self.uart.data(), byte);
                return;
            }
            core::hint::spin_loop();
        }
        self.dropped += 1;
    }

    /// Send a string, turning `\n` into `\r\n` for serial terminals.
    pub fn write_str(&mut self, s: &str) {
        for byte in s.bytes() {
            if byte == b'\n' {
                self.write_byte(b'\r');
            }
            self.write_byte(byte);
        }
    }

    /// Bytes dropped because the transmitter never became ready.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn ports(&self) -> &P {
        &self.ports
    }
}

impl<P: OutPort + InPort> fmt::Write for SerialPort<P> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        SerialPort::write_str(self, s);
        Ok(())
    }
}
