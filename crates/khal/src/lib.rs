//! Hardware Abstraction Layer.
//!
//! The pieces of x86 hardware access that exist before the kernel does:
//! port writes, register-width integers and UART setup.
#![cfg_attr(not(test), no_std)]

pub mod fixed;
pub mod port;
pub mod serial;

pub use fixed::{FixedWidth, I16, I8, U16, U8};
pub use port::{InPort, OutPort, PortLog, PortWrite};
pub use serial::{SerialPort, UartConfig};

#[cfg(target_arch = "x86_64")]
pub use port::IoSpace;
