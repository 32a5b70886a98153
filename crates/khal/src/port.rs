//! x86 port I/O primitives.
//!
//! Hardware-facing code never calls `out` directly. It writes through an
//! [`OutPort`] handle, which is either the real CPU port space ([`IoSpace`])
//! or a [`PortLog`] that records the writes instead of issuing them.

/// One side-effecting write request: a byte for a numbered I/O port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortWrite {
    pub port: u16,
    pub value: u8,
}

impl PortWrite {
    pub const fn new(port: u16, value: u8) -> Self {
        Self { port, value }
    }
}

/// Something that can accept byte writes to numbered I/O ports.
///
/// There is no return value and no error path. At this layer a write to a
/// port with nothing behind it cannot be detected.
pub trait OutPort {
    fn outb(&mut self, port: u16, value: u8);

    /// Issue a prepared [`PortWrite`].
    #[inline]
    fn emit(&mut self, write: PortWrite) {
        self.outb(write.port, write.value);
    }
}

/// Something that can read bytes from numbered I/O ports.
pub trait InPort {
    fn inb(&mut self, port: u16) -> u8;
}

impl<T: OutPort + ?Sized> OutPort for &mut T {
    #[inline]
    fn outb(&mut self, port: u16, value: u8) {
        (**self).outb(port, value);
    }
}

impl<T: InPort + ?Sized> InPort for &mut T {
    #[inline]
    fn inb(&mut self, port: u16) -> u8 {
        (**self).inb(port)
    }
}

/// Write a byte to an x86 I/O port.
///
/// # Safety
///
/// Writing to an arbitrary I/O port can have side effects on hardware.
/// The caller must ensure the port and value are valid.
#[cfg(target_arch = "x86_64")]
#[inline]
pub unsafe fn outb(port: u16, value: u8) {
    x86_64::instructions::port::PortWriteOnly::<u8>::new(port).write(value);
}

/// Read a byte from an x86 I/O port.
///
/// # Safety
///
/// Reading from an arbitrary I/O port can have side effects on hardware.
/// The caller must ensure the port is valid.
#[cfg(target_arch = "x86_64")]
#[inline]
pub unsafe fn inb(port: u16) -> u8 {
    x86_64::instructions::port::PortReadOnly::<u8>::new(port).read()
}

/// The CPU's I/O port address space.
///
/// Zero-sized: every `outb` compiles down to a single `out dx, al`.
#[cfg(target_arch = "x86_64")]
#[derive(Debug)]
pub struct IoSpace {
    _private: (),
}

#[cfg(target_arch = "x86_64")]
impl IoSpace {
    /// # Safety
    ///
    /// The caller must have exclusive access to the ports it will touch
    /// through this handle, which in practice means early boot with
    /// interrupts disabled and a single core running.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

#[cfg(target_arch = "x86_64")]
impl OutPort for IoSpace {
    #[inline]
    fn outb(&mut self, port: u16, value: u8) {
        // SAFETY: exclusivity was asserted when the handle was created.
        unsafe { outb(port, value) }
    }
}

#[cfg(target_arch = "x86_64")]
impl InPort for IoSpace {
    #[inline]
    fn inb(&mut self, port: u16) -> u8 {
        // SAFETY: exclusivity was asserted when the handle was created.
        unsafe { inb(port) }
    }
}

/// Records up to `N` port writes instead of sending them to hardware.
///
/// Writes past capacity are counted but not stored, so a dry run can still
/// tell how many writes a sequence would have issued. Reads return a fixed
/// byte, which lets status polling be scripted.
#[derive(Debug, Clone)]
pub struct PortLog<const N: usize> {
    writes: [PortWrite; N],
    len: usize,
    issued: usize,
    input: u8,
}

impl<const N: usize> PortLog<N> {
    pub const fn new() -> Self {
        Self::with_input(0)
    }

    /// A log whose reads all return `input`.
    pub const fn with_input(input: u8) -> Self {
        Self {
            writes: [PortWrite::new(0, 0); N],
            len: 0,
            issued: 0,
            input,
        }
    }

    /// The recorded writes, oldest first.
    pub fn writes(&self) -> &[PortWrite] {
        &self.writes[..self.len]
    }

    /// Total number of writes issued, including those that did not fit.
    pub fn issued(&self) -> usize {
        self.issued
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.issued = 0;
    }
}

impl<const N: usize> Default for PortLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> OutPort for PortLog<N> {
    fn outb(&mut self, port: u16, value: u8) {
        if self.len < N {
            self.writes[self.len] = PortWrite::new(port, value);
            self.len += 1;
        }
        self.issued += 1;
    }
}

impl<const N: usize> InPort for PortLog<N> {
    fn inb(&mut self, _port: u16) -> u8 {
        self.input
    }
}
