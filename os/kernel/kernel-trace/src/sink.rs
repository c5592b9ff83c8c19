use core::fmt::{self, Write};
use core::hint::spin_loop;
use kernel_mmio::RegisterBus;
use kernel_mmio::map::uart;
use kernel_mmio::regs::UartFlags;

/// A byte-at-a-time output device.
pub trait ByteSink {
    fn write_byte(&self, byte: u8);

    fn write_bytes(&self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &S {
    fn write_byte(&self, byte: u8) {
        (**self).write_byte(byte);
    }
}

/// Formats into a [`ByteSink`] without buffering.
pub struct SinkWriter<'s, S: ?Sized>(pub &'s S);

impl<S: ByteSink + ?Sized> Write for SinkWriter<'_, S> {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write_bytes(s.as_bytes());
        Ok(())
    }
}

/// Transmit side of the PL011 UART. Line feeds go out as CR LF.
///
/// The UART is expected to be set up already (baud rate, pin functions).
#[derive(Debug)]
pub struct UartSink<B> {
    bus: B,
}

impl<B: RegisterBus> UartSink<B> {
    #[must_use]
    pub const fn new(bus: B) -> Self {
        Self { bus }
    }

    #[cfg_attr(not(feature = "enabled"), allow(dead_code))]
    fn put(&self, byte: u8) {
        while UartFlags::from_bits(self.bus.read(uart::FR)).txff() {
            spin_loop();
        }
        self.bus.write(uart::DR, u32::from(byte));
    }
}

impl<B: RegisterBus> ByteSink for UartSink<B> {
    #[cfg(feature = "enabled")]
    fn write_byte(&self, byte: u8) {
        if byte == b'\n' {
            self.put(b'\r');
        }
        self.put(byte);
    }

    #[cfg(not(feature = "enabled"))]
    fn write_byte(&self, _byte: u8) {}
}
