use std::io;

#[cfg(feature = "serial")]
pub mod serial;

/// A raw byte device underneath a serial link.
///
/// Implementors provide single-attempt read/write access to a serial-like
/// connection. The transport is synchronous and blocking; retry and pacing
/// policy live in [`crate::link::SerialLink`], not here.
pub trait Transport: Send {
    /// Write bytes, returning how many were accepted.
    /// May accept fewer than `buf.len()`.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Read bytes into the buffer, returning the count. Should return
    /// `Ok(0)` or `Err(TimedOut)` when nothing arrives in time, not block
    /// forever.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Discard any bytes queued in both directions.
    fn discard_buffers(&mut self) -> io::Result<()>;
}
