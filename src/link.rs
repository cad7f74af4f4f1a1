use std::io;
use std::thread;

use log::{debug, warn};

use crate::config::LinkConfig;
use crate::error::{LinkError, Result};
use crate::transport::Transport;

/// A serial link owning at most one open device at a time.
///
/// The link is either closed (no transport attached) or open. Opening closes
/// any previously attached device first, so the prior handle is always
/// released no matter how the new attempt ends. Any failure during open
/// collapses back to the closed state; there is no separate error state.
///
/// Methods take `&mut self` and block the calling thread for bounded
/// durations. Callers that share a link across threads must serialize access
/// themselves (the C bridge does this with a mutex).
pub struct SerialLink {
    transport: Option<Box<dyn Transport>>,
    config: LinkConfig,
}

impl SerialLink {
    pub const fn new() -> Self {
        Self::with_config(LinkConfig::new())
    }

    pub const fn with_config(config: LinkConfig) -> Self {
        Self {
            transport: None,
            config,
        }
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    /// Open the named port at the given baud rate.
    ///
    /// A previously open device is closed first. On failure the link stays
    /// closed and nothing is leaked.
    #[cfg(feature = "serial")]
    pub fn open(&mut self, port_name: &str, baud_rate: u32) -> Result<()> {
        self.close();
        let transport =
            crate::transport::serial::open_port(port_name, baud_rate, self.config.read_timeout)?;
        self.attach(Box::new(transport))
    }

    /// Attach an already-open transport to the link.
    ///
    /// Runs the same post-open stabilization as [`open`](Self::open):
    /// discards any bytes queued in either direction, then waits out the
    /// open settle delay so a freshly reset peripheral can finish booting.
    /// On failure the transport is dropped and the link stays closed.
    pub fn attach(&mut self, mut transport: Box<dyn Transport>) -> Result<()> {
        self.close();
        transport.discard_buffers()?;
        thread::sleep(self.config.open_settle);
        self.transport = Some(transport);
        Ok(())
    }

    /// Write the whole buffer, retrying transient conditions.
    ///
    /// Interrupted writes are retried for free. Would-block conditions and
    /// zero-byte writes count against the attempt budget, with a short delay
    /// before the next try. Any other device error stops the loop. The
    /// returned count is less than `data.len()` when the budget runs out or
    /// the device fails hard; no error is raised for a shortfall.
    pub fn write(&mut self, data: &[u8]) -> Result<usize> {
        let transport = self.transport.as_mut().ok_or(LinkError::NotOpen)?;

        let mut written = 0;
        let mut attempts = 0;
        while written < data.len() && attempts < self.config.write_attempts {
            match transport.write(&data[written..]) {
                Ok(0) => {
                    attempts += 1;
                    thread::sleep(self.config.write_retry_delay);
                }
                Ok(n) => {
                    written += n;
                    if written < data.len() {
                        // Pace chunks so a slow receiver isn't flooded.
                        thread::sleep(self.config.write_pacing);
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e)
                    if e.kind() == io::ErrorKind::WouldBlock
                        || e.kind() == io::ErrorKind::TimedOut =>
                {
                    attempts += 1;
                    thread::sleep(self.config.write_retry_delay);
                }
                Err(e) => {
                    warn!("write failed after {} bytes: {}", written, e);
                    return Ok(written);
                }
            }
        }

        if written > 0 {
            debug!("wrote {} bytes", written);
        }
        if written == data.len() {
            // Give the device time to process the frame.
            thread::sleep(self.config.write_settle);
        }
        Ok(written)
    }

    /// Read whatever is available, waiting at most one read timeout.
    ///
    /// `Ok(0)` means nothing arrived in time; device failures come back as
    /// errors instead of being folded into the empty case.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let transport = self.transport.as_mut().ok_or(LinkError::NotOpen)?;

        match transport.read(buf) {
            Ok(n) => {
                if n > 0 {
                    debug!("read {} bytes", n);
                }
                Ok(n)
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::Interrupted
                        | io::ErrorKind::WouldBlock
                        | io::ErrorKind::TimedOut
                ) =>
            {
                Ok(0)
            }
            Err(e) => {
                warn!("read failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Close the link. Closing an already-closed link is a no-op.
    pub fn close(&mut self) {
        if self.transport.take().is_some() {
            debug!("closing serial port");
        }
    }
}

impl Default for SerialLink {
    fn default() -> Self {
        Self::new()
    }
}
