use std::time::Duration;

/// Timing and retry policy for a serial link.
///
/// The defaults are tuned for small microcontroller peripherals (Pico-class
/// boards) that reset when the port opens and drain their receive buffer
/// slowly.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Inter-byte read timeout. A read returns as soon as any data arrives,
    /// or empty once this much time passes without any.
    pub read_timeout: Duration,
    /// Maximum write attempts before giving up on the unsent remainder.
    pub write_attempts: u32,
    /// Delay before retrying a write that would block.
    pub write_retry_delay: Duration,
    /// Delay between chunks of a partially accepted write.
    pub write_pacing: Duration,
    /// Delay after a fully transferred write.
    pub write_settle: Duration,
    /// Delay after opening, so the device can finish its own boot/reset.
    pub open_settle: Duration,
}

impl LinkConfig {
    pub const fn new() -> Self {
        Self {
            read_timeout: Duration::from_millis(100),
            write_attempts: 5,
            write_retry_delay: Duration::from_millis(10),
            write_pacing: Duration::from_millis(1),
            write_settle: Duration::from_millis(5),
            open_settle: Duration::from_millis(500),
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::new()
    }
}
