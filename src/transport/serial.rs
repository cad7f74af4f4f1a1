use std::io;
use std::time::Duration;

use log::info;
use serialport::{ClearBuffer, DataBits, FlowControl, Parity, StopBits};

use crate::error::Result;

use super::Transport;

/// Fixed line parameters: 8N1 with no flow control.
const DATA_BITS: DataBits = DataBits::Eight;
const STOP_BITS: StopBits = StopBits::One;
const PARITY: Parity = Parity::None;
const FLOW_CONTROL: FlowControl = FlowControl::None;

/// A transport backed by a native serial port.
pub struct SerialTransport {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialTransport {
    pub fn new(port: Box<dyn serialport::SerialPort>) -> Self {
        Self { port }
    }
}

impl Transport for SerialTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::Write::write(&mut self.port, buf)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        io::Read::read(&mut self.port, buf)
    }

    fn discard_buffers(&mut self) -> io::Result<()> {
        self.port
            .clear(ClearBuffer::All)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}

/// Open a serial port in raw mode (8N1) at the given baud rate.
///
/// The device is acquired exclusively without becoming the controlling
/// terminal, and the requested baud rate is applied as given on every
/// platform. Canonical input processing, echo, flow control, and CR/LF
/// translation are all disabled so raw bytes pass through unmodified.
/// Reads return as soon as any data is available, waiting at most
/// `read_timeout` when none has arrived yet.
pub fn open_port(port_name: &str, baud_rate: u32, read_timeout: Duration) -> Result<SerialTransport> {
    let port = serialport::new(port_name, baud_rate)
        .data_bits(DATA_BITS)
        .stop_bits(STOP_BITS)
        .parity(PARITY)
        .flow_control(FLOW_CONTROL)
        .timeout(read_timeout)
        .open()?;

    info!("opened {} at {} baud", port_name, baud_rate);
    Ok(SerialTransport::new(port))
}
