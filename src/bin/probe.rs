use std::env;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use serial_bridge::SerialLink;

/// How long to poll for a reply before giving up.
const REPLY_WINDOW: Duration = Duration::from_secs(1);

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let Some(port) = args.next() else {
        eprintln!("usage: serial-probe <port> [baud] [message]");
        return ExitCode::FAILURE;
    };
    let baud = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(115_200);
    let message = args.next().unwrap_or_else(|| "ping\n".to_string());

    let mut link = SerialLink::new();
    if let Err(e) = link.open(&port, baud) {
        eprintln!("failed to open {port}: {e}");
        return ExitCode::FAILURE;
    }

    let sent = link.write(message.as_bytes()).unwrap_or(0);
    println!("sent {sent} of {} bytes", message.len());

    let mut buf = [0u8; 256];
    let deadline = Instant::now() + REPLY_WINDOW;
    while Instant::now() < deadline {
        match link.read(&mut buf) {
            Ok(0) => thread::sleep(Duration::from_millis(20)),
            Ok(n) => println!("received {n} bytes: {:02X?}", &buf[..n]),
            Err(e) => {
                eprintln!("read failed: {e}");
                link.close();
                return ExitCode::FAILURE;
            }
        }
    }

    link.close();
    ExitCode::SUCCESS
}
