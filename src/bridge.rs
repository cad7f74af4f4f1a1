//! C ABI surface for hosts that load this crate as a dynamic library.
//!
//! Exposes the four link operations under the symbol names a host binding
//! imports (`SerialOpen`, `SerialWrite`, `SerialRead`, `SerialClose`),
//! marshaling between raw pointer/length pairs and Rust slices. All four
//! operate on one process-wide link behind a mutex. The bridge adds no retry
//! and no buffering of its own; every condition is encoded in the primitive
//! return value and nothing unwinds across the boundary.

use std::ffi::{CStr, c_char, c_int};
use std::sync::{Mutex, MutexGuard};

use log::warn;

use crate::link::SerialLink;

static LINK: Mutex<SerialLink> = Mutex::new(SerialLink::new());

fn lock_link() -> MutexGuard<'static, SerialLink> {
    // A panic while holding the lock must not wedge every later call.
    LINK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Open `port_name` at `baud_rate`. Returns 1 on success, 0 on failure.
/// A port that is already open is closed before the new attempt.
///
/// # Safety
///
/// `port_name` must be null or a valid NUL-terminated C string.
#[unsafe(export_name = "SerialOpen")]
pub unsafe extern "C" fn serial_open(port_name: *const c_char, baud_rate: c_int) -> c_int {
    if port_name.is_null() || baud_rate <= 0 {
        return 0;
    }
    let name = match unsafe { CStr::from_ptr(port_name) }.to_str() {
        Ok(name) if !name.is_empty() => name,
        _ => return 0,
    };

    match lock_link().open(name, baud_rate as u32) {
        Ok(()) => 1,
        Err(e) => {
            warn!("failed to open {}: {}", name, e);
            0
        }
    }
}

/// Write `length` bytes from `data`. Returns the count actually written,
/// which is less than `length` on device error or exhausted retries, and 0
/// when the port is not open.
///
/// # Safety
///
/// `data` must be null or valid for reads of `length` bytes.
#[unsafe(export_name = "SerialWrite")]
pub unsafe extern "C" fn serial_write(data: *const u8, length: c_int) -> c_int {
    if data.is_null() || length <= 0 {
        return 0;
    }
    let data = unsafe { std::slice::from_raw_parts(data, length as usize) };
    write_link(&mut lock_link(), data)
}

/// Read up to `buffer_size - 1` bytes into `buffer`. Data is
/// NUL-terminated for hosts that treat it as text; binary consumers must
/// rely on the returned count alone. Returns 0 when no data is available,
/// the port is not open, or the device failed.
///
/// # Safety
///
/// `buffer` must be null or valid for writes of `buffer_size` bytes.
#[unsafe(export_name = "SerialRead")]
pub unsafe extern "C" fn serial_read(buffer: *mut u8, buffer_size: c_int) -> c_int {
    if buffer.is_null() || buffer_size < 2 {
        return 0;
    }
    let buf = unsafe { std::slice::from_raw_parts_mut(buffer, buffer_size as usize) };
    read_link(&mut lock_link(), buf)
}

/// Close the port. Closing an already-closed port is a no-op.
#[unsafe(export_name = "SerialClose")]
pub extern "C" fn serial_close() {
    lock_link().close();
}

fn write_link(link: &mut SerialLink, data: &[u8]) -> c_int {
    link.write(data).map_or(0, |n| n as c_int)
}

fn read_link(link: &mut SerialLink, buf: &mut [u8]) -> c_int {
    let capacity = buf.len() - 1;
    match link.read(&mut buf[..capacity]) {
        Ok(n) if n > 0 => {
            buf[n] = 0;
            n as c_int
        }
        // "No data yet" and device failure both fold to 0 here; the
        // library API keeps them distinct for callers that care.
        Ok(_) | Err(_) => 0,
    }
}
