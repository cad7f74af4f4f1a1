#[cfg(feature = "serial")]
pub mod bridge;
pub mod config;
pub mod error;
pub mod link;
pub mod transport;

pub use config::LinkConfig;
pub use error::{LinkError, Result};
pub use link::SerialLink;
