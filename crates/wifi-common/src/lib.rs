//! Common types and utilities shared across all wifi-scout crates.

pub mod error;
pub mod network;
pub mod sample;

pub use error::{WifiError, WifiResult};
pub use network::{CurrentConnection, NetworkInfo};
pub use sample::{SamplePoint, CANVAS_SIZE, MAX_RSSI, MIN_RSSI};
