//! # Domain Models
//!
//! Plain data shared by the TelQr crates: the configuration record with its
//! defaults and override merge, inline style groups, and the device signature
//! tables used to tell handheld browsers apart from desktop ones.
//! No DOM access, no I/O.

pub mod config;
pub mod signatures;
pub mod style;

pub use config::{CorrectLevel, QrCodeOptions, Styling, TelQrConfig, TelQrConfigOverrides};
pub use signatures::SignatureTable;
pub use style::StyleGroup;
