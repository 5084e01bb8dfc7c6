//! A crate to query the NFC state of an Android device through a platform delegate.
//!
//! Three questions can be answered about the device:
//!
//! - whether it is NFC capable / has an NFC module
//! - whether NFC is enabled
//! - whether Android Beam (p2p push over NFC) is enabled
//!
//! NFC is badly supported since Android 2.3 (API 9). The APIs were improved in
//! Android 2.3.3 (API 10), so every query reports devices below API 10 as not
//! capable, even when they carry an NFC module.

pub mod platform;
pub mod status;

#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use status::NfcStatus;
