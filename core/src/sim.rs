//! Simulated platform for exercising the queries off-device.
//! Can be enabled by turning the `sim` feature on; test builds include it
//! unconditionally.
//!
//! ## Usage
//! ```rust
//! use nfc_status::platform::ApiLevel;
//! use nfc_status::sim::{SimAdapter, SimPlatform};
//! use nfc_status::NfcStatus;
//!
//! let platform = SimPlatform::new(ApiLevel::JELLY_BEAN)
//!     .with_adapter(SimAdapter::new(true).with_ndef_push(true));
//!
//! assert!(NfcStatus::new().is_android_beam_enabled((), &platform));
//! ```

use std::collections::{HashMap, HashSet};

use crate::platform::{ApiLevel, DispatchError, NfcAdapter, Platform};
use crate::status::NDEF_PUSH_METHOD;

/// A platform yielding scripted answers instead of asking a real device.
pub struct SimPlatform {
    api_level: ApiLevel,
    adapter: Option<SimAdapter>,
}

impl SimPlatform {
    /// Creates a platform at the given API level, without an NFC module.
    pub fn new(api_level: ApiLevel) -> Self {
        Self {
            api_level,
            adapter: None,
        }
    }

    /// Installs an NFC adapter on the simulated device.
    pub fn with_adapter(mut self, adapter: SimAdapter) -> Self {
        self.adapter = Some(adapter);
        self
    }
}

impl Platform<()> for SimPlatform {
    type Adapter = SimAdapter;

    fn api_level(&self, _: ()) -> ApiLevel {
        self.api_level
    }

    // yields a fresh handle per query, like the system service registry
    fn default_adapter(&self, _: ()) -> Option<SimAdapter> {
        self.adapter.clone()
    }
}

/// Scripted NFC adapter handle.
#[derive(Clone, Default)]
pub struct SimAdapter {
    enabled: bool,
    flags: HashMap<String, bool>,
    denied: HashSet<String>,
    failing: HashSet<String>,
}

impl SimAdapter {
    /// Creates an adapter whose NFC module is switched on or off.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    /// Scripts a boolean method resolvable by name on the adapter.
    pub fn with_flag(mut self, name: &str, value: bool) -> Self {
        self.flags.insert(name.to_owned(), value);
        self
    }

    /// Shorthand scripting the Android Beam push state.
    pub fn with_ndef_push(self, value: bool) -> Self {
        self.with_flag(NDEF_PUSH_METHOD, value)
    }

    /// Scripts a method that resolves but refuses access.
    pub fn with_denied(mut self, name: &str) -> Self {
        self.denied.insert(name.to_owned());
        self
    }

    /// Scripts a method that resolves but fails when invoked.
    pub fn with_failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_owned());
        self
    }
}

impl NfcAdapter<()> for SimAdapter {
    fn is_enabled(&self, _: ()) -> bool {
        self.enabled
    }

    fn call_bool(&self, _: (), name: &str) -> Result<bool, DispatchError> {
        if self.denied.contains(name) {
            return Err(DispatchError::AccessDenied(name.to_owned()));
        }

        if self.failing.contains(name) {
            return Err(DispatchError::Invocation(
                name.to_owned(),
                "scripted failure".to_owned(),
            ));
        }

        match self.flags.get(name) {
            Some(value) => Ok(*value),
            None => Err(DispatchError::MethodNotFound(name.to_owned())),
        }
    }
}
