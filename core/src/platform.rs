//! Abstraction over the host platform's NFC surface.

use std::fmt;

/// Android API level, as reported by `Build.VERSION.SDK_INT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiLevel(u32);

impl ApiLevel {
    /// Android 2.3, where NFC support first appeared.
    pub const GINGERBREAD: Self = Self(9);

    /// Android 2.3.3, the first release with a usable NFC API.
    pub const GINGERBREAD_MR1: Self = Self(10);

    /// Android 4.0, where Android Beam was introduced.
    pub const ICE_CREAM_SANDWICH: Self = Self(14);

    /// Android 4.1, where `isNdefPushEnabled` entered the public API.
    pub const JELLY_BEAN: Self = Self(16);

    /// Wraps a raw `SDK_INT` value.
    pub const fn new(level: u32) -> Self {
        Self(level)
    }

    /// Returns the raw `SDK_INT` value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ApiLevel {
    fn from(level: u32) -> Self {
        Self(level)
    }
}

impl fmt::Display for ApiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API {}", self.0)
    }
}

/// Failure raised while dispatching an adapter method by name.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("adapter has no method named {0}")]
    MethodNotFound(String),

    #[error("access to adapter method {0} was denied")]
    AccessDenied(String),

    #[error("invoking adapter method {0} failed: {1}")]
    Invocation(String, String),
}

/// A delegate resolving platform facts for one execution context.
pub trait Platform<Ctx> {
    /// Handle to the NFC adapter yielded by this platform.
    type Adapter: NfcAdapter<Ctx>;

    /// Reports the API level of the running platform.
    fn api_level(&self, ctx: Ctx) -> ApiLevel;

    /// Asks the system service registry for the default NFC adapter.
    ///
    /// Devices without an NFC module yield `None`; that is the normal
    /// "not capable" signal, not an error.
    fn default_adapter(&self, ctx: Ctx) -> Option<Self::Adapter>;
}

/// An opaque handle to the NFC controller of the device.
pub trait NfcAdapter<Ctx> {
    /// Reports whether the NFC module is switched on.
    fn is_enabled(&self, ctx: Ctx) -> bool;

    /// Invokes a nullary boolean method on the adapter, resolved by name
    /// against the adapter's runtime type at call time.
    ///
    /// Name resolution at call time keeps methods reachable that are hidden
    /// from the compiled API surface on some platform releases.
    fn call_bool(&self, ctx: Ctx, name: &str) -> Result<bool, DispatchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_levels_order_numerically() {
        assert!(ApiLevel::GINGERBREAD < ApiLevel::GINGERBREAD_MR1);
        assert!(ApiLevel::new(15) < ApiLevel::JELLY_BEAN);
        assert_eq!(ApiLevel::new(14), ApiLevel::ICE_CREAM_SANDWICH);
    }

    #[test]
    fn api_level_displays_with_prefix() {
        assert_eq!("API 10", ApiLevel::GINGERBREAD_MR1.to_string());
    }
}
