//! NFC capability and enablement queries.

use tracing::trace;

use crate::platform::{ApiLevel, NfcAdapter, Platform};

/// The lowest API level with usable NFC support.
///
/// NFC shipped with Android 2.3 (API 9) but the API only became usable in
/// Android 2.3.3 (API 10), so anything older is treated as not capable.
pub const MIN_API_LEVEL_FOR_NFC: ApiLevel = ApiLevel::GINGERBREAD_MR1;

/// Name of the adapter method reporting the Android Beam push state.
///
/// Hidden in API 14 and 15, public from API 16, so it is dispatched by name
/// instead of through a compiled reference.
pub const NDEF_PUSH_METHOD: &str = "isNdefPushEnabled";

/// Stateless facade querying NFC state through a platform delegate.
///
/// Every query re-acquires the adapter handle from the platform, uses it for
/// a single call and drops it; nothing is cached between invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NfcStatus {
    min_api_level: ApiLevel,
}

impl Default for NfcStatus {
    fn default() -> Self {
        Self {
            min_api_level: MIN_API_LEVEL_FOR_NFC,
        }
    }
}

impl NfcStatus {
    /// Creates a facade gating all queries at [`MIN_API_LEVEL_FOR_NFC`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a facade gating all queries at the given API level instead.
    pub fn with_min_api_level(min_api_level: ApiLevel) -> Self {
        Self { min_api_level }
    }

    /// Returns the NFC adapter handle, or `None`.
    ///
    /// Devices without an NFC module yield `None`. Devices below the minimum
    /// API level yield `None` as well, caused by the missing API support.
    pub fn adapter<Ctx, P>(&self, ctx: Ctx, platform: &P) -> Option<P::Adapter>
    where
        Ctx: Copy,
        P: Platform<Ctx>,
    {
        if platform.api_level(ctx) < self.min_api_level {
            None
        } else {
            platform.default_adapter(ctx)
        }
    }

    /// Returns true if an NFC module is integrated into the device.
    ///
    /// Attention: devices with an NFC module running below the minimum API
    /// level report false, caused by the missing API support.
    pub fn is_nfc_capable<Ctx, P>(&self, ctx: Ctx, platform: &P) -> bool
    where
        Ctx: Copy,
        P: Platform<Ctx>,
    {
        // devices below the minimum level are not capable, missing API support
        if platform.api_level(ctx) < self.min_api_level {
            false
        } else {
            self.adapter(ctx, platform).is_some()
        }
    }

    /// Returns true if the NFC module is switched on.
    ///
    /// The same caveat as [`NfcStatus::is_nfc_capable`] applies: below the
    /// minimum API level the result is false even when NFC is on.
    pub fn is_nfc_enabled<Ctx, P>(&self, ctx: Ctx, platform: &P) -> bool
    where
        Ctx: Copy,
        P: Platform<Ctx>,
    {
        if platform.api_level(ctx) < self.min_api_level {
            false
        } else {
            match self.adapter(ctx, platform) {
                Some(adapter) => adapter.is_enabled(ctx),
                None => false,
            }
        }
    }

    /// Returns true if Android Beam is enabled.
    ///
    /// Beam is a high level protocol for peer to peer connections over NFC.
    /// The adapter method reporting its push state is hidden on some
    /// releases, so it is dispatched by name on the adapter's runtime type;
    /// when that dispatch fails the feature is reported as unavailable.
    pub fn is_android_beam_enabled<Ctx, P>(&self, ctx: Ctx, platform: &P) -> bool
    where
        Ctx: Copy,
        P: Platform<Ctx>,
    {
        let adapter = match self.adapter(ctx, platform) {
            Some(adapter) => adapter,
            None => return false,
        };

        match adapter.call_bool(ctx, NDEF_PUSH_METHOD) {
            Ok(push_state) => push_state && self.is_nfc_enabled(ctx, platform),
            Err(e) => {
                trace!("is_android_beam_enabled(): {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimAdapter, SimPlatform};

    fn device(api_level: u32, adapter: SimAdapter) -> SimPlatform {
        SimPlatform::new(ApiLevel::new(api_level)).with_adapter(adapter)
    }

    fn beam_adapter(enabled: bool, push: bool) -> SimAdapter {
        SimAdapter::new(enabled).with_ndef_push(push)
    }

    #[test]
    fn old_device_is_not_capable_despite_hardware() {
        let status = NfcStatus::new();
        let platform = device(9, beam_adapter(true, true));

        assert!(status.adapter((), &platform).is_none());
        assert!(!status.is_nfc_capable((), &platform));
        assert!(!status.is_nfc_enabled((), &platform));
        assert!(!status.is_android_beam_enabled((), &platform));
    }

    #[test]
    fn minimum_level_is_inclusive() {
        let platform = device(10, SimAdapter::new(false));

        assert!(NfcStatus::new().is_nfc_capable((), &platform));
    }

    #[test]
    fn device_without_hardware_reports_everything_off() {
        let status = NfcStatus::new();
        let platform = SimPlatform::new(ApiLevel::JELLY_BEAN);

        assert!(status.adapter((), &platform).is_none());
        assert!(!status.is_nfc_capable((), &platform));
        assert!(!status.is_nfc_enabled((), &platform));
        assert!(!status.is_android_beam_enabled((), &platform));
    }

    #[test]
    fn enabled_adapter_is_capable_and_enabled() {
        let status = NfcStatus::new();
        let platform = device(16, SimAdapter::new(true));

        assert!(status.is_nfc_capable((), &platform));
        assert!(status.is_nfc_enabled((), &platform));
    }

    #[test]
    fn disabled_adapter_is_capable_but_not_enabled() {
        let status = NfcStatus::new();
        let platform = device(16, SimAdapter::new(false));

        assert!(status.is_nfc_capable((), &platform));
        assert!(!status.is_nfc_enabled((), &platform));
    }

    #[test]
    fn beam_needs_push_state_and_enabled_nfc() {
        for (enabled, push, expected) in [
            (true, true, true),
            (true, false, false),
            (false, true, false),
            (false, false, false),
        ] {
            let platform = device(16, beam_adapter(enabled, push));

            assert_eq!(
                expected,
                NfcStatus::new().is_android_beam_enabled((), &platform),
                "enabled={}, push={}",
                enabled,
                push,
            );
        }
    }

    #[test]
    fn missing_push_method_reports_beam_off() {
        let platform = device(14, SimAdapter::new(true));

        assert!(!NfcStatus::new().is_android_beam_enabled((), &platform));
    }

    #[test]
    fn denied_push_method_reports_beam_off() {
        let platform = device(14, SimAdapter::new(true).with_denied(NDEF_PUSH_METHOD));

        assert!(!NfcStatus::new().is_android_beam_enabled((), &platform));
    }

    #[test]
    fn failing_push_method_reports_beam_off() {
        let platform = device(14, SimAdapter::new(true).with_failing(NDEF_PUSH_METHOD));

        assert!(!NfcStatus::new().is_android_beam_enabled((), &platform));
    }

    #[test]
    fn queries_are_idempotent() {
        let status = NfcStatus::new();
        let platform = device(16, beam_adapter(true, false));

        assert_eq!(
            status.is_nfc_capable((), &platform),
            status.is_nfc_capable((), &platform),
        );
        assert_eq!(
            status.is_nfc_enabled((), &platform),
            status.is_nfc_enabled((), &platform),
        );
        assert_eq!(
            status.is_android_beam_enabled((), &platform),
            status.is_android_beam_enabled((), &platform),
        );
    }

    #[test]
    fn custom_minimum_level_gates_queries() {
        let platform = device(10, SimAdapter::new(true));
        let status = NfcStatus::with_min_api_level(ApiLevel::ICE_CREAM_SANDWICH);

        assert!(!status.is_nfc_capable((), &platform));
        assert!(NfcStatus::new().is_nfc_capable((), &platform));
    }
}
