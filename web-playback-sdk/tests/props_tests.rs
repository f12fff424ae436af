//! Property-based tests for provider props
//!
//! Validation must accept exactly the props the providers can act on, and
//! the derived player/polling configuration must carry the props unchanged.

use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use web_playback_sdk::{SdkError, WebPlaybackSdkProps};

// ============================================================================
// Test Helpers
// ============================================================================

fn props(device_name: &str) -> WebPlaybackSdkProps {
    WebPlaybackSdkProps::new(device_name, Arc::new(|callback| callback("token".to_string())))
}

/// Device names with at least one visible character
fn device_name_strategy() -> impl Strategy<Value = String> {
    "[ ]{0,2}[A-Za-z0-9][A-Za-z0-9 '-]{0,30}"
}

fn interval_strategy() -> impl Strategy<Value = Duration> {
    (1u64..60_000).prop_map(Duration::from_millis)
}

// ============================================================================
// Validation
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_volume_in_range_is_accepted(
        name in device_name_strategy(),
        volume in 0.0f32..=1.0,
        interval in interval_strategy(),
    ) {
        let props = props(&name)
            .with_volume(volume)
            .with_playback_state_update_interval(interval);
        prop_assert!(props.validate().is_ok());
    }

    #[test]
    fn prop_volume_out_of_range_is_rejected(
        volume in prop_oneof![-1000.0f32..-0.0001, 1.0001f32..1000.0],
    ) {
        let result = props("Player").with_volume(volume).validate();
        prop_assert!(matches!(result, Err(SdkError::InvalidConfig(_))));
    }

    #[test]
    fn prop_blank_names_are_rejected(name in "[ \t]{0,8}") {
        let result = props(&name).validate();
        prop_assert!(matches!(result, Err(SdkError::InvalidConfig(_))));
    }

    #[test]
    fn prop_derived_configs_carry_props(
        name in device_name_strategy(),
        volume in proptest::option::of(0.0f32..=1.0),
        connect in any::<bool>(),
        auto_update in any::<bool>(),
        interval in interval_strategy(),
    ) {
        let mut props = props(&name)
            .with_connect_on_initialized(connect)
            .with_playback_state_auto_update(auto_update)
            .with_playback_state_update_interval(interval);
        props.volume = volume;

        let player = props.player_config();
        prop_assert_eq!(player.device_name, name);
        prop_assert_eq!(player.volume, volume);
        prop_assert_eq!(player.connect_on_initialized, connect);

        let polling = props.polling();
        prop_assert_eq!(polling.auto_update, auto_update);
        prop_assert_eq!(polling.interval, interval);
    }
}
