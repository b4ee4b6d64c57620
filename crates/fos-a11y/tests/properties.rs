//! Property tests for the settings engine

use fos_a11y::{ExclusiveMode, IndependentFlag, StateEngine};
use proptest::prelude::*;

fn exclusive_mode() -> impl Strategy<Value = ExclusiveMode> {
    prop_oneof![
        Just(ExclusiveMode::Inverted),
        Just(ExclusiveMode::Grayscale),
        Just(ExclusiveMode::HighContrast),
    ]
}

fn independent_flag() -> impl Strategy<Value = IndependentFlag> {
    prop_oneof![
        Just(IndependentFlag::ImagesHidden),
        Just(IndependentFlag::ReadableFont),
        Just(IndependentFlag::FocusHighlighted),
    ]
}

proptest! {
    #[test]
    fn test_at_most_one_exclusive_mode(modes in prop::collection::vec(exclusive_mode(), 0..40)) {
        let mut engine = StateEngine::new();
        for mode in modes {
            let after = engine.set_exclusive_mode(mode);
            prop_assert!(after.active_count() <= 1);
            prop_assert_eq!(after, engine.state().exclusive_modes());
        }
    }

    #[test]
    fn test_turning_mode_on_selects_it(prefix in prop::collection::vec(exclusive_mode(), 0..10), mode in exclusive_mode()) {
        let mut engine = StateEngine::new();
        for m in prefix {
            engine.set_exclusive_mode(m);
        }
        let was_on = engine.state().exclusive_modes().is_on(mode);
        let after = engine.set_exclusive_mode(mode);
        prop_assert_eq!(after.is_on(mode), !was_on);
        if !was_on {
            prop_assert_eq!(after.active_count(), 1);
        }
    }

    #[test]
    fn test_independent_flags_never_touch_modes(
        mode in exclusive_mode(),
        flags in prop::collection::vec(independent_flag(), 0..20),
    ) {
        let mut engine = StateEngine::new();
        let modes = engine.set_exclusive_mode(mode);
        for flag in flags {
            engine.set_independent_flag(flag);
        }
        prop_assert_eq!(engine.state().exclusive_modes(), modes);
    }

    #[test]
    fn test_text_scale_always_in_range(percent in any::<i64>()) {
        let mut engine = StateEngine::new();
        let stored = engine.set_text_scale(percent);
        prop_assert!((50..=200).contains(&stored));
        prop_assert_eq!(stored, engine.state().text_scale_percent());
        if (50..=200).contains(&percent) {
            prop_assert_eq!(i64::from(stored), percent);
        }
    }

    #[test]
    fn test_line_height_always_in_range(percent in any::<i64>()) {
        let mut engine = StateEngine::new();
        let stored = engine.set_line_height(percent);
        prop_assert!((50..=200).contains(&stored));
        let descriptor = engine.synthesize_presentation();
        prop_assert!(descriptor.line_height >= 0.75 && descriptor.line_height <= 3.0);
    }

    #[test]
    fn test_letter_spacing_always_in_range(px in any::<f64>()) {
        let mut engine = StateEngine::new();
        let stored = engine.set_letter_spacing(px);
        prop_assert!((0.0..=5.0).contains(&stored));
        prop_assert_eq!(stored, engine.state().letter_spacing_px());
    }
}
