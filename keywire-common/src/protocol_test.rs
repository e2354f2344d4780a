use super::*;

#[test]
fn keycode_width_by_version() {
    assert_eq!(resolve(Versioned::MacroKeycodeWidth, 1), 1);
    assert_eq!(resolve(Versioned::MacroKeycodeWidth, 5), 1);
    assert_eq!(resolve(Versioned::MacroKeycodeWidth, 6), 2);
    assert_eq!(resolve(Versioned::MacroKeycodeWidth, 9), 2);
}

#[test]
fn layer_tap_split_moved_at_v6() {
    assert_eq!(resolve(Versioned::LayerTapInnerBits, 5), 7);
    assert_eq!(resolve(Versioned::LayerTapInnerBits, 6), 8);
    assert_eq!(resolve(Versioned::LayerTapLayerMask, 5), 0x1f);
    assert_eq!(resolve(Versioned::LayerTapLayerMask, 6), 0xf);
}
