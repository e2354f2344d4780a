use keywire_common::keycodes::key_range;

use crate::{keycodes, test::kc};

use super::*;

#[test]
fn basic_symbols() {
    assert_eq!(to_symbol(kc("a"), 6), "KC_A");
    assert_eq!(to_symbol(0, 6), "KC_NO");
    assert_eq!(to_symbol(0x0066, 6), "0x0066");
    assert_eq!(from_symbol("KC_A", 6).unwrap(), 4);
    assert_eq!(from_symbol("spc", 6).unwrap(), 0x2c);
    assert_eq!(from_symbol("0x0066", 6).unwrap(), 0x66);
    assert_eq!(from_symbol("!", 6).unwrap(), 0x021e);
}

#[test]
fn layer_tap_uses_protocol_split() {
    // layer in bits 8..12 from protocol 6
    assert_eq!(to_symbol(0x4200, 6), "LT(2,KC_NO)");
    assert_eq!(from_symbol("LT(2,KC_NO)", 6).unwrap(), 0x4200);
    // earlier firmware kept a 7-bit inner key
    assert_eq!(to_symbol(0x4200, 5), "LT(4,KC_NO)");
    assert_eq!(from_symbol("LT(4,KC_NO)", 5).unwrap(), 0x4200);
}

#[test]
fn composite_syntax() {
    assert_eq!(from_symbol("MOD(2,KC_1)", 6).unwrap(), 0x021e);
    assert_eq!(to_symbol(0x021e, 6), "MOD(2,KC_1)");
    assert_eq!(from_symbol("MOD(C-S,KC_A)", 6).unwrap(), 0x0304);
    assert_eq!(from_symbol("MT(1,KC_ESC)", 6).unwrap(), 0x2129);
    assert_eq!(to_symbol(0x2129, 6), "MT(1,KC_ESC)");
    assert_eq!(from_symbol("LT(2, KC_A)", 6).unwrap(), 0x4204);
}

#[test]
fn references() {
    assert_eq!(to_symbol(key_range::TAP_DANCE_MIN + 3, 6), "TD(3)");
    assert_eq!(from_symbol("TD(3)", 6).unwrap(), key_range::TAP_DANCE_MIN + 3);
    assert_eq!(to_symbol(key_range::MACRO_MIN, 6), "M(0)");
    assert_eq!(from_symbol("M(12)", 6).unwrap(), key_range::MACRO_MIN + 12);
    assert!(from_symbol("TD(256)", 6).is_err());
    assert!(from_symbol("M(x)", 6).is_err());
}

#[test]
fn masked_merge_preserves_outer_bits() {
    assert_eq!(resolve_masked_inner(0x4200, kc("a"), 6), 0x4204);
    // the old split keeps bit 7 with the selector
    assert_eq!(resolve_masked_inner(0x4280, kc("a"), 5), 0x4284);

    for inner in 0..=0xff {
        assert_eq!(resolve_masked_inner(0x2104, inner, 6) & 0xff00, 0x2100);
        assert_eq!(resolve_masked_inner(0x4200, inner, 6) & 0xff00, 0x4200);
    }
}

#[test]
fn parse_failures_carry_spans() {
    let err = from_symbol("LT(2,KC_A", 6).unwrap_err();
    assert!(err.message.contains("missing ')'"));

    let err = from_symbol("FOO(1,KC_A)", 6).unwrap_err();
    assert!(err.message.contains("unknown identifier"));
    assert_eq!(err.span, Some(0..3));

    let err = from_symbol("wibble", 6).unwrap_err();
    assert_eq!(err.span, Some(0..6));

    assert!(from_symbol("", 6).is_err());
    assert!(from_symbol("LT(17,KC_A)", 6).is_err());
    assert!(from_symbol("MOD(0,KC_A)", 6).is_err());
    assert!(from_symbol("0xfffff", 6).is_err());
}

#[test]
fn every_code_round_trips() {
    for version in [5u8, 6] {
        for code in 0..=u16::MAX {
            let sym = to_symbol(code, version);
            assert_eq!(
                from_symbol(&sym, version).unwrap(),
                code,
                "{sym} under v{version}"
            );
        }
    }
}

#[test]
fn exactly_one_range_claims_each_code() {
    for code in 0..=u16::MAX {
        let claims = [
            is_composite(code),
            is_tap_dance_ref(code),
            is_macro_ref(code),
            keycodes::key_def(code).is_some(),
        ];
        assert!(
            claims.iter().filter(|c| **c).count() <= 1,
            "{code:#06x} claimed twice"
        );
    }
}

#[test]
fn reference_indices_round_trip() {
    for code in key_range::TAP_DANCE_MIN..=key_range::TAP_DANCE_MAX {
        assert_eq!(tap_dance_index(code), Some(code - key_range::TAP_DANCE_MIN));
    }
    assert_eq!(tap_dance_index(key_range::TAP_DANCE_MIN - 1), None);
    assert_eq!(macro_index(key_range::MACRO_MAX + 1), None);
}

#[test]
fn display_labels() {
    assert_eq!(display_label(kc("a"), 6), "A");
    assert_eq!(display_label(0x0204, 6), "S-A");
    assert_eq!(display_label(0x2129, 6), "C/Esc");
    assert_eq!(display_label(0x4204, 6), "LT2 A");
    assert_eq!(display_label(key_range::TAP_DANCE_MIN + 1, 6), "TD1");
    assert_eq!(display_label(0x5000, 6), "0x5000");
}
