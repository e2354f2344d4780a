use crate::test::kc;

use super::*;

#[test]
fn modifiers_convert() {
    assert_eq!(modifiers_to_bit_map("S").unwrap(), 2);
    assert_eq!(modifiers_to_bit_map("C-S-RA").unwrap(), 0b0100_0011);
    assert_eq!(modifiers_to_bit_map(""), Some(0));
    assert_eq!(modifiers_to_bit_map("X"), None);
    assert_eq!(modifiers_to_string(0b0100_0011), "C-S-RA");
    assert_eq!(modifiers_to_string(0), "");
}

#[test]
fn char_to_code_test() {
    fn ccode(c: char) -> u16 {
        let a = char_to_code(unshifted_char_code(c));
        assert!(a != 0, "invalid char {c}");
        a
    }

    assert_eq!(ccode('a'), kc("a"));
    assert_eq!(ccode('0'), kc("0"));
    assert_eq!(ccode('1'), kc("1"));
    assert_eq!(ccode('A'), kc("a"));
    assert_eq!(ccode('5'), kc("5"));
    assert_eq!(ccode('%'), kc("5"));
    assert_eq!(ccode('['), kc("["));
    assert_eq!(ccode('{'), kc("["));
    assert_eq!(ccode('<'), kc(","));
    assert_eq!(ccode('\\'), kc("backslash"));
}

#[test]
fn shifted_chars_resolve_to_composites() {
    assert_eq!(char_code('a'), Some(4));
    assert_eq!(char_code('A'), Some(((SHIFT_MOD as u16) << 8) | 4));
    assert_eq!(char_code('!'), Some(((SHIFT_MOD as u16) << 8) | kc("1")));
    assert_eq!(char_code('\u{263a}'), None);
}

#[test]
fn test_key_code() {
    assert_eq!(key_code("a"), Some(4));
    assert_eq!(key_code("A"), Some(4));
    assert_eq!(key_code("KC_A"), Some(4));
    assert_eq!(key_code("kc_a"), Some(4));
    assert_eq!(key_code("Page_Up"), Some(0x4b));
    assert_eq!(key_code("volume-up"), Some(0x80));
    assert_eq!(key_code("-"), Some(0x2d));
    assert_eq!(key_code("\\["), Some(0x2f));
    assert_eq!(key_code("nosuchkey"), None);
}

#[test]
fn key_def_metadata() {
    let def = key_def(4).unwrap();
    assert_eq!(def.name, "KC_A");
    assert_eq!(def.label, "A");
    assert!(def.tooltip.is_none());

    let trns = key_def(1).unwrap();
    assert_eq!(trns.name, "KC_TRNS");
    assert!(trns.tooltip.is_some());

    assert!(key_def(0x66).is_none());
}

#[test]
fn test_list_keycodes() {
    assert!(keycodes_iter().count() > 100);

    let f24 = keycodes_iter().find(|d| d.name == "KC_F24").unwrap();
    assert_eq!(f24.code, 0x73);

    let mut prev = None;
    for def in keycodes_iter() {
        if let Some(p) = prev {
            assert!(def.code > p, "table out of order at {:#06x}", def.code);
        }
        prev = Some(def.code);
    }
}
