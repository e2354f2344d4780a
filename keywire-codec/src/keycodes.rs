use std::collections::HashMap;

use keywire_common::keycodes::key_range;
use lazy_static::lazy_static;

const DASH_USCORE: [char; 2] = ['_', '-'];

/// Modifier selector spellings, low bit first.
const MODIFIER_BITS: [&str; 8] = ["C", "S", "A", "G", "RC", "RS", "RA", "RG"];

/// Modifier bitmask of the left shift key.
pub const SHIFT_MOD: u8 = 2;

/// One basic key as the configurator presents it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDef {
    pub code: u16,
    pub name: String,
    pub label: String,
    pub tooltip: Option<&'static str>,
}

// (code, canonical-name/aliases, key-cap label, tooltip)
#[rustfmt::skip]
const NAMED_KEYS: &[(u16, &str, &str, &str)] = &[
    (0x00, "KC_NO/noop", "", "Does nothing"),
    (0x01, "KC_TRNS/transparent", "\u{25bd}", "Uses the key on the next active layer below"),
    (0x28, "KC_ENT/enter/return", "Enter", ""),
    (0x29, "KC_ESC/escape", "Esc", ""),
    (0x2a, "KC_BSPC/backspace/bksp", "Bksp", ""),
    (0x2b, "KC_TAB", "Tab", ""),
    (0x2c, "KC_SPC/space/spacebar", "Space", ""),
    (0x2d, "KC_MINS/minus/dash/-", "-", ""),
    (0x2e, "KC_EQL/equal/equals/=", "=", ""),
    (0x2f, "KC_LBRC/leftbracket/[", "[", ""),
    (0x30, "KC_RBRC/rightbracket/]", "]", ""),
    (0x31, "KC_BSLS/backslash/\\", "\\", ""),
    (0x32, "KC_NUHS", "#", "Non-US # and ~"),
    (0x33, "KC_SCLN/semicolon/;", ";", ""),
    (0x34, "KC_QUOT/quote/apostrophe/'", "'", ""),
    (0x35, "KC_GRV/grave/`", "`", ""),
    (0x36, "KC_COMM/comma/,", ",", ""),
    (0x37, "KC_DOT/period/.", ".", ""),
    (0x38, "KC_SLSH/slash", "/", ""),
    (0x39, "KC_CAPS/capslock", "Caps", ""),
    (0x46, "KC_PSCR/printscreen/print", "Print", ""),
    (0x47, "KC_SCRL/scrolllock", "Scroll", ""),
    (0x48, "KC_PAUS/pause", "Pause", ""),
    (0x49, "KC_INS/insert", "Ins", ""),
    (0x4a, "KC_HOME", "Home", ""),
    (0x4b, "KC_PGUP/pageup", "PgUp", ""),
    (0x4c, "KC_DEL/delete", "Del", ""),
    (0x4d, "KC_END", "End", ""),
    (0x4e, "KC_PGDN/pagedown", "PgDn", ""),
    (0x4f, "KC_RGHT/right", "\u{2192}", ""),
    (0x50, "KC_LEFT", "\u{2190}", ""),
    (0x51, "KC_DOWN", "\u{2193}", ""),
    (0x52, "KC_UP", "\u{2191}", ""),
    (0x53, "KC_NUM/numlock", "Num", ""),
    (0x54, "KC_PSLS/kpslash", "KP /", ""),
    (0x55, "KC_PAST/kpasterisk", "KP *", ""),
    (0x56, "KC_PMNS/kpminus", "KP -", ""),
    (0x57, "KC_PPLS/kpplus", "KP +", ""),
    (0x58, "KC_PENT/kpenter", "KP Enter", ""),
    (0x63, "KC_PDOT/kpdot", "KP .", ""),
    (0x64, "KC_NUBS", "\\", "Non-US \\ and |"),
    (0x65, "KC_APP/application/menu", "Menu", "Context menu key"),
    (0x67, "KC_PEQL/kpequal", "KP =", ""),
    (0x7f, "KC_MUTE", "Mute", ""),
    (0x80, "KC_VOLU/volumeup", "Vol +", ""),
    (0x81, "KC_VOLD/volumedown", "Vol -", ""),
    (0xe0, "KC_LCTL/leftcontrol/lctrl", "LCtrl", ""),
    (0xe1, "KC_LSFT/leftshift/lshift", "LShift", ""),
    (0xe2, "KC_LALT/leftalt", "LAlt", ""),
    (0xe3, "KC_LGUI/leftgui/lcmd/lwin", "LGui", "Windows / Command key"),
    (0xe4, "KC_RCTL/rightcontrol/rctrl", "RCtrl", ""),
    (0xe5, "KC_RSFT/rightshift/rshift", "RShift", ""),
    (0xe6, "KC_RALT/rightalt/altgr", "RAlt", ""),
    (0xe7, "KC_RGUI/rightgui/rcmd/rwin", "RGui", ""),
];

fn normalize(name: &str) -> String {
    if name.chars().count() > 1 {
        name.replace(DASH_USCORE, "").to_lowercase()
    } else {
        name.to_lowercase()
    }
}

lazy_static! {
    static ref MODIFIER_BIT_MAP: HashMap<&'static str, u8> = {
        let mut m = HashMap::new();
        for (i, c) in MODIFIER_BITS.iter().enumerate() {
            m.insert(*c, 1 << i);
        }
        m
    };
    static ref SHIFTED_CHARS: HashMap<char, char> = {
        let mut m = HashMap::new();
        let mut n = '\0';
        for c in r#"`~-_=+[{]}\|;:'",<.>/?1!2@3#4$5%6^7&8*9(0)"#.chars() {
            if n == '\0' {
                n = c;
            } else {
                m.insert(c, n);
                n = '\0';
            }
        }
        m
    };
    static ref KEY_DEFS: Vec<KeyDef> = {
        let mut defs = Vec::new();
        let mut def = |code: u16, names: &str, label: String, tooltip: &'static str| {
            defs.push(KeyDef {
                code,
                name: names.split('/').next().unwrap().to_string(),
                label,
                tooltip: if tooltip.is_empty() { None } else { Some(tooltip) },
            });
        };

        for (i, c) in ('A'..='Z').enumerate() {
            def(key_range::BASIC_A + i as u16, &format!("KC_{c}"), c.to_string(), "");
        }
        for (i, c) in "123456789".chars().enumerate() {
            def(key_range::BASIC_1 + i as u16, &format!("KC_{c}"), c.to_string(), "");
        }
        def(key_range::BASIC_0, "KC_0", "0".into(), "");
        for i in 0..12u16 {
            def(0x3a + i, &format!("KC_F{}", i + 1), format!("F{}", i + 1), "");
        }
        for i in 0..12u16 {
            def(0x68 + i, &format!("KC_F{}", i + 13), format!("F{}", i + 13), "");
        }
        for i in 0..9u16 {
            def(0x59 + i, &format!("KC_P{}", i + 1), format!("KP {}", i + 1), "");
        }
        def(0x62, "KC_P0", "KP 0".into(), "Keypad 0");
        for (code, names, label, tooltip) in NAMED_KEYS {
            def(*code, names, label.to_string(), tooltip);
        }

        defs.sort_by_key(|d| d.code);
        defs
    };
    static ref CODE_TO_INDEX: HashMap<u16, usize> = {
        let mut m = HashMap::new();
        for (i, def) in KEY_DEFS.iter().enumerate() {
            if m.insert(def.code, i).is_some() {
                panic!("keycode already added {:#06x}", def.code);
            }
        }
        m
    };
    static ref KEY_NAMES: HashMap<String, u16> = {
        let mut m = HashMap::new();
        m.insert("/".into(), 0x38);
        let mut ins = |a: &str, b: u16| {
            let k = normalize(a);
            if m.contains_key(k.as_str()) {
                panic!("key name already added {a}");
            }
            m.insert(k, b);
        };

        for def in KEY_DEFS.iter() {
            if let Some(short) = def.name.strip_prefix("KC_") {
                ins(short, def.code);
            }
        }
        for (code, names, _, _) in NAMED_KEYS {
            for name in names.split('/').skip(1) {
                ins(name, *code);
            }
        }
        m
    };
}

pub fn key_code(name: &str) -> Option<u16> {
    let name = if name.len() > 1 && name.starts_with('\\') {
        &name[1..]
    } else {
        name
    };
    if let Some(short) = name.strip_prefix("KC_").or_else(|| name.strip_prefix("kc_")) {
        return KEY_NAMES.get(normalize(short).as_str()).copied();
    }
    KEY_NAMES.get(normalize(name).as_str()).copied()
}

pub fn key_def(code: u16) -> Option<&'static KeyDef> {
    CODE_TO_INDEX.get(&code).map(|i| &KEY_DEFS[*i])
}

/// All basic keys in code order, for UI pickers.
pub fn keycodes_iter() -> impl Iterator<Item = &'static KeyDef> {
    KEY_DEFS.iter()
}

pub fn unshifted_char_code(c: char) -> char {
    match c {
        'A'..='Z' => c.to_ascii_lowercase(),
        c => *SHIFTED_CHARS.get(&c).unwrap_or(&c),
    }
}

pub fn char_to_code(c: char) -> u16 {
    match c {
        'a'..='z' => ((c as u8) - b'a') as u16 + key_range::BASIC_A,
        '1'..='9' => ((c as u8) - b'1') as u16 + key_range::BASIC_1,
        '0' => key_range::BASIC_0,
        c => key_code(c.to_string().as_str()).unwrap_or(0),
    }
}

/// Recorder alias for a single printable character.
///
/// Shifted characters resolve to a shift-masked composite of the
/// unshifted key.
pub fn char_code(c: char) -> Option<u16> {
    let unshifted = unshifted_char_code(c);
    let base = char_to_code(unshifted);
    if base == 0 {
        return None;
    }
    if unshifted == c {
        Some(base)
    } else {
        Some(((SHIFT_MOD as u16) << 8) | base)
    }
}

pub fn modifiers_to_bit_map(text: &str) -> Option<u8> {
    if text.is_empty() {
        return Some(0);
    }
    let mut bm = 0;
    for s in text.split('-') {
        match MODIFIER_BIT_MAP.get(s) {
            Some(bit) => bm |= bit,
            None => return None,
        }
    }

    Some(bm)
}

pub fn modifiers_to_string(mut modifiers: u8) -> String {
    let mut ans = String::new();

    for m in MODIFIER_BITS {
        if modifiers == 0 {
            return ans;
        }
        if modifiers & 1 == 1 {
            if !ans.is_empty() {
                ans += "-";
            }
            ans += m;
        }

        modifiers >>= 1;
    }
    ans
}

#[cfg(test)]
#[path = "keycodes_test.rs"]
mod test;
