//! Symbolic rendering and parsing of 16-bit key action codes.

use keywire_common::{
    keycodes::key_range,
    protocol::{self, Versioned},
};

use crate::{keycodes, CodecError};

type Result<T> = core::result::Result<T, CodecError>;

#[derive(Debug, Clone, Copy)]
enum Split {
    /// Selector in the high byte, inner key in the low byte.
    HighByte,
    /// Layer-tap split; the inner width is resolved by protocol version.
    LayerTap,
}

/// One masked-keycode family.
pub struct MaskKind {
    pub name: &'static str,
    base: u16,
    min: u16,
    max: u16,
    split: Split,
    label: fn(u16, &str) -> String,
}

/// The masked-keycode families. Extend here when a firmware generation
/// adds one; parsing, rendering, and merging all walk this table.
pub static MASK_KINDS: [MaskKind; 3] = [
    MaskKind {
        name: "MOD",
        base: 0,
        min: key_range::MOD_MIN,
        max: key_range::MOD_MAX,
        split: Split::HighByte,
        label: mod_label,
    },
    MaskKind {
        name: "MT",
        base: key_range::MOD_TAP_MIN,
        min: key_range::MOD_TAP_MIN,
        max: key_range::MOD_TAP_MAX,
        split: Split::HighByte,
        label: mod_tap_label,
    },
    MaskKind {
        name: "LT",
        base: key_range::LAYER_TAP_MIN,
        min: key_range::LAYER_TAP_MIN,
        max: key_range::LAYER_TAP_MAX,
        split: Split::LayerTap,
        label: layer_tap_label,
    },
];

fn mod_label(selector: u16, inner: &str) -> String {
    format!("{}-{}", keycodes::modifiers_to_string(selector as u8), inner)
}

fn mod_tap_label(selector: u16, inner: &str) -> String {
    format!("{}/{}", keycodes::modifiers_to_string(selector as u8), inner)
}

fn layer_tap_label(selector: u16, inner: &str) -> String {
    format!("LT{selector} {inner}")
}

impl MaskKind {
    fn contains(&self, code: u16) -> bool {
        (self.min..=self.max).contains(&code)
    }

    fn inner_bits(&self, version: u8) -> u16 {
        match self.split {
            Split::HighByte => 8,
            Split::LayerTap => protocol::resolve(Versioned::LayerTapInnerBits, version),
        }
    }

    fn selector_mask(&self, version: u8) -> u16 {
        match self.split {
            Split::HighByte => key_range::MAX_MOD_BITS,
            Split::LayerTap => protocol::resolve(Versioned::LayerTapLayerMask, version),
        }
    }

    pub fn inner_mask(&self, version: u8) -> u16 {
        (1 << self.inner_bits(version)) - 1
    }

    pub fn selector(&self, code: u16, version: u8) -> u16 {
        (code >> self.inner_bits(version)) & self.selector_mask(version)
    }

    pub fn inner(&self, code: u16, version: u8) -> u16 {
        code & self.inner_mask(version)
    }

    fn compose(&self, selector: u16, inner: u16, version: u8) -> u16 {
        self.base
            | ((selector & self.selector_mask(version)) << self.inner_bits(version))
            | (inner & self.inner_mask(version))
    }

    fn parse_call(&self, args: &str, at: usize, version: u8) -> Result<u16> {
        let Some(comma) = top_level_comma(args) else {
            return Err(CodecError::new(
                format!("{} takes (selector,key)", self.name),
                at..at + args.len(),
            ));
        };
        let selector = self.parse_selector(&args[..comma], at, version)?;
        let inner = parse(&args[comma + 1..], at + comma + 1, version)?;
        let code = self.compose(selector, inner, version);
        if !self.contains(code) {
            return Err(CodecError::new(
                format!("selector {selector} out of range for {}", self.name),
                at..at + comma,
            ));
        }
        Ok(code)
    }

    fn parse_selector(&self, s: &str, at: usize, version: u8) -> Result<u16> {
        let t = s.trim();
        let at = at + (s.len() - s.trim_start().len());
        let selector = if let Ok(n) = t.parse::<u16>() {
            Some(n)
        } else if matches!(self.split, Split::HighByte) && !t.is_empty() {
            keycodes::modifiers_to_bit_map(t).map(u16::from)
        } else {
            None
        };
        match selector {
            Some(n) if n <= self.selector_mask(version) => Ok(n),
            Some(n) => Err(CodecError::new(
                format!("selector {n} out of range for {}", self.name),
                at..at + t.len(),
            )),
            None => Err(CodecError::new(
                format!("invalid selector '{t}'"),
                at..at + t.len(),
            )),
        }
    }
}

pub fn mask_kind(code: u16) -> Option<&'static MaskKind> {
    MASK_KINDS.iter().find(|k| k.contains(code))
}

/// Render a key action code symbolically. Total: unknown codes render as
/// raw hexadecimal.
pub fn to_symbol(code: u16, version: u8) -> String {
    if let Some(kind) = mask_kind(code) {
        return format!(
            "{}({},{})",
            kind.name,
            kind.selector(code, version),
            to_symbol(kind.inner(code, version), version)
        );
    }
    if let Some(n) = tap_dance_index(code) {
        return format!("TD({n})");
    }
    if let Some(n) = macro_index(code) {
        return format!("M({n})");
    }
    match keycodes::key_def(code) {
        Some(def) => def.name.clone(),
        None => format!("0x{code:04X}"),
    }
}

/// Parse a symbolic keycode back to its action code.
pub fn from_symbol(sym: &str, version: u8) -> Result<u16> {
    parse(sym, 0, version)
}

fn parse(s: &str, offset: usize, version: u8) -> Result<u16> {
    let offset = offset + (s.len() - s.trim_start().len());
    let t = s.trim();
    if t.is_empty() {
        return Err(CodecError::new("missing keycode".into(), offset..offset + 1));
    }

    if let Some(open) = t.find('(') {
        if !t.ends_with(')') {
            return Err(CodecError::new(
                format!("missing ')' in '{t}'"),
                offset..offset + t.len(),
            ));
        }
        let name = &t[..open];
        let args = &t[open + 1..t.len() - 1];
        let args_at = offset + open + 1;

        match name {
            "TD" => return parse_reference(args, args_at, key_range::TAP_DANCE_MIN, key_range::TAP_DANCE_MAX),
            "M" => return parse_reference(args, args_at, key_range::MACRO_MIN, key_range::MACRO_MAX),
            _ => {}
        }
        if let Some(kind) = MASK_KINDS.iter().find(|k| k.name == name) {
            return kind.parse_call(args, args_at, version);
        }
        return Err(CodecError::new(
            format!("unknown identifier '{name}'"),
            offset..offset + open,
        ));
    }

    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        return u16::from_str_radix(hex, 16).map_err(|_| {
            CodecError::new(
                format!("invalid keycode number '{t}'"),
                offset..offset + t.len(),
            )
        });
    }
    if let Some(code) = keycodes::key_code(t) {
        return Ok(code);
    }
    let mut chars = t.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(code) = keycodes::char_code(c) {
            return Ok(code);
        }
    }
    Err(CodecError::new(
        format!("unknown identifier '{t}'"),
        offset..offset + t.len(),
    ))
}

fn parse_reference(args: &str, at: usize, min: u16, max: u16) -> Result<u16> {
    let t = args.trim();
    let at = at + (args.len() - args.trim_start().len());
    let n: u16 = t.parse().map_err(|_| {
        CodecError::new(format!("invalid reference index '{t}'"), at..at + t.len())
    })?;
    if n > max - min {
        return Err(CodecError::new(
            format!("reference index {n} out of range"),
            at..at + t.len(),
        ));
    }
    Ok(min + n)
}

fn top_level_comma(args: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in args.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// Merge a new inner key into an existing composite, preserving the
/// outer selector bits. Pure bit merge; the selector is never re-derived
/// from anything but `code`'s own bits.
pub fn resolve_masked_inner(code: u16, inner: u16, version: u8) -> u16 {
    match mask_kind(code) {
        Some(kind) => {
            let inner_mask = kind.inner_mask(version);
            (code & !inner_mask) | (inner & inner_mask)
        }
        None => {
            debug_assert!(false, "resolve_masked_inner on non-composite code {code:#06x}");
            (code & 0xff00) | (inner & 0x00ff)
        }
    }
}

pub fn is_composite(code: u16) -> bool {
    mask_kind(code).is_some()
}

pub fn is_tap_dance_ref(code: u16) -> bool {
    tap_dance_index(code).is_some()
}

pub fn is_macro_ref(code: u16) -> bool {
    macro_index(code).is_some()
}

pub fn tap_dance_index(code: u16) -> Option<u16> {
    matches!(code, key_range::TAP_DANCE_MIN..=key_range::TAP_DANCE_MAX)
        .then(|| code - key_range::TAP_DANCE_MIN)
}

pub fn macro_index(code: u16) -> Option<u16> {
    matches!(code, key_range::MACRO_MIN..=key_range::MACRO_MAX)
        .then(|| code - key_range::MACRO_MIN)
}

/// Short label for rendering a code on a key cap.
pub fn display_label(code: u16, version: u8) -> String {
    if let Some(kind) = mask_kind(code) {
        let inner = display_label(kind.inner(code, version), version);
        return (kind.label)(kind.selector(code, version), &inner);
    }
    if let Some(n) = tap_dance_index(code) {
        return format!("TD{n}");
    }
    if let Some(n) = macro_index(code) {
        return format!("M{n}");
    }
    match keycodes::key_def(code) {
        Some(def) => def.label.clone(),
        None => format!("0x{code:04X}"),
    }
}

#[cfg(test)]
#[path = "keysym_test.rs"]
mod test;
