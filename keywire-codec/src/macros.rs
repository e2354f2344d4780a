//! Macro sequence wire codec.
//!
//! The firmware reserves one fixed byte region for all macro slots. Slots
//! are stored back to back, each a stream of tagged actions ended by a
//! single NUL byte. Plain text is stored as raw ASCII; every tag value
//! sits below the ASCII range so no escaping is needed.

use keywire_common::{
    keycodes::macro_tag,
    protocol::{self, Versioned},
    PROTOCOL_VERSION,
};
use serde::{Deserialize, Serialize};

use crate::{keysym, CodecError};

type Result<T> = core::result::Result<T, CodecError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroAction {
    Text(String),
    Tap(Vec<u16>),
    Down(Vec<u16>),
    Up(Vec<u16>),
    Delay(u16),
}

pub type MacroSequence = Vec<MacroAction>;

/// True iff `text` only contains characters the firmware accepts in a
/// macro text action.
pub fn validate_text(text: &str) -> bool {
    text.chars().all(valid_text_char)
}

fn valid_text_char(c: char) -> bool {
    matches!(c, ' '..='~' | '\t' | '\n')
}

/// Serialize one macro slot, without its NUL terminator.
pub fn serialize_sequence(seq: &[MacroAction], version: u8) -> Result<Vec<u8>> {
    let width = protocol::resolve(Versioned::MacroKeycodeWidth, version) as usize;
    let mut out = Vec::new();
    for action in seq {
        match action {
            MacroAction::Text(text) => {
                if let Some((i, c)) = text.char_indices().find(|(_, c)| !valid_text_char(*c)) {
                    return Err(CodecError::new(
                        format!("macro text character {c:?} is not 7-bit ASCII"),
                        i..i + c.len_utf8(),
                    ));
                }
                out.extend_from_slice(text.as_bytes());
            }
            MacroAction::Tap(codes) => push_keys(&mut out, macro_tag::TAP, codes, width),
            MacroAction::Down(codes) => push_keys(&mut out, macro_tag::DOWN, codes, width),
            MacroAction::Up(codes) => push_keys(&mut out, macro_tag::UP, codes, width),
            MacroAction::Delay(ms) => {
                out.push(macro_tag::DELAY);
                out.extend_from_slice(&ms.to_le_bytes());
            }
        }
    }
    Ok(out)
}

fn push_keys(out: &mut Vec<u8>, tag: u8, codes: &[u16], width: usize) {
    for code in codes {
        out.push(tag);
        if width == 2 {
            out.extend_from_slice(&code.to_le_bytes());
        } else {
            out.push(*code as u8);
        }
    }
}

/// Serialize every slot in order, each NUL-terminated. The result is
/// exactly what the transport layer writes to the device's macro region.
pub fn serialize_all_slots(slots: &[MacroSequence], version: u8) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for seq in slots {
        out.append(&mut serialize_sequence(seq, version)?);
        out.push(macro_tag::TERMINATOR);
    }
    Ok(out)
}

/// Bytes of macro region the slots occupy, terminators included. Always
/// equals `serialize_all_slots(..)?.len()`.
pub fn memory_used(slots: &[MacroSequence], version: u8) -> Result<usize> {
    let mut total = 0;
    for seq in slots {
        total += serialize_sequence(seq, version)?.len() + 1;
    }
    Ok(total)
}

/// Split a macro region into exactly `slot_count` sequences.
///
/// Missing slots decode as empty sequences; segments past the last slot
/// are ignored. Never fails: corrupted segments parse as far as the data
/// allows.
pub fn deserialize_all_slots(buffer: &[u8], version: u8, slot_count: usize) -> Vec<MacroSequence> {
    let mut slots = Vec::with_capacity(slot_count);
    let mut segments = buffer.split(|b| *b == macro_tag::TERMINATOR);
    for _ in 0..slot_count {
        match segments.next() {
            Some(segment) => slots.push(deserialize_sequence(segment, version)),
            None => slots.push(Vec::new()),
        }
    }

    let extra: usize = segments.map(|s| s.len()).sum();
    if extra > 0 {
        log::debug!("ignoring {extra} bytes past the final macro slot");
    }

    slots
}

/// Parse one slot's bytes. Best-effort: parsing stops where valid data
/// stops, so a truncated or corrupted slot still yields its readable
/// prefix.
pub fn deserialize_sequence(bytes: &[u8], version: u8) -> MacroSequence {
    let width = protocol::resolve(Versioned::MacroKeycodeWidth, version) as usize;
    let mut seq = MacroSequence::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            tag @ (macro_tag::TAP | macro_tag::DOWN | macro_tag::UP) => {
                let Some(code) = read_key(bytes, i + 1, width) else {
                    log::warn!("macro key action at offset {i} is missing its keycode");
                    break;
                };
                push_key(&mut seq, tag, code);
                i += 1 + width;
            }
            macro_tag::DELAY => {
                let Some(payload) = bytes.get(i + 1..i + 3) else {
                    log::warn!("macro delay at offset {i} is missing its payload");
                    break;
                };
                seq.push(MacroAction::Delay(u16::from_le_bytes([payload[0], payload[1]])));
                i += 3;
            }
            b if b >= macro_tag::TEXT_MIN => {
                let start = i;
                while i < bytes.len() && bytes[i] >= macro_tag::TEXT_MIN {
                    i += 1;
                }
                let text = String::from_utf8_lossy(&bytes[start..i]);
                match seq.last_mut() {
                    Some(MacroAction::Text(prev)) => prev.push_str(&text),
                    _ => seq.push(MacroAction::Text(text.into_owned())),
                }
            }
            b => {
                log::warn!("unknown macro tag {b:#04x} at offset {i}");
                break;
            }
        }
    }
    seq
}

fn read_key(bytes: &[u8], at: usize, width: usize) -> Option<u16> {
    let chunk = bytes.get(at..at + width)?;
    Some(if width == 2 {
        u16::from_le_bytes([chunk[0], chunk[1]])
    } else {
        chunk[0] as u16
    })
}

// Consecutive key actions with the same tag fold into one list; that is
// the canonical in-memory form, so decode(encode(x)) == x holds for it.
fn push_key(seq: &mut MacroSequence, tag: u8, code: u16) {
    if let Some(last) = seq.last_mut() {
        match (tag, last) {
            (macro_tag::TAP, MacroAction::Tap(codes))
            | (macro_tag::DOWN, MacroAction::Down(codes))
            | (macro_tag::UP, MacroAction::Up(codes)) => {
                codes.push(code);
                return;
            }
            _ => {}
        }
    }
    seq.push(match tag {
        macro_tag::TAP => MacroAction::Tap(vec![code]),
        macro_tag::DOWN => MacroAction::Down(vec![code]),
        macro_tag::UP => MacroAction::Up(vec![code]),
        _ => unreachable!(),
    });
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PortableAction {
    Text(String),
    Tap(Vec<String>),
    Down(Vec<String>),
    Up(Vec<String>),
    Delay(u16),
}

/// Render a sequence as JSON with symbolic keycodes, for export and the
/// text-editor mode. Independent of protocol version and byte width.
pub fn to_portable_text(seq: &[MacroAction]) -> String {
    let portable: Vec<PortableAction> = seq
        .iter()
        .map(|action| match action {
            MacroAction::Text(s) => PortableAction::Text(s.clone()),
            MacroAction::Tap(codes) => PortableAction::Tap(to_symbols(codes)),
            MacroAction::Down(codes) => PortableAction::Down(to_symbols(codes)),
            MacroAction::Up(codes) => PortableAction::Up(to_symbols(codes)),
            MacroAction::Delay(ms) => PortableAction::Delay(*ms),
        })
        .collect();
    serde_json::to_string(&portable).expect("portable macro actions always serialize")
}

/// Inverse of [`to_portable_text`]. `None` signals structurally invalid
/// input; callers gate the apply control on it instead of crashing.
pub fn from_portable_text(text: &str) -> Option<MacroSequence> {
    let portable: Vec<PortableAction> = serde_json::from_str(text).ok()?;
    let mut seq = MacroSequence::with_capacity(portable.len());
    for action in portable {
        seq.push(match action {
            PortableAction::Text(s) => MacroAction::Text(s),
            PortableAction::Tap(syms) => MacroAction::Tap(from_symbols(&syms)?),
            PortableAction::Down(syms) => MacroAction::Down(from_symbols(&syms)?),
            PortableAction::Up(syms) => MacroAction::Up(from_symbols(&syms)?),
            PortableAction::Delay(ms) => MacroAction::Delay(ms),
        });
    }
    Some(seq)
}

fn to_symbols(codes: &[u16]) -> Vec<String> {
    codes
        .iter()
        .map(|code| keysym::to_symbol(*code, PROTOCOL_VERSION))
        .collect()
}

fn from_symbols(syms: &[String]) -> Option<Vec<u16>> {
    syms.iter()
        .map(|sym| keysym::from_symbol(sym, PROTOCOL_VERSION).ok())
        .collect()
}

#[cfg(test)]
#[path = "macros_test.rs"]
mod test;
