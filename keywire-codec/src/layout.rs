//! Layout option bit packing.
//!
//! A board declares its physical-variant choices as an ordered list of
//! fields; the firmware stores every choice in one configuration word.
//! Packing order is a firmware convention: fields pack in declaration
//! order from the high end, so the last-declared field occupies the
//! lowest-order bits.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOption {
    pub index: u16,
    pub labels: Vec<String>,
}

impl LayoutOption {
    pub fn new(index: u16, labels: &[&str]) -> Self {
        Self {
            index,
            labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    pub fn is_boolean(&self) -> bool {
        self.labels.len() == 2
    }

    pub fn bit_width(&self) -> u32 {
        match self.labels.len() {
            0 | 1 => 0,
            2 => 1,
            n => u32::BITS - ((n - 1) as u32).leading_zeros(),
        }
    }

    fn value_mask(&self) -> u32 {
        match self.bit_width() {
            0 => 0,
            w => (1 << w) - 1,
        }
    }
}

/// Pack selected values into the configuration word. Missing selections
/// default to 0; out-of-range selections are masked to the field width.
pub fn pack(values: &HashMap<u16, u32>, fields: &[LayoutOption]) -> u32 {
    let mut packed = 0u32;
    for field in fields {
        let width = field.bit_width();
        if width == 0 {
            continue;
        }
        let value = values.get(&field.index).copied().unwrap_or(0);
        if value > field.value_mask() {
            log::warn!(
                "layout option {} value {value} exceeds {width} bit(s)",
                field.index
            );
        }
        packed = (packed << width) | (value & field.value_mask());
    }
    packed
}

/// Inverse of [`pack`]. A negative `packed` is the "not read from the
/// device yet" sentinel and yields an empty map.
pub fn unpack(packed: i64, fields: &[LayoutOption]) -> HashMap<u16, u32> {
    let mut values = HashMap::new();
    if packed < 0 {
        return values;
    }
    let mut rest = packed as u64;
    for field in fields.iter().rev() {
        let width = field.bit_width();
        if width == 0 {
            continue;
        }
        values.insert(field.index, (rest & field.value_mask() as u64) as u32);
        rest >>= width;
    }
    values
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod test;
