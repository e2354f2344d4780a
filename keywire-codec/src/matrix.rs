//! Scan-matrix frame decoding.

use std::collections::HashSet;

/// Decode one scan frame into the set of pressed (row, col) coordinates.
///
/// Each row occupies `ceil(cols / 8)` bytes; byte order within a row is
/// reversed, so the last byte of a row group holds columns 0..8. Bytes
/// past the end of `raw` read as not pressed, so partial frames from a
/// device mid-disconnect degrade to fewer pressed keys instead of an
/// error. Runs on every poll tick; allocates nothing beyond the
/// returned set.
pub fn decode_frame(raw: &[u8], rows: u8, cols: u8) -> HashSet<(u8, u8)> {
    let row_size = (cols as usize).div_ceil(8);
    let mut pressed = HashSet::new();
    for row in 0..rows {
        for col in 0..cols {
            let byte = row as usize * row_size + (row_size - 1 - col as usize / 8);
            let bit = col % 8;
            if raw.get(byte).is_some_and(|b| b >> bit & 1 == 1) {
                pressed.insert((row, col));
            }
        }
    }
    pressed
}

#[cfg(test)]
#[path = "matrix_test.rs"]
mod test;
