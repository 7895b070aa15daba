//! # UTF-16 Code Units
//!
//! Entity offsets are counted in UTF-16 code units, so a character outside
//! the Basic Multilingual Plane (most emoji) occupies two positions. Rust
//! strings are UTF-8, so every offset computation goes through this module.

use crate::error::Error;

/// Encodes `text` as UTF-16 code units.
pub fn to_units(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Decodes UTF-16 code units back into a `String`.
///
/// Fails on unpaired surrogates.
pub fn from_units(units: &[u16]) -> Result<String, Error> {
    Ok(String::from_utf16(units)?)
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Returns true if `unit` is the second half of a surrogate pair.
pub fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Returns true if inserting at `position` would separate a surrogate pair.
///
/// Positions `0` and `units.len()` are always boundaries.
pub fn splits_surrogate_pair(units: &[u16], position: usize) -> bool {
    position > 0 && units.get(position).is_some_and(|&u| is_low_surrogate(u))
}
