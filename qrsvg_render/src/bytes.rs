//! Byte-oriented packing of text for encoders that only accept single-byte characters.
//!
//! Each UTF-16 code unit is packed on its own, so a character outside the Basic Multilingual Plane becomes two
//! three-byte sequences (one per surrogate) instead of one four-byte sequence.

/// Pack every UTF-16 code unit of `text` into UTF-8 style bytes.
///
/// Units `0x0001..=0x007F` are copied, units up to `0x07FF` (and `0x0000`) take two bytes and every other unit takes
/// three bytes.
/// # Example
/// ```
/// use qrsvg_render::bytes::utf16_units_to_bytes;
/// assert_eq!(utf16_units_to_bytes("aé€"), vec![0x61, 0xc3, 0xa9, 0xe2, 0x82, 0xac]);
/// ```
pub fn utf16_units_to_bytes(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 3);
    for unit in text.encode_utf16() {
        match unit {
            0x0001..=0x007f => out.push(unit as u8),
            0x0000 | 0x0080..=0x07ff => {
                out.push(0xc0 | ((unit >> 6) & 0x1f) as u8);
                out.push(0x80 | (unit & 0x3f) as u8);
            }
            _ => {
                out.push(0xe0 | ((unit >> 12) & 0x0f) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3f) as u8);
                out.push(0x80 | (unit & 0x3f) as u8);
            }
        }
    }
    out
}

/// Same as [utf16_units_to_bytes], but returns a string whose characters carry exactly the byte values.
/// # Example
/// ```
/// use qrsvg_render::bytes::utf16_to_utf8;
/// let packed = utf16_to_utf8("é");
/// assert_eq!(packed.chars().map(|c| c as u32).collect::<Vec<_>>(), vec![0xc3, 0xa9]);
/// ```
pub fn utf16_to_utf8(text: &str) -> String {
    utf16_units_to_bytes(text).into_iter().map(char::from).collect()
}
