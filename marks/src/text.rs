//! Code-point addressed string helpers.
//!
//! Mark offsets count Unicode scalar values, not bytes. Every conversion
//! between the two goes through here so that slicing never lands inside a
//! multi-byte character.

/// Number of code points in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of the code point at `char_idx`, clamped to `s.len()`.
pub fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map_or(s.len(), |(offset, _)| offset)
}

/// The code points `[start, end)` of `s`. Out-of-range bounds are clamped;
/// an inverted range yields the empty string.
pub fn slice_chars(s: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let from = byte_offset(s, start);
    let to = byte_offset(s, end);
    &s[from..to]
}

/// Replace the code points `[start, end)` of `s` with `with`.
pub fn replace_chars(s: &mut String, start: usize, end: usize, with: &str) {
    let from = byte_offset(s, start);
    let to = byte_offset(s, end.max(start));
    s.replace_range(from..to, with);
}
