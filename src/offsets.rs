//! Byte <-> UTF-16 code-unit offset conversion.
//!
//! Every `Span` exposed by this crate is in UTF-16 code-unit offsets, the
//! convention the embedding host (a JavaScript runtime) expects natively.
//! Detectors work against Rust `&str` byte offsets internally and convert
//! at the point a `Span` is built, using a single forward index built once
//! per input rather than re-walking the string per match.

/// Maps byte offsets to UTF-16 code-unit offsets.
///
/// `table[i] = (byte_offset, utf16_offset)` for every char boundary in
/// `text`, plus a trailing sentinel at `(text.len(), total_utf16_len)`.
/// `byte_to_utf16` binary-searches this table, so building it once per
/// input and reusing it across every detector is O(n) instead of O(n*k).
pub fn build_utf16_index_map(text: &str) -> Vec<(usize, u32)> {
    let mut table = Vec::with_capacity(text.len() + 1);
    let mut utf16_pos: u32 = 0;
    for (byte_pos, ch) in text.char_indices() {
        table.push((byte_pos, utf16_pos));
        utf16_pos += ch.len_utf16() as u32;
    }
    table.push((text.len(), utf16_pos));
    table
}

/// Converts a byte offset into a UTF-16 code-unit offset using a table
/// built by [`build_utf16_index_map`]. `byte_pos` must land on a char
/// boundary of the text the table was built from.
pub fn byte_to_utf16(table: &[(usize, u32)], byte_pos: usize) -> u32 {
    match table.binary_search_by_key(&byte_pos, |&(b, _)| b) {
        Ok(idx) => table[idx].1,
        Err(idx) => {
            // byte_pos fell between entries; this only happens for the
            // end-of-match offset, which always matches the next boundary.
            table.get(idx).map(|&(_, u)| u).unwrap_or(table.last().map(|&(_, u)| u).unwrap_or(0))
        }
    }
}

pub fn prev_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

pub fn next_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

/// OCR-tolerant one-to-one character substitution used by detectors that
/// need to match digit-shaped text corrupted by OCR (e.g. `O` for `0`).
/// Always exactly one char in, one char out, so byte offsets computed
/// against the normalized string stay valid against the original.
pub fn normalize_ocr_map(ch: char) -> char {
    match ch {
        'O' | 'o' => '0',
        'I' | 'l' | '|' => '1',
        'Z' => '2',
        'S' => '5',
        'B' => '8',
        'G' => '6',
        _ => ch,
    }
}

pub fn normalize_ocr_text(text: &str) -> String {
    text.chars().map(normalize_ocr_map).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_offsets_are_identity() {
        let text = "hello world";
        let table = build_utf16_index_map(text);
        assert_eq!(byte_to_utf16(&table, 6), 6);
    }

    #[test]
    fn surrogate_pairs_count_as_two_units() {
        let text = "a\u{1F600}b"; // emoji is 4 bytes, 2 UTF-16 units
        let table = build_utf16_index_map(text);
        let emoji_byte_len = '\u{1F600}'.len_utf8();
        assert_eq!(byte_to_utf16(&table, 1 + emoji_byte_len), 3);
    }

    #[test]
    fn ocr_normalization_is_one_to_one() {
        let corrupted = "SSN: 1Z3-B5-6789";
        let normalized = normalize_ocr_text(corrupted);
        assert_eq!(normalized.chars().count(), corrupted.chars().count());
        assert!(normalized.contains("123-85-6789"));
    }
}
