/// One position of a pattern: the set of characters accepted at that position.
pub type CharClass = &'static str;

/// Digits accepted by date and time positions.
pub const DIGITS: CharClass = "0123456789";

/// Returns the number of bytes taken by the first `count` characters of `s`.
///
/// The width of each character is read from its leading byte
/// (`0xxxxxxx`, `110xxxxx`, `1110xxxx`, `11110xxx`). A byte that cannot lead a
/// UTF-8 sequence counts as one byte wide.
pub fn bytes_in_codepoints(s: &str, count: usize) -> usize {
    let bytes = s.as_bytes();
    let mut offset = 0;
    let mut seen = 0;
    while offset < bytes.len() && seen < count {
        offset += leading_byte_width(bytes[offset]);
        seen += 1;
    }
    offset.min(bytes.len())
}

fn leading_byte_width(b: u8) -> usize {
    if b & 0x80 == 0 {
        1
    } else if b & 0xE0 == 0xC0 {
        2
    } else if b & 0xF0 == 0xE0 {
        3
    } else if b & 0xF8 == 0xF0 {
        4
    } else {
        1
    }
}

/// Byte offset of the first character at or after `from` that belongs to `class`.
fn find_class(s: &str, from: usize, class: CharClass) -> Option<usize> {
    s.get(from..)?
        .char_indices()
        .find(|(_, c)| class.contains(*c))
        .map(|(i, _)| from + i)
}

/// Finds the first place in `s` where consecutive characters match `pattern`
/// position by position and returns the byte offset of the match.
///
/// Works on the byte encoding of `s` without collecting it into `char`s, so
/// the returned offset is always a character boundary.
///
/// ```
/// use backup_retention::pattern::{find_pattern, DIGITS};
///
/// let pattern = ["_", DIGITS, DIGITS, DIGITS, DIGITS, "-", DIGITS, DIGITS];
/// assert_eq!(find_pattern("ыыы_2010-01", &pattern), Some(6));
/// ```
pub fn find_pattern(s: &str, pattern: &[CharClass]) -> Option<usize> {
    let first = *pattern.first()?;
    let mut anchor = find_class(s, 0, first)?;

    loop {
        if matches_at(s, anchor, pattern) {
            return Some(anchor);
        }
        // restart strictly after the first character of the failed anchor
        let next = anchor + bytes_in_codepoints(&s[anchor..], 1);
        anchor = find_class(s, next, first)?;
    }
}

fn matches_at(s: &str, anchor: usize, pattern: &[CharClass]) -> bool {
    let mut offset = anchor;
    for class in pattern {
        let rest = &s[offset..];
        let width = bytes_in_codepoints(rest, 1);
        if width == 0 {
            return false;
        }
        match rest.get(..width) {
            Some(ch) if class.contains(ch) => offset += width,
            _ => return false,
        }
    }
    true
}
