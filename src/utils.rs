use unicode_width::UnicodeWidthStr;

/// Byte offset of the `char_idx`-th character, clamped to the end.
pub fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Pads `s` with `fill` until it occupies at least `width` terminal
/// columns. Wide characters (CJK) count as two columns.
pub fn pad_to_width(s: &str, width: usize, fill: char) -> String {
    let current = s.width();
    let mut out = String::with_capacity(s.len() + width.saturating_sub(current));
    out.push_str(s);
    for _ in current..width {
        out.push(fill);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_index_ascii() {
        assert_eq!(byte_index("hello", 0), 0);
        assert_eq!(byte_index("hello", 3), 3);
        assert_eq!(byte_index("hello", 5), 5);
        assert_eq!(byte_index("hello", 50), 5);
    }

    #[test]
    fn test_byte_index_multibyte() {
        let s = "didn’t";
        assert_eq!(byte_index(s, 4), 4);
        assert_eq!(byte_index(s, 5), 7);
        assert_eq!(byte_index(s, 6), s.len());
    }

    #[test]
    fn test_char_len() {
        assert_eq!(char_len(""), 0);
        assert_eq!(char_len("知道"), 2);
        assert_eq!(char_len("was"), 3);
    }

    #[test]
    fn test_pad_to_width_ascii() {
        assert_eq!(pad_to_width("was", 6, '_'), "was___");
        assert_eq!(pad_to_width("weren't", 4, '_'), "weren't");
        assert_eq!(pad_to_width("", 3, ' '), "   ");
    }

    #[test]
    fn test_pad_to_width_wide_chars() {
        // 知道 is four columns wide
        assert_eq!(pad_to_width("知道", 6, ' '), "知道  ");
    }
}
