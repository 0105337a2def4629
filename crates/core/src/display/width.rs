use unicode_width::UnicodeWidthChar;

/// Number of terminal columns `c` occupies: 0 for control characters and
/// combining marks, 2 for wide East Asian characters, 1 otherwise.
#[must_use]
pub fn char_width(c: char) -> usize {
    if c.is_control() {
        return 0;
    }

    c.width().unwrap_or(0)
}

/// Number of terminal columns `text` occupies.
#[must_use]
pub fn str_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}
