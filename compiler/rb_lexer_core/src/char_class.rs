//! Character classes shared by every scanner state.
//!
//! ASCII classification goes through a 128-entry table; everything at or
//! above U+0080 counts as an identifier character.

#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..128, always fits in u8"
)]
static IS_IDENT_CONTINUE_TABLE: [bool; 128] = {
    let mut table = [false; 128];
    let mut i = 0u8;
    while i < 128 {
        table[i as usize] = matches!(i, b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_');
        i += 1;
    }
    table
};

/// `true` if `c` may continue an identifier.
#[inline]
pub fn is_ident_char(c: char) -> bool {
    match u8::try_from(c) {
        Ok(b) if b < 128 => IS_IDENT_CONTINUE_TABLE[b as usize],
        _ => c != '\0',
    }
}

/// `true` if `c` may start an identifier (no leading digit).
#[inline]
pub fn is_ident_start(c: char) -> bool {
    is_ident_char(c) && !c.is_ascii_digit()
}

/// `true` for an uppercase ASCII letter, which starts a constant name.
#[inline]
pub fn is_constant_start(c: char) -> bool {
    c.is_ascii_uppercase()
}

/// Horizontal whitespace.
#[inline]
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\x0b' | '\x0c')
}

/// Whitespace including the line feed.
#[inline]
pub fn is_space_nl(c: char) -> bool {
    c == '\n' || is_space(c)
}

/// Characters that end scanning outside a literal.
#[inline]
pub fn is_eof_char(c: char) -> bool {
    matches!(c, '\0' | '\x04' | '\x1a')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_characters() {
        assert!(is_ident_char('a'));
        assert!(is_ident_char('Z'));
        assert!(is_ident_char('_'));
        assert!(is_ident_char('9'));
        assert!(is_ident_char('é'));
        assert!(is_ident_char('日'));
        assert!(!is_ident_char('-'));
        assert!(!is_ident_char('?'));
        assert!(!is_ident_char('\0'));
    }

    #[test]
    fn identifier_start_excludes_digits() {
        assert!(is_ident_start('_'));
        assert!(is_ident_start('ü'));
        assert!(!is_ident_start('1'));
    }

    #[test]
    fn whitespace_classes() {
        assert!(is_space('\t'));
        assert!(!is_space('\n'));
        assert!(is_space_nl('\n'));
        assert!(is_eof_char('\x1a'));
        assert!(!is_eof_char('\n'));
    }

    #[test]
    fn constants() {
        assert!(is_constant_start('F'));
        assert!(!is_constant_start('f'));
        assert!(!is_constant_start('É'));
    }
}
