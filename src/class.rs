//! Single-byte pattern items: character classes, `[...]` sets, and the
//! scanner which finds where an item ends.
//!
//! Nothing here is pre-parsed. Every function works on the raw pattern bytes
//! at a given offset, the same way the matcher walks the pattern.

use crate::{Error, Result};

/// Returns `true` if `b` belongs to the class named by `class_byte`.
///
/// The recognised class letters are `a c d g l p s u w x` plus the deprecated
/// `z`. An uppercase letter is the complement of its lowercase class. Any other
/// byte is not a class at all and only matches itself, which is what makes
/// `%%`, `%.` and friends work as escapes.
#[must_use]
pub fn match_class(b: u8, class_byte: u8) -> bool {
    let res = match class_byte.to_ascii_lowercase() {
        b'a' => b.is_ascii_alphabetic(),
        b'c' => matches!(b, 0x00..=0x1f | 0x7f),
        b'd' => b.is_ascii_digit(),
        b'g' => matches!(b, 0x21..=0x7e),
        b'l' => b.is_ascii_lowercase(),
        b'p' => matches!(b, b'!'..=b'/' | b':'..=b'@' | b'['..=b'`' | b'{'..=b'~'),
        // Unlike `u8::is_ascii_whitespace`, this includes vertical tab.
        b's' => matches!(b, b'\t'..=b'\r' | b' '),
        b'u' => b.is_ascii_uppercase(),
        b'w' => b.is_ascii_alphanumeric(),
        b'x' => b.is_ascii_hexdigit(),
        b'z' => b == 0,
        _ => return class_byte == b,
    };

    res ^ class_byte.is_ascii_uppercase()
}

/// Returns `true` if `b` is a member of the set `pattern[start..=end]`, where
/// `start` is the offset of the opening `[` and `end` is the offset of the
/// closing `]`.
///
/// The bounds must come from [`class_end`], which has already rejected
/// unterminated sets and dangling escapes.
#[must_use]
pub fn match_bracket_class(b: u8, pattern: &[u8], start: usize, end: usize) -> bool {
    let mut p = start;
    let mut found = true;
    if pattern[p + 1] == b'^' {
        found = false;
        p += 1;
    }

    p += 1;
    while p < end {
        let item = pattern[p];
        if item == b'%' {
            p += 1;
            if match_class(b, pattern[p]) {
                return found;
            }
        } else if pattern[p + 1] == b'-' && p + 2 < end {
            p += 2;
            if (item..=pattern[p]).contains(&b) {
                return found;
            }
        } else if item == b {
            return found;
        }
        p += 1;
    }

    !found
}

/// Returns the offset just past the single item starting at `pattern[p]`,
/// not including any quantifier.
///
/// A `%` escape spans two bytes. A set spans through its closing `]`; a `]`
/// directly after the opening `[` (or `[^`) is a member, not the terminator,
/// and `%]` inside a set is escaped. Anything else spans one byte.
pub fn class_end(pattern: &[u8], p: usize) -> Result<usize> {
    match pattern[p] {
        b'%' => {
            if p + 1 >= pattern.len() {
                return Err(Error::EndsWithPercent { pos: p });
            }
            Ok(p + 2)
        }
        b'[' => {
            let mut q = p + 1;
            if pattern.get(q) == Some(&b'^') {
                q += 1;
            }
            loop {
                let Some(&b) = pattern.get(q) else {
                    return Err(Error::MissingBracket { pos: p });
                };
                q += 1;
                if b == b'%' && q < pattern.len() {
                    q += 1;
                }
                if pattern.get(q) == Some(&b']') {
                    break;
                }
            }
            Ok(q + 1)
        }
        _ => Ok(p + 1),
    }
}

/// Tests the item `pattern[p..ep]` against `b`.
///
/// `ep` must be the result of [`class_end`] for `p`.
#[inline]
#[must_use]
pub fn single_match(b: u8, pattern: &[u8], p: usize, ep: usize) -> bool {
    match pattern[p] {
        b'.' => true,
        b'%' => match_class(b, pattern[p + 1]),
        b'[' => match_bracket_class(b, pattern, p, ep - 1),
        item => item == b,
    }
}
