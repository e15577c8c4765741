use lpat::{Error, find};

type Found = (usize, usize, Vec<Vec<u8>>);

#[track_caller]
fn found(s: &[u8], pattern: &[u8], init: Option<isize>, plain: bool) -> Option<Found> {
    find(s, pattern, init, plain)
        .expect("valid pattern")
        .map(|m| {
            let captures = m.captures.iter().map(|c| c.to_bytes().into_owned()).collect();
            (m.start, m.end, captures)
        })
}

fn caps(items: &[&[u8]]) -> Vec<Vec<u8>> {
    items.iter().map(|item| item.to_vec()).collect()
}

#[test]
fn test_negative_byte_classes() {
    assert_eq!(found(b"a b\tc", b"%S", None, false), Some((1, 1, vec![])));
    assert_eq!(found(b"a b\tc", b"%S+", None, false), Some((1, 1, vec![])));
    assert_eq!(found(b" b\tc", b"%S", None, false), Some((2, 2, vec![])));
    assert_eq!(found(b"123abc", b"%D", None, false), Some((4, 4, vec![])));
    assert_eq!(found(b"123abc", b"%D+", None, false), Some((4, 6, vec![])));
    assert_eq!(found(b"abc_123", b"%W", None, false), Some((4, 4, vec![])));
    assert_eq!(found(b"-abc-", b"%W", None, false), Some((1, 1, vec![])));
    assert_eq!(found(b"abc123", b"%A+", None, false), Some((4, 6, vec![])));
    // Bytes outside ASCII never belong to a class.
    assert_eq!(found("你a".as_bytes(), b"%A", None, false), Some((1, 1, vec![])));
    assert_eq!(found("a你b".as_bytes(), b"%W", None, false), Some((2, 2, vec![])));
}

#[test]
fn test_balanced_patterns() {
    assert_eq!(found(b"a(b(c)d)e", b"%b()", None, false), Some((2, 8, vec![])));
    assert_eq!(found(b"a{b{c}d}e", b"%b{}", None, false), Some((2, 8, vec![])));
    assert_eq!(found(b"a<b<c>d>e", b"%b<>", None, false), Some((2, 8, vec![])));
    assert_eq!(found(b"a(b(c(d)e)f)g", b"%b()", None, false), Some((2, 12, vec![])));
    assert_eq!(
        found(b"a(b(c)d)e", b"(%b())", None, false),
        Some((2, 8, caps(&[b"(b(c)d)"])))
    );
    // Identical delimiters close at the next occurrence.
    assert_eq!(found(b"x'ab'c'", b"%b''", None, false), Some((2, 5, vec![])));
}

#[test]
fn test_find_invalid_pattern() {
    assert_eq!(find(b"abc", b"[", None, false), Ok(None));
    assert_eq!(
        find(b"abc", b".[", None, false),
        Err(Error::MissingBracket { pos: 1 })
    );
    assert_eq!(find(b"abc", b"(", None, false), Err(Error::UnfinishedCapture));
    assert_eq!(
        find(b"abc", b"%", None, false),
        Err(Error::EndsWithPercent { pos: 0 })
    );
    assert_eq!(find(b"abc", b"a)", None, false), Ok(None));
    assert_eq!(
        find(b"abc", b"a.)", None, false),
        Err(Error::InvalidPatternCapture { pos: 2 })
    );
    assert_eq!(
        find(b"abc", b"%f", None, false),
        Err(Error::MissingFrontierSet { pos: 0 })
    );
    assert_eq!(
        find(b"abc", b"a%b", None, false),
        Err(Error::MissingBalanceArgs { pos: 1 })
    );
}

#[test]
fn test_leading_quantifier_is_literal() {
    assert_eq!(found(b"abc", b"*", None, false), None);
    assert_eq!(found(b"a*c", b"*", None, false), Some((2, 2, vec![])));
}

#[test]
fn test_plain_find() {
    assert_eq!(found(b"hello world", b"", None, true), Some((1, 0, vec![])));
    assert_eq!(found(b"hello world", b"world", None, true), Some((7, 11, vec![])));
    assert_eq!(found(b"hello world", b"hello", None, true), Some((1, 5, vec![])));
    assert_eq!(found(b"hello world", b"not found", None, true), None);
    assert_eq!(found(b"a.b(c", b".b(", None, true), Some((2, 4, vec![])));
    assert_eq!(found(b"a+b", b"+", Some(-1), true), None);
    assert_eq!(found(b"a+b", b"+", Some(-2), true), Some((2, 2, vec![])));
}

#[test]
fn test_plain_flag_ignores_malformed_patterns() {
    assert_eq!(found(b"50%", b"%", None, true), Some((3, 3, vec![])));
    assert_eq!(found(b"[x]", b"[", None, true), Some((1, 1, vec![])));
}

#[test]
fn test_find_with_init() {
    assert_eq!(found(b"hello world", b"world", Some(6), false), Some((7, 11, vec![])));
    assert_eq!(found(b"hello world", b"world", Some(7), false), Some((7, 11, vec![])));
    assert_eq!(found(b"hello world", b"world", Some(8), false), None);
    assert_eq!(found(b"hello world", b"hello", Some(-11), false), Some((1, 5, vec![])));
    assert_eq!(found(b"hello world", b"hello", Some(-5), false), None);
    // Too far back clamps to the start.
    assert_eq!(found(b"hello", b"h", Some(-100), false), Some((1, 1, vec![])));
    assert_eq!(found(b"hello", b"h", Some(0), false), Some((1, 1, vec![])));
}

#[test]
fn test_find_init_past_end() {
    assert_eq!(found(b"abc", b"", Some(4), false), Some((4, 3, vec![])));
    assert_eq!(found(b"abc", b"", Some(5), false), None);
    assert_eq!(found(b"abc", b"", Some(5), true), None);
    assert_eq!(found(b"", b"", Some(1), false), Some((1, 0, vec![])));
    assert_eq!(found(b"", b"", Some(2), false), None);
}

#[test]
fn test_find_pattern_with_captures() {
    assert_eq!(
        found(b"hello 123 world", b"(%d+)", None, false),
        Some((7, 9, caps(&[b"123"])))
    );
    assert_eq!(
        found(b"name=John age=25", b"(%w+)=(%w+)", None, false),
        Some((1, 9, caps(&[b"name", b"John"])))
    );
    assert_eq!(
        found(b"2023-04-15", b"(%d%d%d%d)%-(%d%d)%-(%d%d)", None, false),
        Some((1, 10, caps(&[b"2023", b"04", b"15"])))
    );
    assert_eq!(
        found(b"hello", b"()ll()", None, false),
        Some((3, 4, caps(&[b"3", b"5"])))
    );
}

#[test]
fn test_find_edge_cases() {
    assert_eq!(found(b"", b"", None, false), Some((1, 0, vec![])));
    assert_eq!(found(b"hello", b"", None, false), Some((1, 0, vec![])));
    assert_eq!(found(b"hello", b"^", None, false), Some((1, 0, vec![])));
    assert_eq!(found(b"hello", b"$", None, false), Some((6, 5, vec![])));
    assert_eq!(found(b"a$b", b"$b", None, false), Some((2, 3, vec![])));
}

#[test]
fn test_error_messages() {
    let pattern = b"(.)".repeat(33);
    let err = find(&b"a".repeat(33), &pattern, None, false).unwrap_err();
    assert_eq!(err.to_string(), "too many captures");
    assert_eq!(
        find(b"abc", b"a.)", None, false).unwrap_err().to_string(),
        "invalid pattern capture at 2"
    );
    assert_eq!(
        find(b"abc", b".[a", None, false).unwrap_err().to_string(),
        "malformed pattern (missing ']') at 1"
    );
}
