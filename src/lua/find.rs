use super::start_index;
use crate::{Capture, Config, Result, SPECIALS, engine::MatchState};
use memchr::memmem;

/// The result of a successful [`find`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Match<'a> {
    /// The 1-based index of the first byte of the match.
    pub start: usize,
    /// The 1-based index of the last byte of the match. For an empty match
    /// this is `start - 1`.
    pub end: usize,
    /// The values of the pattern's captures, if it has any.
    pub captures: Vec<Capture<'a>>,
}

/// Like Lua
/// [`string.find`](https://www.lua.org/manual/5.4/manual.html#pdf-string.find),
/// looks for the first match of `pattern` in `s`.
///
/// The search starts at the 1-based index `init`, which may be negative to
/// count from the end of `s`. If `plain` is true, or the pattern contains no
/// special bytes, `pattern` is searched for as a plain substring.
///
/// # Errors
///
/// If the pattern is malformed or exceeds a limit, an [`Error`](crate::Error)
/// is returned.
pub fn find<'a>(
    s: &'a [u8],
    pattern: &[u8],
    init: Option<isize>,
    plain: bool,
) -> Result<Option<Match<'a>>> {
    find_with(&Config::new(), s, pattern, init, plain)
}

/// Like [`find`], using the limits in `config`.
pub fn find_with<'a>(
    config: &Config,
    s: &'a [u8],
    pattern: &[u8],
    init: Option<isize>,
    plain: bool,
) -> Result<Option<Match<'a>>> {
    let init = start_index(s.len(), init);
    if init > s.len() {
        return Ok(None);
    }

    if plain || !pattern.iter().any(|b| SPECIALS.contains(b)) {
        debug!("find: plain search at offset {init}");
        return Ok(memmem::find(&s[init..], pattern).map(|at| Match {
            start: init + at + 1,
            end: init + at + pattern.len(),
            captures: Vec::new(),
        }));
    }

    debug!("find: pattern search at offset {init}");
    let mut ms = MatchState::new(config, s, pattern);
    let Some(range) = ms.find_from(init, None)? else {
        return Ok(None);
    };
    let captures = ms.captures.get_all(s, None)?;
    Ok(Some(Match {
        start: range.start + 1,
        end: range.end,
        captures,
    }))
}
