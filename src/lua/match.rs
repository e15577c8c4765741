use super::start_index;
use crate::{Capture, Config, Result, engine::MatchState};

/// Like Lua
/// [`string.match`](https://www.lua.org/manual/5.4/manual.html#pdf-string.match),
/// looks for the first match of `pattern` in `s` and returns its captures.
///
/// If the pattern has no captures, the whole match is returned as the only
/// value. `init` works the same way as in [`find`](crate::find).
///
/// # Errors
///
/// If the pattern is malformed or exceeds a limit, an [`Error`](crate::Error)
/// is returned.
pub fn r#match<'a>(
    s: &'a [u8],
    pattern: &[u8],
    init: Option<isize>,
) -> Result<Option<Vec<Capture<'a>>>> {
    match_with(&Config::new(), s, pattern, init)
}

/// Like [`r#match`], using the limits in `config`.
pub fn match_with<'a>(
    config: &Config,
    s: &'a [u8],
    pattern: &[u8],
    init: Option<isize>,
) -> Result<Option<Vec<Capture<'a>>>> {
    let init = start_index(s.len(), init);
    if init > s.len() {
        return Ok(None);
    }

    debug!("match: pattern search at offset {init}");
    let mut ms = MatchState::new(config, s, pattern);
    match ms.find_from(init, None)? {
        Some(range) => ms.captures.get_all(s, Some(range)).map(Some),
        None => Ok(None),
    }
}
