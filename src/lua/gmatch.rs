use super::start_index;
use crate::{Capture, Config, Result, engine::MatchState};
use std::iter::FusedIterator;

/// An iterator over successive matches of a pattern, created by [`gmatch`].
///
/// Each item holds the captures of one match, or the whole match if the
/// pattern has no captures. After an error is yielded, the iterator is
/// exhausted.
pub struct GMatch<'s, 'p> {
    ms: MatchState<'s, 'p>,
    cursor: usize,
    last_end: Option<usize>,
    done: bool,
}

impl<'s> Iterator for GMatch<'s, '_> {
    type Item = Result<Vec<Capture<'s>>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        // An anchored pattern can only match at the starting offset.
        self.done = self.ms.anchored;

        let result = self
            .ms
            .find_from(self.cursor, self.last_end)
            .and_then(|range| {
                range
                    .map(|range| {
                        self.cursor = range.end;
                        self.last_end = Some(range.end);
                        self.ms.captures.get_all(self.ms.src, Some(range))
                    })
                    .transpose()
            })
            .transpose();

        if !matches!(result, Some(Ok(_))) {
            self.done = true;
        }
        result
    }
}

impl FusedIterator for GMatch<'_, '_> {}

/// Like Lua
/// [`string.gmatch`](https://www.lua.org/manual/5.4/manual.html#pdf-string.gmatch),
/// returns an iterator over the matches of `pattern` in `s`.
///
/// A match which ends where the previous one ended is skipped, so empty
/// matches cannot repeat forever. `init` works as in [`find`](crate::find),
/// except that starting past the end of `s` simply yields nothing.
#[must_use]
pub fn gmatch<'s, 'p>(s: &'s [u8], pattern: &'p [u8], init: Option<isize>) -> GMatch<'s, 'p> {
    gmatch_with(&Config::new(), s, pattern, init)
}

/// Like [`gmatch`], using the limits in `config`.
#[must_use]
pub fn gmatch_with<'s, 'p>(
    config: &Config,
    s: &'s [u8],
    pattern: &'p [u8],
    init: Option<isize>,
) -> GMatch<'s, 'p> {
    let cursor = start_index(s.len(), init).min(s.len() + 1);
    debug!("gmatch: starting at offset {cursor}");
    GMatch {
        ms: MatchState::new(config, s, pattern),
        cursor,
        last_end: None,
        done: false,
    }
}
