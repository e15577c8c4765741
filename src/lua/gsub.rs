use crate::{Capture, Config, Result, engine::MatchState};
pub use repl::Repl;
use std::ops::Range;

mod repl;

/// A piecewise text substitution engine.
///
/// Whereas the [`gsub`] function performs substitution in one shot, this type
/// allows for iterative replacement of strings by separating the matching and
/// replacing parts.
///
/// ```
/// use lpat::GSub;
///
/// let mut engine = GSub::new(b"a1 b2", b"%d", None);
/// while let Some(captures) = engine.next().unwrap() {
///     let digit = captures[0].as_slice().unwrap();
///     engine.replace(Some(digit.repeat(2).as_slice()));
/// }
/// assert_eq!(engine.finish(), (b"a11 b22".to_vec(), 2));
/// ```
pub struct GSub<'s, 'p> {
    ms: MatchState<'s, 'p>,
    replacements: usize,
    found: usize,
    result: Vec<u8>,
    last_pos: usize,
    last_end: Option<usize>,
    current: Option<Range<usize>>,
    done: bool,
}

impl<'s, 'p> GSub<'s, 'p> {
    /// Creates a new substitution engine which replaces at most `n` matches
    /// (by default, all of them).
    #[must_use]
    pub fn new(input: &'s [u8], pattern: &'p [u8], n: Option<usize>) -> Self {
        Self::with_config(&Config::new(), input, pattern, n)
    }

    /// Like [`new`](Self::new), using the limits in `config`.
    #[must_use]
    pub fn with_config(
        config: &Config,
        input: &'s [u8],
        pattern: &'p [u8],
        n: Option<usize>,
    ) -> Self {
        Self {
            ms: MatchState::new(config, input, pattern),
            replacements: n.unwrap_or(input.len() + 1),
            found: 0,
            result: Vec::with_capacity(input.len()),
            last_pos: 0,
            last_end: None,
            current: None,
            done: false,
        }
    }

    /// Returns the final string and the number of replacements, consuming the
    /// engine.
    #[must_use]
    pub fn finish(mut self) -> (Vec<u8>, usize) {
        self.keep_current();
        self.result.extend_from_slice(&self.ms.src[self.last_pos..]);
        (self.result, self.found)
    }

    /// Advances to the next match and returns its captures, or the whole match
    /// if the pattern has no captures.
    ///
    /// If the previous match was not given to [`replace`](Self::replace), it
    /// is kept unchanged.
    ///
    /// # Errors
    ///
    /// If the pattern is malformed or exceeds a limit, an
    /// [`Error`](crate::Error) is returned.
    pub fn next(&mut self) -> Result<Option<Vec<Capture<'s>>>> {
        self.keep_current();
        if self.done || self.replacements == 0 {
            return Ok(None);
        }
        // An anchored pattern gets a single attempt.
        self.done = self.ms.anchored;

        let result = self.advance();
        if result.is_err() {
            self.done = true;
        }
        result
    }

    fn advance(&mut self) -> Result<Option<Vec<Capture<'s>>>> {
        let Some(range) = self.ms.find_from(self.last_pos, self.last_end)? else {
            self.done = true;
            return Ok(None);
        };
        trace!("gsub: match at {range:?}");

        let captures = self.ms.captures.get_all(self.ms.src, Some(range.clone()))?;
        self.found += 1;
        self.replacements -= 1;
        self.current = Some(range);
        Ok(Some(captures))
    }

    /// Returns the text of the current match.
    #[must_use]
    pub fn matched(&self) -> &'s [u8] {
        let src = self.ms.src;
        match &self.current {
            Some(range) => &src[range.clone()],
            None => &[],
        }
    }

    /// Replaces the current match with the given replacement text. If the given
    /// replacement is `None`, the original match is kept in the string.
    pub fn replace(&mut self, replacement: Option<&[u8]>) {
        let Some(current) = self.current.take() else {
            return;
        };

        let src = self.ms.src;
        self.result.extend_from_slice(&src[self.last_pos..current.start]);
        self.result
            .extend_from_slice(replacement.unwrap_or(&src[current.clone()]));
        self.last_pos = current.end;
        self.last_end = Some(current.end);
    }

    fn keep_current(&mut self) {
        self.replace(None);
    }
}

/// Like Lua
/// [`string.gsub`](https://www.lua.org/manual/5.4/manual.html#pdf-string.gsub),
/// returns a copy of `s` in which all (or the first `n`, if given) occurrences
/// of `pattern` are replaced by `repl`, along with the number of matches.
///
/// An empty match directly after the previous match is skipped, so
/// `gsub(b"hello", b"", Repl::String(b"-"), None)` gives `-h-e-l-l-o-`.
///
/// # Errors
///
/// If the pattern is malformed or exceeds a limit, or a replacement template
/// is invalid, an [`Error`](crate::Error) is returned and no output is
/// produced.
pub fn gsub(
    s: &[u8],
    pattern: &[u8],
    repl: Repl<'_>,
    n: Option<usize>,
) -> Result<(Vec<u8>, usize)> {
    gsub_with(&Config::new(), s, pattern, repl, n)
}

/// Like [`gsub`], using the limits in `config`.
pub fn gsub_with(
    config: &Config,
    s: &[u8],
    pattern: &[u8],
    mut repl: Repl<'_>,
    n: Option<usize>,
) -> Result<(Vec<u8>, usize)> {
    debug!("gsub: {} byte subject, limit {n:?}", s.len());
    let mut generator = GSub::with_config(config, s, pattern, n);
    while let Some(captures) = generator.next()? {
        let replacement = match &mut repl {
            Repl::String(repl_str) => {
                let mut out = Vec::new();
                repl::expand_template(repl_str, generator.matched(), &captures, &mut out)?;
                Some(out)
            }
            Repl::Table(f) => (*f)(&captures[0]),
            Repl::Map(map) => map.get(captures[0].to_bytes().as_ref()).cloned(),
            Repl::Function(f) => (*f)(&captures),
        };
        generator.replace(replacement.as_deref());
    }

    Ok(generator.finish())
}
