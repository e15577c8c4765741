//! The backtracking matcher.
//!
//! The matcher walks the pattern bytes directly. Plain sequencing runs in a
//! loop; quantifiers, captures and optional items recurse so that a failed
//! continuation can undo its effects and try the next alternative. Every
//! recursive entry spends one unit of the recursion budget.

use crate::{
    Error, Result,
    class::{class_end, match_bracket_class, single_match},
};
use std::ops::Range;

mod capture;
mod state;

pub use self::capture::Capture;
pub(crate) use self::{capture::CaptureLen, state::MatchState};

/// What kind of pattern item starts at a given pattern offset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Item {
    /// `()`
    PositionCapture,
    /// `(`
    OpenCapture,
    /// `)`
    CloseCapture,
    /// `$` as the last byte of the pattern.
    EndAnchor,
    /// `%bxy`
    Balanced,
    /// `%f[set]`
    Frontier,
    /// `%0` to `%9`
    BackReference(u8),
    /// A literal, `.`, `%` class or `[set]`, optionally quantified. This is
    /// also where a `$` which is not last and an unrecognised `%` escape land.
    Single,
}

impl Item {
    fn at(pattern: &[u8], p: usize) -> Self {
        match pattern[p] {
            b'(' if pattern.get(p + 1) == Some(&b')') => Item::PositionCapture,
            b'(' => Item::OpenCapture,
            b')' => Item::CloseCapture,
            b'$' if p + 1 == pattern.len() => Item::EndAnchor,
            b'%' => match pattern.get(p + 1) {
                Some(b'b') => Item::Balanced,
                Some(b'f') => Item::Frontier,
                Some(&d @ b'0'..=b'9') => Item::BackReference(d),
                _ => Item::Single,
            },
            _ => Item::Single,
        }
    }
}

impl MatchState<'_, '_> {
    /// Tries to match `pattern[p..]` at subject offset `s`. Returns the end
    /// offset of the match.
    pub(crate) fn do_match(&mut self, s: usize, p: usize) -> Result<Option<usize>> {
        if self.depth == 0 {
            debug!("recursion budget of {} exhausted", self.max_depth);
            return Err(Error::TooComplex);
        }
        self.depth -= 1;
        let result = self.match_inner(s, p);
        self.depth += 1;
        result
    }

    fn match_inner(&mut self, mut s: usize, mut p: usize) -> Result<Option<usize>> {
        let pattern = self.pattern;
        while p < pattern.len() {
            match Item::at(pattern, p) {
                Item::PositionCapture => {
                    return self.start_capture(s, p + 2, CaptureLen::Position);
                }
                Item::OpenCapture => return self.start_capture(s, p + 1, CaptureLen::Unfinished),
                Item::CloseCapture => return self.end_capture(s, p),
                Item::EndAnchor => return Ok((s == self.src.len()).then_some(s)),
                Item::Balanced => match self.match_balance(s, p)? {
                    Some(end) => {
                        s = end;
                        p += 4;
                    }
                    None => return Ok(None),
                },
                Item::Frontier => match self.match_frontier(s, p)? {
                    Some(ep) => p = ep,
                    None => return Ok(None),
                },
                Item::BackReference(digit) => match self.match_back_reference(s, digit)? {
                    Some(end) => {
                        s = end;
                        p += 2;
                    }
                    None => return Ok(None),
                },
                Item::Single => {
                    let ep = class_end(pattern, p)?;
                    let suffix = pattern.get(ep).copied();

                    if !self.single_match(s, p, ep) {
                        // The item may be absent, so carry on past the
                        // quantifier.
                        if matches!(suffix, Some(b'*' | b'?' | b'-')) {
                            p = ep + 1;
                            continue;
                        }
                        return Ok(None);
                    }

                    match suffix {
                        Some(b'?') => {
                            if let Some(end) = self.do_match(s + 1, ep + 1)? {
                                return Ok(Some(end));
                            }
                            p = ep + 1;
                        }
                        Some(b'+') => return self.max_expand(s + 1, p, ep),
                        Some(b'*') => return self.max_expand(s, p, ep),
                        Some(b'-') => return self.min_expand(s, p, ep),
                        _ => {
                            s += 1;
                            p = ep;
                        }
                    }
                }
            }
        }

        Ok(Some(s))
    }

    #[inline]
    fn single_match(&self, s: usize, p: usize, ep: usize) -> bool {
        self.byte(s)
            .is_some_and(|b| single_match(b, self.pattern, p, ep))
    }

    /// Matches as many repetitions of `pattern[p..ep]` as possible, then gives
    /// them back one at a time until the rest of the pattern matches.
    fn max_expand(&mut self, s: usize, p: usize, ep: usize) -> Result<Option<usize>> {
        let mut count = 0;
        while self.single_match(s + count, p, ep) {
            count += 1;
        }

        loop {
            if let Some(end) = self.do_match(s + count, ep + 1)? {
                return Ok(Some(end));
            }
            if count == 0 {
                return Ok(None);
            }
            count -= 1;
        }
    }

    /// Tries the rest of the pattern first, consuming one more repetition of
    /// `pattern[p..ep]` each time it fails.
    fn min_expand(&mut self, mut s: usize, p: usize, ep: usize) -> Result<Option<usize>> {
        loop {
            if let Some(end) = self.do_match(s, ep + 1)? {
                return Ok(Some(end));
            }
            if self.single_match(s, p, ep) {
                s += 1;
            } else {
                return Ok(None);
            }
        }
    }

    fn start_capture(&mut self, s: usize, p: usize, len: CaptureLen) -> Result<Option<usize>> {
        self.captures.open(s, len)?;
        let result = self.do_match(s, p)?;
        if result.is_none() {
            self.captures.undo_open();
        }
        Ok(result)
    }

    /// `p` is the offset of the `)`.
    fn end_capture(&mut self, s: usize, p: usize) -> Result<Option<usize>> {
        let index = self.captures.close(s, p)?;
        let result = self.do_match(s, p + 1)?;
        if result.is_none() {
            self.captures.undo_close(index);
        }
        Ok(result)
    }

    /// `%bxy`, with `p` at the `%`. Returns the subject offset just past the
    /// balancing `y`.
    fn match_balance(&self, s: usize, p: usize) -> Result<Option<usize>> {
        let Some(&[open, close]) = self.pattern.get(p + 2..p + 4) else {
            return Err(Error::MissingBalanceArgs { pos: p });
        };
        if self.byte(s) != Some(open) {
            return Ok(None);
        }

        let mut depth = 1;
        for (i, &b) in self.src.iter().enumerate().skip(s + 1) {
            if b == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(Some(i + 1));
                }
            } else if b == open {
                depth += 1;
            }
        }

        Ok(None)
    }

    /// `%f[set]`, with `p` at the `%`. Returns the pattern offset past the set.
    ///
    /// Outside the subject, the previous and current bytes read as `\0`.
    fn match_frontier(&self, s: usize, p: usize) -> Result<Option<usize>> {
        let set = p + 2;
        if self.pattern.get(set) != Some(&b'[') {
            return Err(Error::MissingFrontierSet { pos: p });
        }
        let ep = class_end(self.pattern, set)?;

        let previous = s.checked_sub(1).and_then(|i| self.byte(i)).unwrap_or(0);
        let current = self.byte(s).unwrap_or(0);
        let in_set = |b| match_bracket_class(b, self.pattern, set, ep - 1);
        Ok((!in_set(previous) && in_set(current)).then_some(ep))
    }

    fn match_back_reference(&self, s: usize, digit: u8) -> Result<Option<usize>> {
        let Some((start, len)) = self.captures.back_reference(digit)? else {
            return Ok(None);
        };
        let captured = &self.src[start..start + len];
        Ok(self
            .src
            .get(s..s + len)
            .is_some_and(|here| here == captured)
            .then_some(s + len))
    }

    /// Makes one full match attempt at subject offset `s`.
    pub(crate) fn match_at(&mut self, s: usize) -> Result<Option<usize>> {
        self.reprep();
        self.do_match(s, self.pattern_start)
    }

    /// Tries successive anchor offsets starting from `init` until the pattern
    /// matches. An anchored pattern is only tried at `init`.
    ///
    /// A match ending at `last_end` is rejected and the search moves on; this
    /// is how iteration avoids matching the same empty string forever.
    pub(crate) fn find_from(
        &mut self,
        init: usize,
        last_end: Option<usize>,
    ) -> Result<Option<Range<usize>>> {
        let mut s = init;
        while s <= self.src.len() {
            if let Some(end) = self.match_at(s)?
                && Some(end) != last_end
            {
                return Ok(Some(s..end));
            }
            if self.anchored {
                break;
            }
            trace!("no match at offset {s}, retrying");
            s += 1;
        }

        Ok(None)
    }
}
