use crate::{Error, Result};
use std::{borrow::Cow, fmt, ops::Range};

/// A value produced by a capture group.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Capture<'a> {
    /// A substring of the subject.
    Slice(&'a [u8]),
    /// The 1-based subject position recorded by an empty `()` capture.
    Position(usize),
}

impl<'a> Capture<'a> {
    /// Returns the captured substring, or `None` for a position capture.
    #[must_use]
    pub fn as_slice(&self) -> Option<&'a [u8]> {
        match *self {
            Capture::Slice(bytes) => Some(bytes),
            Capture::Position(_) => None,
        }
    }

    /// Returns the captured position, or `None` for a substring capture.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match *self {
            Capture::Slice(_) => None,
            Capture::Position(at) => Some(at),
        }
    }

    /// Returns the capture as text. Positions are rendered in decimal, which
    /// is how they appear when substituted into a replacement string.
    #[must_use]
    pub fn to_bytes(&self) -> Cow<'a, [u8]> {
        match *self {
            Capture::Slice(bytes) => Cow::Borrowed(bytes),
            Capture::Position(at) => Cow::Owned(at.to_string().into_bytes()),
        }
    }
}

impl fmt::Display for Capture<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Capture::Slice(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
            Capture::Position(at) => write!(f, "{at}"),
        }
    }
}

impl<'a> From<&'a [u8]> for Capture<'a> {
    fn from(value: &'a [u8]) -> Self {
        Self::Slice(value)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Capture<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        Self::Slice(value)
    }
}

/// The length field of a capture slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum CaptureLen {
    /// Opened by `(` and not yet closed by `)`.
    Unfinished,
    /// A zero-width `()` capture.
    Position,
    Closed(usize),
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    start: usize,
    len: CaptureLen,
}

/// The stack of captures recorded during one match attempt.
///
/// Captures are numbered in the order they were opened. Only the innermost
/// unfinished capture can be closed.
#[derive(Debug)]
pub(crate) struct CaptureStack {
    slots: Vec<Slot>,
    limit: usize,
}

impl CaptureStack {
    pub fn new(limit: usize) -> Self {
        Self {
            slots: Vec::with_capacity(limit.min(crate::LUA_MAXCAPTURES)),
            limit,
        }
    }

    /// The number of captures opened so far.
    #[inline]
    pub fn level(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Pushes a new capture starting at subject offset `start`. `len` must be
    /// either `Unfinished` or `Position`.
    pub fn open(&mut self, start: usize, len: CaptureLen) -> Result<()> {
        debug_assert!(!matches!(len, CaptureLen::Closed(_)));
        if self.slots.len() >= self.limit {
            debug!("capture limit of {} reached", self.limit);
            return Err(Error::TooManyCaptures(self.limit));
        }
        self.slots.push(Slot { start, len });
        Ok(())
    }

    /// Discards the most recently opened capture.
    #[inline]
    pub fn undo_open(&mut self) {
        self.slots.pop();
    }

    /// Closes the innermost unfinished capture at subject offset `end` and
    /// returns its index. `pos` is the pattern offset of the `)`, used for
    /// error reporting.
    pub fn close(&mut self, end: usize, pos: usize) -> Result<usize> {
        let index = self
            .slots
            .iter()
            .rposition(|slot| slot.len == CaptureLen::Unfinished)
            .ok_or(Error::InvalidPatternCapture { pos })?;
        let slot = &mut self.slots[index];
        slot.len = CaptureLen::Closed(end - slot.start);
        Ok(index)
    }

    /// Reopens a capture closed by [`close`](Self::close).
    #[inline]
    pub fn undo_close(&mut self, index: usize) {
        self.slots[index].len = CaptureLen::Unfinished;
    }

    /// Resolves a back reference digit (`b'0'..=b'9'`) to the start and
    /// length of a closed capture. A position capture has no length and
    /// yields `None`.
    pub fn back_reference(&self, digit: u8) -> Result<Option<(usize, usize)>> {
        let n = usize::from(digit - b'0');
        let slot = n
            .checked_sub(1)
            .and_then(|index| self.slots.get(index))
            .ok_or(Error::InvalidCaptureIndex(n))?;
        match slot.len {
            CaptureLen::Unfinished => Err(Error::InvalidCaptureIndex(n)),
            CaptureLen::Position => Ok(None),
            CaptureLen::Closed(len) => Ok(Some((slot.start, len))),
        }
    }

    /// Materialises capture `index` (0-based).
    pub fn get<'a>(&self, src: &'a [u8], index: usize) -> Result<Capture<'a>> {
        let slot = self
            .slots
            .get(index)
            .ok_or(Error::InvalidCaptureIndex(index + 1))?;
        match slot.len {
            CaptureLen::Unfinished => Err(Error::UnfinishedCapture),
            CaptureLen::Position => Ok(Capture::Position(slot.start + 1)),
            CaptureLen::Closed(len) => Ok(Capture::Slice(&src[slot.start..slot.start + len])),
        }
    }

    /// Materialises every capture in open order. With no captures, this is
    /// the whole match if `whole` is given and nothing otherwise.
    pub fn get_all<'a>(
        &self,
        src: &'a [u8],
        whole: Option<Range<usize>>,
    ) -> Result<Vec<Capture<'a>>> {
        match whole {
            Some(whole) if self.level() == 0 => Ok(vec![Capture::Slice(&src[whole])]),
            _ => (0..self.level()).map(|index| self.get(src, index)).collect(),
        }
    }
}
