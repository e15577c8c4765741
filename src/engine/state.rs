use super::capture::CaptureStack;
use crate::Config;

/// The per-search state of the matcher.
///
/// Holds read-only views of the subject and the pattern, the capture stack,
/// and the remaining recursion budget. A state belongs to exactly one search
/// and must not be shared between searches.
pub(crate) struct MatchState<'s, 'p> {
    /// The subject being searched.
    pub src: &'s [u8],
    /// The full pattern, including any leading `^`.
    pub pattern: &'p [u8],
    /// Where matching starts in `pattern` (past any anchor).
    pub pattern_start: usize,
    pub anchored: bool,
    pub captures: CaptureStack,
    /// Remaining recursion budget.
    pub depth: usize,
    pub max_depth: usize,
}

impl<'s, 'p> MatchState<'s, 'p> {
    pub fn new(config: &Config, src: &'s [u8], pattern: &'p [u8]) -> Self {
        let anchored = pattern.first() == Some(&b'^');
        Self {
            src,
            pattern,
            pattern_start: usize::from(anchored),
            anchored,
            captures: CaptureStack::new(config.get_max_captures()),
            depth: config.get_max_depth(),
            max_depth: config.get_max_depth(),
        }
    }

    /// Resets the state before a new match attempt.
    #[inline]
    pub fn reprep(&mut self) {
        self.captures.clear();
        debug_assert_eq!(self.depth, self.max_depth, "recursion budget leaked");
    }

    #[inline]
    pub fn byte(&self, s: usize) -> Option<u8> {
        self.src.get(s).copied()
    }
}
