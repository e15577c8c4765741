//! Matcher resource limits.

use crate::{LUA_MAXCAPTURES, MAXCCALLS};

/// The configuration used by every search function.
///
/// The default configuration uses the same limits as Lua 5.4. Lowering them
/// is mostly useful for probing limit behaviour without building huge
/// patterns.
///
/// ```
/// use lpat::{Config, Error, find_with};
///
/// let config = Config::new().max_captures(1);
/// assert_eq!(
///     find_with(&config, b"ab", b"(a)(b)", None, false),
///     Err(Error::TooManyCaptures(1)),
/// );
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    max_captures: usize,
    max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a configuration with the default limits.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_captures: LUA_MAXCAPTURES,
            max_depth: MAXCCALLS,
        }
    }

    /// Sets the maximum number of captures a pattern may open during a single
    /// match attempt. Opening one more is a
    /// [`TooManyCaptures`](crate::Error::TooManyCaptures) error.
    #[must_use]
    pub const fn max_captures(mut self, limit: usize) -> Self {
        self.max_captures = limit;
        self
    }

    /// Sets the recursion budget of the matcher. Exhausting it is a
    /// [`TooComplex`](crate::Error::TooComplex) error.
    #[must_use]
    pub const fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }

    #[must_use]
    pub const fn get_max_captures(&self) -> usize {
        self.max_captures
    }

    #[must_use]
    pub const fn get_max_depth(&self) -> usize {
        self.max_depth
    }
}
