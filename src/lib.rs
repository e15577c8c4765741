//! A Lua-compatible string pattern matcher library.
//!
//! Patterns are interpreted directly from their source bytes on every search,
//! the same way Lua 5.4 does it. There is no compile step.
//! The four search functions mirror Lua's `string.find`, `string.match`,
//! `string.gmatch` and `string.gsub`.

#![warn(clippy::pedantic, rust_2018_idioms)]
#![allow(clippy::missing_errors_doc, clippy::too_many_lines)]

#[macro_use]
mod macros;

pub mod class;
pub mod config;
pub mod engine;
pub mod lua;

pub use self::{
    config::Config,
    engine::Capture,
    lua::{
        GMatch, GSub, Match, Repl, find, find_with, gmatch, gmatch_with, gsub, gsub_with,
        r#match, match_with,
    },
};

/// The error type for pattern syntax errors, resource limits and bad
/// replacement strings.
///
/// A failed match is never an error; it is reported as `None` (or an empty
/// iteration) by the search functions.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The pattern ended in the middle of a `%` escape.
    #[error("malformed pattern (ends with '%') at {pos}")]
    EndsWithPercent { pos: usize },

    /// A `[` set was never closed.
    #[error("malformed pattern (missing ']') at {pos}")]
    MissingBracket { pos: usize },

    /// The pattern ended in the middle of a balanced pattern item.
    #[error("malformed pattern (missing arguments to '%b') at {pos}")]
    MissingBalanceArgs { pos: usize },

    /// A frontier item was not followed by a set.
    #[error("missing '[' after '%f' in pattern at {pos}")]
    MissingFrontierSet { pos: usize },

    /// A back reference or replacement named a capture which does not exist
    /// (or, for back references, has not been closed yet). The index is
    /// 1-based, as written in the pattern.
    #[error("invalid capture index %{0}")]
    InvalidCaptureIndex(usize),

    /// A `)` appeared with no open capture to close.
    #[error("invalid pattern capture at {pos}")]
    InvalidPatternCapture { pos: usize },

    /// A capture was still open when the match finished.
    #[error("unfinished capture")]
    UnfinishedCapture,

    /// The number of capture groups exceeds the configured limit.
    #[error("too many captures")]
    TooManyCaptures(usize),

    /// The matcher ran out of recursion budget.
    #[error("pattern too complex")]
    TooComplex,

    /// A replacement string used `%` followed by something other than a digit
    /// or another `%`.
    #[error("invalid use of '%' in replacement string")]
    InvalidReplacement,
}

pub type Result<T> = std::result::Result<T, Error>;

/// The default maximum number of captures in one pattern.
pub const LUA_MAXCAPTURES: usize = 32;

/// The default recursion budget of the matcher.
pub const MAXCCALLS: usize = 200;

/// Bytes which make a pattern "special". A pattern containing none of these can
/// be searched for as a plain substring.
pub const SPECIALS: &[u8] = b"^$*+?.([%-";
