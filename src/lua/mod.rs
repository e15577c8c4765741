//! The Lua `string` library search functions.

mod find;
mod gmatch;
mod gsub;
mod r#match;

pub use self::{
    find::{Match, find, find_with},
    gmatch::{GMatch, gmatch, gmatch_with},
    gsub::{GSub, Repl, gsub, gsub_with},
    r#match::{r#match, match_with},
};

/// Converts a 1-based, possibly negative `init` argument into a 0-based
/// subject offset. The result may be past the end of the subject; callers
/// decide what that means.
fn start_index(text_len: usize, init: Option<isize>) -> usize {
    match init {
        Some(i) if i > 0 => i.unsigned_abs() - 1,
        Some(i) if i < 0 => text_len.saturating_sub(i.unsigned_abs()),
        _ => 0,
    }
}
