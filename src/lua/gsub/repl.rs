use crate::{Capture, Error, Result};
use memchr::memchr;
use std::collections::HashMap;

/// The replacement used by [`gsub`](crate::gsub).
///
/// For every variant except `String`, returning `None` keeps the original
/// matched text.
pub enum Repl<'a> {
    /// A template. `%0` is the whole match, `%1` to `%9` are captures (`%1` is
    /// also the whole match when the pattern has no captures), and `%%` is a
    /// literal `%`.
    String(&'a [u8]),
    /// A lookup keyed by the first capture, or the whole match if the pattern
    /// has no captures.
    Table(&'a dyn Fn(&Capture<'_>) -> Option<Vec<u8>>),
    /// Like `Table`, backed by a map. Position captures are looked up by their
    /// decimal text.
    Map(&'a HashMap<Vec<u8>, Vec<u8>>),
    /// A callback which receives every capture, or the whole match if the
    /// pattern has no captures.
    Function(&'a mut dyn FnMut(&[Capture<'_>]) -> Option<Vec<u8>>),
}

/// Expands a replacement template into `out`.
///
/// `captures` are the match values as seen by a callback: the captures, or
/// just the whole match when there are none.
pub(super) fn expand_template(
    template: &[u8],
    whole: &[u8],
    captures: &[Capture<'_>],
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut rest = template;
    while let Some(at) = memchr(b'%', rest) {
        out.extend_from_slice(&rest[..at]);
        match rest.get(at + 1) {
            Some(b'%') => out.push(b'%'),
            Some(b'0') => out.extend_from_slice(whole),
            Some(&d @ b'1'..=b'9') => {
                let index = usize::from(d - b'1');
                let capture = captures
                    .get(index)
                    .ok_or(Error::InvalidCaptureIndex(index + 1))?;
                out.extend_from_slice(&capture.to_bytes());
            }
            _ => return Err(Error::InvalidReplacement),
        }
        rest = &rest[at + 2..];
    }
    out.extend_from_slice(rest);
    Ok(())
}
