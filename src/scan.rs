//! Balanced-delimiter scanning shared by the condition, sqrt/abs and pointer
//! rewrites.
//!
//! String and character literals are skipped so that a `(` inside `"..."`
//! never counts toward nesting.

use crate::ir::DelimiterSpan;

fn closer(open: u8) -> Option<u8> {
    match open {
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        _ => None,
    }
}

/// Index just past a string/char literal starting at `start`.
pub(crate) fn skip_literal(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Find the delimiter closing the one at byte offset `open`.
///
/// Returns `None` if `open` is not `(` or `[`, or if the group never closes.
pub fn matching_span(text: &str, open: usize) -> Option<DelimiterSpan> {
    let bytes = text.as_bytes();
    let open_ch = *bytes.get(open)?;
    let close_ch = closer(open_ch)?;
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'"' || b == b'\'' {
            i = skip_literal(bytes, i);
            continue;
        }
        if b == open_ch {
            depth += 1;
        } else if b == close_ch {
            depth -= 1;
            if depth == 0 {
                return Some(DelimiterSpan { open, close: i });
            }
        }
        i += 1;
    }
    None
}

/// True when every `(` has a matching `)` and no prefix closes more than it
/// opened.
pub fn parens_balanced(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut depth: i64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = skip_literal(bytes, i);
                continue;
            }
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
        i += 1;
    }
    depth == 0
}

/// First occurrence of `needle` outside any `()`/`[]` group and outside
/// literals.
pub fn find_top_level(text: &str, needle: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'"' | b'\'' => {
                i = skip_literal(bytes, i);
                continue;
            }
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth = depth.saturating_sub(1),
            _ if b == needle && depth == 0 => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}
