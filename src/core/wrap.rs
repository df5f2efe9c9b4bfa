//! Localization-call wrapper detection and PHP single-quoted string escaping.
//!
//! The wrapper is always `__('<content>')`. Detection is a pure function of
//! the buffer it is given, so the rewrite engine can call it against a buffer
//! that is being mutated.

use std::borrow::Cow;

pub const WRAP_OPEN: &str = "__('";
pub const WRAP_CLOSE: &str = "')";

/// Return the inner literal if `buffer[start..end]` is exactly a wrapper call.
///
/// Out-of-range spans and undecodable bytes count as "not wrapped".
///
/// ```
/// use bladeloc::core::wrap::detect;
///
/// let buf = b"<p>__('Home')</p>";
/// assert_eq!(detect(buf, 3, 13).as_deref(), Some("Home"));
/// assert_eq!(detect(buf, 0, 3), None);
/// ```
pub fn detect(buffer: &[u8], start: usize, end: usize) -> Option<String> {
    let slice = buffer.get(start..end)?;
    let text = std::str::from_utf8(slice).ok()?;
    if text.len() < WRAP_OPEN.len() + WRAP_CLOSE.len() {
        return None;
    }
    text.strip_prefix(WRAP_OPEN)?
        .strip_suffix(WRAP_CLOSE)
        .map(str::to_string)
}

/// Wrap a literal in the localization call, escaping it first.
pub fn wrap_call(text: &str) -> String {
    format!("{}{}{}", WRAP_OPEN, escape_for_wrap(text), WRAP_CLOSE)
}

/// Heuristic: text already holding `\'` or `\\` was escaped by a previous run.
pub fn is_already_escaped(text: &str) -> bool {
    text.contains("\\'") || text.contains("\\\\")
}

/// Escape for a single-quoted PHP string: backslashes first, then quotes.
pub fn escape_php_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Escape unless the text already looks escaped.
pub fn escape_for_wrap(text: &str) -> Cow<'_, str> {
    if is_already_escaped(text) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(escape_php_string(text))
    }
}

/// Inverse of [`escape_php_string`]: `\'` → `'` and `\\` → `\`; any other
/// backslash is kept as-is.
pub fn unescape_php_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && (next == '\\' || next == '\'')
        {
            out.push(next);
            chars.next();
            continue;
        }
        out.push(c);
    }
    out
}
