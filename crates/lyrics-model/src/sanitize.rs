// Field sanitization for values leaving the adapter.
//
// The host receives documents as an argument of an external call, so
// characters that close or interpolate a quoted shell string never reach it.

/// Characters replaced by [`SAFE_QUOTE`] in every delivered value.
pub const SHELL_QUOTES: [char; 2] = ['"', '`'];

pub const SAFE_QUOTE: char = '\'';

/// Replace double quotes and backticks with single quotes.
pub fn sanitize(value: &str) -> String {
    value.replace(&SHELL_QUOTES[..], &SAFE_QUOTE.to_string())
}

/// Escape markup characters so the value can sit inside element text.
pub fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Sanitize then escape a value for use inside a double-quoted attribute.
///
/// After [`sanitize`] no `"` remains, so the attribute delimiter cannot be closed early.
pub fn attribute_value(value: &str) -> String {
    escape_text(&sanitize(value))
}
