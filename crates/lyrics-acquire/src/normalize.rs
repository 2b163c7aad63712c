use unicode_normalization::UnicodeNormalization;

/// Remove line breaks from a fetched page.
///
/// The extraction patterns scan a single line; `\r` goes too so CRLF pages
/// match the same way as LF pages.
pub fn collapse_newlines(html: &str) -> String {
    html.chars().filter(|c| !matches!(c, '\n' | '\r')).collect()
}

/// Normalize lyrics text to NFC form and trim trailing whitespace per line.
///
/// Keeps blank lines; stanza breaks on the lyrics pages are runs of `<br>`.
pub fn normalize_text(input: &str) -> String {
    let nfc: String = input.nfc().collect();

    nfc.split('\n')
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}
