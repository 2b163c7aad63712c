// Field extraction from astraweb HTML.
//
// The site serves a fixed template, so every field is located with a fixed
// pattern anchored on nearby markup instead of a DOM parse. Each pattern
// lives in its own function. Input must already have its newlines removed
// (see `normalize::collapse_newlines`).

use std::sync::LazyLock;

use lyrics_model::ResultEntry;
use regex::Regex;

use crate::error::ExtractionError;
use crate::normalize;

/// Opening markup of every row on a search results page.
pub const ROW_MARKER: &str = r##"<tr><td bgcolor="#BBBBBB""##;

/// Link text following the last result row.
pub const MORE_RESULTS_MARKER: &str = "More Songs &gt";

const TITLE_MARKER: &str = "<title>Lyrics: ";
const BODY_START_MARKER: &str = "<font face=arial size=2>";
const BODY_END_MARKER: &str = "<br><br><br><center>";

/// Separator between artist and title in a lyrics page title.
pub const ARTIST_TITLE_SEPARATOR: &str = " - ";

static RESULT_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "({}.*){}",
        regex::escape(ROW_MARKER),
        regex::escape(MORE_RESULTS_MARKER)
    ))
    .expect("valid regex")
});

static ENTRY_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"display\.lyrics\.astraweb\.com:2000([^"]*)"#).expect("valid regex")
});

static ENTRY_ARTIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"Artist:.*html">([^<]*)"#).expect("valid regex"));

static ENTRY_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"display\.lyrics.*?>([^<]*)").expect("valid regex"));

static PAGE_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{}([^<]*)", regex::escape(TITLE_MARKER))).expect("valid regex")
});

static BODY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        "{}(.*){}",
        regex::escape(BODY_START_MARKER),
        regex::escape(BODY_END_MARKER)
    ))
    .expect("valid regex")
});

static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br[^>]*>").expect("valid regex"));

/// Artist, title and plain-text body pulled from a lyrics page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsFields {
    pub artist: String,
    pub title: String,
    pub body: String,
}

/// Return the text from the first result row up to the last "more results" link.
pub fn extract_result_block(html: &str) -> Result<&str, ExtractionError> {
    if !html.contains(ROW_MARKER) {
        return Err(ExtractionError::MissingMarker(ROW_MARKER));
    }
    RESULT_BLOCK_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(ExtractionError::MissingMarker(MORE_RESULTS_MARKER))
}

/// Split a result block into one chunk per row, dropping the text before the first row.
pub fn split_result_entries(block: &str) -> Vec<&str> {
    block.split(ROW_MARKER).skip(1).collect()
}

/// Pull url, artist and title out of one result row.
///
/// A field whose pattern does not match is left empty. The row itself is
/// rejected only when none of the fields can be found.
pub fn extract_entry_fields(entry: &str) -> Result<ResultEntry, ExtractionError> {
    let url = entry_url(entry);
    let artist = entry_artist(entry);
    let title = entry_title(entry);

    if url.is_none() && artist.is_none() && title.is_none() {
        return Err(ExtractionError::UnusableEntry);
    }

    Ok(ResultEntry {
        url: url.unwrap_or_default(),
        artist: artist.unwrap_or_default(),
        title: title.unwrap_or_default(),
    })
}

/// Run the whole search-page pipeline: block, rows, fields.
pub fn extract_result_entries(html: &str) -> Result<Vec<ResultEntry>, ExtractionError> {
    let block = extract_result_block(html)?;
    split_result_entries(block)
        .into_iter()
        .map(extract_entry_fields)
        .collect()
}

fn entry_url(entry: &str) -> Option<String> {
    first_group(&ENTRY_URL_RE, entry)
}

fn entry_artist(entry: &str) -> Option<String> {
    first_group(&ENTRY_ARTIST_RE, entry)
}

fn entry_title(entry: &str) -> Option<String> {
    first_group(&ENTRY_TITLE_RE, entry)
}

fn first_group(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Pull artist, title and lyrics text out of a lyrics display page.
pub fn extract_lyrics_page(html: &str) -> Result<LyricsFields, ExtractionError> {
    let artist_title = first_group(&PAGE_TITLE_RE, html)
        .ok_or(ExtractionError::MissingMarker(TITLE_MARKER))?;
    let (artist, title) = split_artist_title(&artist_title);

    let raw_body = first_group(&BODY_RE, html)
        .ok_or(ExtractionError::MissingMarker(BODY_START_MARKER))?;
    let body = normalize::normalize_text(&line_breaks_to_newlines(&raw_body));

    Ok(LyricsFields {
        artist: artist.to_string(),
        title: title.to_string(),
        body,
    })
}

/// Split "Artist - Title" on the first separator; without one the title is empty.
pub fn split_artist_title(s: &str) -> (&str, &str) {
    s.split_once(ARTIST_TITLE_SEPARATOR).unwrap_or((s, ""))
}

/// Turn every `<br>` tag, whatever its case or attributes, into `\n`.
pub fn line_breaks_to_newlines(html: &str) -> String {
    LINE_BREAK_RE.replace_all(html, "\n").into_owned()
}
