/// One matched song on a search results page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultEntry {
    /// Locator path on the display host (e.g., "/display.cgi?cardigans..lovefool").
    pub url: String,
    pub artist: String,
    pub title: String,
}

/// All matches of one search, in the order the page listed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultList {
    /// Full URL of the search page the entries came from.
    pub page_url: String,
    pub entries: Vec<ResultEntry>,
}

/// Full lyrics of one song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsRecord {
    pub page_url: String,
    pub artist: String,
    pub title: String,
    /// Plain text, one lyric line per `\n`.
    pub body: String,
}

impl ResultList {
    pub fn new(page_url: impl Into<String>, entries: Vec<ResultEntry>) -> Self {
        Self {
            page_url: page_url.into(),
            entries,
        }
    }
}
