/// Token the search endpoint uses to join words of a query.
pub const WORD_JOIN: char = '+';

/// An artist/title pair to look up on the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub artist: String,
    pub title: String,
}

impl SearchQuery {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
        }
    }

    /// Build the request path for the search endpoint, e.g. `/?word=The+Cardigans+Lovefool`.
    ///
    /// Spaces become `+`; nothing else is escaped.
    pub fn path(&self) -> String {
        format!(
            "/?word={}{WORD_JOIN}{}",
            join_words(&self.artist),
            join_words(&self.title)
        )
    }
}

/// Replace every space with the word-joining token.
pub fn join_words(s: &str) -> String {
    s.replace(' ', &WORD_JOIN.to_string())
}
