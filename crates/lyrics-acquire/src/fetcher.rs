use lyrics_model::{LyricsRecord, ResultList, SearchQuery, StructuredDocBuilder};

use crate::error::Result;
use crate::extract;
use crate::fetch::{Endpoints, PageFetcher};
use crate::normalize;
use crate::output::LyricsSink;

/// Message shown when the host asks to configure the adapter.
pub const CONFIGURE_MESSAGE: &str = "This script does not require any configuration.";

/// Runs one lookup end to end: fetch, extract, serialize, deliver.
pub struct LyricsFetcher<F, S> {
    fetcher: F,
    sink: S,
    endpoints: Endpoints,
}

impl<F: PageFetcher, S: LyricsSink> LyricsFetcher<F, S> {
    pub fn new(fetcher: F, sink: S, endpoints: Endpoints) -> Self {
        Self {
            fetcher,
            sink,
            endpoints,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Search for an artist/title pair and deliver the matches.
    ///
    /// A failed or non-2xx request delivers the empty signal and returns `Ok`.
    /// A page that was fetched but cannot be read is an error.
    pub async fn search_by_artist_title(&self, artist: &str, title: &str) -> Result<()> {
        let query = SearchQuery::new(artist, title);
        let path = query.path();
        let page_url = self.endpoints.search_url(&path);
        tracing::info!(url = %page_url, "Searching");

        let page = match self
            .fetcher
            .fetch(&self.endpoints.search_host, self.endpoints.search_port, &path)
            .await
        {
            Ok(page) if page.is_success() => page,
            Ok(page) => {
                tracing::info!(status = page.status, "Search failed, sending empty result");
                self.sink.deliver("").await?;
                return Ok(());
            }
            Err(e) => {
                tracing::info!(error = %e, "Search failed, sending empty result");
                self.sink.deliver("").await?;
                return Ok(());
            }
        };

        let html = normalize::collapse_newlines(&page.body);
        let entries = extract::extract_result_entries(&html)?;
        tracing::info!(entries = entries.len(), "Extracted search results");

        let list = ResultList::new(page_url, entries);
        self.sink
            .deliver(&StructuredDocBuilder::suggestions(&list))
            .await?;
        Ok(())
    }

    /// Fetch the lyrics page at `locator` on the display host and deliver it.
    pub async fn fetch_by_locator(&self, locator: &str) -> Result<()> {
        let page_url = self.endpoints.display_url(locator);
        tracing::info!(url = %page_url, "Fetching lyrics");

        let reply = self
            .fetcher
            .fetch_raw(
                &self.endpoints.display_host,
                self.endpoints.display_port,
                &format!("GET {locator}\n"),
            )
            .await?;
        tracing::debug!(bytes = reply.len(), "Received lyrics page");

        let html = normalize::collapse_newlines(&reply);
        let fields = extract::extract_lyrics_page(&html)?;
        tracing::info!(artist = %fields.artist, title = %fields.title, "Extracted lyrics");

        let record = LyricsRecord {
            page_url,
            artist: fields.artist,
            title: fields.title,
            body: fields.body,
        };
        self.sink
            .deliver(&StructuredDocBuilder::lyrics(&record))
            .await?;
        Ok(())
    }

    /// Tell the user there is nothing to configure.
    pub async fn configure(&self) -> Result<()> {
        self.sink.notify(CONFIGURE_MESSAGE).await?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{FixtureFetcher, RecordingSink};
    use super::*;
    use crate::error::{AcquireError, ExtractionError};
    use crate::fetch::HttpPage;
    use pretty_assertions::assert_eq;

    const SEARCH_PAGE: &str = concat!(
        "<html>\n<body>\n<table>\n",
        "<tr><td bgcolor=\"#BBBBBB\"><b><a href=\"http://display.lyrics.astraweb.com:2000",
        "/display.cgi?cardigans..first_band..lovefool\">Lovefool</a></b></td></tr>\n",
        "<tr><td>Artist: <a href=\"/artist/cardigans.html\">Cardigans</a></td></tr>\n",
        "<tr><td bgcolor=\"#BBBBBB\"><b><a href=\"http://display.lyrics.astraweb.com:2000",
        "/display.cgi?cardigans..best_of..lovefool\">Lovefool \"Radio\"</a></b></td></tr>\n",
        "<tr><td>Artist: <a href=\"/artist/cardigans.html\">Cardigans</a></td></tr>\n",
        "<tr><td><a href=\"/?word=x&page=2\">More Songs &gt;&gt;</a></td></tr>\n",
        "</table>\n</body>\n</html>\n",
    );

    const LYRICS_REPLY: &str = concat!(
        "HTTP/1.0 200 OK\nContent-type text/html\n\n",
        "<html><head><title>Lyrics: Whiskeytown - Faithless Street</title></head>\n",
        "<body><font face=arial size=2>I started out a country boy<br>\n",
        "Now I'm \"lost\"<BR>\n<br><br><br><center>ads</center></font></body></html>\n",
    );

    const LOCATOR: &str = "/display.cgi?whiskeytown..faithless_street..faithless_street";

    fn lyrics_with(fetcher: FixtureFetcher) -> LyricsFetcher<FixtureFetcher, RecordingSink> {
        LyricsFetcher::new(fetcher, RecordingSink::default(), Endpoints::default())
    }

    fn search_fixture(status: u16) -> FixtureFetcher {
        let mut fetcher = FixtureFetcher::default();
        fetcher.pages.insert(
            "/?word=The+Cardigans+Lovefool".to_string(),
            HttpPage {
                status,
                body: SEARCH_PAGE.to_string(),
            },
        );
        fetcher
    }

    fn lyrics_fixture() -> FixtureFetcher {
        let mut fetcher = FixtureFetcher::default();
        fetcher
            .raw
            .insert(format!("GET {LOCATOR}\n"), LYRICS_REPLY.to_string());
        fetcher
    }

    #[tokio::test]
    async fn test_search_delivers_suggestions() {
        let lyrics = lyrics_with(search_fixture(200));
        lyrics
            .search_by_artist_title("The Cardigans", "Lovefool")
            .await
            .unwrap();

        let delivered = lyrics.sink().delivered.lock().unwrap().clone();
        assert_eq!(
            delivered,
            vec![concat!(
                "<suggestions page_url=\"http://search.lyrics.astraweb.com",
                "/?word=The+Cardigans+Lovefool\">",
                "<suggestion url=\"/display.cgi?cardigans..first_band..lovefool\" ",
                "artist=\"Cardigans\" title=\"Lovefool\"/>",
                "<suggestion url=\"/display.cgi?cardigans..best_of..lovefool\" ",
                "artist=\"Cardigans\" title=\"Lovefool 'Radio'\"/>",
                "</suggestions>",
            )
            .to_string()]
        );
    }

    #[tokio::test]
    async fn test_search_bad_status_sends_empty_signal() {
        let lyrics = lyrics_with(search_fixture(503));
        lyrics
            .search_by_artist_title("The Cardigans", "Lovefool")
            .await
            .unwrap();
        assert_eq!(*lyrics.sink().delivered.lock().unwrap(), vec![String::new()]);
    }

    #[tokio::test]
    async fn test_search_transport_error_sends_empty_signal() {
        let lyrics = lyrics_with(FixtureFetcher::default());
        lyrics.search_by_artist_title("Nobody", "Nothing").await.unwrap();
        assert_eq!(*lyrics.sink().delivered.lock().unwrap(), vec![String::new()]);
    }

    #[tokio::test]
    async fn test_search_unreadable_page_is_error() {
        let mut fetcher = FixtureFetcher::default();
        fetcher.pages.insert(
            "/?word=a+b".to_string(),
            HttpPage {
                status: 200,
                body: "<html>site redesigned</html>".to_string(),
            },
        );
        let lyrics = lyrics_with(fetcher);
        let err = lyrics.search_by_artist_title("a", "b").await.unwrap_err();
        assert!(matches!(err, AcquireError::Extraction(_)));
        assert!(lyrics.sink().delivered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_by_locator_delivers_lyrics() {
        let lyrics = lyrics_with(lyrics_fixture());
        lyrics.fetch_by_locator(LOCATOR).await.unwrap();

        let delivered = lyrics.sink().delivered.lock().unwrap().clone();
        assert_eq!(
            delivered,
            vec![format!(
                "<lyrics page_url=\"http://display.lyrics.astraweb.com:2000{LOCATOR}\" \
                 artist=\"Whiskeytown\" title=\"Faithless Street\">\
                 I started out a country boy\nNow I'm 'lost'\n</lyrics>"
            )]
        );
        assert_eq!(
            *lyrics.fetcher.requests.lock().unwrap(),
            vec![format!("display.lyrics.astraweb.com:2000 GET {LOCATOR}\n")]
        );
    }

    #[tokio::test]
    async fn test_fetch_by_locator_is_repeatable() {
        let lyrics = lyrics_with(lyrics_fixture());
        lyrics.fetch_by_locator(LOCATOR).await.unwrap();
        lyrics.fetch_by_locator(LOCATOR).await.unwrap();

        let delivered = lyrics.sink().delivered.lock().unwrap();
        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[0], delivered[1]);
    }

    #[tokio::test]
    async fn test_fetch_by_locator_transport_failure_is_error() {
        let lyrics = lyrics_with(FixtureFetcher::default());
        let err = lyrics.fetch_by_locator("/display.cgi?x").await.unwrap_err();
        assert!(matches!(err, AcquireError::Fetch(_)));
        assert!(lyrics.sink().delivered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_configure_notifies() {
        let lyrics = lyrics_with(FixtureFetcher::default());
        lyrics.configure().await.unwrap();
        assert_eq!(
            *lyrics.sink().notified.lock().unwrap(),
            vec![CONFIGURE_MESSAGE.to_string()]
        );
        assert!(lyrics.sink().delivered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_with_unusable_row_delivers_nothing() {
        let page = SEARCH_PAGE.replace(
            "<tr><td><a href=\"/?word=x&page=2\">",
            concat!(
                "<tr><td bgcolor=\"#BBBBBB\"><i>sponsored</i></td></tr>\n",
                "<tr><td><a href=\"/?word=x&page=2\">",
            ),
        );
        let mut fetcher = FixtureFetcher::default();
        fetcher.pages.insert(
            "/?word=The+Cardigans+Lovefool".to_string(),
            HttpPage {
                status: 200,
                body: page,
            },
        );
        let lyrics = lyrics_with(fetcher);

        let err = lyrics
            .search_by_artist_title("The Cardigans", "Lovefool")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AcquireError::Extraction(ExtractionError::UnusableEntry)
        ));
        assert!(lyrics.sink().delivered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_configure_from_spawned_task() {
        let lyrics = std::sync::Arc::new(lyrics_with(FixtureFetcher::default()));

        let task = tokio::spawn({
            let lyrics = lyrics.clone();
            async move { lyrics.configure().await }
        });
        task.await.unwrap().unwrap();

        assert_eq!(
            *lyrics.sink().notified.lock().unwrap(),
            vec![CONFIGURE_MESSAGE.to_string()]
        );
    }
}
