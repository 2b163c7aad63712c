// Line-oriented command protocol read from the host on stdin.
//
//   configure
//   fetchLyrics <artist-url-encoded> <title-url-encoded>
//   fetchLyricsByUrl <locator-path>
//
// Anything else is ignored. No command can stop the loop; only end of input does.

use lyrics_acquire::{LyricsFetcher, LyricsSink, PageFetcher};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// A recognized command with its decoded arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Configure,
    FetchLyrics { artist: String, title: String },
    FetchLyricsByUrl { locator: String },
}

/// The leading run of ASCII letters of a line, e.g. `fetchLyrics` in `fetchLyrics a b`.
pub fn command_name(line: &str) -> &str {
    let end = line
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(line.len());
    &line[..end]
}

/// Parse one input line. Unknown commands and malformed arguments yield `None`.
pub fn parse_command(line: &str) -> Option<Command> {
    let name = command_name(line);
    let mut args = line.split_whitespace().skip(1);

    match name {
        "configure" => Some(Command::Configure),
        "fetchLyrics" => {
            let (Some(artist), Some(title)) = (args.next(), args.next()) else {
                tracing::debug!(line, "fetchLyrics needs artist and title");
                return None;
            };
            let artist = decode_arg(artist)?;
            let title = decode_arg(title)?;
            Some(Command::FetchLyrics { artist, title })
        }
        "fetchLyricsByUrl" => {
            let Some(locator) = args.next() else {
                tracing::debug!(line, "fetchLyricsByUrl needs a locator");
                return None;
            };
            Some(Command::FetchLyricsByUrl {
                locator: locator.to_string(),
            })
        }
        _ => {
            tracing::debug!(command = name, "Ignoring unknown command");
            None
        }
    }
}

/// Percent-decode one argument. `+` is kept as is.
fn decode_arg(arg: &str) -> Option<String> {
    match urlencoding::decode(arg) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(e) => {
            tracing::debug!(arg, error = %e, "Argument is not valid percent-encoded UTF-8");
            None
        }
    }
}

/// Run one command to completion.
pub async fn dispatch<F: PageFetcher, S: LyricsSink>(
    lyrics: &LyricsFetcher<F, S>,
    command: &Command,
) -> lyrics_acquire::Result<()> {
    match command {
        Command::Configure => lyrics.configure().await,
        Command::FetchLyrics { artist, title } => {
            lyrics.search_by_artist_title(artist, title).await
        }
        Command::FetchLyricsByUrl { locator } => lyrics.fetch_by_locator(locator).await,
    }
}

/// Read commands until end of input, running each before reading the next.
///
/// Returns the number of lines read.
pub async fn run_loop<R, F, S>(mut input: R, lyrics: &LyricsFetcher<F, S>) -> usize
where
    R: AsyncBufRead + Unpin,
    F: PageFetcher,
    S: LyricsSink,
{
    let mut lines = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match input.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Command input failed, stopping");
                break;
            }
        }
        lines += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(&['\n', '\r'][..]);

        let Some(command) = parse_command(line) else {
            continue;
        };
        tracing::debug!(command = ?command, "Dispatching");

        if let Err(e) = dispatch(lyrics, &command).await {
            tracing::warn!(command = command_name(line), error = %e, "Command failed");
        }
    }

    tracing::info!(lines, "Command input closed");
    lines
}
