use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lyrics_acquire::{DcopSink, Endpoints, LyricsFetcher, LyricsSink, NetFetcher, StdoutSink};

mod commands;

#[derive(Parser)]
#[command(name = "lyrics-astraweb")]
#[command(about = "Lyrics lookup on lyrics.astraweb.com, driven by commands on stdin")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    /// Host serving search result pages
    #[arg(long, global = true, default_value = lyrics_acquire::fetch::SEARCH_HOST)]
    search_host: String,

    #[arg(long, global = true, default_value_t = lyrics_acquire::fetch::SEARCH_PORT)]
    search_port: u16,

    /// Host serving lyrics pages (raw TCP, its HTTP headers are broken)
    #[arg(long, global = true, default_value = lyrics_acquire::fetch::DISPLAY_HOST)]
    display_host: String,

    #[arg(long, global = true, default_value_t = lyrics_acquire::fetch::DISPLAY_PORT)]
    display_port: u16,

    /// Network timeout per request, in seconds
    #[arg(long, global = true, default_value_t = lyrics_acquire::fetch::DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Where documents are delivered
    #[arg(long, global = true, default_value = "dcop", value_enum)]
    sink: SinkKind,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, clap::ValueEnum)]
enum SinkKind {
    /// Amarok's context browser via `dcop`
    Dcop,
    /// One document per line on stdout
    Stdout,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands from stdin until it closes (default)
    Run,

    /// Search once for an artist and title
    Search {
        #[arg(short, long)]
        artist: String,

        #[arg(short, long)]
        title: String,
    },

    /// Fetch lyrics once by locator path (e.g., "/display.cgi?artist..album..song")
    Fetch {
        #[arg(short, long)]
        url: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,hyper_util=info,reqwest=info",
        LogLevel::Trace => "trace",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    // stdout may carry documents, so logs go to stderr.
    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    let endpoints = Endpoints {
        search_host: cli.search_host.clone(),
        search_port: cli.search_port,
        display_host: cli.display_host.clone(),
        display_port: cli.display_port,
    };
    let fetcher = NetFetcher::new(Duration::from_secs(cli.timeout_secs))?;
    let command = cli.command.unwrap_or(Commands::Run);

    match cli.sink {
        SinkKind::Dcop => {
            let lyrics = LyricsFetcher::new(fetcher, DcopSink::new(), endpoints);
            run(command, lyrics).await
        }
        SinkKind::Stdout => {
            let lyrics = LyricsFetcher::new(fetcher, StdoutSink, endpoints);
            run(command, lyrics).await
        }
    }
}

async fn run<S: LyricsSink>(
    command: Commands,
    lyrics: LyricsFetcher<NetFetcher, S>,
) -> Result<()> {
    match command {
        Commands::Run => {
            tracing::info!("Waiting for commands on stdin");
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            commands::run_loop(stdin, &lyrics).await;
        }
        Commands::Search { artist, title } => {
            tracing::info!(artist = %artist, title = %title, "One-shot search");
            lyrics.search_by_artist_title(&artist, &title).await?;
        }
        Commands::Fetch { url } => {
            tracing::info!(url = %url, "One-shot lyrics fetch");
            lyrics.fetch_by_locator(&url).await?;
        }
    }

    Ok(())
}
