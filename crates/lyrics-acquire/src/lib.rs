pub mod error;
pub mod extract;
pub mod fetch;
pub mod fetcher;
pub mod normalize;
pub mod output;

pub use error::*;
pub use fetch::{Endpoints, HttpPage, NetFetcher, PageFetcher};
pub use fetcher::LyricsFetcher;
pub use output::{DcopSink, LyricsSink, StdoutSink};
