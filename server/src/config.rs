use std::net::SocketAddr;

use clap::Parser;
use this_life_scraper::DEFAULT_ARCHIVE_URL;
use url::Url;

/// Serve the This American Life archive listing as JSON
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address the HTTP server listens on
    #[arg(long, env = "EPISODES_LISTEN", default_value = "0.0.0.0:8888")]
    pub listen: SocketAddr,

    /// Archive listing page scraped on every request
    #[arg(long, env = "ARCHIVE_URL", default_value = DEFAULT_ARCHIVE_URL)]
    pub source_url: Url,
}
