use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use this_life_scraper::{Archive, DEFAULT_ARCHIVE_URL};

/// Scrape the archive listing once and print the episodes as JSON
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Archive listing page to scrape
    #[arg(long, env = "ARCHIVE_URL", default_value = DEFAULT_ARCHIVE_URL)]
    url: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let archive = Archive::parse(&cli.url)?;
    let extraction = archive
        .extract()
        .with_context(|| format!("failed to list episodes from {}", cli.url))?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&extraction.episodes)
    } else {
        serde_json::to_string(&extraction.episodes)
    }
    .context("Failed to serialize episodes")?;
    println!("{}", json);

    if !extraction.warnings.is_empty() {
        log::warn!(
            "{} archive entries had problems; see warnings above",
            extraction.warnings.len()
        );
    }

    Ok(())
}
