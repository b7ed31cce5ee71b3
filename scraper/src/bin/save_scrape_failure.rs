use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::fs;
use std::path::Path;
use this_life_scraper::{extract_episodes, Archive, DEFAULT_ARCHIVE_URL};

/// Save the current archive page as a regression fixture
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Name of the fixture file (without extension)
    test_name: String,

    /// Archive listing page to fetch
    #[arg(long, env = "ARCHIVE_URL", default_value = DEFAULT_ARCHIVE_URL)]
    url: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    println!("Fetching HTML from {}...", cli.url);
    let archive = Archive::parse(&cli.url)?;
    let html = archive.fetch_html().context("Failed to fetch archive page")?;

    // Create failures directory if it doesn't exist
    let failures_dir = Path::new("src/tests/fixtures/failures");
    fs::create_dir_all(failures_dir).context("Failed to create failures directory")?;

    let file_path = failures_dir.join(format!("{}.html", cli.test_name));
    fs::write(&file_path, &html).context("Failed to write HTML file")?;

    println!(
        "Saved HTML to {} for regression testing",
        file_path.display()
    );

    println!("\nAttempting to extract episodes to confirm failure:");
    let extraction = extract_episodes(&html, archive.source());
    let skipped = extraction
        .warnings
        .iter()
        .filter(|warning| warning.skips_entry())
        .count();

    println!("Extraction results:");
    println!("  - Episodes: {}", extraction.episodes.len());
    println!("  - Skipped entries: {}", skipped);
    println!(
        "  - Images dropped: {}",
        extraction.warnings.len() - skipped
    );

    if extraction.episodes.is_empty() {
        println!(
            "✅ No episodes found. The archive markup has likely changed - structural issue"
        );
    } else if skipped > 0 {
        println!("✅ Some entries were skipped:");
        for warning in extraction.warnings.iter().filter(|w| w.skips_entry()) {
            println!("   article {}: {}", warning.position(), warning);
        }
    } else {
        println!("⚠️ Every entry extracted! This may not be a failure case.");
    }

    println!("\nThis page has been saved and will be included in regression tests.");
    Ok(())
}
