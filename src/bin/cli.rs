//! bookback CLI
//!
//! Runs book detection and extraction over saved HTML pages.

use std::io::Read;
use std::path::{Path, PathBuf};

use bookback::{
    HtmlDocument, PageClassifier, RecordExtractor,
    config::{add_library, config_path, load_all, load_config},
    error::Result,
    models::{BookRecord, SITE_PROFILES, profile::validate_profiles},
    pipeline,
    services::search,
};
use clap::{Parser, Subcommand};

/// bookback - find the book on a page, then find it at your library
#[derive(Parser, Debug)]
#[command(
    name = "bookback",
    version,
    about = "Book page detection and title/author/ISBN extraction"
)]
struct Cli {
    /// Path to storage directory containing config.toml
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a saved page and extract its book record
    Scan {
        /// HTML file to read, or "-" for stdin
        file: PathBuf,

        /// Address the page was loaded from
        #[arg(long)]
        url: String,

        /// Also print library search links for the record
        #[arg(long)]
        links: bool,
    },

    /// Print library search links for a title and author
    Links {
        #[arg(long)]
        title: String,

        #[arg(long)]
        author: Option<String>,
    },

    /// Print a map search for public libraries near a location
    Finder {
        location: String,
    },

    /// Derive a library search template from a catalog search for "Dune"
    Template {
        example_url: String,

        /// Append the template to the configured libraries
        #[arg(long)]
        save: bool,
    },

    /// List site profiles in preference order
    Profiles,

    /// Validate configuration and the site profile table
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn read_page(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        return Ok(source);
    }
    Ok(std::fs::read_to_string(file)?)
}

fn print_links(record: &BookRecord, libraries: &[bookback::models::Library]) {
    if libraries.is_empty() {
        log::warn!("No libraries configured; add [[libraries]] to config.toml");
        return;
    }
    for link in search::search_links(record, libraries) {
        println!("{link}");
    }
}

/// Main entry point for the CLI application.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli.storage_dir);
    log::debug!("Loaded configuration from {}", cli.storage_dir.display());

    match cli.command {
        Command::Scan { file, url, links } => {
            let source = read_page(&file)?;
            let document = HtmlDocument::parse(&source);
            let classifier = PageClassifier::default();
            let extractor = RecordExtractor::from_config(&config)?;

            let outcome = pipeline::scan(&url, &document, &classifier, &extractor);
            println!("{}", serde_json::to_string_pretty(&outcome)?);

            match &outcome.record {
                Some(record) => {
                    log::info!(
                        "Book: {}",
                        record.short_title(config.display.title_max_chars)
                    );
                    if links {
                        print_links(record, &config.libraries);
                    }
                }
                None if outcome.is_book_page() => log::warn!("Book page, but no title found"),
                None => log::info!("Not a book page"),
            }
        }

        Command::Links { title, author } => {
            let Some(record) = BookRecord::new(title.trim(), author, None) else {
                return Err(bookback::error::AppError::validation("title is empty"));
            };
            print_links(&record, &config.libraries);
        }

        Command::Finder { location } => {
            println!(
                "{}",
                search::finder_url(&config.search.finder_template, &location)?
            );
        }

        Command::Template { example_url, save } => {
            let library = search::template_from_example(&example_url)?;
            println!("{}", library.search_url);

            if save {
                let saved = add_library(&cli.storage_dir, library)?;
                log::info!(
                    "Saved {} libraries to {}",
                    saved.libraries.len(),
                    config_path(&cli.storage_dir).display()
                );
            }
        }

        Command::Profiles => {
            for (rank, profile) in SITE_PROFILES.iter().enumerate() {
                println!(
                    "{}. {} ({})",
                    rank + 1,
                    profile.name,
                    profile.host_marker.unwrap_or("any host")
                );
                println!("   title:  {}", profile.title_selectors.join(", "));
                println!("   author: {}", profile.author_selectors.join(", "));
                if !profile.identifier_selectors.is_empty() {
                    println!("   isbn:   {}", profile.identifier_selectors.join(", "));
                }
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = load_all(&cli.storage_dir) {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({} libraries)", config.libraries.len());

            if let Err(e) = validate_profiles() {
                log::error!("Site profile validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ {} site profiles OK", SITE_PROFILES.len());
        }
    }

    Ok(())
}
