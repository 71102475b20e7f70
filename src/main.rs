//! Wikinote: search Wikipedia from the terminal and save results as notes.
//!
//! With a query argument this runs one search and prints the results; without
//! one it opens the interactive search modal.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wikinote::config::Settings;
use wikinote::network::{FixedDelay, HttpClient};
use wikinote::notes::{FsStore, NoteSaver, SaveOutcome};
use wikinote::notify::{ConsoleNotifier, Notify};
use wikinote::{NoticeBoard, SearchClient};

/// Search Wikipedia and save results as notes
#[derive(Parser)]
#[command(name = "wikinote")]
#[command(about = "Search Wikipedia and save results as notes")]
#[command(version)]
struct Cli {
    /// Search term; omit to open the interactive picker
    query: Option<String>,

    /// Save the Nth result (1-based) after a one-shot search
    #[arg(short, long, value_name = "N", requires = "query")]
    save: Option<usize>,

    /// Wikipedia language code
    #[arg(long, value_name = "LANG")]
    lang: Option<String>,

    /// Folder notes are written into
    #[arg(long, value_name = "DIR")]
    folder: Option<String>,

    /// Disable the language-model query rewrite on empty results
    #[arg(long)]
    no_fallback: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Diagnostics go to stderr so they never corrupt the TUI or the
    // one-shot output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = Settings::default();
    settings.merge_env();
    if let Some(lang) = cli.lang {
        settings.wiki.lang = lang;
    }
    if let Some(folder) = cli.folder {
        settings.notes.folder = folder;
    }
    if cli.no_fallback {
        settings.fallback.enabled = false;
    }

    info!("wikinote v{} starting", wikinote::VERSION);

    let client = HttpClient::with_settings(&settings.outgoing)?;
    let throttle = Arc::new(FixedDelay::new(settings.outgoing.throttle_ms));
    let store = Arc::new(FsStore::new("."));

    match cli.query {
        Some(query) => run_oneshot(&query, cli.save, client, throttle, &settings).await,
        None => run_modal(client, throttle, store, &settings).await,
    }
}

/// One search, results printed to stdout, optional save of the Nth result
async fn run_oneshot(
    query: &str,
    save: Option<usize>,
    client: HttpClient,
    throttle: Arc<FixedDelay>,
    settings: &Settings,
) -> Result<()> {
    let notify: Arc<dyn Notify> = Arc::new(ConsoleNotifier);
    let search = SearchClient::new(client, throttle, notify.clone(), settings);

    let results = search.search(query, true).await;
    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        println!("{}. {}", i + 1, result.title);
        println!("   {}", result.summary);
        if !result.url.is_empty() {
            println!("   {}", result.url);
        }
    }

    if let Some(n) = save {
        let result = results
            .get(n.saturating_sub(1))
            .ok_or_else(|| anyhow::anyhow!("no result number {n} to save"))?;

        let store = Arc::new(FsStore::new("."));
        let saver = NoteSaver::new(store, settings.notes.folder.clone(), notify);
        match saver.save(result)? {
            SaveOutcome::Created(path) => println!("{path}"),
            // Opening the existing note in a terminal means printing it.
            SaveOutcome::AlreadyExists(path) => print!("{}", saver.read(&path)?),
        }
    }

    Ok(())
}

/// Interactive search modal
async fn run_modal(
    client: HttpClient,
    throttle: Arc<FixedDelay>,
    store: Arc<FsStore>,
    settings: &Settings,
) -> Result<()> {
    let board = NoticeBoard::new();
    let notify: Arc<dyn Notify> = Arc::new(board.clone());

    let search = SearchClient::new(client, throttle, notify.clone(), settings);
    let saver = NoteSaver::new(store, settings.notes.folder.clone(), notify);

    if let Some(saved) = wikinote::tui::run(&search, &saver, &board).await? {
        if saved.already_existed {
            println!("Note already exists: {}", saved.path);
        } else {
            println!("Note created: {}", saved.path);
        }
        print!("{}", saved.content);
    }

    Ok(())
}
