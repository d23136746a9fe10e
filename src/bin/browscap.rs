use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::{error, info};
use rustyline::error::ReadlineError;

use browscap_store::ingest;
use browscap_store::{PatternStore, StoreError};

const URL: &str = "http://browscap.org/stream?q=BrowsCapCSV";
const CSV_FILE: &str = "browscap.csv";
const STAMP_FILE: &str = "browscap.last-modified";
const INDEX_DIR: &str = "index";

#[derive(Parser)]
#[command(
    name = "browscap",
    about = "Download, index and search the Browscap catalog"
)]
struct Cli {
    /// Cache folder holding the catalog and the index.
    #[arg(long, global = true)]
    cache: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download browscap.csv if the remote file is newer.
    Fetch,
    /// Create the search index from browscap.csv.
    Convert,
    /// Match a user agent against the index.
    Search {
        /// One-shot user agent; omit for an interactive prompt.
        user_agent: Option<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let cli = Cli::parse();
    let cache = cli.cache.unwrap_or_else(default_cache);

    let result = match cli.command {
        Command::Fetch => fetch(&cache),
        Command::Convert => convert(&cache),
        Command::Search { user_agent } => search(&cache, user_agent),
    };

    if let Err(err) = result {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn default_cache() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".browscap"))
        .unwrap_or_else(|| PathBuf::from(".browscap"))
}

fn fetch(cache: &Path) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(cache)?;
    let csv_file = cache.join(CSV_FILE);
    let stamp_file = cache.join(STAMP_FILE);

    let head = ureq::head(URL).call()?;
    let remote_modified =
        head.header("Last-Modified").unwrap_or_default().to_string();
    if !remote_modified.is_empty() {
        info!("Remote file date: {}", remote_modified);
    }

    // The stamp file remembers the Last-Modified value of the download
    // it sits next to; an unchanged remote file is not fetched again.
    if csv_file.exists() && !remote_modified.is_empty() {
        if let Ok(local_modified) = std::fs::read_to_string(&stamp_file) {
            info!("Local file date:  {}", local_modified.trim());
            if local_modified.trim() == remote_modified {
                info!("No newer remote file available.");
                return Ok(());
            }
        }
    }

    info!("Downloading browscap.csv...");
    let response = ureq::get(URL).call()?;
    let mut body = response.into_reader();
    let mut file = File::create(&csv_file)?;
    std::io::copy(&mut body, &mut file)?;
    if !remote_modified.is_empty() {
        std::fs::write(&stamp_file, &remote_modified)?;
    }
    info!("Downloaded {}", csv_file.display());

    Ok(())
}

fn convert(cache: &Path) -> Result<(), Box<dyn Error>> {
    let csv_file = cache.join(CSV_FILE);
    let records = match ingest::read_catalog(&csv_file) {
        Err(err @ StoreError::CatalogMissing(_)) => {
            error!("{} Did you run fetch?", err);
            return Err(err.into());
        }
        other => other?,
    };

    let start = Instant::now();
    PatternStore::try_build(&cache.join(INDEX_DIR), records)?;
    info!("Created index in {:?}", start.elapsed());

    Ok(())
}

fn search(
    cache: &Path,
    user_agent: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let store = PatternStore::open(&cache.join(INDEX_DIR))?;

    match user_agent {
        Some(user_agent) => search_one(&store, &user_agent),
        None => prompt_loop(&store),
    }
}

fn search_one(
    store: &PatternStore,
    user_agent: &str,
) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();
    match store.search(user_agent)? {
        Some(pattern) => {
            println!("{}", pattern);
            if let Some(properties) = store.get_properties(&pattern)? {
                println!("{}", serde_json::to_string_pretty(&properties)?);
            }
            info!("Found match in {:?}", start.elapsed());
        }
        None => println!("no match"),
    }

    Ok(())
}

fn prompt_loop(store: &PatternStore) -> Result<(), Box<dyn Error>> {
    let mut editor = rustyline::DefaultEditor::new()?;

    loop {
        match editor.readline("ua> ") {
            Ok(line) => {
                let user_agent = line.trim();
                if user_agent.is_empty() {
                    continue;
                }
                editor.add_history_entry(user_agent)?;
                search_one(store, user_agent)?;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }
    }
}
