use anyhow::{Context, Result};
use bookshelf::{book, catalog, config, prompt, table};
use clap::Parser;
use std::{fs, path, time};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SEPARATOR_WIDTH: usize = 88;

/// Keep a personal book catalog in a DynamoDB table.
#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about, long_about = None)]
struct Cli {
    /// AWS region of the catalog table.
    #[arg(long, env = "AWS_REGION", default_value = config::DEFAULT_REGION)]
    region: String,

    /// Custom endpoint URL, e.g. http://localhost:8000 for DynamoDB Local.
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    /// Name of the catalog table.
    #[arg(long, default_value = table::BOOKSHELF_TABLE)]
    table_name: String,

    /// Attempts per request made by the SDK before giving up.
    #[arg(long, default_value_t = 3)]
    max_attempts: u32,

    /// Seconds to wait for a newly created table to become active.
    #[arg(long, default_value_t = 300)]
    wait_timeout_secs: u64,

    /// Seconds between table status checks while waiting.
    #[arg(long, default_value_t = 2)]
    poll_interval_secs: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Prompt for a book and add it to the catalog (default).
    Add,

    /// List every table visible to the current credentials.
    ListTables,

    /// Print one book as JSON.
    Get {
        /// Partition key of the book.
        #[arg(long)]
        id: i64,

        /// Title of the book.
        #[arg(long)]
        title: String,
    },

    /// Write every book from a JSON array file.
    Import {
        /// Path to a JSON file holding an array of books.
        file: path::PathBuf,
    },
}

impl Cli {
    fn store_config(&self) -> config::StoreConfig {
        config::StoreConfig {
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            max_attempts: self.max_attempts,
        }
    }

    fn wait_config(&self) -> config::WaitConfig {
        config::WaitConfig {
            poll_interval: time::Duration::from_secs(self.poll_interval_secs),
            timeout: time::Duration::from_secs(self.wait_timeout_secs),
        }
    }
}

fn read_books(file: &path::Path) -> Result<Vec<book::BookRecord>> {
    let contents =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let books = serde_json::from_str(&contents)
        .with_context(|| format!("parsing books from {}", file.display()))?;
    Ok(books)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookshelf=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let store_config = cli.store_config();
    tracing::info!(endpoint = %store_config.target_display(), "connecting");
    let client = store_config.connect().await;
    let store = catalog::CatalogStore::new(client).with_wait_config(cli.wait_config());

    match cli.command.unwrap_or(Command::Add) {
        Command::Add => {
            let books = store.ensure_table(&cli.table_name).await?;
            let book = prompt::ask_book()?;
            store.add_book(&books, &book).await?;
            println!("\nAdded '{}' to '{}'.", book.title, books.name());
            println!("{}", "-".repeat(SEPARATOR_WIDTH));
        }
        Command::ListTables => {
            for handle in store.list_tables().await? {
                println!("{}", handle.name());
            }
        }
        Command::Get { id, title } => {
            let books = store.ensure_table(&cli.table_name).await?;
            let book = store.get_book(&books, &title, id).await?;
            println!("{}", serde_json::to_string_pretty(&book)?);
        }
        Command::Import { file } => {
            let records = read_books(&file)?;
            let books = store.ensure_table(&cli.table_name).await?;
            store.write_batch(&books, &records).await?;
            println!("Wrote {} books to '{}'.", records.len(), books.name());
        }
    }
    Ok(())
}
