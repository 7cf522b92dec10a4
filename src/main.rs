use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use medialib::api::{self, AppState};
use medialib::client::table::{render_details, render_table};
use medialib::client::CatalogClient;
use medialib::core::config::Config;
use medialib::database::{CatalogManager, Category, NewMedia};

#[derive(Parser)]
#[clap(author, version, about = "Media catalog server and client")]
struct Cli {
    /// Path to config file
    #[clap(short, long, default_value = "medialib.toml")]
    config: String,

    /// Debug mode
    #[clap(short, long)]
    debug: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the catalog API server
    Serve,

    #[clap(flatten)]
    Client(ClientCommand),
}

/// Operations against a running catalog server
#[derive(Subcommand)]
enum ClientCommand {
    /// List records, optionally only one category
    List {
        #[clap(long)]
        category: Option<String>,
    },

    /// Show every field of one record
    Show { id: String },

    /// Find a record by exact name, ignoring case
    Search { name: String },

    /// Add a record
    Add {
        #[clap(long)]
        name: String,
        /// Author or director
        #[clap(long)]
        author: String,
        /// Publication date, e.g. 2024-03-01
        #[clap(long)]
        date: String,
        /// Book, Film or Magazine
        #[clap(long)]
        category: String,
    },

    /// Delete a record
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load_or_default(&cli.config)?;

    // Initialize logger
    let log_level = if cli.debug {
        LevelFilter::Debug
    } else {
        config.logging.level_filter()
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .init();

    match cli.command {
        Command::Serve => serve(&config).await,
        Command::Client(command) => run_client(&config, command).await,
    }
}

async fn serve(config: &Config) -> Result<()> {
    info!("Starting medialib catalog server");

    let manager = CatalogManager::with_file(&config.storage.data_dir, &config.storage.file_name)
        .with_context(|| {
            format!(
                "Failed to open catalog in {:?}",
                config.storage.data_dir
            )
        })?;

    api::serve(config.server.bind, AppState::new(manager)).await
}

async fn run_client(config: &Config, command: ClientCommand) -> Result<()> {
    let client = CatalogClient::from_config(&config.client)
        .context("Failed to create HTTP client")?;

    match command {
        ClientCommand::List { category } => {
            let records = match category {
                Some(category) => client.list_by_category(&category).await?,
                None => client.list_all().await?,
            };
            println!("{}", render_table(&records));
        }
        ClientCommand::Show { id } => match client.get_by_id(&id).await? {
            Some(record) => print!("{}", render_details(&record)),
            None => bail!("Media ID {} not found.", id),
        },
        ClientCommand::Search { name } => match client.search_by_name(&name).await? {
            Some(record) => println!("{}", render_table(&[record])),
            None => bail!("Media '{}' not found.", name),
        },
        ClientCommand::Add {
            name,
            author,
            date,
            category,
        } => {
            // Catch typos before the round trip
            category.parse::<Category>()?;
            let record = client
                .add(&NewMedia::new(name, author, date, category))
                .await?;
            println!("Created media {} ({})", record.id, record.entry.name);
        }
        ClientCommand::Delete { id } => {
            if !client.delete(&id).await? {
                bail!("Media ID {} not found.", id);
            }
            println!("Deleted media {}", id);
        }
    }

    Ok(())
}
