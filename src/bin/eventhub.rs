use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dialoguer::Confirm;

use eventhub::client::Client;
use eventhub::provider::Toggle;
use eventhub::store::{AddOutcome, Confirmation};
use eventhub::traits::SearchParams;
use eventhub::{Provider, SavedEvents};

#[derive(Parser)]
#[command(name = "eventhub")]
#[command(about = "Discover events and keep a short list of the ones you like")]
struct Cli {
    /// Use this file to keep saved events, instead of the per-user default
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a few upcoming events
    Popular,
    /// Search events
    Search {
        keyword: Option<String>,

        #[arg(short, long)]
        city: Option<String>,

        /// Only events starting after this time (e.g. "2025-03-01T00:00:00Z")
        #[arg(long)]
        from: Option<String>,

        /// Only events starting before this time
        #[arg(long)]
        to: Option<String>,

        /// Zero-based page number
        #[arg(short, long)]
        page: Option<u32>,
    },
    /// Show the details of an event
    Show { id: String },
    /// Save an event
    Save { id: String },
    /// Save an event, or forget it if it is already saved
    Toggle { id: String },
    /// Forget a saved event
    Remove { id: String },
    /// List saved events
    Saved,
    /// Forget every saved event
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}


#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let store_path = cli.store.unwrap_or_else(SavedEvents::default_path);
    let store = SavedEvents::load_or_default(&store_path);
    let mut provider = Provider::new(Client::from_env()?, store);

    match cli.command {
        Commands::Popular => {
            let events = provider.popular().await?;
            println!("Eventos Populares");
            eventhub::utils::print_event_list(&events, provider.local());
        },
        Commands::Search { keyword, city, from, to, page } => {
            let params = SearchParams { keyword, city, start_date: from, end_date: to, page };
            if params.is_empty() {
                println!("Nothing to search for. Give a keyword, a city or a date range.");
                return Ok(());
            }
            let page = provider.search(&params).await?;
            eventhub::utils::print_event_list(page.events(), provider.local());
            if let Some(info) = &page.page {
                println!("Page {} of {} ({} events)", info.number + 1, info.total_pages.max(1), info.total_elements);
            }
        },
        Commands::Show { id } => {
            let event = provider.event(&id).await?;
            eventhub::utils::print_event(&event, provider.local().is_saved(&event.id));
        },
        Commands::Save { id } => {
            match provider.save_by_id(&id).await {
                Ok(AddOutcome::Added) => println!("Evento salvo"),
                Ok(AddOutcome::AlreadySaved) => println!("Este evento já está salvo"),
                Err(err) if err.is_capacity() => println!("{}", err),
                Err(err) => return Err(err.into()),
            }
        },
        Commands::Toggle { id } => {
            let event = provider.event(&id).await?;
            match provider.toggle_saved(&event) {
                Ok(Toggle::Saved) => println!("Evento salvo"),
                Ok(Toggle::Removed) => println!("Evento removido dos favoritos"),
                Err(err) if err.is_capacity() => println!("{}", err),
                Err(err) => return Err(err.into()),
            }
        },
        Commands::Remove { id } => {
            if provider.local_mut().remove(&id)? == false {
                println!("Event {} was not saved", id);
            }
        },
        Commands::Saved => {
            eventhub::utils::print_saved_events(provider.local());
        },
        Commands::Clear { yes } => {
            if provider.local().is_empty() {
                return Ok(());
            }
            let confirmation = if yes {
                Confirmation::Confirmed
            } else {
                Confirmation::from(
                    Confirm::new()
                        .with_prompt("Tem certeza que deseja remover todos os eventos salvos?")
                        .default(false)
                        .interact()?
                )
            };
            provider.local_mut().clear_all(confirmation)?;
        },
    }

    Ok(())
}
