//! Command-line shell over the garagebook library.
//!
//! Each invocation wires a fresh state store, the HTTP client, and the
//! orchestration components, runs one operation, and prints the outcome the
//! store ended up with.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use garagebook::aggregate::{aggregate_hit, AggregationSession};
use garagebook::app::{
    lock_state, shared, AppState, DownloadScheduler, DownloadSink, MutationOrchestrator, Severity,
};
use garagebook::client::HttpInventoryClient;
use garagebook::domain::{CarDraft, ItemAttrs};
use garagebook::search::{SearchCoordinator, SearchHit, SearchKind};
use garagebook::storage::{default_selection_path, JsonSelectionStore};
use garagebook::{Config, Item, Result};

#[derive(Parser)]
#[command(name = "garagebook", version, about = "Inventory manager for garage assets")]
struct Cli {
    /// Path to a TOML configuration file; environment variables are used
    /// when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Run with admin privileges (required for deletes).
    #[arg(long, global = true)]
    admin: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch and print the full item list.
    List,
    /// Add a tire item.
    Add {
        #[command(flatten)]
        tire: TireArgs,
    },
    /// Update a tire item in place.
    Update {
        id: String,
        #[command(flatten)]
        tire: TireArgs,
    },
    /// Delete an item (admin only).
    Delete { id: String },
    /// Search items, optionally fanning out to files too.
    Search {
        term: String,
        /// Include the file kind in the fan-out.
        #[arg(long)]
        files: bool,
        /// Search the plain item catalog instead of the aggregated view.
        #[arg(long)]
        catalog: bool,
    },
    /// Create a classic car entry.
    AddCar {
        #[arg(long)]
        name: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        owner: Option<String>,
    },
    /// Remember an item id across invocations, or clear it.
    Select {
        id: Option<String>,
        #[arg(long)]
        clear: bool,
    },
    /// Print the image URLs of an item with the configured stagger.
    Images { id: String },
}

#[derive(Args)]
struct TireArgs {
    #[arg(long)]
    brand: String,
    #[arg(long)]
    size: String,
    #[arg(long)]
    tread_condition: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    set_info: Option<String>,
    #[arg(long)]
    season: Option<String>,
    #[arg(long)]
    price: Option<f64>,
    #[arg(long)]
    notes: Option<String>,
}

impl TireArgs {
    fn into_item(self, id: Option<String>) -> Item {
        let mut item = Item::new_tire(self.brand, self.size);
        item.id = id;
        if let ItemAttrs::Tire(attrs) = &mut item.attrs {
            attrs.tread_condition = self.tread_condition;
            attrs.status = self.status;
            attrs.location = self.location;
            attrs.set_info = self.set_info;
            attrs.season = self.season;
            attrs.price = self.price;
            attrs.notes = self.notes;
        }
        item
    }
}

/// Sink that prints each URL as it fires; piping into an opener is up to
/// the caller.
struct StdoutSink;

impl DownloadSink for StdoutSink {
    fn open(&self, url: &str) {
        println!("{url}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env(),
    };
    garagebook::init_tracing(&config);

    let client = Arc::new(HttpInventoryClient::new(
        &config.base_url,
        Duration::from_secs(config.request_timeout_secs),
    )?);
    let state = shared(AppState::new());
    lock_state(&state).is_admin = cli.admin;

    let orchestrator = MutationOrchestrator::new(Arc::clone(&client), Arc::clone(&state));
    let coordinator = SearchCoordinator::new(Arc::clone(&client), Arc::clone(&state));

    match cli.command {
        Command::List => {
            orchestrator.refresh().await;
            let state = lock_state(&state);
            for item in &state.items {
                println!("{}  {}", item.id.as_deref().unwrap_or("-"), item.label());
            }
            report(&state);
        }
        Command::Add { tire } => {
            orchestrator.create(&tire.into_item(None)).await;
            report(&lock_state(&state));
        }
        Command::Update { id, tire } => {
            orchestrator.update(&tire.into_item(Some(id))).await;
            report(&lock_state(&state));
        }
        Command::Delete { id } => {
            orchestrator.delete(&id).await;
            report(&lock_state(&state));
        }
        Command::Search {
            term,
            files,
            catalog,
        } => {
            if catalog {
                coordinator.search_catalog(&term).await;
            } else {
                let mut kinds = vec![SearchKind::Items];
                if files {
                    kinds.push(SearchKind::Files);
                }
                coordinator.search(&term, &kinds).await;
            }
            let state = lock_state(&state);
            print_hits(&state.search_results);
            report(&state);
        }
        Command::AddCar {
            name,
            model,
            image,
            owner,
        } => {
            let draft = CarDraft {
                name,
                model,
                image,
                owner: owner.or(config.default_owner),
            };
            let car = client.create_car(&draft).await?;
            println!("created {} {}", car.name, car.model);
        }
        Command::Select { id, clear } => {
            let store = JsonSelectionStore::new(default_selection_path())?;
            let mut session = AggregationSession::open(store)?;
            if clear {
                session.close()?;
                println!("selection cleared");
            } else if let Some(id) = id {
                session.select(&id)?;
                println!("selected {id}");
            } else {
                match session.selected() {
                    Some(id) => println!("{id}"),
                    None => println!("nothing selected"),
                }
            }
        }
        Command::Images { id } => {
            orchestrator.refresh().await;
            let urls = {
                let state = lock_state(&state);
                state
                    .items
                    .iter()
                    .find(|item| item.id.as_deref() == Some(id.as_str()))
                    .map(|item| item.image_urls.clone())
            };
            match urls {
                Some(urls) => {
                    let scheduler = DownloadScheduler::new(
                        Arc::new(StdoutSink),
                        Duration::from_millis(config.download_stagger_ms),
                    );
                    scheduler.schedule(&urls);
                    scheduler.drain().await;
                }
                None => eprintln!("no item with id {id}"),
            }
        }
    }

    Ok(())
}

fn print_hits(hits: &[SearchHit]) {
    for hit in hits {
        match hit {
            SearchHit::Item(item) => println!("item  {}", item.label()),
            SearchHit::Car(hit) => {
                let car = aggregate_hit(hit);
                println!("car   {} {}", car.display_name(), car.display_model());
                for section in &car.sections {
                    println!("        [{}]", section.category.name);
                    for file in &section.files {
                        println!("          {}", file.name);
                    }
                }
            }
            SearchHit::File(file) => println!("file  {}", file.name),
        }
    }
}

fn report(state: &AppState) {
    if let Some(notification) = &state.notification {
        match notification.severity {
            Severity::Error => eprintln!("error: {}", notification.message),
            _ => eprintln!("{}", notification.message),
        }
    }
}
