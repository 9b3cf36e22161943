use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{config::load_settings, MovieListStore};
use shared::{
    domain::MovieRecord,
    routes::{Route, Router},
};
use tracing::info;

mod views;

#[derive(Parser, Debug)]
#[command(name = "movies", about = "Browse and edit a remote movie collection")]
struct Cli {
    /// Collection endpoint; overrides API_URL and movies.toml.
    #[arg(long)]
    api_url: Option<String>,
    /// Base path routes are resolved under.
    #[arg(long)]
    base_path: Option<String>,
    /// Print every store event after the command finishes.
    #[arg(long)]
    watch: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Open { path: String },
    Update { record: String },
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(api_url) = cli.api_url {
        settings.api_url = Some(api_url);
    }
    if let Some(base_path) = cli.base_path {
        settings.base_path = base_path;
    }

    let endpoint = settings
        .endpoint()
        .context("cannot start without a usable collection url")?;
    info!("movies: using collection {endpoint}");
    let router = Router::new(&settings.base_path);

    let store = MovieListStore::with_endpoint(endpoint);
    let mut events = store.subscribe_events();
    store.attach().await;

    match cli.command {
        Command::List => print!("{}", views::render_list(&store.snapshot(), &router)),
        Command::Open { path } => match router.resolve(&path) {
            Some(Route::Home) => print!("{}", views::render_list(&store.snapshot(), &router)),
            Some(Route::MovieDetails { id }) => {
                print!("{}", views::render_details(&store.snapshot(), &id)?)
            }
            None => return Err(anyhow!("no route matches '{path}'")),
        },
        Command::Update { record } => {
            let value = serde_json::from_str(&record).context("record must be valid JSON")?;
            let record = MovieRecord::from_value(value)?;
            store.update(&record).await;
            match store.find(&record.id) {
                Some(movie) => println!("{}", serde_json::to_string_pretty(&movie)?),
                None => println!("Movie {} not found.", record.id),
            }
        }
        Command::Delete { id } => {
            let target = views::delete_target(&store.items(), &id);
            store.delete(&target).await;
            println!("{} movies remaining", store.items().len());
        }
    }

    if cli.watch {
        while let Ok(event) = events.try_recv() {
            eprintln!("event: {}", views::describe_event(&event));
        }
    }

    Ok(())
}
