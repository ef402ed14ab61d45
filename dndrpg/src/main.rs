//! Console D&D character manager.

mod menu;

use clap::Parser;
use dndrpg_core::{CharacterService, JsonFileStore};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dndrpg", about = "Console D&D character manager", version)]
struct Args {
    /// Directory where characters are stored
    #[arg(long, default_value = "characters")]
    data_dir: PathBuf,

    /// Override the reference API base URL
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let mut client = dnd5eapi::Client::new();
    if let Some(url) = args.api_url {
        client = client.with_base_url(url);
    }

    let service = CharacterService::new(
        Box::new(JsonFileStore::new(args.data_dir)),
        Box::new(client),
    );

    if let Err(e) = menu::Menu::new(service).run().await {
        eprintln!("fatal: {e}");
        std::process::exit(1);
    }
}
