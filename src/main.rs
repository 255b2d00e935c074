use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lindholmen_lunch::config::{self, AppConfig};
use lindholmen_lunch::model::Weekday;
use lindholmen_lunch::runner::{ScraperPool, scrape_for_day};
use lindholmen_lunch::scrapers;
use lindholmen_lunch::snapshot::SnapshotStore;
use lindholmen_lunch::tags::TagTable;

const USER_AGENT: &str = concat!("lindholmen-lunch/", env!("CARGO_PKG_VERSION"));

/// Scrapes Lindholmen lunch menus into per-weekday JSON snapshots.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Weekday to scrape (monday..friday). Defaults to today.
    #[arg(long, value_parser = parse_day)]
    day: Option<Weekday>,

    /// Scrape the whole week instead of a single day.
    #[arg(long, conflicts_with = "day")]
    all: bool,

    /// Re-fetch even when a snapshot for the day already exists.
    #[arg(long)]
    refresh: bool,

    /// Path to the config file.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,
}

fn parse_day(token: &str) -> Result<Weekday, String> {
    Weekday::parse(token).ok_or_else(|| format!("not a weekday: {token}"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = AppConfig::load(&args.config)?;

    let days: Vec<Weekday> = if args.all {
        Weekday::ALL.to_vec()
    } else if let Some(day) = args.day {
        vec![day]
    } else {
        match Weekday::today() {
            Some(day) => vec![day],
            None => {
                tracing::info!("it's the weekend, nothing to scrape");
                return Ok(());
            }
        }
    };

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()?;

    let store = SnapshotStore::new(&config.data_dir);
    let table = TagTable::load(&config.data_dir.join("food_tags.json"));
    if table.is_empty() {
        tracing::warn!("tag table is empty, snapshots will carry no emoji tags");
    }
    let links = config::load_links(&config.data_dir);
    tracing::info!(links = links.len(), "restaurant links loaded");

    let registry = scrapers::default_registry(&client, &config.data_dir);
    let mut pool = ScraperPool::new(registry, config.retry_policy());

    for day in days {
        if let Err(e) = scrape_for_day(&mut pool, &store, &table, day, args.refresh).await {
            tracing::error!(%day, error = %e, "failed to write snapshot");
        }
    }

    Ok(())
}
