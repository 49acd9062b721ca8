#![deny(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod config;
mod error;
mod fetch;
mod parse;
mod plan;
mod report;
mod scrape;

use std::env;
use std::fs;

use config::{AvailabilityConfig, Command, RatingsConfig, SuggestConfig};
use log::info;
use scrape::AvailabilityQuery;

pub use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> core::result::Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let command = config::from_args(env::args().skip(1)).unwrap_or_else(|msg| {
        eprintln!("{msg}\n\n{}", config::USAGE);
        std::process::exit(2);
    });
    match command {
        Command::Ratings(cfg) => run_ratings(cfg).await?,
        Command::Availability(cfg) => run_availability(cfg).await?,
        Command::Suggest(cfg) => run_suggest(&cfg)?,
    }
    Ok(())
}

async fn run_ratings(cfg: RatingsConfig) -> Result<()> {
    let client = fetch::make_client();
    let listings = scrape::scrape_ratings(&client, cfg.pages, cfg.min_rating).await?;
    info!(
        "{} restaurants rated {} or higher",
        listings.len(),
        cfg.min_rating
    );
    let path = report::write_ratings(&listings, &cfg.output)?;
    info!("ratings saved to {}", path.display());
    Ok(())
}

async fn run_availability(cfg: AvailabilityConfig) -> Result<()> {
    let cookie_raw = fs::read_to_string(&cfg.cookie_file)?;
    let query = AvailabilityQuery {
        year_month: cfg.year_month,
        token: cfg.token,
        cookie_header: parse::cookie_header(&cookie_raw),
        guests: cfg.guests,
    };
    let listings = report::load_ratings(&cfg.ratings_csv)?;
    let client = fetch::make_client();
    let records = scrape::collect_availability(&client, &listings, &query).await;
    let path = report::write_availability(&records, &cfg.output)?;
    info!("availability data saved to {}", path.display());
    Ok(())
}

fn run_suggest(cfg: &SuggestConfig) -> Result<()> {
    let records = plan::load_reservations(&cfg.inputs);
    let range = plan::DateRange::parse(&cfg.start, &cfg.end)?;
    let records = plan::filter_records(records, &range);
    let suggestions = plan::suggest_reservations(&records, cfg.allow_repeats);
    let path = plan::write_suggestions(&suggestions, &range, &cfg.output)?;
    info!("suggested reservations saved to {}", path.display());
    Ok(())
}
