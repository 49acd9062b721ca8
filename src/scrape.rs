use log::{info, warn};
use reqwest::Client;
use scraper::Html;

use crate::error::Result;
use crate::fetch;
use crate::parse::{self, RestaurantListing, RestaurantMatch};
use crate::plan::RestaurantRecord;

/// Walks the listing site's rating-sorted pages and keeps every
/// restaurant at or above `min_rating`. A page that fails to fetch or
/// parse is skipped; rankings barely move between pages, so a partial
/// sweep is still useful.
pub async fn scrape_ratings(
    client: &Client,
    pages: u32,
    min_rating: f64,
) -> Result<Vec<RestaurantListing>> {
    let mut listings = Vec::new();
    for page in 1..=pages {
        let body = match fetch::listing_page(client, page).await {
            Ok(body) => body,
            Err(e) => {
                warn!("failed to fetch listing page {page}: {e}");
                continue;
            }
        };
        let page_listings = match parse::restaurants_from_listing(&Html::parse_document(&body)) {
            Ok(page_listings) => page_listings,
            Err(e) => {
                warn!("failed to parse listing page {page}: {e}");
                continue;
            }
        };
        listings.extend(
            page_listings
                .into_iter()
                .filter(|listing| listing.rating.is_some_and(|rating| rating >= min_rating)),
        );
    }
    Ok(listings)
}

/// Everything an availability sweep needs besides the restaurant list.
pub struct AvailabilityQuery {
    pub year_month: String,
    pub token: String,
    pub cookie_header: String,
    pub guests: Option<u32>,
}

/// Collects availability for every listed restaurant, one record each.
/// Restaurants that can't be resolved or fetched degrade to a record
/// with no slots; the batch always completes.
pub async fn collect_availability(
    client: &Client,
    listings: &[RestaurantListing],
    query: &AvailabilityQuery,
) -> Vec<RestaurantRecord> {
    let mut records = Vec::with_capacity(listings.len());
    for listing in listings {
        info!(
            "checking availability for {} in {}",
            listing.name, query.year_month
        );
        records.push(restaurant_availability(client, listing, query).await);
    }
    records
}

async fn restaurant_availability(
    client: &Client,
    listing: &RestaurantListing,
    query: &AvailabilityQuery,
) -> RestaurantRecord {
    let mut record = RestaurantRecord {
        name: listing.name.clone(),
        score: listing.rating,
        detail_url: None,
        slots: Vec::new(),
    };

    let found = match resolve_restaurant(client, &listing.name, &query.cookie_header).await {
        Ok(Some(found)) => found,
        Ok(None) => {
            info!("no matching restaurant found for {}", listing.name);
            return record;
        }
        Err(e) => {
            warn!("search failed for {}: {e}", listing.name);
            return record;
        }
    };
    record.detail_url = Some(found.detail_url.to_string());

    let dates = match month_dates(client, &found.slug, query).await {
        Ok(dates) => dates,
        Err(e) => {
            warn!("availability probe failed for {}: {e}", listing.name);
            return record;
        }
    };

    // fetch every day's detail; the rate limiter paces the burst
    let slug = found.slug.as_str();
    let details = futures::future::join_all(dates.iter().map(|&date| async move {
        let body =
            fetch::availability_detail(client, slug, date, &query.token, &query.cookie_header)
                .await?;
        Ok::<_, crate::error::Error>((date, body))
    }))
    .await;

    for detail in details {
        let (date, body) = match detail {
            Ok(detail) => detail,
            Err(e) => {
                warn!("detail fetch failed for {}: {e}", listing.name);
                continue;
            }
        };
        match fetch::slots_from_detail_json(&body, date, query.guests) {
            Ok(slots) => record.slots.extend(slots),
            Err(e) => warn!("unexpected detail payload for {} on {date}: {e}", listing.name),
        }
    }
    record
}

async fn resolve_restaurant(
    client: &Client,
    name: &str,
    cookie_header: &str,
) -> Result<Option<RestaurantMatch>> {
    let body = fetch::search_page(client, name, cookie_header).await?;
    let found = parse::find_restaurant(&Html::parse_document(&body), name)?;
    if let Some(found) = &found {
        info!("found detail page for {name}: {}", found.detail_url);
    }
    Ok(found)
}

async fn month_dates(
    client: &Client,
    slug: &str,
    query: &AvailabilityQuery,
) -> Result<Vec<chrono::NaiveDate>> {
    let body = fetch::availability_dates(
        client,
        slug,
        &query.year_month,
        &query.token,
        &query.cookie_header,
    )
    .await?;
    Ok(fetch::available_dates_from_json(&body)?)
}
