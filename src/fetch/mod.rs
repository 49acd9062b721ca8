use std::{num::NonZeroU32, sync::OnceLock, time::Duration};

use governor::{
    clock::{QuantaClock, QuantaInstant},
    middleware::NoOpMiddleware,
    state::InMemoryState,
};
use reqwest::{Client, Error as RequestError};
use tracing::{instrument, Level};
use url::Url;

mod availability;
pub use availability::{available_dates_from_json, slots_from_detail_json};

static LISTING_BASE: &str = "https://tabelog.com/en/tokyo/rstLst/";
static RESERVATION_BASE: &str = "https://omakase.in";
static ACCEPT: &str = "application/json, text/plain, */*";

// both sites sit behind bot protection that rejects the default client UA
static USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36";

pub fn make_client() -> reqwest::Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .gzip(true)
        .build()
        .expect("client creation should succeed")
}

static RATE_LIMIT: u32 = 1;
static DELAY_JITTER: u64 = 2;
static RATE_LIMITER: OnceLock<
    governor::RateLimiter<
        governor::state::NotKeyed,
        InMemoryState,
        QuantaClock,
        NoOpMiddleware<QuantaInstant>,
    >,
> = OnceLock::new();

/// Paces every outbound request. One request a second with up to
/// [`DELAY_JITTER`] seconds of jitter keeps the scrape looking like a
/// person paging through results.
async fn throttle() {
    let rate_limiter = RATE_LIMITER.get_or_init(|| {
        governor::RateLimiter::direct(governor::Quota::per_second(
            NonZeroU32::new(RATE_LIMIT).unwrap(),
        ))
    });
    let jitter = governor::Jitter::new(Duration::ZERO, Duration::from_secs(DELAY_JITTER));
    rate_limiter.until_ready_with_jitter(jitter).await;
}

/// One page of the listing site's rating-sorted results.
#[instrument(skip(client), level = Level::DEBUG)]
pub async fn listing_page(client: &Client, page: u32) -> Result<String, RequestError> {
    throttle().await;
    let url = format!("{LISTING_BASE}{page}/?SrtT=rt");
    let response = client.get(url).send().await?.error_for_status()?;
    response.text().await
}

/// Reservation-platform keyword search, scoped by nothing but the name.
#[instrument(skip(client, cookie_header), level = Level::DEBUG)]
pub async fn search_page(
    client: &Client,
    name: &str,
    cookie_header: &str,
) -> Result<String, RequestError> {
    throttle().await;
    let mut url = Url::parse(RESERVATION_BASE).expect("base url should be valid");
    url.set_path("/en/r");
    url.query_pairs_mut()
        .append_pair("area", "")
        .append_pair("cuisine", "")
        .append_pair("search_keywords", name)
        .append_pair("commit", "Search");
    let response = client
        .get(url)
        .header("Cookie", cookie_header)
        .send()
        .await?
        .error_for_status()?;
    response.text().await
}

/// Month-level availability probe for one restaurant slug. Returns the raw
/// JSON body; [`available_dates_from_json`] interprets it.
#[instrument(skip(client, token, cookie_header), level = Level::DEBUG)]
pub async fn availability_dates(
    client: &Client,
    slug: &str,
    year_month: &str,
    token: &str,
    cookie_header: &str,
) -> Result<String, RequestError> {
    throttle().await;
    let mut url = Url::parse(RESERVATION_BASE).expect("base url should be valid");
    url.set_path("/users/api/availability_dates");
    url.query_pairs_mut()
        .append_pair("restaurant_slug", slug)
        .append_pair("year_month", year_month)
        .append_pair("reservation_calendar_token", token);
    let response = client
        .get(url)
        .header("Cookie", cookie_header)
        .header("Accept", ACCEPT)
        .send()
        .await?
        .error_for_status()?;
    response.text().await
}

/// Day-level availability detail: the stock groups bookable on `date`,
/// grouped by service. Raw JSON body; see [`slots_from_detail_json`].
#[instrument(skip(client, token, cookie_header), fields(date = %date), level = Level::DEBUG)]
pub async fn availability_detail(
    client: &Client,
    slug: &str,
    date: chrono::NaiveDate,
    token: &str,
    cookie_header: &str,
) -> Result<String, RequestError> {
    throttle().await;
    let mut url = Url::parse(RESERVATION_BASE).expect("base url should be valid");
    url.set_path(&format!("/users/api/availability_dates/{slug}"));
    url.query_pairs_mut()
        .append_pair("date", &date.format("%Y-%m-%d").to_string())
        .append_pair("reservation_calendar_token", token);
    let response = client
        .get(url)
        .header("Cookie", cookie_header)
        .header("Accept", ACCEPT)
        .send()
        .await?
        .error_for_status()?;
    response.text().await
}
