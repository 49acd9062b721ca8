use std::env;
use std::path::PathBuf;

pub const USAGE: &str = "\
usage: omakase_planner <mode> [args]

modes:
  ratings [pages] [min_rating]
      Scrape the rating-sorted listing pages and write a ratings CSV.
      Defaults: 5 pages, minimum rating 3.5. Output: RATINGS_OUT or
      restaurant_ratings.csv.
  availability <ratings.csv> <year-month>
      Resolve each rated restaurant on the reservation platform and poll
      its calendar for the given YYYY-MM month. Requires OMAKASE_TOKEN;
      reads the session cookie from OMAKASE_COOKIE_FILE (cookie.txt).
      OMAKASE_GUESTS optionally filters by party size. Output:
      AVAILABILITY_OUT or restaurant_availability.csv.
  suggest <file,file,...> <start mm/dd/yyyy> <end mm/dd/yyyy> [yes|no]
      Merge availability CSVs and suggest one lunch and one dinner per
      trip day. The trailing flag allows repeat restaurants (default no).
      Output: SUGGESTIONS_OUT or suggested_reservations.csv.";

#[derive(Debug, PartialEq)]
pub enum Command {
    Ratings(RatingsConfig),
    Availability(AvailabilityConfig),
    Suggest(SuggestConfig),
}

#[derive(Debug, PartialEq)]
pub struct RatingsConfig {
    pub pages: u32,
    pub min_rating: f64,
    pub output: PathBuf,
}

#[derive(Debug, PartialEq)]
pub struct AvailabilityConfig {
    pub ratings_csv: PathBuf,
    pub year_month: String,
    pub token: String,
    pub cookie_file: PathBuf,
    pub guests: Option<u32>,
    pub output: PathBuf,
}

#[derive(Debug, PartialEq)]
pub struct SuggestConfig {
    pub inputs: Vec<PathBuf>,
    pub start: String,
    pub end: String,
    pub allow_repeats: bool,
    pub output: PathBuf,
}

/// Builds the run command from CLI words, with environment variables
/// filling the gaps. Returns a message suitable for printing next to
/// [`USAGE`] when the invocation doesn't add up.
pub fn from_args<I: Iterator<Item = String>>(mut args: I) -> Result<Command, String> {
    let mode = args.next().ok_or_else(|| "missing mode".to_string())?;
    match mode.as_str() {
        "ratings" => {
            let pages = positional_or_env(args.next(), "TABELOG_PAGES")
                .map_or(Ok(5), |raw| {
                    raw.parse()
                        .map_err(|_| format!("page count {raw:?} is not a number"))
                })?;
            let min_rating = positional_or_env(args.next(), "TABELOG_MIN_RATING")
                .map_or(Ok(3.5), |raw| {
                    raw.parse()
                        .map_err(|_| format!("minimum rating {raw:?} is not a number"))
                })?;
            Ok(Command::Ratings(RatingsConfig {
                pages,
                min_rating,
                output: env_path("RATINGS_OUT", "restaurant_ratings.csv"),
            }))
        }
        "availability" => {
            let ratings_csv = args
                .next()
                .map(PathBuf::from)
                .ok_or_else(|| "availability needs a ratings CSV".to_string())?;
            let year_month = args
                .next()
                .ok_or_else(|| "availability needs a YYYY-MM month".to_string())?;
            let token = env::var("OMAKASE_TOKEN")
                .map_err(|_| "OMAKASE_TOKEN must hold the reservation calendar token".to_string())?;
            let guests = match env::var("OMAKASE_GUESTS") {
                Ok(raw) => Some(
                    raw.parse()
                        .map_err(|_| format!("OMAKASE_GUESTS {raw:?} is not a number"))?,
                ),
                Err(_) => None,
            };
            Ok(Command::Availability(AvailabilityConfig {
                ratings_csv,
                year_month,
                token,
                cookie_file: env_path("OMAKASE_COOKIE_FILE", "cookie.txt"),
                guests,
                output: env_path("AVAILABILITY_OUT", "restaurant_availability.csv"),
            }))
        }
        "suggest" => {
            let inputs: Vec<PathBuf> = args
                .next()
                .ok_or_else(|| "suggest needs a comma-separated list of availability CSVs".to_string())?
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(PathBuf::from)
                .collect();
            if inputs.is_empty() {
                return Err("suggest needs at least one availability CSV".to_string());
            }
            let start = args
                .next()
                .ok_or_else(|| "suggest needs a start date".to_string())?;
            let end = args
                .next()
                .ok_or_else(|| "suggest needs an end date".to_string())?;
            let allow_repeats = args
                .next()
                .is_some_and(|raw| raw.trim().eq_ignore_ascii_case("yes"));
            Ok(Command::Suggest(SuggestConfig {
                inputs,
                start,
                end,
                allow_repeats,
                output: env_path("SUGGESTIONS_OUT", "suggested_reservations.csv"),
            }))
        }
        other => Err(format!("unknown mode {other:?}")),
    }
}

fn positional_or_env(positional: Option<String>, var: &str) -> Option<String> {
    positional.or_else(|| env::var(var).ok())
}

fn env_path(var: &str, default: &str) -> PathBuf {
    env::var(var).map_or_else(|_| PathBuf::from(default), PathBuf::from)
}
