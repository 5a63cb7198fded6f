// src/main.rs
use std::env;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use gamedeck::app::utils::{current_year, parse_date_range, year_options, YEAR_OPTION_COUNT};
use gamedeck::app::{FilterField, FilterState, GameBrowser, LoadStatus};
use gamedeck::catalog::RawgClient;
use gamedeck::config::load_config;

const SETTLE_LIMIT: Duration = Duration::from_secs(30);

// Exit codes: 0 list shown, 2 list fetch failed, 3 gave up waiting.
const EXIT_LIST_FAILED: i32 = 2;
const EXIT_TIMED_OUT: i32 = 3;

/// `field=value` pairs plus an optional `detail=<id>`; bare words become the search.
struct Args {
    filters: Vec<(FilterField, String)>,
    detail: Option<u64>,
}

fn parse_args(raw: impl Iterator<Item = String>) -> Args {
    let mut filters = Vec::new();
    let mut words: Vec<String> = Vec::new();
    let mut detail = None;

    for arg in raw {
        let Some((k, v)) = arg.split_once('=') else {
            words.push(arg);
            continue;
        };
        if k == "detail" {
            match v.trim().parse::<u64>() {
                Ok(id) => detail = Some(id),
                Err(_) => warn!("ignoring detail={v}: not a game id"),
            }
            continue;
        }
        match FilterField::from_str(k) {
            Some(FilterField::Dates) => filters.push((FilterField::Dates, normalize_dates(v))),
            Some(field) => filters.push((field, v.to_string())),
            None => warn!("unknown filter `{k}`; known: search, platforms, genres, tags, developers, dates"),
        }
    }
    if !words.is_empty() {
        filters.push((FilterField::Search, words.join(" ")));
    }
    Args { filters, detail }
}

impl Args {
    /// Fold every filter argument into one snapshot so the session fetches once.
    fn initial_filters(&self) -> FilterState {
        self.filters
            .iter()
            .fold(FilterState::default(), |state, (field, value)| {
                state.with(*field, value.as_str())
            })
    }
}

/// Accept a year from the year selector as shorthand for its full-year range.
fn normalize_dates(v: &str) -> String {
    let v = v.trim();
    if v.len() == 4 && v.bytes().all(|b| b.is_ascii_digit()) {
        let options = year_options(current_year(), YEAR_OPTION_COUNT);
        if let Some(opt) = options.iter().find(|o| o.label == v) {
            return opt.value.clone();
        }
        let oldest = options.last().map_or("", |o| o.label.as_str());
        warn!(
            "year {v} is outside the selectable range {oldest}-{}; sending as-is",
            current_year()
        );
        return v.to_string();
    }
    if !v.is_empty() && parse_date_range(v).is_none() {
        warn!("dates `{v}` is not YYYY-MM-DD,YYYY-MM-DD; sending as-is");
    }
    v.to_string()
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let cfg = load_config();
    let client = match RawgClient::from_config(&cfg) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("failed to build catalog client: {e}");
            std::process::exit(1);
        }
    };
    let args = parse_args(env::args().skip(1));

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("failed to start runtime: {e}");
            std::process::exit(1);
        }
    };

    let code = rt.block_on(async move {
        let mut browser = GameBrowser::with_policy(client, cfg.facet_failure);
        browser.start_with(args.initial_filters());
        if let Some(id) = args.detail {
            browser.select_game(id);
        }

        let settled = browser
            .run_until(SETTLE_LIMIT, |b| {
                !b.list().is_loading()
                    && b.facets().status != LoadStatus::Loading
                    && b.detail().status != LoadStatus::Loading
            })
            .await;
        if !settled {
            warn!("gave up waiting for the catalog after {SETTLE_LIMIT:?}");
        }
        print_session(&browser);
        exit_code(settled, browser.list().status)
    });

    if code != 0 {
        std::process::exit(code);
    }
}

fn exit_code(settled: bool, list: LoadStatus) -> i32 {
    match (settled, list) {
        (_, LoadStatus::Loaded) => 0,
        (_, LoadStatus::Failed) => EXIT_LIST_FAILED,
        (false, _) => EXIT_TIMED_OUT,
        (true, _) => EXIT_LIST_FAILED,
    }
}

fn print_session<C: gamedeck::catalog::CatalogApi>(browser: &GameBrowser<C>) {
    let facets = browser.facets();
    match &facets.error {
        Some(msg) => println!("Filters: {msg}"),
        None => info!(
            "{} platforms / {} genres / {} tags / {} developers available",
            facets.vocab.platforms.len(),
            facets.vocab.genres.len(),
            facets.vocab.tags.len(),
            facets.vocab.developers.len()
        ),
    }

    let list = browser.list();
    if let Some(msg) = &list.error {
        println!("Error: {msg}");
    } else if list.games.is_empty() {
        println!("No games found with current filters");
    } else {
        for g in &list.games {
            let year = g
                .release_year()
                .map_or_else(|| "----".to_string(), |y| y.to_string());
            let score = g
                .metacritic_score
                .map_or_else(|| "N/A".to_string(), |s| s.to_string());
            println!("{:>8}  {year}  {score:>3}  {}", g.id, g.name);
        }
    }

    let detail = browser.detail();
    if let Some(msg) = &detail.error {
        println!("Error: {msg}");
    } else if let Some(d) = &detail.game {
        let r = &d.record;
        println!();
        println!("{} ({})", r.name, r.release_date.as_deref().unwrap_or("TBA"));
        println!("  Genres:     {}", r.genre_names());
        println!("  Platforms:  {}", r.platform_names());
        println!("  Developers: {}", r.developer_names());
        println!("  Publishers: {}", r.publisher_names());
        println!(
            "  Metacritic: {}",
            r.metacritic.map_or_else(|| "N/A".to_string(), |m| m.to_string())
        );
        println!(
            "  ESRB:       {}",
            r.esrb_rating.as_ref().map_or("Not rated", |e| e.name.as_str())
        );
        for t in &d.trailers {
            println!("  Trailer {}: {}", t.id, t.video_url.as_deref().unwrap_or("n/a"));
        }
    }
}
