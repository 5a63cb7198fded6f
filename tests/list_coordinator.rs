//! Debounce, dispatch and stale-response behaviour of the list coordinator.

#![allow(clippy::unwrap_used)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use gamedeck::app::{FilterField, FilterState, GameBrowser, LoadStatus};
use tokio::time::sleep;

use common::{ListReply, MockCatalog};

fn browser() -> (MockCatalog, GameBrowser<MockCatalog>) {
    let mock = MockCatalog::new();
    let b = GameBrowser::new(Arc::new(mock.clone()));
    (mock, b)
}

fn shown_name(b: &GameBrowser<MockCatalog>) -> Option<String> {
    b.list().games.first().map(|g| g.name.clone())
}

#[tokio::test(start_paused = true)]
async fn typing_burst_dispatches_once_with_last_text() {
    let (mock, mut b) = browser();

    b.set_filter(FilterField::Search, "zelda");
    sleep(Duration::from_millis(150)).await;
    b.set_filter(FilterField::Search, "zeld");
    assert!(b.search_pending());
    assert_eq!(b.list().status, LoadStatus::Idle);

    b.run_for(Duration::from_millis(600)).await;

    let calls = mock.list_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].search.as_deref(), Some("zeld"));
    assert_eq!(b.list().status, LoadStatus::Loaded);
    assert_eq!(shown_name(&b).as_deref(), Some("zeld"));

    // Nothing else is queued behind it.
    b.run_for(Duration::from_secs(5)).await;
    assert_eq!(mock.list_calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn long_burst_keeps_postponing_the_fetch() {
    let (mock, mut b) = browser();

    for text in ["h", "ha", "hal", "halo"] {
        b.set_filter(FilterField::Search, text);
        b.run_for(Duration::from_millis(400)).await;
        assert!(mock.list_calls().is_empty(), "fetched early at `{text}`");
    }

    b.run_for(Duration::from_millis(200)).await;
    let calls = mock.list_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].search.as_deref(), Some("halo"));
}

#[tokio::test(start_paused = true)]
async fn facet_change_cancels_pending_search_and_fires_now() {
    let (mock, mut b) = browser();

    b.set_filter(FilterField::Search, "mario");
    assert!(b.search_pending());

    b.set_filter(FilterField::Platforms, "4");
    assert!(!b.search_pending());
    assert_eq!(b.list().latest_seq, 1);
    assert!(b.list().is_loading());

    b.run_for(Duration::from_secs(2)).await;

    let calls = mock.list_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].platforms.as_deref(), Some("4"));
    assert_eq!(calls[0].search.as_deref(), Some("mario"));
    assert_eq!(b.list().status, LoadStatus::Loaded);
}

#[tokio::test(start_paused = true)]
async fn enter_fires_immediately_without_a_late_duplicate() {
    let (mock, mut b) = browser();

    b.set_filter(FilterField::Search, "zelda");
    sleep(Duration::from_millis(100)).await;
    b.search_now();
    assert!(!b.search_pending());

    b.run_for(Duration::from_secs(2)).await;

    let calls = mock.list_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].search.as_deref(), Some("zelda"));
    assert_eq!(b.list().latest_seq, 1);
}

#[tokio::test(start_paused = true)]
async fn clearing_search_fetches_immediately() {
    let (mock, mut b) = browser();

    b.set_filter(FilterField::Search, "doom");
    b.set_filter(FilterField::Search, "");
    assert!(!b.search_pending());
    assert!(b.list().is_loading());

    b.run_for(Duration::from_secs(2)).await;

    let calls = mock.list_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].search, None);
    assert_eq!(shown_name(&b).as_deref(), Some("*"));
}

#[tokio::test(start_paused = true)]
async fn every_facet_change_evaluates_exactly_once() {
    let (mock, mut b) = browser();

    b.set_filter(FilterField::Genres, "4");
    b.set_filter(FilterField::Tags, "31");
    b.set_filter(FilterField::Dates, "2020-01-01,2020-12-31");
    assert_eq!(b.list().latest_seq, 3);

    b.run_for(Duration::from_secs(1)).await;

    let calls = mock.list_calls();
    assert_eq!(calls.len(), 3);
    let last = &calls[2];
    assert_eq!(last.genres.as_deref(), Some("4"));
    assert_eq!(last.tags.as_deref(), Some("31"));
    assert_eq!(last.dates.as_deref(), Some("2020-01-01,2020-12-31"));
    assert_eq!(last.page, 1);
    assert_eq!(last.page_size, 20);
    assert_eq!(last.ordering, "-metacritic");
    assert_eq!(last.metacritic, "75,100");
}

#[tokio::test(start_paused = true)]
async fn late_older_response_never_overwrites_newer() {
    let (mock, mut b) = browser();
    mock.script_list([
        ListReply::Echo(Duration::from_millis(300)),
        ListReply::Echo(Duration::from_millis(50)),
    ]);

    b.set_filter(FilterField::Search, "old");
    b.search_now();
    b.set_filter(FilterField::Search, "new");
    b.search_now();

    b.run_for(Duration::from_millis(100)).await;
    assert_eq!(shown_name(&b).as_deref(), Some("new"));

    b.run_for(Duration::from_secs(1)).await;
    assert_eq!(b.list().latest_seq, 2);
    assert_eq!(b.list().status, LoadStatus::Loaded);
    assert_eq!(shown_name(&b).as_deref(), Some("new"));
}

#[tokio::test(start_paused = true)]
async fn early_older_response_is_ignored_while_newer_is_in_flight() {
    let (mock, mut b) = browser();
    mock.script_list([
        ListReply::Echo(Duration::from_millis(50)),
        ListReply::Echo(Duration::from_millis(300)),
    ]);

    b.set_filter(FilterField::Search, "old");
    b.search_now();
    b.set_filter(FilterField::Search, "new");
    b.search_now();

    b.run_for(Duration::from_millis(100)).await;
    assert!(b.list().is_loading());
    assert!(b.list().games.is_empty());

    b.run_for(Duration::from_secs(1)).await;
    assert_eq!(shown_name(&b).as_deref(), Some("new"));
}

#[tokio::test(start_paused = true)]
async fn stale_failure_is_not_an_error() {
    let (mock, mut b) = browser();
    mock.script_list([
        ListReply::Fail(Duration::from_millis(300)),
        ListReply::Echo(Duration::from_millis(10)),
    ]);

    b.set_filter(FilterField::Platforms, "4");
    b.set_filter(FilterField::Platforms, "187");
    b.run_for(Duration::from_secs(1)).await;

    assert_eq!(b.list().status, LoadStatus::Loaded);
    assert_eq!(b.list().error, None);
}

#[tokio::test(start_paused = true)]
async fn failure_clears_list_and_next_success_clears_error() {
    let (mock, mut b) = browser();
    mock.script_list([
        ListReply::Echo(Duration::ZERO),
        ListReply::Fail(Duration::ZERO),
    ]);

    b.search_now();
    b.run_for(Duration::from_millis(10)).await;
    assert_eq!(b.list().games.len(), 1);

    b.set_filter(FilterField::Genres, "5");
    b.run_for(Duration::from_millis(10)).await;
    assert_eq!(b.list().status, LoadStatus::Failed);
    assert!(b.list().games.is_empty());
    assert_eq!(
        b.list().error.as_deref(),
        Some("Failed to fetch games. Please try again later.")
    );

    b.set_filter(FilterField::Genres, "");
    b.run_for(Duration::from_millis(10)).await;
    assert_eq!(b.list().status, LoadStatus::Loaded);
    assert_eq!(b.list().error, None);
}

#[tokio::test(start_paused = true)]
async fn identical_filters_dispatch_independent_requests() {
    let (mock, mut b) = browser();

    b.search_now();
    b.search_now();
    b.run_for(Duration::from_secs(1)).await;

    let calls = mock.list_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
    assert_eq!(b.list().latest_seq, 2);
}

#[tokio::test(start_paused = true)]
async fn start_fetches_the_unfiltered_first_page() {
    let (mock, mut b) = browser();

    b.start();
    b.run_until(Duration::from_secs(1), |b| {
        !b.list().is_loading() && b.facets().status != LoadStatus::Loading
    })
    .await;

    let calls = mock.list_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].search, None);
    assert_eq!(calls[0].platforms, None);
    assert_eq!(b.list().status, LoadStatus::Loaded);
    assert_eq!(b.facets().status, LoadStatus::Loaded);
}

#[tokio::test(start_paused = true)]
async fn prepared_filters_start_with_a_single_fetch() {
    let (mock, mut b) = browser();
    let filters = FilterState::default()
        .with(FilterField::Platforms, "4")
        .with(FilterField::Genres, "5")
        .with(FilterField::Search, "zelda");

    b.start_with(filters.clone());
    assert!(!b.search_pending());
    assert_eq!(b.filters(), &filters);
    b.run_for(Duration::from_secs(2)).await;

    let calls = mock.list_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].platforms.as_deref(), Some("4"));
    assert_eq!(calls[0].genres.as_deref(), Some("5"));
    assert_eq!(calls[0].search.as_deref(), Some("zelda"));
    assert_eq!(b.list().latest_seq, 1);
    assert_eq!(shown_name(&b).as_deref(), Some("zelda"));
}

#[tokio::test(start_paused = true)]
async fn frame_loop_polling_drains_settled_work() {
    let (mock, mut b) = browser();
    mock.script_list([ListReply::Echo(Duration::from_millis(100))]);

    b.start();
    assert_eq!(b.poll_events(), 0);

    // Facets settle at once; the list reply is still in flight.
    sleep(Duration::from_millis(16)).await;
    assert_eq!(b.poll_events(), 1);
    assert_eq!(b.facets().status, LoadStatus::Loaded);
    assert!(b.list().is_loading());

    sleep(Duration::from_millis(100)).await;
    assert_eq!(b.poll_events(), 1);
    assert_eq!(b.list().status, LoadStatus::Loaded);
    assert_eq!(b.poll_events(), 0);
}
