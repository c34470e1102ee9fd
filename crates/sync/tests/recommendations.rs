//! Integration tests for the recommendation syncs.

mod common;

use assert_matches::assert_matches;
use serde_json::json;

use common::{provider_error, recommendation_page, FakeSource, FakeStore};
use reelsync_core::report::{ItemTally, SyncOutcome};
use reelsync_core::{Medium, SyncError};
use reelsync_sync::recommendations::{
    collect_recommendations, sync_recommendations, MOVIE_RECOMMENDATIONS, TV_RECOMMENDATIONS,
};

fn seed_films(store: &FakeStore, page: u32, ids: &[i64]) {
    store.seed(
        "films",
        ids.iter()
            .map(|id| json!({"id_film": id, "page_fetched_from": page}))
            .collect(),
    );
}

// ---------------------------------------------------------------------------
// Sub-page walking
// ---------------------------------------------------------------------------

#[tokio::test]
async fn all_sub_pages_are_collected() {
    let source = FakeSource::new();
    source.page("/movie/10/recommendations", 1, recommendation_page(1, &[1, 2], 3));
    source.page("/movie/10/recommendations", 2, recommendation_page(2, &[3, 4], 3));
    source.page("/movie/10/recommendations", 3, recommendation_page(3, &[5], 3));

    let ids = collect_recommendations(&source, Medium::Movie, 10).await.unwrap();

    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(source.requests().len(), 3);
}

#[tokio::test]
async fn failing_sub_page_keeps_what_was_collected() {
    let source = FakeSource::new();
    source.page("/movie/10/recommendations", 1, recommendation_page(1, &[1, 2], 3));
    source.page("/movie/10/recommendations", 2, json!({"results": "not a list"}));
    source.page("/movie/10/recommendations", 3, recommendation_page(3, &[5], 3));

    let ids = collect_recommendations(&source, Medium::Movie, 10).await.unwrap();

    assert_eq!(ids, vec![1, 2]);
    assert_eq!(source.requests().len(), 2);
}

#[tokio::test]
async fn empty_sub_page_stops_the_walk() {
    let source = FakeSource::new();
    source.page("/tv/5/recommendations", 1, recommendation_page(1, &[8], 4));

    let ids = collect_recommendations(&source, Medium::Tv, 5).await.unwrap();

    assert_eq!(ids, vec![8]);
    assert_eq!(
        source.requests(),
        vec!["/tv/5/recommendations?page=1", "/tv/5/recommendations?page=2"]
    );
}

#[tokio::test]
async fn failing_first_sub_page_is_an_error() {
    let source = FakeSource::new();
    source.failing_page("/movie/10/recommendations", 1, provider_error(503));

    let result = collect_recommendations(&source, Medium::Movie, 10).await;

    assert_matches!(result, Err(SyncError::UpstreamStatus { status: 503, .. }));
}

#[tokio::test]
async fn title_without_recommendations_yields_an_empty_list() {
    let source = FakeSource::new();

    let ids = collect_recommendations(&source, Medium::Tv, 5).await.unwrap();

    assert!(ids.is_empty());
    assert_eq!(source.requests(), vec!["/tv/5/recommendations?page=1"]);
}

// ---------------------------------------------------------------------------
// Run behaviour
// ---------------------------------------------------------------------------

#[tokio::test]
async fn records_are_written_for_the_next_base_page() {
    let source = FakeSource::new();
    let store = FakeStore::new();
    seed_films(&store, 1, &[10, 11]);
    seed_films(&store, 2, &[12]);
    source.page("/movie/10/recommendations", 1, recommendation_page(1, &[1, 2], 2));
    source.page("/movie/10/recommendations", 2, recommendation_page(2, &[3], 2));
    source.page("/movie/11/recommendations", 1, recommendation_page(1, &[4], 1));

    let outcome = sync_recommendations(&source, &store, &MOVIE_RECOMMENDATIONS).await;

    assert_eq!(
        outcome,
        SyncOutcome::Completed {
            page: Some(1),
            tally: ItemTally {
                created: 2,
                skipped: 0,
                failed: 0
            },
        }
    );
    let records = store.records("recommendation-films");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id_film"], 10);
    assert_eq!(records[0]["id_films_recommendations"], json!([1, 2, 3]));
    assert_eq!(records[0]["page_fetched_from_strapi_film"], 1);
    assert_eq!(records[1]["id_films_recommendations"], json!([4]));
}

#[tokio::test]
async fn cursor_moves_to_the_following_base_page() {
    let source = FakeSource::new();
    let store = FakeStore::new();
    seed_films(&store, 1, &[10]);
    seed_films(&store, 2, &[12]);
    store.seed(
        "recommendation-films",
        vec![json!({"id_film": 10, "id_films_recommendations": [1], "page_fetched_from_strapi_film": 1})],
    );
    source.page("/movie/12/recommendations", 1, recommendation_page(1, &[7], 1));

    let outcome = sync_recommendations(&source, &store, &MOVIE_RECOMMENDATIONS).await;

    assert_matches!(outcome, SyncOutcome::Completed { page: Some(2), tally } if tally.created == 1);
    assert_eq!(source.requests(), vec!["/movie/12/recommendations?page=1"]);
}

#[tokio::test]
async fn missing_base_page_is_exhaustion() {
    let source = FakeSource::new();
    let store = FakeStore::new();

    let outcome = sync_recommendations(&source, &store, &TV_RECOMMENDATIONS).await;

    assert_eq!(outcome, SyncOutcome::Exhausted { page: 1 });
    assert!(source.requests().is_empty());
}

#[tokio::test]
async fn existing_titles_are_skipped_and_empty_lists_are_stored() {
    let source = FakeSource::new();
    let store = FakeStore::new();
    store.seed(
        "tv-shows",
        vec![
            json!({"id_TvShow": 1, "page_fetched_from": 1}),
            json!({"id_TvShow": 2, "page_fetched_from": 1}),
            json!({"id_TvShow": 3, "page_fetched_from": 1}),
        ],
    );
    store.seed(
        "recommendation-tv-shows",
        vec![json!({"id_TvShow": 1, "id_TvShow_recommendations": [9], "page_fetched_from_strapi_TvShow": 0})],
    );
    // Show 2 has no recommendations at all.
    source.page("/tv/3/recommendations", 1, recommendation_page(1, &[30, 31], 1));

    let outcome = sync_recommendations(&source, &store, &TV_RECOMMENDATIONS).await;

    assert_eq!(
        outcome,
        SyncOutcome::Completed {
            page: Some(1),
            tally: ItemTally {
                created: 2,
                skipped: 1,
                failed: 0
            },
        }
    );
    assert!(!source
        .requests()
        .iter()
        .any(|r| r.starts_with("/tv/1/")));
    let records = store.records("recommendation-tv-shows");
    assert_eq!(records.len(), 3);
    assert_eq!(records[1]["id_TvShow"], 2);
    assert_eq!(records[1]["id_TvShow_recommendations"], json!([]));
    assert_eq!(records[1]["page_fetched_from_strapi_TvShow"], 1);
    assert_eq!(records[2]["id_TvShow"], 3);
    assert_eq!(records[2]["id_TvShow_recommendations"], json!([30, 31]));
}

#[tokio::test]
async fn page_without_any_recommendations_still_advances_the_cursor() {
    let source = FakeSource::new();
    let store = FakeStore::new();
    seed_films(&store, 1, &[10, 11]);
    seed_films(&store, 2, &[12]);
    source.page("/movie/12/recommendations", 1, recommendation_page(1, &[7], 1));

    let first = sync_recommendations(&source, &store, &MOVIE_RECOMMENDATIONS).await;
    let second = sync_recommendations(&source, &store, &MOVIE_RECOMMENDATIONS).await;

    assert_matches!(first, SyncOutcome::Completed { page: Some(1), tally } if tally.created == 2);
    assert_matches!(second, SyncOutcome::Completed { page: Some(2), tally } if tally.created == 1);
    let records = store.records("recommendation-films");
    assert_eq!(records.len(), 3);
    assert_eq!(records[2]["id_films_recommendations"], json!([7]));
}

#[tokio::test]
async fn first_sub_page_failure_fails_that_title_only() {
    let source = FakeSource::new();
    let store = FakeStore::new();
    seed_films(&store, 1, &[10, 11]);
    source.failing_page("/movie/10/recommendations", 1, provider_error(500));
    source.page("/movie/11/recommendations", 1, recommendation_page(1, &[4], 1));

    let outcome = sync_recommendations(&source, &store, &MOVIE_RECOMMENDATIONS).await;

    assert_matches!(
        outcome,
        SyncOutcome::Completed { tally, .. } if tally == ItemTally { created: 1, skipped: 0, failed: 1 }
    );
    let records = store.records("recommendation-films");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id_film"], 11);
}

#[tokio::test]
async fn failed_write_is_counted_and_the_loop_continues() {
    let source = FakeSource::new();
    let store = FakeStore::new();
    seed_films(&store, 1, &[10, 11]);
    store.fail_create("id_film", 10);
    source.page("/movie/10/recommendations", 1, recommendation_page(1, &[1], 1));
    source.page("/movie/11/recommendations", 1, recommendation_page(1, &[2], 1));

    let outcome = sync_recommendations(&source, &store, &MOVIE_RECOMMENDATIONS).await;

    assert_matches!(
        outcome,
        SyncOutcome::Completed { tally, .. } if tally == ItemTally { created: 1, skipped: 0, failed: 1 }
    );
}
