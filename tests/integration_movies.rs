//! Live-database tests for the movie store.
//!
//! Run with `cargo test -- --ignored` against `TEST_DATABASE_URL`.

mod common;

use chrono::Utc;

use reelbase::modules::movies::model::Movie;
use reelbase::modules::movies::service::MovieService;
use reelbase::utils::errors::ModelError;
use reelbase::utils::pagination::Filters;
use reelbase::utils::runtime::Runtime;

use common::setup_test_db;

fn movie(title: &str, year: i32, runtime: i32, genres: &[&str]) -> Movie {
    Movie {
        id: 0,
        created_at: chrono::DateTime::UNIX_EPOCH,
        title: title.to_string(),
        year,
        runtime: Runtime(runtime),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        version: 0,
    }
}

fn filters(page: i64, page_size: i64, sort: &str) -> Filters {
    Filters {
        page,
        page_size,
        sort: sort.to_string(),
        sort_safe_list: vec!["id", "title", "year", "runtime"],
    }
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL database"]
async fn test_insert_and_get_roundtrip() {
    let db = setup_test_db().await;

    let mut created = movie("Moonrise Kingdom", 2012, 94, &["comedy", "drama"]);
    MovieService::insert(&db, &mut created).await.unwrap();

    assert!(created.id > 0);
    assert_eq!(created.version, 1);
    assert!(created.created_at <= Utc::now());

    let fetched = MovieService::get(&db, created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL database"]
async fn test_get_rejects_non_positive_and_unknown_ids() {
    let db = setup_test_db().await;

    for id in [0, -1, i64::MAX] {
        let err = MovieService::get(&db, id).await.unwrap_err();
        assert!(matches!(err, ModelError::RecordNotFound), "id={id}");
    }
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL database"]
async fn test_update_with_stale_version_conflicts() {
    let db = setup_test_db().await;

    let mut created = movie("Stalker", 1979, 162, &["sci-fi"]);
    MovieService::insert(&db, &mut created).await.unwrap();

    let mut stale = created.clone();
    created.title = "Stalker (Restored)".to_string();
    MovieService::update(&db, &mut created).await.unwrap();
    assert_eq!(created.version, 2);

    stale.title = "Stalker (Director's Cut)".to_string();
    let err = MovieService::update(&db, &mut stale).await.unwrap_err();
    assert!(matches!(err, ModelError::EditConflict));
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL database"]
async fn test_delete_then_delete_again() {
    let db = setup_test_db().await;

    let mut created = movie("Throwaway", 2001, 90, &["drama"]);
    MovieService::insert(&db, &mut created).await.unwrap();

    MovieService::delete(&db, created.id).await.unwrap();

    let err = MovieService::delete(&db, created.id).await.unwrap_err();
    assert!(matches!(err, ModelError::RecordNotFound));
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL database"]
async fn test_list_filters_by_genre_containment() {
    let db = setup_test_db().await;

    let marker = uuid::Uuid::new_v4().simple().to_string();
    let mut with_genre = movie("Genre Match", 2010, 100, &[&marker, "drama"]);
    let mut without_genre = movie("Genre Miss", 2011, 100, &["drama"]);
    MovieService::insert(&db, &mut with_genre).await.unwrap();
    MovieService::insert(&db, &mut without_genre).await.unwrap();

    let (movies, metadata) =
        MovieService::list(&db, "", &[marker.clone()], &filters(1, 20, "id"))
            .await
            .unwrap();

    assert_eq!(metadata.total_records, 1);
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].id, with_genre.id);
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL database"]
async fn test_list_sorts_descending_and_paginates() {
    let db = setup_test_db().await;

    let marker = uuid::Uuid::new_v4().simple().to_string();
    for (title, year) in [("Older", 1970), ("Newer", 1990), ("Newest", 2010)] {
        let mut m = movie(title, year, 100, &[&marker]);
        MovieService::insert(&db, &mut m).await.unwrap();
    }

    let (movies, metadata) =
        MovieService::list(&db, "", &[marker.clone()], &filters(1, 2, "-year"))
            .await
            .unwrap();

    assert_eq!(metadata.total_records, 3);
    assert_eq!(metadata.last_page, 2);
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].year, 2010);
    assert_eq!(movies[1].year, 1990);

    let (second_page, _) = MovieService::list(&db, "", &[marker], &filters(2, 2, "-year"))
        .await
        .unwrap();
    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].year, 1970);
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL database"]
async fn test_list_full_text_title_filter() {
    let db = setup_test_db().await;

    let marker = uuid::Uuid::new_v4().simple().to_string();
    let needle = format!("Unrepeatable {marker} Epic");
    let mut target = movie(&needle, 2005, 150, &["drama"]);
    MovieService::insert(&db, &mut target).await.unwrap();

    let (movies, _) = MovieService::list(&db, &marker, &[], &filters(1, 20, "id"))
        .await
        .unwrap();

    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].id, target.id);
}

#[tokio::test]
#[ignore = "requires a live PostgreSQL database"]
async fn test_list_empty_result_has_empty_metadata() {
    let db = setup_test_db().await;

    let marker = uuid::Uuid::new_v4().simple().to_string();
    let (movies, metadata) = MovieService::list(&db, &marker, &[], &filters(1, 20, "id"))
        .await
        .unwrap();

    assert!(movies.is_empty());
    assert_eq!(metadata, Default::default());
}
