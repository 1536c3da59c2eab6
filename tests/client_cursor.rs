mod common;

use std::sync::Arc;
use axum::Router;
use tokio::net::TcpListener;
use url::Url;
use xpboard::client::{HttpUsersFetcher, LeaderboardCursor};
use xpboard::model::{SortField, SortOrder};
use common::{app, app_with_store, ladder, BrokenStore};

async fn serve(app: Router) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{address}/")).unwrap()
}

fn cursor(base_url: Url, page_size: u64) -> LeaderboardCursor<HttpUsersFetcher> {
    LeaderboardCursor::new(HttpUsersFetcher::builder().base_url(base_url).build(), page_size)
}

#[tokio::test]
async fn pages_through_the_whole_leaderboard() {
    let cursor = cursor(serve(app(ladder()).await).await, 4);
    cursor.refresh().await;
    cursor.load_more().await;
    cursor.load_more().await;
    cursor.load_more().await;

    let snapshot = cursor.snapshot().await;
    let ids: Vec<&str> = snapshot.users.iter().map(|user| user.id.as_str()).collect();
    assert_eq!(ids, vec!["u00", "u01", "u02", "u03", "u04", "u05", "u06", "u07", "u08", "u09"]);
    assert!(!snapshot.has_more);
    assert_eq!(snapshot.error, None);
}

#[tokio::test]
async fn search_and_sort_replace_the_list() {
    let cursor = cursor(serve(app(ladder()).await).await, 2);
    cursor.refresh().await;
    cursor.load_more().await;
    assert_eq!(cursor.snapshot().await.users.len(), 4);

    cursor.update_search("ali").await;
    let snapshot = cursor.snapshot().await;
    let ranks: Vec<(&str, u64)> = snapshot.users.iter().map(|user| (user.name.as_str(), user.global_rank)).collect();
    assert_eq!(ranks, vec![("Alice", 2), ("Malia", 4)]);
    assert!(snapshot.has_more);

    cursor.update_sort(SortField::Name, SortOrder::Ascending).await;
    let snapshot = cursor.snapshot().await;
    let names: Vec<&str> = snapshot.users.iter().map(|user| user.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Alina"]);
    assert_eq!(snapshot.search, "ali");
    assert_eq!(snapshot.sort_field, SortField::Name);
}

#[tokio::test]
async fn server_errors_surface_without_clearing() {
    let cursor = cursor(serve(app_with_store(Arc::new(BrokenStore)).await).await, 5);
    cursor.refresh().await;

    let snapshot = cursor.snapshot().await;
    assert!(snapshot.users.is_empty());
    assert_eq!(snapshot.error.as_deref(), Some("Failed to fetch users"));
    assert!(!snapshot.loading);
}
