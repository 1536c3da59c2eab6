use tokio::sync::Mutex;
use crate::client::{CursorState, FetchRequest, UsersFetcher};
use crate::model::{SortField, SortOrder, UserRecord};

/// What a UI needs to render the leaderboard at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorSnapshot {
    pub users: Vec<UserRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub has_more: bool,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub search: String,
}

/// Drives a [`CursorState`] against a [`UsersFetcher`]. All methods take `&self`, so one cursor
/// can be shared between the scroll trigger and the sort/search controls.
pub struct LeaderboardCursor<F> {
    state: Mutex<CursorState>,
    fetcher: F,
}

impl<F: UsersFetcher> LeaderboardCursor<F> {

    pub fn new(fetcher: F, page_size: u64) -> Self {
        LeaderboardCursor { state: Mutex::new(CursorState::new(page_size)), fetcher }
    }

    pub async fn refresh(&self) {
        let request = self.state.lock().await.refresh();
        self.run(request).await;
    }

    pub async fn load_more(&self) {
        let request = self.state.lock().await.load_more();
        if let Some(request) = request {
            self.run(request).await;
        }
    }

    pub async fn update_sort(&self, field: SortField, order: SortOrder) {
        let request = self.state.lock().await.update_sort(field, order);
        self.run(request).await;
    }

    pub async fn update_search(&self, term: impl Into<String>) {
        let request = self.state.lock().await.update_search(term);
        self.run(request).await;
    }

    pub async fn snapshot(&self) -> CursorSnapshot {
        let state = self.state.lock().await;
        CursorSnapshot {
            users: state.users().to_vec(),
            loading: state.is_loading(),
            error: state.error().map(str::to_string),
            has_more: state.has_more(),
            sort_field: state.params().sort_field,
            sort_order: state.params().sort_order,
            search: state.params().search.clone(),
        }
    }

    async fn run(&self, request: FetchRequest) {
        let result = self.fetcher.fetch_users(&request.params).await.map_err(|err| {
            tracing::warn!(generation = request.generation, "Leaderboard fetch failed: {}", err);
            err.to_string()
        });
        if !self.state.lock().await.apply(&request, result) {
            tracing::debug!(generation = request.generation, "Discarded stale leaderboard response");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use async_trait::async_trait;
    use http::StatusCode;
    use tokio::sync::Notify;
    use super::*;
    use crate::client::{ClientError, CursorParams};
    use crate::model::LeaderboardPage;

    const TOTAL: u64 = 6;

    /// Serves synthetic pages whose ids encode the request. Requests matching `hold` wait for
    /// `release` before answering.
    struct ScriptedFetcher {
        hold: Box<dyn Fn(&CursorParams) -> bool + Send + Sync>,
        release: Arc<Notify>,
        fail: AtomicBool,
        calls: AtomicUsize,
    }

    impl ScriptedFetcher {
        fn new(hold: impl Fn(&CursorParams) -> bool + Send + Sync + 'static) -> Self {
            ScriptedFetcher {
                hold: Box::new(hold),
                release: Arc::new(Notify::new()),
                fail: AtomicBool::new(false),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl UsersFetcher for ScriptedFetcher {
        async fn fetch_users(&self, params: &CursorParams) -> Result<LeaderboardPage, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if (self.hold)(params) {
                self.release.notified().await;
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(ClientError::Status {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Failed to fetch users".to_string(),
                });
            }
            let end = (params.skip + params.limit).min(TOTAL);
            let users = (params.skip..end)
                .map(|position| {
                    let mut user = crate::model::UserDocument {
                        id: format!("{}-{}-{}", params.sort_field, params.search, position),
                        name: None,
                        wallet_address: None,
                        has_streaming_access: None,
                        total_experience_points: None,
                        xp_multiplier: None,
                        tier: None,
                        badge_count: None,
                    }.into_record(0);
                    user.name = format!("user {position}");
                    user
                })
                .collect();
            Ok(LeaderboardPage { users, total: TOTAL, has_more: params.skip + params.limit < TOTAL })
        }
    }

    fn ids(snapshot: &CursorSnapshot) -> Vec<&str> {
        snapshot.users.iter().map(|user| user.id.as_str()).collect()
    }

    #[tokio::test]
    async fn scrolls_until_exhausted() {
        let cursor = LeaderboardCursor::new(ScriptedFetcher::new(|_| false), 4);
        cursor.refresh().await;
        cursor.load_more().await;
        cursor.load_more().await;

        let snapshot = cursor.snapshot().await;
        assert_eq!(snapshot.users.len(), 6);
        assert!(!snapshot.has_more);
        assert!(!snapshot.loading);
        assert_eq!(cursor.fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn load_more_during_sort_change_keeps_only_sorted_results() {
        let cursor = LeaderboardCursor::new(ScriptedFetcher::new(|params| params.sort_field == SortField::Name), 2);
        cursor.refresh().await;

        tokio::join!(
            cursor.update_sort(SortField::Name, SortOrder::Ascending),
            async {
                cursor.load_more().await;
                cursor.fetcher.release.notify_one();
            }
        );

        let snapshot = cursor.snapshot().await;
        assert_eq!(ids(&snapshot), vec!["name--0", "name--1"]);
        assert_eq!(snapshot.sort_field, SortField::Name);
        assert_eq!(snapshot.sort_order, SortOrder::Ascending);
        assert_eq!(cursor.fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn slow_search_response_does_not_overwrite_newer_one() {
        let cursor = LeaderboardCursor::new(ScriptedFetcher::new(|params| params.search == "al"), 2);

        tokio::join!(
            cursor.update_search("al"),
            async {
                cursor.update_search("ali").await;
                cursor.fetcher.release.notify_one();
            }
        );

        let snapshot = cursor.snapshot().await;
        assert_eq!(ids(&snapshot), vec!["totalExperiencePoints-ali-0", "totalExperiencePoints-ali-1"]);
        assert_eq!(snapshot.search, "ali");
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_loaded_users() {
        let cursor = LeaderboardCursor::new(ScriptedFetcher::new(|_| false), 2);
        cursor.refresh().await;
        cursor.fetcher.fail.store(true, Ordering::SeqCst);
        cursor.load_more().await;

        let snapshot = cursor.snapshot().await;
        assert_eq!(snapshot.users.len(), 2);
        assert_eq!(snapshot.error.as_deref(), Some("Failed to fetch users"));
        assert!(!snapshot.loading);
    }
}
