use std::time::Duration;
use crate::core::QueryConfig;
use crate::database::UserStore;
use crate::errors::AppError;
use crate::leaderboard::rank::{compute_global_ranks, with_timeout};
use crate::model::{LeaderboardPage, LeaderboardQuery};

pub struct LeaderboardService;

impl LeaderboardService {

    /// Loads one leaderboard page.
    ///
    /// `total` and the page are read concurrently with the search filter applied. While a search
    /// is active every returned user additionally gets its rank in the *unfiltered* leaderboard,
    /// so a searched user sees the same position as in the full list. Count or page failures fail
    /// the whole request, a failing rank only degrades that user's rank to 0.
    pub async fn query_users(
        store: &dyn UserStore,
        settings: &QueryConfig,
        query: LeaderboardQuery,
    ) -> Result<LeaderboardPage, AppError> {

        let call_timeout = Duration::from_millis(settings.store_timeout_ms);
        let filter = query.filter();

        let (total, documents) = tokio::try_join!( //executing 2 queries async
            with_timeout(call_timeout, store.count_users(&filter)),
            with_timeout(call_timeout, store.find_users(&filter, query.sort, query.skip, query.limit))
        )?;

        let users = if query.is_search() {
            let ranks = compute_global_ranks(store, query.sort, &documents, settings.rank_concurrency, call_timeout).await;
            documents.into_iter()
                .zip(ranks)
                .map(|(document, entry)| document.into_record(entry.rank))
                .collect()
        } else {
            documents.into_iter().map(|document| document.into_record(0)).collect()
        };

        Ok(LeaderboardPage {
            users,
            total,
            has_more: query.has_more(total),
        })
    }
}
