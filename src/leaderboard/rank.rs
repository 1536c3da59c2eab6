use std::future::Future;
use std::time::Duration;
use futures::StreamExt;
use futures::stream;
use crate::database::{SortValue, StoreError, UserStore};
use crate::model::{SortSpec, UserDocument};

/// Global position of one user under the active sort, 0 when it could not be computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry {
    pub user_id: String,
    pub rank: u64,
}

pub async fn with_timeout<T>(limit: Duration, call: impl Future<Output = Result<T, StoreError>>) -> Result<T, StoreError> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(limit)),
    }
}

/// Computes the unfiltered leaderboard rank of every document with at most `concurrency`
/// count queries in flight. The output keeps the input order. A failing count never aborts
/// the batch, its entry falls back to rank 0.
pub async fn compute_global_ranks(
    store: &dyn UserStore,
    sort: SortSpec,
    documents: &[UserDocument],
    concurrency: usize,
    call_timeout: Duration,
) -> Vec<RankEntry> {
    let pending: Vec<_> = documents.iter()
        .map(|document| rank_of(store, sort, document, call_timeout))
        .collect();
    stream::iter(pending)
        .buffered(concurrency.max(1))
        .collect()
        .await
}

async fn rank_of(store: &dyn UserStore, sort: SortSpec, document: &UserDocument, call_timeout: Duration) -> RankEntry {
    let pivot = SortValue::of(document, sort.field);
    let rank = match with_timeout(call_timeout, store.count_ranked_ahead(sort, &pivot)).await {
        Ok(ahead) => ahead.saturating_add(1),
        Err(err) => {
            tracing::warn!(user_id = %document.id, "Error calculating global rank: {}", err);
            0
        }
    };
    RankEntry { user_id: document.id.clone(), rank }
}
