use std::cmp::Ordering;
use std::path::Path;
use async_trait::async_trait;
use log::info;
use crate::database::{SortValue, StoreError, UserStore};
use crate::model::{SortOrder, SortSpec, UserDocument, UserFilter};

/// Read-only user store kept in memory, used for local development and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    documents: Vec<UserDocument>,
}

impl InMemoryUserStore {

    pub fn new(documents: Vec<UserDocument>) -> Self {
        InMemoryUserStore { documents }
    }

    /// Loads a JSON array of user documents.
    pub async fn from_seed_file(path: &Path) -> Result<Self, StoreError> {
        let raw = tokio::fs::read(path).await
            .map_err(|err| StoreError::Unavailable(format!("Unable to read seed file {}: {}", path.display(), err)))?;
        let documents: Vec<UserDocument> = serde_json::from_slice(&raw)
            .map_err(|err| StoreError::Unavailable(format!("Invalid seed file {}: {}", path.display(), err)))?;
        info!("Loaded {} users into the in-memory store.", documents.len());
        Ok(Self::new(documents))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

fn ordering(sort: SortSpec, a: &UserDocument, b: &UserDocument) -> Ordering {
    let by_field = SortValue::of(a, sort.field).sort_cmp(&SortValue::of(b, sort.field));
    let by_field = match sort.order {
        SortOrder::Ascending => by_field,
        SortOrder::Descending => by_field.reverse(),
    };
    by_field.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl UserStore for InMemoryUserStore {

    async fn count_users(&self, filter: &UserFilter) -> Result<u64, StoreError> {
        Ok(self.documents.iter().filter(|doc| filter.matches(doc)).count() as u64)
    }

    async fn find_users(&self, filter: &UserFilter, sort: SortSpec, skip: u64, limit: u64) -> Result<Vec<UserDocument>, StoreError> {
        let mut matching: Vec<&UserDocument> = self.documents.iter().filter(|doc| filter.matches(doc)).collect();
        matching.sort_by(|a, b| ordering(sort, a, b));
        let page = matching.into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(page)
    }

    async fn count_ranked_ahead(&self, sort: SortSpec, pivot: &SortValue) -> Result<u64, StoreError> {
        let ahead = match sort.order {
            SortOrder::Descending => Ordering::Greater,
            SortOrder::Ascending => Ordering::Less,
        };
        let count = self.documents.iter()
            .filter(|doc| SortValue::of(doc, sort.field).compare(pivot) == Some(ahead))
            .count();
        Ok(count as u64)
    }
}
