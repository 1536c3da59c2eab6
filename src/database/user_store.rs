use std::cmp::Ordering;
use std::error::Error;
use std::fmt;
use std::time::Duration;
use async_trait::async_trait;
use crate::model::{SortField, SortSpec, UserDocument, UserFilter};

/// The three read primitives the leaderboard needs from a user store.
#[async_trait]
pub trait UserStore: Send + Sync {

    /// Number of users matching `filter`.
    async fn count_users(&self, filter: &UserFilter) -> Result<u64, StoreError>;

    /// One page of users matching `filter`, ordered by `sort`. Missing sort values order lowest,
    /// ties are broken by id ascending.
    async fn find_users(&self, filter: &UserFilter, sort: SortSpec, skip: u64, limit: u64) -> Result<Vec<UserDocument>, StoreError>;

    /// Number of all users whose `sort.field` value is strictly ahead of `pivot`: greater for a
    /// descending order, smaller for an ascending one. Users without a value are never counted.
    async fn count_ranked_ahead(&self, sort: SortSpec, pivot: &SortValue) -> Result<u64, StoreError>;
}

/// Raw value of a sortable column.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Missing,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl SortValue {
    pub fn of(document: &UserDocument, field: SortField) -> Self {
        let value = match field {
            SortField::TotalExperiencePoints => document.total_experience_points.map(SortValue::Integer),
            SortField::Name => document.name.clone().map(SortValue::Text),
            SortField::XpMultiplier => document.xp_multiplier.map(SortValue::Float),
        };
        value.unwrap_or(SortValue::Missing)
    }

    /// Ordering between two present values of the same kind, `None` otherwise.
    pub fn compare(&self, other: &SortValue) -> Option<Ordering> {
        match (self, other) {
            (SortValue::Integer(a), SortValue::Integer(b)) => Some(a.cmp(b)),
            (SortValue::Float(a), SortValue::Float(b)) => Some(a.total_cmp(b)),
            (SortValue::Text(a), SortValue::Text(b)) => Some(a.as_bytes().cmp(b.as_bytes())),
            _ => None,
        }
    }

    /// Total ordering used for sorting pages, missing values first.
    pub fn sort_cmp(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
            (SortValue::Missing, _) => Ordering::Less,
            (_, SortValue::Missing) => Ordering::Greater,
            (a, b) => a.compare(b).unwrap_or(Ordering::Equal),
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    Database(sqlx::Error),
    Timeout(Duration),
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Database(err) => write!(f, "Database query failed: {}", err),
            StoreError::Timeout(after) => write!(f, "Store call timed out after {}ms", after.as_millis()),
            StoreError::Unavailable(msg) => write!(f, "Store unavailable: {}", msg),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::Database(err) => Some(err),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}
