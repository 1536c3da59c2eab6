use serde::{Deserialize, Serialize};
use crate::model::UserRecord;

/// Body of `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardPage {
    pub users: Vec<UserRecord>,
    pub total: u64,
    pub has_more: bool,
}
