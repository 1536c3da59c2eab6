use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::errors::AppError;
use crate::model::UserDocument;

/// Page size used when `limit` is missing or not a non-negative integer.
pub const DEFAULT_LIMIT: u64 = 10;
/// Offset used when `skip` is missing or not a non-negative integer.
pub const DEFAULT_SKIP: u64 = 0;

/// Query string of `GET /api/users` exactly as the client sent it.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardQueryParams {
    pub limit: Option<String>,
    pub skip: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    TotalExperiencePoints,
    Name,
    XpMultiplier,
}

impl SortField {
    pub fn to_str(&self) -> &'static str {
        match self {
            SortField::TotalExperiencePoints => "totalExperiencePoints",
            SortField::Name => "name",
            SortField::XpMultiplier => "xpMultiplier",
        }
    }

    /// Column expression used for ordering and comparing. Names compare bytewise.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::TotalExperiencePoints => "total_experience_points",
            SortField::Name => "name COLLATE \"C\"",
            SortField::XpMultiplier => "xp_multiplier",
        }
    }
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "totalExperiencePoints" => Ok(SortField::TotalExperiencePoints),
            "name" => Ok(SortField::Name),
            "xpMultiplier" => Ok(SortField::XpMultiplier),
            other => Err(AppError::InvalidParameter(format!("Unknown sortField '{other}'."))),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn to_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "1",
            SortOrder::Descending => "-1",
        }
    }

    pub fn sql_keyword(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "1" => Ok(SortOrder::Ascending),
            "-1" => Ok(SortOrder::Descending),
            other => Err(AppError::InvalidParameter(format!("Unknown sortOrder '{other}', expected 1 or -1."))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

/// Which users take part in a count or page query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFilter {
    All,
    /// Case-insensitive substring match on the display name. The term is taken literally.
    NameContains(String),
}

impl UserFilter {
    pub fn from_search(search: Option<&str>) -> Self {
        match search {
            Some(term) if !term.is_empty() => UserFilter::NameContains(term.to_string()),
            _ => UserFilter::All,
        }
    }

    pub fn matches(&self, document: &UserDocument) -> bool {
        match self {
            UserFilter::All => true,
            UserFilter::NameContains(term) => document.name.as_deref()
                .map(|name| name.to_lowercase().contains(&term.to_lowercase()))
                .unwrap_or(false),
        }
    }
}

/// Validated form of [`LeaderboardQueryParams`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardQuery {
    pub limit: u64,
    pub skip: u64,
    pub sort: SortSpec,
    pub search: Option<String>,
}

impl Default for LeaderboardQuery {
    fn default() -> Self {
        Self { limit: DEFAULT_LIMIT, skip: DEFAULT_SKIP, sort: SortSpec::default(), search: None }
    }
}

impl LeaderboardQuery {
    pub fn filter(&self) -> UserFilter {
        UserFilter::from_search(self.search.as_deref())
    }

    pub fn is_search(&self) -> bool {
        self.search.is_some()
    }

    pub fn has_more(&self, total: u64) -> bool {
        self.skip.saturating_add(self.limit) < total
    }
}

impl TryFrom<LeaderboardQueryParams> for LeaderboardQuery {
    type Error = AppError;

    /// Enum parameters are strict, numeric ones fall back to [`DEFAULT_LIMIT`] / [`DEFAULT_SKIP`].
    fn try_from(params: LeaderboardQueryParams) -> Result<Self, Self::Error> {
        let field = match params.sort_field.as_deref() {
            None | Some("") => SortField::default(),
            Some(raw) => raw.parse()?,
        };
        let order = match params.sort_order.as_deref() {
            None | Some("") => SortOrder::default(),
            Some(raw) => raw.parse()?,
        };
        Ok(LeaderboardQuery {
            limit: parse_or(params.limit.as_deref(), DEFAULT_LIMIT),
            skip: parse_or(params.skip.as_deref(), DEFAULT_SKIP),
            sort: SortSpec { field, order },
            search: params.search.filter(|term| !term.is_empty()),
        })
    }
}

fn parse_or(raw: Option<&str>, fallback: u64) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok()).unwrap_or(fallback)
}
