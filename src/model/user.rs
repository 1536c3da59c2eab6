use std::fmt;
use serde::{Deserialize, Serialize};

/// Raw user row as the store hands it out. Every column except the id may be missing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    pub id: String,
    pub name: Option<String>,
    pub wallet_address: Option<String>,
    pub has_streaming_access: Option<bool>,
    pub total_experience_points: Option<i64>,
    pub xp_multiplier: Option<f64>,
    pub tier: Option<i32>,
    pub badge_count: Option<i32>,
}

/// Normalized projection of a user as served by the leaderboard.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub wallet_address: String,
    pub has_streaming_access: bool,
    pub total_experience_points: u64,
    pub xp_multiplier: f64,
    pub tier: Option<Tier>,
    pub badge_count: Option<u32>,
    /// Position in the unfiltered leaderboard, only filled while a search is active.
    pub global_rank: u64,
}

impl UserDocument {

    /// Coerces the raw columns into a [`UserRecord`]. Malformed values are normalized, never rejected:
    /// negative XP becomes 0, a non-positive or non-finite multiplier becomes 1 and out of range
    /// tiers or badge counts are dropped.
    pub fn into_record(self, global_rank: u64) -> UserRecord {
        let xp_multiplier = match self.xp_multiplier {
            Some(multiplier) if multiplier.is_finite() && multiplier > 0.0 => multiplier,
            _ => 1.0,
        };
        UserRecord {
            id: self.id,
            name: self.name.unwrap_or_default(),
            wallet_address: self.wallet_address.unwrap_or_default(),
            has_streaming_access: self.has_streaming_access.unwrap_or(false),
            total_experience_points: self.total_experience_points
                .and_then(|xp| u64::try_from(xp).ok())
                .unwrap_or(0),
            xp_multiplier,
            tier: self.tier.and_then(|tier| Tier::try_from(tier).ok()),
            badge_count: self.badge_count.and_then(|count| u32::try_from(count).ok()),
            global_rank,
        }
    }
}

/// XP classification of a user, serialized as its ordinal (1-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    pub fn ordinal(&self) -> i32 {
        match self {
            Tier::Bronze => 1,
            Tier::Silver => 2,
            Tier::Gold => 3,
            Tier::Platinum => 4,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
        }
    }

    /// Display name for a raw ordinal, `Unknown` for anything outside 1-4.
    pub fn name_of(ordinal: i32) -> &'static str {
        Tier::try_from(ordinal).map(|tier| tier.to_str()).unwrap_or("Unknown")
    }
}

impl From<Tier> for i32 {
    fn from(tier: Tier) -> i32 {
        tier.ordinal()
    }
}

impl TryFrom<i32> for Tier {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Tier::Bronze),
            2 => Ok(Tier::Silver),
            3 => Ok(Tier::Gold),
            4 => Ok(Tier::Platinum),
            other => Err(format!("Unknown tier ordinal {other}")),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}
