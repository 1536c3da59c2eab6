use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Precomputed platform statistics for one week.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    pub week: u32,
    pub summary: StatsSummary,
    pub xp_stats: XpStats,
    pub tier_distribution: TierDistribution,
    pub badge_analysis: BadgeAnalysis,
    pub welcome_tour: WelcomeTour,
    pub streaming_access: StreamingAccess,
    pub multiplier_distribution: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_users: u64,
    pub total_experience_points: u64,
    pub total_experience_points_top1000: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct XpStats {
    #[serde(rename = "minXP")]
    pub min_xp: f64,
    #[serde(rename = "maxXP")]
    pub max_xp: f64,
    #[serde(rename = "averageXP")]
    pub average_xp: f64,
    #[serde(rename = "medianXP")]
    pub median_xp: f64,
    pub q1: f64,
    pub q3: f64,
    #[serde(rename = "standardDeviation")]
    pub standard_deviation: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TierDistribution {
    pub tier1: u64,
    pub tier2: u64,
    pub tier3: u64,
    pub tier4: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeAnalysis {
    pub average_badges_per_user: f64,
    pub badge_frequency: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeTour {
    pub completed: u64,
    pub completed_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StreamingAccess {
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WeekOption {
    pub value: u32,
    pub label: String,
}

impl WeekOption {
    pub fn for_week(week: u32) -> Self {
        WeekOption { value: week, label: format!("Week {week}") }
    }
}
