use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use log::{info, warn};
use crate::errors::AppError;
use crate::model::{WeekOption, WeeklyStats};

/// All weekly statistics snapshots, keyed by week number. Loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct StatsCatalog {
    weeks: BTreeMap<u32, WeeklyStats>,
}

impl StatsCatalog {

    pub fn from_weeks(weeks: Vec<WeeklyStats>) -> Self {
        StatsCatalog { weeks: weeks.into_iter().map(|stats| (stats.week, stats)).collect() }
    }

    /// Reads a JSON array of [`WeeklyStats`]. A missing file yields an empty catalog.
    pub async fn load(path: &Path) -> Result<Self, StatsLoadError> {
        let raw = match tokio::fs::read(path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                warn!("No weekly statistics found at {}, serving none.", path.display());
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        let weeks: Vec<WeeklyStats> = serde_json::from_slice(&raw)?;
        info!("Loaded weekly statistics for {} week(s).", weeks.len());
        Ok(Self::from_weeks(weeks))
    }

    pub fn latest_week(&self) -> Option<u32> {
        self.weeks.keys().next_back().copied()
    }

    pub fn get(&self, week: u32) -> Option<&WeeklyStats> {
        self.weeks.get(&week)
    }

    /// Selectable weeks, newest first.
    pub fn week_options(&self) -> Vec<WeekOption> {
        self.weeks.keys().rev().map(|week| WeekOption::for_week(*week)).collect()
    }
}

pub struct StatsService;

impl StatsService {

    /// Stats for `week`, or for the latest week when none is requested.
    pub fn get_week(catalog: &StatsCatalog, week: Option<&str>) -> Result<WeeklyStats, AppError> {
        let week = match week.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => raw.parse::<u32>()
                .map_err(|_| AppError::InvalidParameter(format!("Invalid week '{raw}'.")))?,
            None => catalog.latest_week()
                .ok_or_else(|| AppError::NotFound("No statistics available.".to_string()))?,
        };
        catalog.get(week)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No data available for week {week}.")))
    }
}

#[derive(Debug)]
pub enum StatsLoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StatsLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsLoadError::Io(err) => write!(f, "Unable to read weekly statistics: {}", err),
            StatsLoadError::Json(err) => write!(f, "Weekly statistics are not valid JSON: {}", err),
        }
    }
}

impl std::error::Error for StatsLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StatsLoadError::Io(e) => Some(e),
            StatsLoadError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StatsLoadError {
    fn from(err: std::io::Error) -> Self {
        StatsLoadError::Io(err)
    }
}

impl From<serde_json::Error> for StatsLoadError {
    fn from(err: serde_json::Error) -> Self {
        StatsLoadError::Json(err)
    }
}
