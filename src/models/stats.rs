use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Longest active/inactive runs over one year's contribution calendar.
/// `current_streak` is the active run still open on the calendar's last day,
/// whether or not it is the historical maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    pub longest_streak: u32,
    pub longest_break: u32,
    pub current_streak: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestStats {
    pub opened: u32,
    pub merged: u32,
}

/// Contribution total for one weekday, Sunday through Saturday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPattern {
    pub day: String,
    pub commits: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowersGrowth {
    pub new_followers: Vec<String>,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopLanguage {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoLanguages {
    pub repo: String,
    pub languages: Vec<String>,
}

/// Per-repository language lists plus the language -> repository count map.
/// A repository counts once per language it lists, not weighted by bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagesBreakdown {
    pub breakdown: Vec<RepoLanguages>,
    pub aggregate: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MostActiveRepo {
    pub repo: Option<String>,
    pub commits: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarredRepo {
    pub name: String,
    pub owner: String,
    pub starred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityPeriod {
    #[serde(rename = "at night")]
    Night,
    #[serde(rename = "during the day")]
    Day,
}

impl fmt::Display for ActivityPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActivityPeriod::Night => "at night",
            ActivityPeriod::Day => "during the day",
        })
    }
}

/// Hour-of-day histogram of commits across all repositories.
/// `difference` is the dominant bucket's share of all commits as a
/// percentage with one decimal place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTimeAnalysis {
    pub hour_distribution: [u32; 24],
    pub night_owl: u32,
    pub early_bird: u32,
    pub difference: String,
    pub period: ActivityPeriod,
}
