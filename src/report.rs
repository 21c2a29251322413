use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::github::GitHubClient;
use crate::models::{
    ActivityPattern, CommitTimeAnalysis, FollowersGrowth, LanguagesBreakdown, MostActiveRepo,
    PullRequestStats, StarredRepo, Streaks, TopLanguage, UserProfile,
};
use crate::stats;

/// Outcome of one aggregator: either the payload, or the error message the
/// consumer renders as an unavailable card. Serializes as the payload
/// itself or as `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric<T> {
    Ready(T),
    Unavailable { error: String },
}

impl<T> Metric<T> {
    fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => Metric::Ready(value),
            Err(e) => Metric::Unavailable {
                error: e.to_string(),
            },
        }
    }

    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Metric::Ready(value) => Some(value),
            Metric::Unavailable { .. } => None,
        }
    }
}

/// One user's full year of GitHub statistics, one [`Metric`] per
/// aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearInReview {
    pub username: String,
    pub year: i32,
    pub generated_at: DateTime<Utc>,
    pub profile: Metric<UserProfile>,
    pub total_commits: Metric<u32>,
    pub most_active_repo: Metric<MostActiveRepo>,
    pub streaks: Metric<Streaks>,
    pub activity_patterns: Metric<Vec<ActivityPattern>>,
    pub commit_times: Metric<CommitTimeAnalysis>,
    pub top_languages: Metric<Vec<TopLanguage>>,
    pub languages: Metric<LanguagesBreakdown>,
    pub repos_created: Metric<Vec<String>>,
    pub stars_received: Metric<u32>,
    pub stars_given: Metric<Vec<StarredRepo>>,
    pub total_stargazers: Metric<u32>,
    pub pull_requests: Metric<PullRequestStats>,
    pub collaborations: Metric<u32>,
    pub followers: Metric<FollowersGrowth>,
}

/// Runs every aggregator concurrently and collects each outcome
/// independently. One metric failing never blocks another; the report as a
/// whole always comes back.
pub async fn generate(
    client: &GitHubClient,
    username: &str,
    year: i32,
    timezone_offset: i32,
) -> YearInReview {
    tracing::info!("Generating {} year in review for {}", year, username);

    let (
        profile,
        total_commits,
        most_active_repo,
        streaks,
        activity_patterns,
        commit_times,
        top_languages,
        languages,
        repos_created,
        stars_received,
        stars_given,
        total_stargazers,
        pull_requests,
        collaborations,
        followers,
    ) = tokio::join!(
        stats::get_user_profile(client, username),
        stats::get_total_commits(client, username, year),
        stats::get_most_active_repo(client, username, year),
        stats::get_streaks(client, username, year),
        stats::get_activity_patterns(client, username, year),
        stats::get_commit_time_analysis(client, username, year, timezone_offset),
        stats::get_top_languages(client, username, year),
        stats::get_languages_breakdown(client, username, year),
        stats::get_repos_created(client, username, year),
        stats::get_stars_received(client, username, year),
        stats::get_stars_given(client, username, year),
        stats::get_total_stargazers(client, username),
        stats::get_pull_request_stats(client, username, year),
        stats::get_collaboration_count(client, username, year),
        stats::get_followers_growth(client, username, year),
    );

    YearInReview {
        username: username.to_string(),
        year,
        generated_at: Utc::now(),
        profile: Metric::from_result(profile),
        total_commits: Metric::from_result(total_commits),
        most_active_repo: Metric::from_result(most_active_repo),
        streaks: Metric::from_result(streaks),
        activity_patterns: Metric::from_result(activity_patterns),
        commit_times: Metric::from_result(commit_times),
        top_languages: Metric::from_result(top_languages),
        languages: Metric::from_result(languages),
        repos_created: Metric::from_result(repos_created),
        stars_received: Metric::from_result(stars_received),
        stars_given: Metric::from_result(stars_given),
        total_stargazers: Metric::from_result(total_stargazers),
        pull_requests: Metric::from_result(pull_requests),
        collaborations: Metric::from_result(collaborations),
        followers: Metric::from_result(followers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn test_ready_serializes_as_payload() {
        let metric = Metric::Ready(42u32);
        assert_eq!(serde_json::to_value(&metric).unwrap(), json!(42));
    }

    #[test]
    fn test_unavailable_serializes_as_error_object() {
        let metric = Metric::<u32>::from_result(Err(Error::UserNotFound("ghost".to_string())));
        assert_eq!(
            serde_json::to_value(&metric).unwrap(),
            json!({ "error": "User not found: ghost" })
        );
    }

    #[test]
    fn test_untagged_deserialization() {
        let ready: Metric<u32> = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(ready.as_ready(), Some(&7));

        let unavailable: Metric<u32> =
            serde_json::from_value(json!({ "error": "down" })).unwrap();
        assert!(unavailable.as_ready().is_none());
    }
}
