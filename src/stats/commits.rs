use chrono::{DateTime, Timelike, Utc};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use crate::error::{Error, Result};
use crate::github::paginator;
use crate::github::response::{
    CommitTotalsUser, CommitsByRepoUser, RepoCommitContributions, RepoNamesUser, UserData,
};
use crate::github::GitHubClient;
use crate::models::{ActivityPeriod, CommitTimeAnalysis, MostActiveRepo};
use crate::window::TimeWindow;

const TOTAL_COMMITS_QUERY: &str = r#"
query($login: String!, $since: DateTime!, $until: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $since, to: $until) {
      totalCommitContributions
    }
  }
}
"#;

const COMMITS_BY_REPO_QUERY: &str = r#"
query($login: String!, $since: DateTime!, $until: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $since, to: $until) {
      commitContributionsByRepository(maxRepositories: 100) {
        repository {
          name
        }
        contributions {
          totalCount
        }
      }
    }
  }
}
"#;

const OWNED_REPO_NAMES_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    repositories(first: 100, ownerAffiliations: OWNER) {
      nodes {
        name
      }
    }
  }
}
"#;

pub async fn get_total_commits(client: &GitHubClient, username: &str, year: i32) -> Result<u32> {
    let window = TimeWindow::for_year(year)?;
    tracing::debug!("Fetching commit totals for {}", username);

    let data: UserData<CommitTotalsUser> = client
        .graphql(
            TOTAL_COMMITS_QUERY,
            json!({
                "login": username,
                "since": window.since_rfc3339(),
                "until": window.until_rfc3339(),
            }),
        )
        .await?;
    let user = data
        .user
        .ok_or_else(|| Error::UserNotFound(username.to_string()))?;

    Ok(user.contributions_collection.total_commit_contributions)
}

/// Repository with the most commit contributions in the year. Ties keep the
/// first repository the response listed.
pub async fn get_most_active_repo(
    client: &GitHubClient,
    username: &str,
    year: i32,
) -> Result<MostActiveRepo> {
    let window = TimeWindow::for_year(year)?;
    tracing::debug!("Ranking repositories by commit count for {}", username);

    let data: UserData<CommitsByRepoUser> = client
        .graphql(
            COMMITS_BY_REPO_QUERY,
            json!({
                "login": username,
                "since": window.since_rfc3339(),
                "until": window.until_rfc3339(),
            }),
        )
        .await?;
    let user = data
        .user
        .ok_or_else(|| Error::UserNotFound(username.to_string()))?;

    Ok(rank_repositories(
        user.contributions_collection
            .commit_contributions_by_repository,
    ))
}

/// Hour-of-day histogram of default-branch commits across every owned
/// repository, shifted by `timezone_offset` hours from UTC.
///
/// Repository histories are fetched concurrently, each one paginated
/// sequentially through its cursors. A repository whose history cannot be
/// fetched contributes no commits; only a failure of the repository list
/// itself fails the metric.
pub async fn get_commit_time_analysis(
    client: &GitHubClient,
    username: &str,
    year: i32,
    timezone_offset: i32,
) -> Result<CommitTimeAnalysis> {
    let window = TimeWindow::for_year(year)?;

    let data: UserData<RepoNamesUser> = client
        .graphql(OWNED_REPO_NAMES_QUERY, json!({ "login": username }))
        .await?;
    let user = data
        .user
        .ok_or_else(|| Error::UserNotFound(username.to_string()))?;
    let repo_names: Vec<String> = user.repositories.nodes.into_iter().map(|r| r.name).collect();

    tracing::info!(
        "Fetching commit history for {} repositories of {}",
        repo_names.len(),
        username
    );

    let pb = ProgressBar::new(repo_names.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} repos")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut history_futures = Vec::new();
    for name in repo_names {
        let pb = pb.clone();
        history_futures.push(async move {
            let commits = match paginator::fetch_commit_history(client, username, &name, &window)
                .await
            {
                Ok(commits) => commits,
                Err(e) => {
                    tracing::debug!("Skipping history for {}: {}", name, e);
                    Vec::new()
                }
            };
            pb.inc(1);
            commits
        });
    }

    let per_repo = join_all(history_futures).await;
    pb.finish_and_clear();

    let timestamps: Vec<DateTime<Utc>> = per_repo.into_iter().flatten().collect();
    tracing::info!("Bucketing {} commits by hour", timestamps.len());

    Ok(summarize_commit_hours(&timestamps, timezone_offset))
}

fn rank_repositories(entries: Vec<RepoCommitContributions>) -> MostActiveRepo {
    let mut repo = None;
    let mut commits = 0;

    for entry in entries {
        if entry.contributions.total_count > commits {
            commits = entry.contributions.total_count;
            repo = Some(entry.repository.name);
        }
    }

    MostActiveRepo { repo, commits }
}

fn summarize_commit_hours(
    timestamps: &[DateTime<Utc>],
    timezone_offset: i32,
) -> CommitTimeAnalysis {
    let mut hour_distribution = [0u32; 24];
    let mut night_owl = 0;
    let mut early_bird = 0;

    for timestamp in timestamps {
        let hour = bucket_hour(timestamp.hour(), timezone_offset);
        hour_distribution[hour as usize] += 1;
        if (6..18).contains(&hour) {
            early_bird += 1;
        } else {
            night_owl += 1;
        }
    }

    let total = night_owl + early_bird;
    let dominant = night_owl.max(early_bird);
    // No commits at all: report a zero share rather than dividing by zero.
    let difference = if total == 0 {
        "0.0".to_string()
    } else {
        format!("{:.1}", f64::from(dominant) / f64::from(total) * 100.0)
    };
    let period = if night_owl > early_bird {
        ActivityPeriod::Night
    } else {
        ActivityPeriod::Day
    };

    CommitTimeAnalysis {
        hour_distribution,
        night_owl,
        early_bird,
        difference,
        period,
    }
}

fn bucket_hour(utc_hour: u32, timezone_offset: i32) -> u32 {
    (utc_hour as i32 + timezone_offset).rem_euclid(24) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rank_keeps_first_on_tie() {
        let entries: Vec<RepoCommitContributions> = serde_json::from_value(json!([
            { "repository": { "name": "alpha" }, "contributions": { "totalCount": 12 } },
            { "repository": { "name": "beta" }, "contributions": { "totalCount": 30 } },
            { "repository": { "name": "gamma" }, "contributions": { "totalCount": 30 } },
        ]))
        .unwrap();

        let ranked = rank_repositories(entries);
        assert_eq!(ranked.repo.as_deref(), Some("beta"));
        assert_eq!(ranked.commits, 30);
    }

    #[test]
    fn test_rank_with_no_repositories() {
        let ranked = rank_repositories(Vec::new());
        assert_eq!(ranked.repo, None);
        assert_eq!(ranked.commits, 0);
    }

    #[test]
    fn test_hour_wraparound_negative_offset() {
        assert_eq!(bucket_hour(2, -5), 21);
        assert_eq!(bucket_hour(23, 3), 2);
        assert_eq!(bucket_hour(12, 0), 12);
    }

    #[test]
    fn test_wrapped_hour_classified_as_night() {
        let timestamps = vec!["2024-06-01T02:00:00Z".parse().unwrap()];
        let analysis = summarize_commit_hours(&timestamps, -5);
        assert_eq!(analysis.hour_distribution[21], 1);
        assert_eq!(analysis.night_owl, 1);
        assert_eq!(analysis.early_bird, 0);
        assert_eq!(analysis.period, ActivityPeriod::Night);
    }

    #[test]
    fn test_distribution_sums_match() {
        let timestamps: Vec<DateTime<Utc>> = [
            "2024-06-01T02:00:00Z",
            "2024-06-01T07:30:00Z",
            "2024-06-01T12:00:00Z",
            "2024-06-01T17:59:59Z",
            "2024-06-01T18:00:00Z",
            "2024-06-01T23:00:00Z",
        ]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();

        let analysis = summarize_commit_hours(&timestamps, 0);
        let histogram_total: u32 = analysis.hour_distribution.iter().sum();
        assert_eq!(histogram_total, analysis.night_owl + analysis.early_bird);
        assert_eq!(analysis.early_bird, 3);
        assert_eq!(analysis.night_owl, 3);
        assert_eq!(analysis.difference, "50.0");
        // Night does not dominate on a tie.
        assert_eq!(analysis.period, ActivityPeriod::Day);
    }

    #[test]
    fn test_no_commits_reports_zero_share() {
        let analysis = summarize_commit_hours(&[], 0);
        assert_eq!(analysis.difference, "0.0");
        assert_eq!(analysis.period, ActivityPeriod::Day);
        assert!(analysis.hour_distribution.iter().all(|&c| c == 0));
    }
}
