use serde_json::json;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::github::response::{LanguageRepo, LanguageReposUser, UserData};
use crate::github::GitHubClient;
use crate::models::{LanguagesBreakdown, RepoLanguages, TopLanguage};
use crate::window::TimeWindow;

const LANGUAGES_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    repositories(first: 100, ownerAffiliations: OWNER) {
      nodes {
        name
        createdAt
        languages(first: 10) {
          nodes {
            name
          }
        }
      }
    }
  }
}
"#;

/// Languages ranked by how many repositories created in the year list them.
pub async fn get_top_languages(
    client: &GitHubClient,
    username: &str,
    year: i32,
) -> Result<Vec<TopLanguage>> {
    let window = TimeWindow::for_year(year)?;
    let repos = fetch_language_repos(client, username).await?;

    Ok(rank_languages(aggregate_languages(&repos, &window)))
}

/// Per-repository language lists for repositories created in the year, plus
/// the aggregate language -> repository count map.
pub async fn get_languages_breakdown(
    client: &GitHubClient,
    username: &str,
    year: i32,
) -> Result<LanguagesBreakdown> {
    let window = TimeWindow::for_year(year)?;
    let repos = fetch_language_repos(client, username).await?;

    Ok(LanguagesBreakdown {
        breakdown: breakdown_in_window(&repos, &window),
        aggregate: aggregate_languages(&repos, &window),
    })
}

fn breakdown_in_window(repos: &[LanguageRepo], window: &TimeWindow) -> Vec<RepoLanguages> {
    repos
        .iter()
        .filter(|repo| window.contains(repo.created_at))
        .map(|repo| RepoLanguages {
            repo: repo.name.clone(),
            languages: repo.languages.nodes.iter().map(|l| l.name.clone()).collect(),
        })
        .collect()
}

async fn fetch_language_repos(
    client: &GitHubClient,
    username: &str,
) -> Result<Vec<LanguageRepo>> {
    tracing::debug!("Fetching repository languages for {}", username);

    let data: UserData<LanguageReposUser> = client
        .graphql(LANGUAGES_QUERY, json!({ "login": username }))
        .await?;
    let user = data
        .user
        .ok_or_else(|| Error::UserNotFound(username.to_string()))?;

    Ok(user.repositories.nodes)
}

fn aggregate_languages(repos: &[LanguageRepo], window: &TimeWindow) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();

    for repo in repos.iter().filter(|r| window.contains(r.created_at)) {
        for language in &repo.languages.nodes {
            *counts.entry(language.name.clone()).or_insert(0) += 1;
        }
    }

    counts
}

fn rank_languages(counts: BTreeMap<String, u32>) -> Vec<TopLanguage> {
    let mut ranked: Vec<TopLanguage> = counts
        .into_iter()
        .map(|(name, count)| TopLanguage { name, count })
        .collect();
    // Stable sort keeps equal counts alphabetical.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn repos() -> Vec<LanguageRepo> {
        serde_json::from_value(json!([
            {
                "name": "in-window",
                "createdAt": "2024-03-10T08:00:00Z",
                "languages": { "nodes": [{ "name": "Rust" }, { "name": "Shell" }] }
            },
            {
                "name": "also-in-window",
                "createdAt": "2024-11-01T20:00:00Z",
                "languages": { "nodes": [{ "name": "Rust" }] }
            },
            {
                "name": "too-old",
                "createdAt": "2021-06-01T00:00:00Z",
                "languages": { "nodes": [{ "name": "Python" }] }
            }
        ]))
        .unwrap()
    }

    #[test]
    fn test_aggregate_counts_repos_per_language() {
        let window = TimeWindow::for_year(2024).unwrap();
        let aggregate = aggregate_languages(&repos(), &window);
        assert_eq!(aggregate.get("Rust"), Some(&2));
        assert_eq!(aggregate.get("Shell"), Some(&1));
        assert_eq!(aggregate.get("Python"), None);
    }

    #[test]
    fn test_ranking_sorts_by_count_descending() {
        let window = TimeWindow::for_year(2024).unwrap();
        let ranked = rank_languages(aggregate_languages(&repos(), &window));
        assert_eq!(ranked[0].name, "Rust");
        assert_eq!(ranked[0].count, 2);
        assert_eq!(ranked[1].name, "Shell");
    }

    #[test]
    fn test_breakdown_skips_out_of_window_repos() {
        let window = TimeWindow::for_year(2024).unwrap();
        let breakdown = breakdown_in_window(&repos(), &window);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].repo, "in-window");
        assert_eq!(breakdown[0].languages, vec!["Rust", "Shell"]);
        assert_eq!(breakdown[1].repo, "also-in-window");
    }
}
