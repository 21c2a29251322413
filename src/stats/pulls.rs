use serde_json::json;

use crate::error::{Error, Result};
use crate::github::response::{
    CollaborationUser, PullRequestNode, PullRequestsUser, RepoPullContributions, UserData,
};
use crate::github::GitHubClient;
use crate::models::PullRequestStats;
use crate::window::TimeWindow;

const PULL_REQUESTS_QUERY: &str = r#"
query($login: String!, $since: DateTime!, $until: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $since, to: $until) {
      pullRequestContributions(first: 100) {
        nodes {
          pullRequest {
            merged
          }
        }
      }
    }
  }
}
"#;

const COLLABORATIONS_QUERY: &str = r#"
query($login: String!, $since: DateTime!, $until: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $since, to: $until) {
      pullRequestContributionsByRepository {
        repository {
          owner {
            login
          }
          name
        }
        contributions(first: 100) {
          nodes {
            pullRequest {
              merged
              author {
                login
              }
            }
          }
        }
      }
    }
  }
}
"#;

/// Pull requests opened in the year (first 100 contributions) and how many
/// of those are merged.
pub async fn get_pull_request_stats(
    client: &GitHubClient,
    username: &str,
    year: i32,
) -> Result<PullRequestStats> {
    let window = TimeWindow::for_year(year)?;
    tracing::debug!("Fetching pull request contributions for {}", username);

    let data: UserData<PullRequestsUser> = client
        .graphql(
            PULL_REQUESTS_QUERY,
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

    Ok(summarize_pull_requests(
        &user.contributions_collection.pull_request_contributions.nodes,
    ))
}

/// Merged pull requests the user authored into repositories they do not
/// own. A PR merged into the user's own repository does not count.
pub async fn get_collaboration_count(
    client: &GitHubClient,
    username: &str,
    year: i32,
) -> Result<u32> {
    let window = TimeWindow::for_year(year)?;
    tracing::debug!("Counting collaborations for {}", username);

    let data: UserData<CollaborationUser> = client
        .graphql(
            COLLABORATIONS_QUERY,
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

    Ok(count_collaborations(
        username,
        &user
            .contributions_collection
            .pull_request_contributions_by_repository,
    ))
}

fn summarize_pull_requests(nodes: &[PullRequestNode]) -> PullRequestStats {
    let opened = nodes.len() as u32;
    let merged = nodes.iter().filter(|n| n.pull_request.merged).count() as u32;

    PullRequestStats { opened, merged }
}

fn count_collaborations(username: &str, repos: &[RepoPullContributions]) -> u32 {
    let mut count = 0;

    for repo in repos {
        for node in &repo.contributions.nodes {
            let pr = &node.pull_request;
            if pr.merged
                && pr.author.as_ref().is_some_and(|a| a.login == username)
                && repo.repository.owner.login != username
            {
                count += 1;
            }
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pull_request_summary() {
        let nodes: Vec<PullRequestNode> = serde_json::from_value(json!([
            { "pullRequest": { "merged": true } },
            { "pullRequest": { "merged": false } },
            { "pullRequest": { "merged": true } },
        ]))
        .unwrap();

        let stats = summarize_pull_requests(&nodes);
        assert_eq!(stats.opened, 3);
        assert_eq!(stats.merged, 2);
    }

    #[test]
    fn test_collaboration_excludes_own_repositories() {
        let repos: Vec<RepoPullContributions> = serde_json::from_value(json!([
            {
                "repository": { "owner": { "login": "octocat" }, "name": "own-repo" },
                "contributions": { "nodes": [
                    { "pullRequest": { "merged": true, "author": { "login": "octocat" } } }
                ] }
            },
            {
                "repository": { "owner": { "login": "someone-else" }, "name": "their-repo" },
                "contributions": { "nodes": [
                    { "pullRequest": { "merged": true, "author": { "login": "octocat" } } }
                ] }
            }
        ]))
        .unwrap();

        assert_eq!(count_collaborations("octocat", &repos), 1);
    }

    #[test]
    fn test_collaboration_requires_merge_and_authorship() {
        let repos: Vec<RepoPullContributions> = serde_json::from_value(json!([
            {
                "repository": { "owner": { "login": "someone-else" }, "name": "their-repo" },
                "contributions": { "nodes": [
                    { "pullRequest": { "merged": false, "author": { "login": "octocat" } } },
                    { "pullRequest": { "merged": true, "author": { "login": "third-party" } } },
                    { "pullRequest": { "merged": true, "author": null } },
                    { "pullRequest": { "merged": true, "author": { "login": "octocat" } } }
                ] }
            }
        ]))
        .unwrap();

        assert_eq!(count_collaborations("octocat", &repos), 1);
    }
}
