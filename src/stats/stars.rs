use serde_json::json;

use crate::error::{Error, Result};
use crate::github::response::{
    StarCountsUser, StargazerRepo, StargazersUser, StarredEdge, StarringUser, UserData,
};
use crate::github::GitHubClient;
use crate::models::StarredRepo;
use crate::window::TimeWindow;

const STARS_RECEIVED_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    repositories(first: 100, ownerAffiliations: OWNER) {
      nodes {
        name
        stargazers(first: 100, orderBy: {field: STARRED_AT, direction: DESC}) {
          edges {
            starredAt
          }
        }
      }
    }
  }
}
"#;

const STARS_GIVEN_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    starredRepositories(first: 100) {
      edges {
        starredAt
        node {
          name
          owner {
            login
          }
        }
      }
    }
  }
}
"#;

const STAR_COUNTS_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    repositories(first: 100, ownerAffiliations: OWNER) {
      nodes {
        stargazerCount
      }
    }
  }
}
"#;

/// Stars the user's repositories received during the year (first 100 repos,
/// newest 100 stargazers each).
pub async fn get_stars_received(client: &GitHubClient, username: &str, year: i32) -> Result<u32> {
    let window = TimeWindow::for_year(year)?;
    tracing::debug!("Fetching stargazer timestamps for {}", username);

    let data: UserData<StargazersUser> = client
        .graphql(STARS_RECEIVED_QUERY, json!({ "login": username }))
        .await?;
    let user = data
        .user
        .ok_or_else(|| Error::UserNotFound(username.to_string()))?;

    Ok(count_stars_in_window(&user.repositories.nodes, &window))
}

/// Repositories the user starred during the year (first 100 starred).
pub async fn get_stars_given(
    client: &GitHubClient,
    username: &str,
    year: i32,
) -> Result<Vec<StarredRepo>> {
    let window = TimeWindow::for_year(year)?;
    tracing::debug!("Fetching starred repositories for {}", username);

    let data: UserData<StarringUser> = client
        .graphql(STARS_GIVEN_QUERY, json!({ "login": username }))
        .await?;
    let user = data
        .user
        .ok_or_else(|| Error::UserNotFound(username.to_string()))?;

    Ok(stars_given_in_window(
        user.starred_repositories.edges,
        &window,
    ))
}

/// Lifetime stargazer total across the user's owned repositories; not
/// year-scoped.
pub async fn get_total_stargazers(client: &GitHubClient, username: &str) -> Result<u32> {
    tracing::debug!("Fetching stargazer totals for {}", username);

    let data: UserData<StarCountsUser> = client
        .graphql(STAR_COUNTS_QUERY, json!({ "login": username }))
        .await?;
    let user = data
        .user
        .ok_or_else(|| Error::UserNotFound(username.to_string()))?;

    Ok(user
        .repositories
        .nodes
        .iter()
        .map(|repo| repo.stargazer_count)
        .sum())
}

fn count_stars_in_window(repos: &[StargazerRepo], window: &TimeWindow) -> u32 {
    repos
        .iter()
        .flat_map(|repo| &repo.stargazers.edges)
        .filter(|edge| window.contains(edge.starred_at))
        .count() as u32
}

fn stars_given_in_window(edges: Vec<StarredEdge>, window: &TimeWindow) -> Vec<StarredRepo> {
    edges
        .into_iter()
        .filter(|edge| window.contains(edge.starred_at))
        .map(|edge| StarredRepo {
            name: edge.node.name,
            owner: edge.node.owner.login,
            starred_at: edge.starred_at,
        })
        .collect()
}
