use serde_json::json;

use crate::error::{Error, Result};
use crate::github::response::{CreatedRepo, CreatedReposUser, UserData};
use crate::github::GitHubClient;
use crate::window::TimeWindow;

const CREATED_REPOS_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    repositories(first: 100, ownerAffiliations: OWNER, orderBy: {field: CREATED_AT, direction: DESC}) {
      nodes {
        name
        createdAt
      }
    }
  }
}
"#;

/// Names of owned repositories created during the year (first 100 repos,
/// newest first).
pub async fn get_repos_created(
    client: &GitHubClient,
    username: &str,
    year: i32,
) -> Result<Vec<String>> {
    let window = TimeWindow::for_year(year)?;
    tracing::debug!("Fetching repositories created by {}", username);

    let data: UserData<CreatedReposUser> = client
        .graphql(CREATED_REPOS_QUERY, json!({ "login": username }))
        .await?;
    let user = data
        .user
        .ok_or_else(|| Error::UserNotFound(username.to_string()))?;

    Ok(created_in_window(user.repositories.nodes, &window))
}

fn created_in_window(repos: Vec<CreatedRepo>, window: &TimeWindow) -> Vec<String> {
    repos
        .into_iter()
        .filter(|repo| window.contains(repo.created_at))
        .map(|repo| repo.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filters_by_creation_date() {
        let repos: Vec<CreatedRepo> = serde_json::from_value(json!([
            { "name": "new-year-project", "createdAt": "2024-01-01T00:00:00Z" },
            { "name": "last-year", "createdAt": "2023-11-20T09:00:00Z" },
            { "name": "december-push", "createdAt": "2024-12-31T23:59:59Z" }
        ]))
        .unwrap();

        let window = TimeWindow::for_year(2024).unwrap();
        let names = created_in_window(repos, &window);
        assert_eq!(names, vec!["new-year-project", "december-push"]);
    }
}
