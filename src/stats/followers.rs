use serde_json::json;

use crate::error::{Error, Result};
use crate::github::response::{Follower, FollowersUser, UserData};
use crate::github::GitHubClient;
use crate::models::FollowersGrowth;
use crate::window::TimeWindow;

const FOLLOWERS_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    followers(first: 100) {
      nodes {
        login
        createdAt
      }
    }
  }
}
"#;

/// Followers whose accounts were created during the year (first 100
/// followers). The follower list itself carries no follow timestamp, so
/// account creation stands in for it.
pub async fn get_followers_growth(
    client: &GitHubClient,
    username: &str,
    year: i32,
) -> Result<FollowersGrowth> {
    let window = TimeWindow::for_year(year)?;
    tracing::debug!("Fetching followers for {}", username);

    let data: UserData<FollowersUser> = client
        .graphql(FOLLOWERS_QUERY, json!({ "login": username }))
        .await?;
    let user = data
        .user
        .ok_or_else(|| Error::UserNotFound(username.to_string()))?;

    Ok(growth_in_window(user.followers.nodes, &window))
}

fn growth_in_window(followers: Vec<Follower>, window: &TimeWindow) -> FollowersGrowth {
    let new_followers: Vec<String> = followers
        .into_iter()
        .filter(|f| window.contains(f.created_at))
        .map(|f| f.login)
        .collect();
    let count = new_followers.len() as u32;

    FollowersGrowth {
        new_followers,
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_growth_filters_by_account_creation() {
        let followers: Vec<Follower> = serde_json::from_value(json!([
            { "login": "fresh", "createdAt": "2024-08-08T08:00:00Z" },
            { "login": "veteran", "createdAt": "2015-01-01T00:00:00Z" }
        ]))
        .unwrap();

        let window = TimeWindow::for_year(2024).unwrap();
        let growth = growth_in_window(followers, &window);
        assert_eq!(growth.new_followers, vec!["fresh".to_string()]);
        assert_eq!(growth.count, 1);
    }
}
