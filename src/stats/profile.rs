use serde_json::json;

use crate::error::{Error, Result};
use crate::github::response::{ProfileUser, UserData};
use crate::github::GitHubClient;
use crate::models::{SocialAccount, UserProfile};

const PROFILE_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    name
    avatarUrl
    websiteUrl
    twitterUsername
    socialAccounts(first: 10) {
      nodes {
        provider
        url
        displayName
      }
    }
  }
}
"#;

/// Display profile for the user; not year-scoped. Missing social accounts
/// come back as an empty list.
pub async fn get_user_profile(client: &GitHubClient, username: &str) -> Result<UserProfile> {
    tracing::debug!("Fetching profile for {}", username);

    let data: UserData<ProfileUser> = client
        .graphql(PROFILE_QUERY, json!({ "login": username }))
        .await?;
    let user = data
        .user
        .ok_or_else(|| Error::UserNotFound(username.to_string()))?;

    Ok(UserProfile {
        name: user.name,
        avatar_url: user.avatar_url,
        website_url: user.website_url,
        twitter_username: user.twitter_username,
        social_accounts: user
            .social_accounts
            .nodes
            .into_iter()
            .map(|account| SocialAccount {
                provider: account.provider,
                url: account.url,
                display_name: account.display_name,
            })
            .collect(),
    })
}
