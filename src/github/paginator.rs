use std::future::Future;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::error::Result;
use crate::github::response::CommitHistoryData;
use crate::github::GitHubClient;
use crate::window::TimeWindow;

const COMMIT_HISTORY_QUERY: &str = r#"
query($owner: String!, $name: String!, $since: GitTimestamp!, $until: GitTimestamp!, $after: String) {
  repository(owner: $owner, name: $name) {
    defaultBranchRef {
      target {
        ... on Commit {
          history(since: $since, until: $until, first: 100, after: $after) {
            pageInfo {
              hasNextPage
              endCursor
            }
            nodes {
              committedDate
            }
          }
        }
      }
    }
  }
}
"#;

/// Pages through a repository's default-branch commit history, following
/// `hasNextPage`/`endCursor` until the history is exhausted.
///
/// A repository without a default branch, or whose branch target is not a
/// commit, yields an empty list rather than an error.
pub async fn fetch_commit_history(
    client: &GitHubClient,
    owner: &str,
    name: &str,
    window: &TimeWindow,
) -> Result<Vec<DateTime<Utc>>> {
    tracing::debug!("Fetching commit history for {}/{}", owner, name);
    paginate_history(|after| {
        client.graphql(
            COMMIT_HISTORY_QUERY,
            json!({
                "owner": owner,
                "name": name,
                "since": window.since_rfc3339(),
                "until": window.until_rfc3339(),
                "after": after,
            }),
        )
    })
    .await
}

/// Cursor-follow loop over the history connection, generic over the page
/// fetch. Pages are requested strictly in sequence because each cursor
/// comes from the previous response.
async fn paginate_history<F, Fut>(mut fetch_page: F) -> Result<Vec<DateTime<Utc>>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<CommitHistoryData>>,
{
    let mut commits = Vec::new();
    let mut after: Option<String> = None;

    loop {
        let page = fetch_page(after.clone()).await?;
        let history = page
            .repository
            .and_then(|repo| repo.default_branch_ref)
            .and_then(|branch| branch.target)
            .and_then(|target| target.history);

        let Some(history) = history else {
            break;
        };

        commits.extend(history.nodes.into_iter().map(|node| node.committed_date));

        match history.page_info.end_cursor {
            Some(cursor) if history.page_info.has_next_page => after = Some(cursor),
            _ => break,
        }
    }

    Ok(commits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn page(dates: &[&str], has_next_page: bool, end_cursor: Option<&str>) -> CommitHistoryData {
        let nodes: Vec<Value> = dates
            .iter()
            .map(|d| json!({ "committedDate": d }))
            .collect();
        serde_json::from_value(json!({
            "repository": {
                "defaultBranchRef": {
                    "target": {
                        "history": {
                            "pageInfo": {
                                "hasNextPage": has_next_page,
                                "endCursor": end_cursor
                            },
                            "nodes": nodes
                        }
                    }
                }
            }
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_follows_cursors_until_exhausted() {
        let mut pages = vec![
            page(&["2024-01-01T10:00:00Z", "2024-01-02T11:00:00Z"], true, Some("c1")),
            page(&["2024-02-01T12:00:00Z", "2024-02-02T13:00:00Z"], true, Some("c2")),
            page(&["2024-03-01T14:00:00Z"], false, None),
        ]
        .into_iter();
        let mut cursors = Vec::new();

        let commits = paginate_history(|after| {
            cursors.push(after);
            std::future::ready(Ok(pages.next().expect("fetched past the last page")))
        })
        .await
        .unwrap();

        assert_eq!(commits.len(), 5);
        assert_eq!(
            cursors,
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_missing_history_yields_empty() {
        let empty: CommitHistoryData =
            serde_json::from_value(json!({ "repository": null })).unwrap();
        let mut pages = vec![empty].into_iter();

        let commits = paginate_history(|_| {
            std::future::ready(Ok(pages.next().expect("fetched past the last page")))
        })
        .await
        .unwrap();

        assert!(commits.is_empty());
    }

    #[tokio::test]
    async fn test_next_page_without_cursor_stops() {
        let mut pages = vec![page(&["2024-01-01T10:00:00Z"], true, None)].into_iter();

        let commits = paginate_history(|_| {
            std::future::ready(Ok(pages.next().expect("fetched past the last page")))
        })
        .await
        .unwrap();

        assert_eq!(commits.len(), 1);
    }
}
