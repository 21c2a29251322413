//! Typed shapes for the GraphQL documents issued by the aggregators.
//!
//! Each query gets its own narrow response type so nothing past the
//! transport boundary touches untyped JSON.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// Top-level wrapper shared by every user-scoped query. A `None` user means
/// the login did not resolve.
#[derive(Debug, Deserialize)]
pub struct UserData<U> {
    pub user: Option<U>,
}

#[derive(Debug, Deserialize)]
pub struct Nodes<T> {
    #[serde(default)]
    pub nodes: Vec<T>,
}

impl<T> Default for Nodes<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

#[derive(Debug, Deserialize)]
pub struct Edges<T> {
    #[serde(default)]
    pub edges: Vec<T>,
}

impl<T> Default for Edges<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

#[derive(Debug, Deserialize)]
pub struct Login {
    pub login: String,
}

// Contribution calendar

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarUser {
    pub contributions_collection: CalendarContributions,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarContributions {
    pub contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
pub struct ContributionCalendar {
    #[serde(default)]
    pub weeks: Vec<CalendarWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarWeek {
    #[serde(default)]
    pub contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub contribution_count: u32,
}

// Commit totals

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitTotalsUser {
    pub contributions_collection: CommitTotals,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitTotals {
    pub total_commit_contributions: u32,
}

// Commit contributions per repository

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitsByRepoUser {
    pub contributions_collection: CommitsByRepo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitsByRepo {
    #[serde(default)]
    pub commit_contributions_by_repository: Vec<RepoCommitContributions>,
}

#[derive(Debug, Deserialize)]
pub struct RepoCommitContributions {
    pub repository: RepoName,
    pub contributions: ContributionCount,
}

#[derive(Debug, Deserialize)]
pub struct RepoName {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCount {
    pub total_count: u32,
}

// Pull request contributions

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestsUser {
    pub contributions_collection: PullRequestContributions,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestContributions {
    pub pull_request_contributions: Nodes<PullRequestNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestNode {
    pub pull_request: PullRequestFlags,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestFlags {
    pub merged: bool,
}

// Pull request contributions grouped by repository

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationUser {
    pub contributions_collection: PullRequestsByRepo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestsByRepo {
    #[serde(default)]
    pub pull_request_contributions_by_repository: Vec<RepoPullContributions>,
}

#[derive(Debug, Deserialize)]
pub struct RepoPullContributions {
    pub repository: OwnedRepoName,
    pub contributions: Nodes<AuthoredPullNode>,
}

#[derive(Debug, Deserialize)]
pub struct OwnedRepoName {
    pub owner: Login,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthoredPullNode {
    pub pull_request: AuthoredPull,
}

#[derive(Debug, Deserialize)]
pub struct AuthoredPull {
    pub merged: bool,
    pub author: Option<Login>,
}

// Owned repositories

#[derive(Debug, Deserialize)]
pub struct RepoNamesUser {
    pub repositories: Nodes<RepoName>,
}

#[derive(Debug, Deserialize)]
pub struct CreatedReposUser {
    pub repositories: Nodes<CreatedRepo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRepo {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageReposUser {
    pub repositories: Nodes<LanguageRepo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageRepo {
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub languages: Nodes<LanguageName>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageName {
    pub name: String,
}

// Stargazers

#[derive(Debug, Deserialize)]
pub struct StargazersUser {
    pub repositories: Nodes<StargazerRepo>,
}

#[derive(Debug, Deserialize)]
pub struct StargazerRepo {
    pub name: String,
    #[serde(default)]
    pub stargazers: Edges<StarEdge>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarEdge {
    pub starred_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct StarCountsUser {
    pub repositories: Nodes<StarCountRepo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarCountRepo {
    pub stargazer_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarringUser {
    pub starred_repositories: Edges<StarredEdge>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarredEdge {
    pub starred_at: DateTime<Utc>,
    pub node: StarredRepoNode,
}

#[derive(Debug, Deserialize)]
pub struct StarredRepoNode {
    pub name: String,
    pub owner: Login,
}

// Followers

#[derive(Debug, Deserialize)]
pub struct FollowersUser {
    pub followers: Nodes<Follower>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follower {
    pub login: String,
    pub created_at: DateTime<Utc>,
}

// User profile

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUser {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub website_url: Option<String>,
    pub twitter_username: Option<String>,
    #[serde(default)]
    pub social_accounts: Nodes<SocialAccountNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialAccountNode {
    pub provider: Option<String>,
    pub url: Option<String>,
    pub display_name: Option<String>,
}

// Default-branch commit history

#[derive(Debug, Deserialize)]
pub struct CommitHistoryData {
    pub repository: Option<HistoryRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRepository {
    pub default_branch_ref: Option<HistoryRef>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryRef {
    pub target: Option<HistoryTarget>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryTarget {
    pub history: Option<CommitHistory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitHistory {
    pub page_info: PageInfo,
    #[serde(default)]
    pub nodes: Vec<CommitNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitNode {
    pub committed_date: DateTime<Utc>,
}
