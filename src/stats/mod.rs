//! The metric aggregator family.
//!
//! Each aggregator independently builds its GraphQL document, calls the
//! transport, checks that the login resolved, filters by the year's time
//! window where the metric is date-scoped, and reduces to its typed result.
//! Aggregators share no state and are safe to call concurrently; one
//! failing never affects another.
//!
//! Completeness limit: the repository, star, follower, and pull request
//! connections are capped at their first 100 items. Only the commit history
//! pagination in [`commits::get_commit_time_analysis`] follows cursors past
//! the first page.

pub mod calendar;
pub mod commits;
pub mod followers;
pub mod languages;
pub mod profile;
pub mod pulls;
pub mod repos;
pub mod stars;

pub use calendar::{get_activity_patterns, get_streaks};
pub use commits::{get_commit_time_analysis, get_most_active_repo, get_total_commits};
pub use followers::get_followers_growth;
pub use languages::{get_languages_breakdown, get_top_languages};
pub use profile::get_user_profile;
pub use pulls::{get_collaboration_count, get_pull_request_stats};
pub use repos::get_repos_created;
pub use stars::{get_stars_given, get_stars_received, get_total_stargazers};
