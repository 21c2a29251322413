pub mod client;
pub mod paginator;
pub mod response;

pub use client::GitHubClient;
