use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::Config;
use crate::error::{Error, Result};

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlErrorEntry>>,
}

#[derive(Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

pub struct GitHubClient {
    client: Client,
    graphql_url: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", config.github_token))?,
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("gitwrap/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            graphql_url: config.graphql_url.clone(),
        })
    }

    /// Executes one GraphQL document and deserializes the envelope's `data`
    /// field into `T`. The caller must supply every variable the document
    /// declares.
    pub async fn graphql<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        let body = serde_json::json!({ "query": query, "variables": variables });

        tracing::debug!("POST {}", self.graphql_url);
        let response = self.client.post(&self.graphql_url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(Error::Transport(response.status()));
        }

        let envelope: GraphQlResponse<T> = response.json().await?;
        unwrap_envelope(envelope)
    }
}

fn unwrap_envelope<T>(envelope: GraphQlResponse<T>) -> Result<T> {
    if let Some(errors) = envelope.errors {
        if !errors.is_empty() {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join(", ");
            return Err(Error::GraphQl(message));
        }
    }

    envelope.data.ok_or(Error::MissingData)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_envelope(value: serde_json::Value) -> GraphQlResponse<serde_json::Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_unwrap_data() {
        let envelope = parse_envelope(json!({ "data": { "user": null } }));
        assert_eq!(unwrap_envelope(envelope).unwrap(), json!({ "user": null }));
    }

    #[test]
    fn test_joins_graphql_error_messages() {
        let envelope = parse_envelope(json!({
            "data": null,
            "errors": [
                { "message": "first" },
                { "message": "second" }
            ]
        }));
        match unwrap_envelope(envelope) {
            Err(Error::GraphQl(message)) => assert_eq!(message, "first, second"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_data_without_errors() {
        let envelope = parse_envelope(json!({ "data": null }));
        assert!(matches!(unwrap_envelope(envelope), Err(Error::MissingData)));
    }
}
