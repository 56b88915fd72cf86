//! [`HubSpotClient`]: the HTTP implementation of [`RecordGateway`].

use std::error::Error as _;

use async_trait::async_trait;
use records::{GatewayConfig, Record, RecordFields, RecordGateway, UpstreamError, PROPERTY_NAMES};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response};

use crate::wire::{CreateRequest, ListResponse};
use crate::ClientError;

const USER_AGENT: &str = concat!("cobj-gateway/", env!("CARGO_PKG_VERSION"));

/// Record gateway backed by the CRM v3 objects REST API.
///
/// Holds an immutable [`GatewayConfig`] and a pooled [`reqwest::Client`];
/// cloning is cheap and clones share the pool. No request timeout is set, so
/// an unresponsive CRM holds the calling request open until the transport
/// gives up.
#[derive(Debug, Clone)]
pub struct HubSpotClient {
    http: reqwest::Client,
    config: GatewayConfig,
    objects_url: String,
}

impl HubSpotClient {
    /// Creates a client for the object type named in `config`.
    pub fn new(config: GatewayConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Creates a client that sends requests through an existing
    /// [`reqwest::Client`].
    pub fn with_http_client(config: GatewayConfig, http: reqwest::Client) -> Self {
        let objects_url = config.objects_url();
        Self {
            http,
            config,
            objects_url,
        }
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    fn authorised(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(self.config.token.expose())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }
}

#[async_trait]
impl RecordGateway for HubSpotClient {
    #[tracing::instrument(skip(self), fields(object_type = %self.config.object_type))]
    async fn list_records(&self) -> Result<Vec<Record>, UpstreamError> {
        let request = self
            .authorised(self.http.get(&self.objects_url))
            .query(&[("properties", PROPERTY_NAMES.join(","))]);

        let body = send(request).await?;
        let page: ListResponse = decode(&body)?;

        if let Some(next) = page.paging.and_then(|p| p.next) {
            tracing::debug!(
                after = %next.after,
                "CRM has more records than one page; only the first page is listed"
            );
        }

        tracing::debug!(count = page.results.len(), "Fetched records");
        Ok(page.results)
    }

    #[tracing::instrument(skip(self, fields), fields(object_type = %self.config.object_type))]
    async fn create_record(&self, fields: RecordFields) -> Result<(), UpstreamError> {
        let request = self
            .authorised(self.http.post(&self.objects_url))
            .json(&CreateRequest {
                properties: &fields,
            });

        let body = send(request).await?;

        // The create already succeeded; an unreadable body is only logged.
        match serde_json::from_str::<Record>(&body) {
            Ok(created) => match created.id {
                Some(id) => tracing::info!(record_id = %id, "Created record"),
                None => tracing::info!("Created record"),
            },
            Err(e) => tracing::warn!(error = %e, "Created record but could not decode the response"),
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Response handling
// ---------------------------------------------------------------------------

/// Sends `request` and returns the body of a 2xx response.
async fn send(request: RequestBuilder) -> Result<String, UpstreamError> {
    let response = request.send().await.map_err(transport_error)?;
    read_success(response).await
}

async fn read_success(response: Response) -> Result<String, UpstreamError> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    if status.is_success() {
        Ok(body)
    } else {
        Err(UpstreamError::Status {
            status: status.as_u16(),
            body: non_empty(body),
        })
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, UpstreamError> {
    serde_json::from_str(body).map_err(|e| UpstreamError::Decode {
        message: e.to_string(),
        body: non_empty(body.to_string()),
    })
}

fn transport_error(e: reqwest::Error) -> UpstreamError {
    // reqwest's Display omits the source chain.
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    UpstreamError::Transport { message }
}

fn non_empty(body: String) -> Option<String> {
    if body.trim().is_empty() {
        None
    } else {
        Some(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_drops_blank_bodies() {
        assert_eq!(non_empty(String::new()), None);
        assert_eq!(non_empty("  \n".to_string()), None);
        assert_eq!(non_empty("{}".to_string()), Some("{}".to_string()));
    }

    #[test]
    fn test_decode_error_keeps_body() {
        let err = decode::<ListResponse>("<html>gateway</html>").unwrap_err();

        match err {
            UpstreamError::Decode { body, .. } => {
                assert_eq!(body.as_deref(), Some("<html>gateway</html>"))
            }
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn test_objects_url_is_precomputed_from_config() {
        let config = GatewayConfig::from_raw("http://localhost:9/", "tok", "2-99").unwrap();
        let client = HubSpotClient::with_http_client(config, reqwest::Client::new());

        assert_eq!(client.objects_url, "http://localhost:9/crm/v3/objects/2-99");
    }
}
