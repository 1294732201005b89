//! `reqwest`-backed gateway.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::{parse_body, ApiRequest, Gateway, Method};
use crate::config::ApiConfig;
use crate::error::{Error, Result};

/// Gateway speaking HTTP to one base URL.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    client: Client,
}

impl HttpGateway {
    /// Build a gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::transport(config.base_url.clone(), e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// The base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait::async_trait]
impl Gateway for HttpGateway {
    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        let url = self.url_for(&request.path);
        debug!("{} {}", request.method, url);

        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Patch => self.client.patch(&url),
            Method::Delete => self.client.delete(&url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| Error::transport(request.path.clone(), e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::transport(request.path.clone(), e.to_string()))?;
        trace!("{} {} -> {} ({} bytes)", request.method, url, status, text.len());

        if !status.is_success() {
            warn!("{} {} failed with {}", request.method, url, status);
            return Err(Error::status(status.as_u16(), text));
        }

        Ok(parse_body(&text))
    }
}
