//! Main CrmClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::TokenProvider;
use crate::error::Error;
use crate::error::FetchError;
use crate::model::CurrentUser;
use crate::response::ErrorBody;

/// The main client for the Salesdesk REST API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```ignore
/// use salesdesk_lib::{CrmClient, auth::StaticTokenProvider};
///
/// let client = CrmClient::builder()
///     .url("https://crm.example.com")
///     .token_provider(StaticTokenProvider::new("my-token"))
///     .build()?;
///
/// let me = client.connect().await?;
/// ```
#[derive(Clone)]
pub struct CrmClient {
    inner: Arc<CrmClientInner>,
}

struct CrmClientInner {
    base_url: String,
    token_provider: Arc<dyn TokenProvider>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl CrmClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> CrmClientBuilder<Missing, Missing> {
        CrmClientBuilder::new()
    }

    /// Validates connectivity and credentials by retrieving the acting user.
    pub async fn connect(&self) -> Result<CurrentUser, Error> {
        Ok(self.get_json("me", &[]).await?)
    }

    /// Returns the base URL of the CRM environment.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.inner.base_url, path)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &[(String, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, FetchError> {
        let token = self
            .inner
            .token_provider
            .access_token(&self.inner.base_url)
            .await
            .map_err(|e| FetchError::auth(e.to_string()))?;

        let mut request = self
            .inner
            .http_client
            .request(method, self.endpoint(path))
            .bearer_auth(&token.access_token);

        if !params.is_empty() {
            request = request.query(params);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Decode the server's error body when it has the documented shape.
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => Err(FetchError::Rejected {
                status: status.as_u16(),
                message: parsed.error.message,
                code: parsed.error.code,
            }),
            Err(_) => Err(FetchError::rejected(status.as_u16(), body)),
        }
    }

    /// Performs a GET request and decodes the JSON response.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, FetchError> {
        let response = self.send(Method::GET, path, params, None).await?;
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| FetchError::malformed_with_body(e.to_string(), body))
    }

    /// Performs a PATCH request with a JSON body, discarding the response.
    pub async fn patch_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<(), FetchError> {
        self.send(Method::PATCH, path, &[], Some(body)).await?;
        Ok(())
    }

    /// Performs a POST request with a JSON body, discarding the response.
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<(), FetchError> {
        self.send(Method::POST, path, &[], Some(body)).await?;
        Ok(())
    }

    /// Performs a DELETE request.
    pub async fn delete(&self, path: &str) -> Result<(), FetchError> {
        self.send(Method::DELETE, path, &[], None).await?;
        Ok(())
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`CrmClient`].
///
/// Uses the typestate pattern so the required fields are enforced at compile
/// time.
///
/// # Required Fields
///
/// - `url` - The CRM environment base URL
/// - `token_provider` - A [`TokenProvider`] implementation
pub struct CrmClientBuilder<U, P> {
    url: U,
    token_provider: P,
    timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl CrmClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: Missing,
            timeout: None,
            http_client: None,
        }
    }
}

impl Default for CrmClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> CrmClientBuilder<Missing, P> {
    /// Sets the CRM environment base URL.
    pub fn url(self, url: impl Into<String>) -> CrmClientBuilder<Set<String>, P> {
        CrmClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> CrmClientBuilder<U, Missing> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> CrmClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        CrmClientBuilder {
            url: self.url,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            timeout: self.timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, P> CrmClientBuilder<U, P> {
    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl CrmClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`CrmClient`], validating the base URL.
    pub fn build(self) -> Result<CrmClient, Error> {
        let raw = self.url.0;
        let parsed = Url::parse(&raw).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "{raw}: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }
        let base_url = raw.trim_end_matches('/').to_string();

        let http_client = match self.http_client {
            Some(client) => client,
            None => Client::builder()
                .build()
                .map_err(|e| Error::Fetch(FetchError::Network(e)))?,
        };

        Ok(CrmClient {
            inner: Arc::new(CrmClientInner {
                base_url,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticTokenProvider;

    #[test]
    fn build_rejects_garbage_urls() {
        let result = CrmClient::builder()
            .url("not a url")
            .token_provider(StaticTokenProvider::new("t"))
            .build();
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn build_normalizes_trailing_slash() {
        let client = CrmClient::builder()
            .url("https://crm.example.com/")
            .token_provider(StaticTokenProvider::new("t"))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://crm.example.com");
        assert_eq!(client.endpoint("leads"), "https://crm.example.com/api/v1/leads");
    }
}
