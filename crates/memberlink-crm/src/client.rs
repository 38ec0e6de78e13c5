//! CRM HTTP client implementation.

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use memberlink_core::error::{ApiError, Error, TransportError};
use memberlink_core::types::ApiUrl;

/// Remote error envelope, e.g. `{"type":"error.list","errors":[...]}`.
#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorItem>,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorItem {
    code: Option<String>,
    message: Option<String>,
}

/// HTTP client for the CRM API.
///
/// Carries the bearer credential and the base URL; every method returns
/// the parsed body on 2xx and an [`ApiError`] otherwise, leaving the
/// not-found / ambiguous-match classification to the caller.
#[derive(Debug, Clone)]
pub struct CrmClient {
    client: reqwest::Client,
    api: ApiUrl,
    access_token: String,
}

impl CrmClient {
    /// Create a new client for the given API base URL and bearer token.
    pub fn new(api: ApiUrl, access_token: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("memberlink/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api,
            access_token: access_token.into(),
        }
    }

    /// Returns the API base URL this client is configured for.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// Make a GET request to an endpoint path.
    #[instrument(skip(self), fields(api = %self.api))]
    pub async fn get<R>(&self, path: &str) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(path, "CRM GET");

        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers())
            .send()
            .await
            .map_err(classify)?;

        self.handle_response(response).await
    }

    /// Make a GET request with query parameters.
    #[instrument(skip(self), fields(api = %self.api))]
    pub async fn get_query<Q, R>(&self, path: &str, query: &Q) -> Result<R, Error>
    where
        Q: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(path, "CRM GET");
        trace!(?query, "query parameters");

        let response = self
            .client
            .get(&url)
            .query(query)
            .headers(self.auth_headers())
            .send()
            .await
            .map_err(classify)?;

        self.handle_response(response).await
    }

    /// Make a POST request with a JSON body.
    #[instrument(skip(self, body), fields(api = %self.api))]
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(path, "CRM POST");

        let response = self
            .client
            .post(&url)
            .json(body)
            .headers(self.auth_headers())
            .send()
            .await
            .map_err(classify)?;

        self.handle_response(response).await
    }

    /// Create authorization headers for requests.
    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", self.access_token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).expect("invalid token characters"),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Handle a response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "CRM response");

        if status.is_success() {
            let body = response.json::<R>().await.map_err(classify)?;
            Ok(body)
        } else {
            let error = self.parse_error_response(response).await;
            Err(Error::Api(error))
        }
    }

    /// Parse an error response body into an [`ApiError`].
    async fn parse_error_response(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();

        // Try to parse the remote error envelope
        match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => {
                let first = envelope.errors.into_iter().next();
                let (code, message) = first.map_or((None, None), |e| (e.code, e.message));
                ApiError::new(status, code, message)
            }
            Err(_) => ApiError::new(status, None, None),
        }
    }
}

/// Classify a reqwest error into the transport taxonomy.
pub(crate) fn classify(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout {
            message: err.to_string(),
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };

    Error::Transport(transport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let api = ApiUrl::new("https://api.intercom.io/").unwrap();
        let client = CrmClient::new(api.clone(), "token");
        assert_eq!(client.api().as_str(), api.as_str());
    }
}
