//! HTTP client for the operadoras REST API

use crate::{error::ApiError, messages::Locale};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Path prefix every endpoint lives under
pub const API_BASE_PATH: &str = "/api";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`ApiClient`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiClientConfig {
    /// Scheme, host and port of the backend, e.g. `http://localhost:8000`
    pub origin: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Language of normalized error messages
    pub locale: Locale,
}

impl ApiClientConfig {
    /// Configuration with the default timeout and locale
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            timeout: DEFAULT_TIMEOUT,
            locale: Locale::default(),
        }
    }

    /// Builder: Set timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder: Set locale
    #[must_use]
    pub const fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

/// Successful response of a call
#[derive(Clone, Debug)]
pub struct ApiResponse<T> {
    /// Decoded body
    pub data: T,
    /// HTTP status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
}

/// Operadoras API client
///
/// Every request goes to `{origin}/api{path}` with a JSON content type and a
/// fixed timeout. Failures are normalized into [`ApiError`]; there is no
/// retry.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    locale: Locale,
}

impl ApiClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the underlying HTTP client cannot be built
    /// (for example when the TLS backend fails to initialize).
    pub fn new(config: ApiClientConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}{API_BASE_PATH}", config.origin.trim_end_matches('/')),
            locale: config.locale,
        })
    }

    /// Base URL requests are resolved against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Locale used for error messages
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Issue a GET request and decode the JSON body
    ///
    /// `route` is an endpoint template such as `/operadoras/{cnpj}/despesas`.
    /// Each `{..}` segment is filled, in order, with the next value of
    /// `params`, percent-encoded as a single path segment. The template, not
    /// the filled path, labels the request metrics.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for network failures, non-success statuses, and
    /// bodies that do not decode into `T`.
    #[tracing::instrument(skip(self, params, query), fields(base_url = %self.base_url))]
    pub async fn get<T>(
        &self,
        route: &'static str,
        params: &[&str],
        query: &[(&str, String)],
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url_for(route, params)?;
        tracing::debug!(%url, ?query, "GET");

        let response = match self.client.get(url.clone()).query(query).send().await {
            Ok(response) => response,
            Err(e) => {
                metrics::counter!("api.requests.total", "path" => route, "outcome" => "network_error").increment(1);
                tracing::warn!(%url, error = %e, "Request failed before a response arrived");
                return Err(ApiError::network(self.locale, e));
            },
        };

        let status = response.status();
        let headers = response.headers().clone();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = ApiError::from_status(self.locale, status.as_u16(), &body);
            metrics::counter!("api.requests.total", "path" => route, "outcome" => "http_error").increment(1);
            tracing::warn!(
                %url,
                status = status.as_u16(),
                message = error.message(),
                "Request returned an error status"
            );
            return Err(error);
        }

        match response.json::<T>().await {
            Ok(data) => {
                metrics::counter!("api.requests.total", "path" => route, "outcome" => "success").increment(1);
                Ok(ApiResponse {
                    data,
                    status,
                    headers,
                })
            },
            Err(e) if e.is_decode() => {
                metrics::counter!("api.requests.total", "path" => route, "outcome" => "decode_error").increment(1);
                tracing::warn!(%url, error = %e, "Response body did not match the expected shape");
                Err(ApiError::decode(self.locale, status.as_u16(), e))
            },
            Err(e) => {
                metrics::counter!("api.requests.total", "path" => route, "outcome" => "network_error").increment(1);
                tracing::warn!(%url, error = %e, "Response body could not be read");
                Err(ApiError::network(self.locale, e))
            },
        }
    }

    /// Resolve a route template against the base URL
    fn url_for(&self, route: &str, params: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ApiError::network(self.locale, e))?;
        let mut params = params.iter();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::network(self.locale, "base URL cannot carry a path"))?;
            segments.pop_if_empty();
            for segment in route.split('/').filter(|s| !s.is_empty()) {
                if segment.starts_with('{') && segment.ends_with('}') {
                    let value = params.next().ok_or_else(|| {
                        ApiError::network(self.locale, format!("no value for {segment} in {route}"))
                    })?;
                    segments.push(value);
                } else {
                    segments.push(segment);
                }
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can unwrap

    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new(ApiClientConfig::new("http://localhost:8000")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
        assert_eq!(client.locale(), Locale::PtBr);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ApiClientConfig::new("http://example.test/").with_locale(Locale::En);
        let client = ApiClient::new(config).unwrap();
        assert_eq!(client.base_url(), "http://example.test/api");
        assert_eq!(client.locale(), Locale::En);
    }

    #[test]
    fn test_config_defaults() {
        let config = ApiClientConfig::new("http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.locale, Locale::PtBr);

        let config = config.with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_route_params_are_single_segments() {
        let client = ApiClient::new(ApiClientConfig::new("http://example.test")).unwrap();

        let url = client
            .url_for("/operadoras/{cnpj}/despesas", &["12.345.678/0001-95"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://example.test/api/operadoras/12.345.678%2F0001-95/despesas"
        );

        let url = client.url_for("/operadoras/{cnpj}", &["123?uf=SP"]).unwrap();
        assert_eq!(url.path(), "/api/operadoras/123%3Fuf=SP");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_missing_route_param_is_rejected() {
        let client = ApiClient::new(ApiClientConfig::new("http://example.test")).unwrap();
        let error = client.url_for("/operadoras/{cnpj}", &[]).unwrap_err();
        assert!(error.is_network());
    }
}
