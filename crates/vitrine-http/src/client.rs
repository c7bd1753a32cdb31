//! HTTP client implementation

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::{
    config::HttpConfig,
    error::{HttpError, Result},
    middleware::{RetryConfig, RetryMiddleware},
};

/// JSON-over-HTTP client with retries for idempotent GETs
pub struct HttpClient {
    inner: reqwest::Client,
    config: HttpConfig,
    retry: RetryMiddleware,
}

impl HttpClient {
    /// Create a new HTTP client with configuration
    pub fn new(config: HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .pool_idle_timeout(config.pool_idle_timeout);

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| HttpError::InvalidProxy(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let inner = builder
            .build()
            .map_err(|e| HttpError::BuildError(e.to_string()))?;

        let retry = RetryMiddleware::new(RetryConfig {
            max_retries: config.retry_count,
            initial_delay: config.retry_delay,
            ..Default::default()
        });

        Ok(Self {
            inner,
            config,
            retry,
        })
    }

    /// Create HTTP client with default configuration
    pub fn with_defaults() -> Result<Self> {
        Self::new(HttpConfig::default())
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// GET a JSON document, retrying transient failures
    pub async fn get_json<T: DeserializeOwned>(&self, url: &Url, bearer: Option<&str>) -> Result<T> {
        debug!("HTTP GET: {}", url);
        self.retry
            .execute(|| {
                let request = authorize(self.inner.request(Method::GET, url.clone()), bearer);
                async move { decode(send(request).await?).await }
            })
            .await
    }

    /// POST a JSON body and decode a JSON reply. Not retried.
    pub async fn post_json<B, T>(&self, url: &Url, body: &B, bearer: Option<&str>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("HTTP POST: {}", url);
        let request = authorize(self.inner.post(url.clone()).json(body), bearer);
        decode(send(request).await?).await
    }

    /// POST a urlencoded form and decode a JSON reply. Not retried.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        url: &Url,
        form: &[(&str, &str)],
    ) -> Result<T> {
        debug!("HTTP POST (form): {}", url);
        decode(send(self.inner.post(url.clone()).form(form)).await?).await
    }
}

fn authorize(request: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
    match bearer {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Parse a base URL, making sure relative joins keep its path
pub fn parse_base_url(base: &str) -> Result<Url> {
    let normalized = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    };
    Url::parse(&normalized).map_err(|e| HttpError::InvalidUrl(format!("{base}: {e}")))
}

async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request.send().await.map_err(HttpError::RequestFailed)?;

    if !response.status().is_success() {
        return Err(HttpError::HttpStatus {
            status: response.status(),
            message: response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string()),
        });
    }

    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await.map_err(HttpError::RequestFailed)?;
    serde_json::from_str(&body).map_err(|e| HttpError::Decode(e.to_string()))
}
