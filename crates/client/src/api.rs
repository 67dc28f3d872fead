//! REST client for the `/testimonials` endpoints, built on [`reqwest`].

use institute_core::types::DbId;
use institute_db::models::testimonial::{CreateTestimonial, Testimonial, UpdateTestimonial};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ClientConfig;

/// Errors from the testimonial client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A required environment variable is missing or blank.
    #[error("{0} must be set")]
    Config(&'static str),

    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        /// The service's `error` string, or the raw body if it had none.
        message: String,
    },
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct DeleteBody {
    #[allow(dead_code)]
    success: bool,
}

/// HTTP client for one testimonial service deployment.
#[derive(Debug, Clone)]
pub struct TestimonialClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl TestimonialClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Reuse an existing [`reqwest::Client`] for connection pooling.
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    /// Active testimonials in display order.
    pub async fn list(&self) -> Result<Vec<Testimonial>, ClientError> {
        let response = self.request(reqwest::Method::GET, "").send().await?;
        Self::parse_response(response).await
    }

    /// Active, featured testimonials in display order.
    pub async fn featured(&self) -> Result<Vec<Testimonial>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/featured")
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Featured feed for a public page. Any failure is logged and yields an
    /// empty list, so the hosting section renders nothing.
    pub async fn featured_or_empty(&self) -> Vec<Testimonial> {
        match self.featured().await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch featured testimonials");
                Vec::new()
            }
        }
    }

    pub async fn create(&self, input: &CreateTestimonial) -> Result<Testimonial, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "")
            .json(input)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    pub async fn update(
        &self,
        id: DbId,
        input: &UpdateTestimonial,
    ) -> Result<Testimonial, ClientError> {
        let response = self
            .request(reqwest::Method::PUT, &format!("/{id}"))
            .json(input)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Soft delete. The service reports success even for unknown ids.
    pub async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/{id}"))
            .send()
            .await?;
        Self::parse_response::<DeleteBody>(response).await?;
        Ok(())
    }

    // ---- private helpers ----

    fn request(&self, method: reqwest::Method, suffix: &str) -> reqwest::RequestBuilder {
        self.client
            .request(
                method,
                format!("{}/testimonials{suffix}", self.config.base_url),
            )
            .bearer_auth(&self.config.anon_key)
    }

    /// Turn a non-2xx response into [`ClientError::Api`], preferring the
    /// service's `error` field over the raw body.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
