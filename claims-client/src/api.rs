use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{Instrument, error, info};
use uuid::Uuid;

use crate::{
    config::ClientConfig,
    error::{ClaimsError, Result},
    model::{Claim, ClaimStatus, ErrorBody, NewClaim, StatusUpdate},
};

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Calls the claims backend exposes
#[async_trait]
pub trait ClaimsApi: Send + Sync {
    /// `GET /claims/`
    async fn list_claims(&self) -> Result<Vec<Claim>>;

    /// `GET /claims/{id}`
    async fn get_claim(&self, id: i64) -> Result<Claim>;

    /// `POST /claims/`
    async fn create_claim(&self, claim: &NewClaim) -> Result<Claim>;

    /// `PUT /claims/{id}/validate`. The backend decides the resulting status.
    async fn validate_claim(&self, id: i64) -> Result<Claim>;

    /// `PUT /claims/{id}/status`
    async fn update_status(&self, id: i64, status: &ClaimStatus) -> Result<Claim>;
}

/// reqwest-backed implementation of [`ClaimsApi`]
#[derive(Clone, Debug)]
pub struct HttpClaimsApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClaimsApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    /// Send a request tagged with a fresh correlation id and decode the answer
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<T> {
        let correlation_id = Uuid::new_v4().to_string();
        let span = tracing::info_span!(
            "claims_request",
            method = %method,
            path = %path,
            correlation_id = %correlation_id
        );

        let request =
            build(self.request(method, path)).header(CORRELATION_ID_HEADER, &correlation_id);

        async move {
            let response = request.send().await.map_err(|e| {
                error!(error = %e, "Request failed before a response arrived");
                ClaimsError::Transport(e)
            })?;
            decode(response).await
        }
        .instrument(span)
        .await
    }
}

/// Turn a response into `T`, or into an error carrying the server's `detail`.
/// An absent or empty `detail` falls back to the status text.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let detail = match response.json::<ErrorBody>().await {
            Ok(ErrorBody {
                detail: Some(detail),
            }) if !detail.is_empty() => detail,
            _ => status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_str().to_string()),
        };
        error!(status = status.as_u16(), detail = %detail, "Backend rejected request");
        return Err(ClaimsError::Api {
            status: status.as_u16(),
            detail,
        });
    }

    info!(status = status.as_u16(), "Request completed");
    Ok(response.json::<T>().await?)
}

#[async_trait]
impl ClaimsApi for HttpClaimsApi {
    async fn list_claims(&self) -> Result<Vec<Claim>> {
        self.send(Method::GET, "/claims/", |req| req).await
    }

    async fn get_claim(&self, id: i64) -> Result<Claim> {
        self.send(Method::GET, &format!("/claims/{id}"), |req| req).await
    }

    async fn create_claim(&self, claim: &NewClaim) -> Result<Claim> {
        let idempotency_key = Uuid::new_v4().to_string();
        self.send(Method::POST, "/claims/", |req| {
            req.header(IDEMPOTENCY_KEY_HEADER, idempotency_key).json(claim)
        })
        .await
    }

    async fn validate_claim(&self, id: i64) -> Result<Claim> {
        self.send(Method::PUT, &format!("/claims/{id}/validate"), |req| req)
            .await
    }

    async fn update_status(&self, id: i64, status: &ClaimStatus) -> Result<Claim> {
        let body = StatusUpdate {
            status: status.clone(),
        };
        self.send(Method::PUT, &format!("/claims/{id}/status"), |req| {
            req.json(&body)
        })
        .await
    }
}
