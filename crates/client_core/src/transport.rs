//! Transport seam between the request controller and the prediction service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use shared::protocol::{PredictRequest, ServiceInfo};
use url::Url;

use crate::error::{describe_chain, TransportError};

/// Status and raw body of a response; interpretation is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait PredictionTransport: Send + Sync {
    async fn post_prediction(
        &self,
        payload: &PredictRequest,
    ) -> Result<TransportResponse, TransportError>;

    fn endpoint(&self) -> String;
}

pub struct HttpPredictionTransport {
    http: Client,
    base_url: Url,
}

impl HttpPredictionTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(&format!("{trimmed}/")).map_err(|err| {
            TransportError::InvalidEndpoint {
                url: base_url.to_string(),
                reason: err.to_string(),
            }
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn join(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|err| TransportError::InvalidEndpoint {
                url: format!("{}{path}", self.base_url),
                reason: err.to_string(),
            })
    }

    /// Fetches the document the service publishes at its root.
    pub async fn service_info(&self) -> Result<ServiceInfo, TransportError> {
        let url = self.join("")?;
        let res = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?;
        res.json::<ServiceInfo>()
            .await
            .map_err(|err| TransportError::Body(describe_chain(&err)))
    }
}

#[async_trait]
impl PredictionTransport for HttpPredictionTransport {
    async fn post_prediction(
        &self,
        payload: &PredictRequest,
    ) -> Result<TransportResponse, TransportError> {
        let url = self.join("predict")?;
        let res = self
            .http
            .post(url)
            .header(header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await?;
        let status = res.status().as_u16();
        let body = res
            .text()
            .await
            .map_err(|err| TransportError::Body(describe_chain(&err)))?;
        Ok(TransportResponse { status, body })
    }

    fn endpoint(&self) -> String {
        format!("{}predict", self.base_url)
    }
}
