use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::http::StatusCode;
use reqwest::{Client, Url, header::CONTENT_TYPE};

use crate::classifier::Classifier;
use crate::config::DownstreamConfig;
use crate::types::{ClassifyPayload, DownstreamReply};

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Classifier backed by a remote HTTP service.
///
/// Holds a single pooled client; clones of the wrapping `Arc` share it.
pub struct HttpClassifier {
    client: Client,
    url: Url,
}

impl HttpClassifier {
    pub fn new(config: DownstreamConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .context("Failed to build downstream HTTP client")?;

        Ok(Self {
            client,
            url: config.url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    #[tracing::instrument(skip(self, payload), fields(url = %self.url, tweet_count = payload.tweets.len()))]
    async fn classify(&self, payload: ClassifyPayload) -> Result<DownstreamReply> {
        let body = serde_json::to_vec(&payload).context("Failed to encode classify payload")?;

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, JSON_UTF8)
            .body(body)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", self.url))?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = response
            .text()
            .await
            .context("Failed to read downstream response body")?;

        tracing::debug!(%status, body_len = body.len(), "Downstream replied");
        Ok(DownstreamReply { status, body })
    }
}
