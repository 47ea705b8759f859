//! HTTP client for the AI service.

use std::time::Duration;

use reqwest::multipart::Form;
use tracing::{debug, instrument};

use crate::error::AiError;
use crate::retry::{RetryPolicy, with_retry};
use crate::types::{EvaluationItem, EvaluationResponse, EvaluationResult, ExtractedAssessment};

/// Client for the `extract` and `evaluate` endpoints.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct AiClient {
    base_url: String,
    http: reqwest::Client,
    timeout_secs: u64,
    extract_policy: RetryPolicy,
    evaluate_policy: RetryPolicy,
}

impl AiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AiError::Client(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            timeout_secs: timeout.as_secs(),
            extract_policy: RetryPolicy::extraction(),
            evaluate_policy: RetryPolicy::evaluation(),
        })
    }

    /// Replaces the per-call-site retry policies.
    pub fn with_policies(mut self, extract: RetryPolicy, evaluate: RetryPolicy) -> Self {
        self.extract_policy = extract;
        self.evaluate_policy = evaluate;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends document text to `POST {base}/extract/` as the multipart field `content`.
    #[instrument(skip(self, content), fields(len = content.len()))]
    pub async fn extract(&self, content: &str) -> Result<ExtractedAssessment, AiError> {
        let url = format!("{}/extract/", self.base_url);
        with_retry(self.extract_policy, "extract", || {
            let form = Form::new().text("content", content.to_owned());
            let request = self.http.post(&url).multipart(form);
            async move {
                let response = request.send().await.map_err(|e| self.transport_error(e))?;
                let response = ensure_success(response).await?;
                response
                    .json::<ExtractedAssessment>()
                    .await
                    .map_err(|e| AiError::MalformedResponse(e.to_string()))
            }
        })
        .await
    }

    /// Scores `items` with `model` via `POST {base}/evaluate/{model}`.
    ///
    /// Returns one result per item, in request order. An empty batch makes
    /// no request.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub async fn evaluate(
        &self,
        model: &str,
        items: &[EvaluationItem],
    ) -> Result<Vec<EvaluationResult>, AiError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/evaluate/{}", self.base_url, model);
        let results = with_retry(self.evaluate_policy, "evaluate", || {
            let request = self.http.post(&url).json(items);
            async move {
                let response = request.send().await.map_err(|e| self.transport_error(e))?;
                let response = ensure_success(response).await?;
                response
                    .json::<EvaluationResponse>()
                    .await
                    .map(|body| body.results)
                    .map_err(|e| AiError::MalformedResponse(e.to_string()))
            }
        })
        .await?;

        if results.len() != items.len() {
            return Err(AiError::ResultCountMismatch {
                expected: items.len(),
                actual: results.len(),
            });
        }
        debug!(model, count = results.len(), "evaluation complete");
        Ok(results)
    }

    fn transport_error(&self, err: reqwest::Error) -> AiError {
        if err.is_timeout() {
            AiError::Timeout(self.timeout_secs)
        } else {
            AiError::Network(err.to_string())
        }
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(AiError::Api {
        status: status.as_u16(),
        message,
    })
}
