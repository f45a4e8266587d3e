//! Judge0 batch client.
//!
//! Submits a whole battery in one `POST /submissions/batch` and polls
//! `GET /submissions/batch?tokens=...` with bounded backoff until every run
//! is terminal.

use algoarena_core::domain::{
    JudgeClient, JudgeError, Language, SubmissionRequest, SubmissionToken, Verdict,
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::protocol::{BatchStatus, BatchSubmission, CreatedSubmission, SubmissionPayload};
use crate::{JudgeConfig, PollPolicy, judge0_language_id};

const API_KEY_HEADER: &str = "x-rapidapi-key";
const API_HOST_HEADER: &str = "x-rapidapi-host";

pub struct Judge0Client {
    client: Client,
    base_url: String,
    poll: PollPolicy,
}

impl Judge0Client {
    pub fn new(config: &JudgeConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            headers.insert(
                API_KEY_HEADER,
                HeaderValue::from_str(key).context("judge api_key is not a valid header value")?,
            );
        }
        if let Some(host) = &config.api_host {
            headers.insert(
                API_HOST_HEADER,
                HeaderValue::from_str(host).context("judge api_host is not a valid header value")?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()
            .context("failed to build judge http client")?;

        info!(
            base_url = %config.base_url,
            max_poll_attempts = config.max_poll_attempts,
            "judge client configured"
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            poll: config.poll_policy(),
        })
    }

    fn batch_url(&self) -> String {
        format!("{}/submissions/batch", self.base_url)
    }

    async fn fetch_statuses(&self, tokens: &[String]) -> Result<Vec<Verdict>, JudgeError> {
        let url = format!(
            "{}?tokens={}&base64_encoded=false&fields=token,status_id",
            self.batch_url(),
            tokens.join(",")
        );
        let response = self.client.get(url).send().await.map_err(unavailable)?;
        let status: BatchStatus = decode(response).await?;

        if status.submissions.len() != tokens.len() {
            return Err(JudgeError::Protocol(format!(
                "asked for {} results, judge returned {}",
                tokens.len(),
                status.submissions.len()
            )));
        }

        Ok(status
            .submissions
            .into_iter()
            .map(|entry| Verdict {
                token: entry.token,
                status_id: entry.status_id,
            })
            .collect())
    }
}

#[async_trait]
impl JudgeClient for Judge0Client {
    fn resolve_language_id(&self, language: &str) -> Result<u32, JudgeError> {
        Language::from_label(language)
            .map(judge0_language_id)
            .ok_or_else(|| JudgeError::UnsupportedLanguage(language.to_string()))
    }

    async fn submit_batch(
        &self,
        requests: &[SubmissionRequest],
    ) -> Result<Vec<SubmissionToken>, JudgeError> {
        let body = BatchSubmission {
            submissions: requests.iter().map(SubmissionPayload::from).collect(),
        };

        debug!(runs = requests.len(), "submitting batch to judge");
        let response = self
            .client
            .post(format!("{}?base64_encoded=false", self.batch_url()))
            .json(&body)
            .send()
            .await
            .map_err(unavailable)?;

        let created: Vec<CreatedSubmission> = decode(response).await?;
        if created.is_empty() {
            return Err(JudgeError::Protocol(
                "judge accepted the batch but returned no submissions".to_string(),
            ));
        }

        Ok(created
            .into_iter()
            .map(|entry| SubmissionToken { token: entry.token })
            .collect())
    }

    async fn poll_results(&self, tokens: &[String]) -> Result<Vec<Verdict>, JudgeError> {
        for attempt in 1..=self.poll.max_attempts {
            let verdicts = self.fetch_statuses(tokens).await?;
            let pending = verdicts.iter().filter(|v| !v.is_terminal()).count();

            if pending == 0 {
                debug!(attempt, runs = verdicts.len(), "batch finished");
                return Ok(verdicts);
            }

            if attempt < self.poll.max_attempts {
                let delay = self.poll.delay_after(attempt);
                debug!(attempt, pending, ?delay, "batch still running");
                tokio::time::sleep(delay).await;
            }
        }

        warn!(
            attempts = self.poll.max_attempts,
            tokens = tokens.len(),
            "judge did not finish in time"
        );
        Err(JudgeError::Timeout {
            attempts: self.poll.max_attempts,
        })
    }
}

fn unavailable(err: reqwest::Error) -> JudgeError {
    JudgeError::Unavailable(err.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, JudgeError> {
    let status = response.status();
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        return Err(JudgeError::Unavailable(format!("judge responded with {status}")));
    }

    let body = response.bytes().await.map_err(unavailable)?;
    if !status.is_success() {
        return Err(JudgeError::Protocol(format!(
            "judge responded with {status}: {}",
            String::from_utf8_lossy(&body)
        )));
    }

    serde_json::from_slice(&body)
        .map_err(|err| JudgeError::Protocol(format!("malformed judge response: {err}")))
}
