//! HTTP client for the remote assistants service.
//!
//! The client is an explicitly constructed handle: it owns its own
//! `reqwest::Client` and carries no process-wide state, so every consumer
//! decides its lifetime and configuration.

pub mod http;

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::StrandConfig;
use crate::error::{Result, StrandError};
use crate::types::{Assistant, Message, MessageInput, Run, Thread, ToolOutput, ToolResources};

use http::{assistants_headers, status_to_error};

const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Parameters for creating an assistant definition.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAssistant {
    pub name: String,
    pub instructions: String,
    pub model: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_resources: Option<ToolResources>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
}

/// Parameters for starting a run on a thread.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRun {
    pub assistant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_instructions: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageList {
    data: Vec<Message>,
}

/// Handle to the remote assistants service.
pub struct AssistantsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    poll_interval: Duration,
}

impl AssistantsClient {
    /// Build a client from config. Fails when no API key is configured.
    pub fn new(config: &StrandConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| StrandError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            api_key: config.api_key()?.to_string(),
            base_url: config.base_url().to_string(),
            model: config.model().to_string(),
            poll_interval: config.poll_interval(),
        })
    }

    /// Model used for new assistant definitions.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .http
            .post(&url)
            .headers(assistants_headers(&self.api_key))
            .json(body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }
        Ok(resp.json().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .http
            .get(&url)
            .headers(assistants_headers(&self.api_key))
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }
        Ok(resp.json().await?)
    }

    /// Create an assistant definition.
    pub async fn create_assistant(&self, params: &CreateAssistant) -> Result<Assistant> {
        debug!(name = %params.name, model = %params.model, "create assistant");
        self.post_json("/assistants", &serde_json::to_value(params)?)
            .await
    }

    /// Create a thread seeded with messages.
    pub async fn create_thread(
        &self,
        messages: &[MessageInput],
        metadata: Option<&HashMap<String, String>>,
    ) -> Result<Thread> {
        let mut body = serde_json::json!({ "messages": messages });
        if let Some(metadata) = metadata {
            body["metadata"] = serde_json::to_value(metadata)?;
        }
        self.post_json("/threads", &body).await
    }

    /// Append a message to an existing thread.
    pub async fn create_message(&self, thread_id: &str, message: &MessageInput) -> Result<Message> {
        self.post_json(
            &format!("/threads/{thread_id}/messages"),
            &serde_json::to_value(message)?,
        )
        .await
    }

    /// Update thread metadata. Only metadata and tool resources are mutable
    /// on a thread; everything else is service-owned.
    pub async fn update_thread(
        &self,
        thread_id: &str,
        metadata: &HashMap<String, String>,
    ) -> Result<Thread> {
        self.post_json(
            &format!("/threads/{thread_id}"),
            &serde_json::json!({ "metadata": metadata }),
        )
        .await
    }

    /// Start a run on a thread.
    pub async fn create_run(&self, thread_id: &str, params: &CreateRun) -> Result<Run> {
        debug!(thread_id, assistant_id = %params.assistant_id, "create run");
        self.post_json(
            &format!("/threads/{thread_id}/runs"),
            &serde_json::to_value(params)?,
        )
        .await
    }

    /// Fetch the current snapshot of a run.
    pub async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.get_json(&format!("/threads/{thread_id}/runs/{run_id}"))
            .await
    }

    /// Submit a batch of tool outputs for a paused run.
    pub async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: &[ToolOutput],
    ) -> Result<Run> {
        debug!(thread_id, run_id, count = outputs.len(), "submit tool outputs");
        self.post_json(
            &format!("/threads/{thread_id}/runs/{run_id}/submit_tool_outputs"),
            &serde_json::json!({ "tool_outputs": outputs }),
        )
        .await
    }

    /// List a thread's messages in the service's own ordering (newest first).
    pub async fn list_messages(&self, thread_id: &str) -> Result<Vec<Message>> {
        let list: MessageList = self
            .get_json(&format!("/threads/{thread_id}/messages"))
            .await?;
        Ok(list.data)
    }

    /// Sleep one poll interval, or bail out when the token is cancelled.
    pub async fn wait_poll_interval(&self, cancel: &CancellationToken) -> Result<()> {
        tokio::select! {
            _ = cancel.cancelled() => Err(StrandError::Canceled),
            _ = time::sleep(self.poll_interval) => Ok(()),
        }
    }

    /// Re-fetch a run until it leaves its transient statuses.
    pub async fn poll_run_until_settled(
        &self,
        mut run: Run,
        cancel: &CancellationToken,
    ) -> Result<Run> {
        while run.status.is_transient() {
            self.wait_poll_interval(cancel).await?;
            run = self.retrieve_run(&run.thread_id, &run.id).await?;
        }
        Ok(run)
    }

    /// Start a run and block until its first non-transient status.
    pub async fn create_run_and_poll(
        &self,
        thread_id: &str,
        params: &CreateRun,
        cancel: &CancellationToken,
    ) -> Result<Run> {
        let run = self.create_run(thread_id, params).await?;
        self.poll_run_until_settled(run, cancel).await
    }

    /// Submit tool outputs and block until the next non-transient status.
    pub async fn submit_tool_outputs_and_poll(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: &[ToolOutput],
        cancel: &CancellationToken,
    ) -> Result<Run> {
        let run = self.submit_tool_outputs(thread_id, run_id, outputs).await?;
        self.poll_run_until_settled(run, cancel).await
    }
}

impl std::fmt::Debug for AssistantsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantsClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}
