use crate::{
    config::Config,
    errors::{PlatformError, PlatformResult},
    logging::log_api_call,
    models::{
        Analytics, AnalyticsEnvelope, ApiCallLog, BotReply, HistoryRequest, Message,
        QueryRequest, Solution,
    },
};
use chrono::Utc;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

pub const CHAT_PATH: &str = "/api/chat";
pub const ASK_PATH: &str = "/ask";
pub const ANALYTICS_PATH: &str = "/api/analytics";

/// HTTP client for the two chat backends, the analytics API and remote
/// album documents. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    chatbot_a_url: String,
    chatbot_b_url: String,
    call_log: Option<UnboundedSender<ApiCallLog>>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self::from_urls(&config.chatbot_a_url, &config.chatbot_b_url)
    }

    pub fn from_urls(chatbot_a_url: &str, chatbot_b_url: &str) -> Self {
        Self {
            http: Client::new(),
            chatbot_a_url: chatbot_a_url.trim_end_matches('/').to_string(),
            chatbot_b_url: chatbot_b_url.trim_end_matches('/').to_string(),
            call_log: None,
        }
    }

    /// Mirrors every [`ApiCallLog`] into `sender` as well as the log file.
    pub fn with_call_log(mut self, sender: UnboundedSender<ApiCallLog>) -> Self {
        self.call_log = Some(sender);
        self
    }

    pub fn chat_endpoint(&self) -> String {
        format!("{}{}", self.chatbot_a_url, CHAT_PATH)
    }

    pub fn ask_endpoint(&self) -> String {
        format!("{}{}", self.chatbot_b_url, ASK_PATH)
    }

    pub fn analytics_endpoint(&self) -> String {
        format!("{}{}", self.chatbot_a_url, ANALYTICS_PATH)
    }

    /// `POST {A}/api/chat` with the full transcript.
    pub async fn chat_with_history(&self, messages: &[Message]) -> PlatformResult<BotReply> {
        let url = self.chat_endpoint();
        let body = HistoryRequest {
            messages: messages.to_vec(),
        };
        let summary = format!("chat A ({} messages)", messages.len());
        self.execute(self.http.post(&url).json(&body), &url, summary)
            .await
    }

    /// `POST {B}/ask` with just the query text.
    pub async fn ask(&self, query: &str) -> PlatformResult<BotReply> {
        let url = self.ask_endpoint();
        let body = QueryRequest {
            query: query.to_string(),
        };
        self.execute(self.http.post(&url).json(&body), &url, "ask B".to_string())
            .await
    }

    pub async fn fetch_analytics(&self) -> PlatformResult<Analytics> {
        let url = self.analytics_endpoint();
        let envelope: AnalyticsEnvelope = self
            .execute(self.http.get(&url), &url, "analytics".to_string())
            .await?;
        Ok(envelope.data)
    }

    pub async fn fetch_solutions(&self, url: &str) -> PlatformResult<Vec<Solution>> {
        self.execute(self.http.get(url), url, "album".to_string())
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
        request_summary: String,
    ) -> PlatformResult<T> {
        let start_time = Instant::now();
        let result = request.send().await;
        let elapsed = start_time.elapsed().as_millis();

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.record(endpoint, request_summary, 0, elapsed);
                return Err(PlatformError::transport(endpoint, e));
            }
        };

        let status = response.status();
        self.record(endpoint, request_summary, status.as_u16(), elapsed);

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("{} returned {}: {}", endpoint, status, error_text);
            return Err(PlatformError::Http {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PlatformError::transport(endpoint, e))?;
        debug!("{} answered with {} bytes", endpoint, bytes.len());

        serde_json::from_slice(&bytes).map_err(|e| {
            PlatformError::decode_error(format!("{} sent an unexpected body: {}", endpoint, e))
        })
    }

    fn record(&self, endpoint: &str, request_summary: String, status: u16, elapsed_ms: u128) {
        let entry = ApiCallLog {
            timestamp: Utc::now(),
            endpoint: endpoint.to_string(),
            request_summary,
            response_status: status,
            response_time_ms: elapsed_ms,
        };
        log_api_call(&entry);
        if let Some(sender) = &self.call_log {
            // The receiver goes away when the UI shuts down; nothing to do then.
            let _ = sender.send(entry);
        }
    }
}
