// src/chat.rs

use crate::{
    api::ApiClient,
    errors::{PlatformError, PlatformResult},
    models::{BotReply, ChatTarget, Message},
    router::{KeywordClassifier, MessageClassifier},
};
use tracing::{debug, error, info, warn};

/// Shown in place of a bot answer whenever a send fails for any reason.
pub const FALLBACK_REPLY: &str =
    "Sorry, I am having trouble connecting to the server. Please try again later.";

/// Request body captured at the moment the user hits send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Target A gets every message so far, the new one last.
    History(Vec<Message>),
    /// Target B only ever sees the latest text.
    Query(String),
}

/// What a dispatched send produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub message: Message,
    /// `false` when `message` is the fallback standing in for a failed call.
    pub delivered: bool,
}

impl Delivery {
    pub fn answered(message: Message) -> Self {
        Self {
            message,
            delivered: true,
        }
    }

    pub fn failed() -> Self {
        Self {
            message: Message::bot(FALLBACK_REPLY),
            delivered: false,
        }
    }
}

/// A send that has been recorded in the transcript but not answered yet.
#[derive(Debug, Clone)]
pub struct PendingSend {
    pub target: ChatTarget,
    pub outbound: Outbound,
}

impl PendingSend {
    /// Performs the network call. Never fails: errors turn into the
    /// fallback message after being logged.
    pub async fn dispatch(self, client: &ApiClient) -> Delivery {
        match self.request(client).await {
            Ok(text) => Delivery::answered(Message::bot(text)),
            Err(e) => {
                error!("Error sending message to backend {}: {}", self.target, e);
                Delivery::failed()
            }
        }
    }

    async fn request(&self, client: &ApiClient) -> PlatformResult<String> {
        let (reply, endpoint) = match &self.outbound {
            Outbound::History(messages) => (
                client.chat_with_history(messages).await?,
                client.chat_endpoint(),
            ),
            Outbound::Query(query) => (client.ask(query).await?, client.ask_endpoint()),
        };
        log_reply_details(self.target, &reply);

        reply
            .text()
            .map(str::to_string)
            .ok_or(PlatformError::EmptyReply(endpoint))
    }
}

fn log_reply_details(target: ChatTarget, reply: &BotReply) {
    for note in reply_notes(reply) {
        debug!("backend {} {}", target, note);
    }
    if reply.success == Some(false) {
        warn!("backend {} flagged its reply as unsuccessful", target);
    }
    if reply.document_ready == Some(true) {
        info!("backend {} reports a generated document is ready", target);
    }
}

/// Side information a backend attaches to an answer.
fn reply_notes(reply: &BotReply) -> Vec<String> {
    let mut notes = Vec::new();
    if let Some(source) = &reply.source {
        notes.push(format!(
            "answered from {} (confident: {:?})",
            source, reply.confident
        ));
    }
    if !reply.suggestions.is_empty() {
        notes.push(format!("suggested: {}", reply.suggestions.join(" | ")));
    }
    if reply.show_fallback_button == Some(true) {
        notes.push("offered the \"no answer\" fallback button".to_string());
    }
    if let Some(success) = reply.success {
        notes.push(format!("reported success: {}", success));
    }
    notes
}

/// Owns one conversation: the append-only transcript and the input buffer.
pub struct ChatSession {
    transcript: Vec<Message>,
    input: String,
    pending: usize,
    classifier: Box<dyn MessageClassifier>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self::with_classifier(Box::new(KeywordClassifier::default()))
    }

    pub fn with_classifier(classifier: Box<dyn MessageClassifier>) -> Self {
        Self {
            transcript: Vec::new(),
            input: String::new(),
            pending: 0,
            classifier,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Sends still waiting for an answer.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Records the user's message and snapshots the request for it.
    ///
    /// Returns `None` (and changes nothing) when the input is blank.
    pub fn begin_send(&mut self) -> Option<PendingSend> {
        if self.input.trim().is_empty() {
            return None;
        }

        let text = std::mem::take(&mut self.input);
        self.transcript.push(Message::user(text.clone()));

        let target = self.classifier.classify(&text);
        let outbound = match target {
            ChatTarget::A => Outbound::History(self.transcript.clone()),
            ChatTarget::B => Outbound::Query(text),
        };
        self.pending += 1;

        debug!(
            "routing message #{} to backend {}",
            self.transcript.len(),
            target
        );
        Some(PendingSend { target, outbound })
    }

    /// Appends the answer for a send started with [`Self::begin_send`].
    /// Answers land in arrival order, not send order.
    pub fn complete(&mut self, reply: Message) {
        self.pending = self.pending.saturating_sub(1);
        self.transcript.push(reply);
    }

    /// Full send cycle for callers that can wait for the answer inline.
    /// Returns `false` when `text` was blank and nothing happened.
    pub async fn send_message(&mut self, client: &ApiClient, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.set_input(text);
        match self.begin_send() {
            Some(pending) => {
                let delivery = pending.dispatch(client).await;
                self.complete(delivery.message);
                true
            }
            None => false,
        }
    }
}
