use std::{collections::HashSet, sync::Arc, time::Duration};

use anyhow::Result;
use classifier::ImageClassifier;
use shared::{
    domain::MessageId,
    protocol::{ChatEvent, ChatMessage, Classification, ImageRef},
};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::responder::LookupResponder;

pub const GREETING: &str = "Hi! I’m GreenKaki! Ask me where to recycle items! ♻️";
pub const TYPING_INDICATOR: &str = "GreenKaki is thinking...";
pub const CLASSIFICATION_APOLOGY: &str =
    "Sorry, I couldn't recognize that image. Try describing the item instead!";
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct ChatOptions {
    /// Pause before a text reply is delivered.
    pub reply_delay: Duration,
    pub min_confidence: f32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

/// Message log of one conversation.
///
/// The session is owned by a single event loop. Replies are produced by
/// background tasks and arrive on the receiver returned from [`ChatSession::new`];
/// the owner feeds them back through [`ChatSession::apply`].
pub struct ChatSession {
    responder: Arc<LookupResponder>,
    classifier: Arc<dyn ImageClassifier>,
    options: ChatOptions,
    messages: Vec<ChatMessage>,
    pending: HashSet<MessageId>,
    events_tx: mpsc::UnboundedSender<ChatEvent>,
}

impl ChatSession {
    pub fn new(
        responder: Arc<LookupResponder>,
        classifier: Arc<dyn ImageClassifier>,
        options: ChatOptions,
    ) -> (Self, mpsc::UnboundedReceiver<ChatEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let session = Self {
            responder,
            classifier,
            options,
            messages: vec![ChatMessage::bot_text(GREETING)],
            pending: HashSet::new(),
            events_tx,
        };
        (session, events_rx)
    }

    /// Logs the cleaned input and schedules the bot reply. Blank input is ignored.
    ///
    /// Must be called inside a tokio runtime.
    pub fn send_text(&mut self, input: &str) -> Option<MessageId> {
        let cleaned = input.trim().to_lowercase();
        if cleaned.is_empty() {
            return None;
        }

        let message = ChatMessage::user_text(cleaned.clone());
        let message_id = message.message_id;
        self.messages.push(message);
        self.pending.insert(message_id);

        let reply = self.responder.respond(&cleaned).to_string();
        let events_tx = self.events_tx.clone();
        let delay = self.options.reply_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            deliver(&events_tx, message_id, reply);
        });

        Some(message_id)
    }

    /// Logs the image and hands it to the classifier in the background.
    ///
    /// Must be called inside a tokio runtime.
    pub fn send_image(&mut self, image: ImageRef) -> MessageId {
        let message = ChatMessage::user_image(image.clone());
        let message_id = message.message_id;
        self.messages.push(message);
        self.pending.insert(message_id);

        let responder = self.responder.clone();
        let classifier = self.classifier.clone();
        let events_tx = self.events_tx.clone();
        let min_confidence = self.options.min_confidence;
        tokio::spawn(async move {
            let outcome = classifier.classify(&image).await;
            let reply = describe_classification(&responder, outcome, min_confidence);
            deliver(&events_tx, message_id, reply);
        });

        message_id
    }

    pub fn apply(&mut self, event: ChatEvent) {
        match event {
            ChatEvent::BotReplied {
                in_reply_to,
                message,
            } => {
                if !self.pending.remove(&in_reply_to) {
                    warn!(message_id = %in_reply_to.0, "reply for unknown message dropped");
                    return;
                }
                self.messages.push(message);
            }
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn is_bot_typing(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn suggestions(&self, input: &str) -> Vec<&str> {
        self.responder.suggestions(input)
    }
}

fn deliver(events_tx: &mpsc::UnboundedSender<ChatEvent>, in_reply_to: MessageId, reply: String) {
    let event = ChatEvent::BotReplied {
        in_reply_to,
        message: ChatMessage::bot_text(reply),
    };
    if events_tx.send(event).is_err() {
        debug!(message_id = %in_reply_to.0, "chat session closed before reply");
    }
}

pub fn describe_classification(
    responder: &LookupResponder,
    outcome: Result<Classification>,
    min_confidence: f32,
) -> String {
    let classification = match outcome {
        Ok(classification) => classification,
        Err(err) => {
            warn!(error = %err, "image classification failed");
            return CLASSIFICATION_APOLOGY.to_string();
        }
    };

    let label = &classification.label;
    let percent = classification.percent();
    let article = indefinite_article(label);
    if classification.confidence < min_confidence {
        return format!(
            "This might be {article} {label} ({percent}% sure), but I'm not confident. Try typing the item name!"
        );
    }

    let instruction = responder.respond(label);
    format!("That looks like {article} {label} ({percent}% sure). {instruction}")
}

fn indefinite_article(word: &str) -> &'static str {
    match word.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

#[cfg(test)]
#[path = "tests/chat_tests.rs"]
mod tests;
