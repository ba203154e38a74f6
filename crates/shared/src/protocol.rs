use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{domain::MessageId, error::DomainError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageOrigin {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub path: PathBuf,
}

impl ImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub message_id: MessageId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    pub origin: MessageOrigin,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::new(Some(text.into()), None, MessageOrigin::User)
    }

    pub fn user_image(image: ImageRef) -> Self {
        Self::new(None, Some(image), MessageOrigin::User)
    }

    pub fn bot_text(text: impl Into<String>) -> Self {
        Self::new(Some(text.into()), None, MessageOrigin::Bot)
    }

    fn new(content: Option<String>, image: Option<ImageRef>, origin: MessageOrigin) -> Self {
        Self {
            message_id: MessageId::new(),
            content,
            image,
            origin,
            sent_at: Utc::now(),
        }
    }

    pub fn is_bot(&self) -> bool {
        self.origin == MessageOrigin::Bot
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawClassification")]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

#[derive(Deserialize)]
struct RawClassification {
    label: String,
    confidence: f32,
}

impl TryFrom<RawClassification> for Classification {
    type Error = DomainError;

    fn try_from(raw: RawClassification) -> Result<Self, Self::Error> {
        Classification::new(raw.label, raw.confidence)
    }
}

impl Classification {
    pub fn new(label: impl Into<String>, confidence: f32) -> Result<Self, DomainError> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(DomainError::ConfidenceOutOfRange(confidence));
        }
        Ok(Self {
            label: label.into(),
            confidence,
        })
    }

    pub fn percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}

/// Results posted back to the owner of a chat session by background tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ChatEvent {
    BotReplied {
        in_reply_to: MessageId,
        message: ChatMessage,
    },
}
