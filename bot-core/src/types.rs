//! Core types: user, chat, message, handler response, and Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identity (id, username, first name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl User {
    /// Name to address the user by: first name, then @username, then the id.
    pub fn display_name(&self) -> String {
        self.first_name
            .clone()
            .or_else(|| self.username.as_ref().map(|u| format!("@{}", u)))
            .unwrap_or_else(|| format!("user {}", self.id))
    }
}

/// Chat (group or private) identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
}

impl Chat {
    pub fn is_private(&self) -> bool {
        self.chat_type == "private"
    }
}

/// A single incoming text message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Builds a message stamped with the current time.
    pub fn new(id: impl Into<String>, user: User, chat: Chat, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user,
            chat,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// Handler result. `Reply(text)` carries the response body back to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop; no response body.
    Stop,
    /// Not for this handler.
    Ignore,
    /// Stop and send this text back to the chat.
    Reply(String),
}

/// Message handler with optional before / handle / after phases.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to skip handling.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}
