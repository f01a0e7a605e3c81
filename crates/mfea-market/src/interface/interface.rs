//! Bot response model shared by every front end

use serde::{Deserialize, Serialize};

/// Where a response is going to be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BotPlatform {
    /// Terminal output
    Cli,

    /// Chat client rendering Markdown embeds
    Chat,
}

/// Bot response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotResponse {
    /// Rendered content
    pub content: String,

    /// Response type
    pub response_type: ResponseType,

    /// Only visible to the user who asked
    pub ephemeral: bool,

    /// Buttons offered with the response
    pub actions: Vec<SuggestedAction>,

    /// Structured payload for platforms that render their own view
    pub metadata: serde_json::Value,
}

/// Type of bot response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseType {
    /// Plain text
    Text,

    /// Rich embed (title, fields, footer)
    Embed,

    /// Error message
    Error,
}

/// Button attached to a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedAction {
    /// Button label
    pub label: String,

    /// Command id or URL
    pub action: String,

    pub action_type: ActionType,
}

/// Type of action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    /// Runs a bot command by id
    Command,

    /// Opens an external link
    Link,
}

impl BotResponse {
    fn with_type(content: impl Into<String>, response_type: ResponseType) -> Self {
        Self {
            content: content.into(),
            response_type,
            ephemeral: false,
            actions: Vec::new(),
            metadata: serde_json::Value::Null,
        }
    }

    /// Create a simple text response
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_type(content, ResponseType::Text)
    }

    /// Create an embed response
    pub fn embed(content: impl Into<String>) -> Self {
        Self::with_type(content, ResponseType::Embed)
    }

    /// Create an error response
    pub fn error(content: impl Into<String>) -> Self {
        Self::with_type(content, ResponseType::Error)
    }

    /// Show only to the requesting user
    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    /// Add a button that runs a command
    pub fn with_action(mut self, label: impl Into<String>, command_id: impl Into<String>) -> Self {
        self.actions.push(SuggestedAction {
            label: label.into(),
            action: command_id.into(),
            action_type: ActionType::Command,
        });
        self
    }

    /// Add a button that opens a URL
    pub fn with_link(mut self, label: impl Into<String>, url: impl Into<String>) -> Self {
        self.actions.push(SuggestedAction {
            label: label.into(),
            action: url.into(),
            action_type: ActionType::Link,
        });
        self
    }

    /// Set metadata
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn is_error(&self) -> bool {
        self.response_type == ResponseType::Error
    }
}

impl std::fmt::Display for BotPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotPlatform::Cli => write!(f, "CLI"),
            BotPlatform::Chat => write!(f, "Chat"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_response_creation() {
        let response = BotResponse::text("Bot is ready!").ephemeral();
        assert_eq!(response.response_type, ResponseType::Text);
        assert_eq!(response.content, "Bot is ready!");
        assert!(response.ephemeral);
        assert!(!response.is_error());
    }

    #[test]
    fn test_bot_response_builder() {
        let response = BotResponse::embed("**MFEA**")
            .with_action("Check Market Data", "check")
            .with_link("Links", "https://testfol.io");

        assert_eq!(response.actions.len(), 2);
        assert_eq!(response.actions[0].action_type, ActionType::Command);
        assert_eq!(response.actions[1].action, "https://testfol.io");
        assert_eq!(response.actions[1].action_type, ActionType::Link);
        assert!(!response.ephemeral);
    }

    #[test]
    fn test_platform_display() {
        assert_eq!(BotPlatform::Cli.to_string(), "CLI");
        assert_eq!(BotPlatform::Chat.to_string(), "Chat");
    }
}
