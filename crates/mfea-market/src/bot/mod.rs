//! MFEA chat bot
//!
//! Answers mentions, button presses and slash commands with formatted
//! responses. Commands are dispatched through a [`CommandTable`].
//!
//! # Example
//!
//! ```rust,ignore
//! use mfea_market::bot::{BotConfig, MfeaBot};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let bot = MfeaBot::new(BotConfig::from_env()?)?;
//!     let response = bot.process_input("/check").await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod handlers;

use crate::config::MfeaConfig;
use crate::engine::MarketEvaluator;
use crate::error::Result;
use crate::interface::{BotPlatform, BotResponse, Formatter, FormatterFactory};

pub use commands::Command;
pub use handlers::{CommandTable, Handler, HandlerFuture};

/// Configuration for the bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Market evaluation configuration
    pub mfea_config: MfeaConfig,
    /// Welcome message
    pub welcome_message: String,
    /// Prompt prefix
    pub prompt: String,
    /// Rendering target
    pub platform: BotPlatform,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            mfea_config: MfeaConfig::default(),
            welcome_message: "MFEA Bot - type @MFEA for the menu or /help for commands"
                .to_string(),
            prompt: ">>> ".to_string(),
            platform: BotPlatform::Chat,
        }
    }
}

impl BotConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            mfea_config: MfeaConfig::from_env()?,
            ..Default::default()
        })
    }

    /// Create a builder
    pub fn builder() -> BotConfigBuilder {
        BotConfigBuilder::default()
    }
}

/// Builder for BotConfig
#[derive(Debug, Default)]
pub struct BotConfigBuilder {
    mfea_config: Option<MfeaConfig>,
    welcome_message: Option<String>,
    prompt: Option<String>,
    platform: Option<BotPlatform>,
}

impl BotConfigBuilder {
    /// Set market evaluation config
    pub fn mfea_config(mut self, config: MfeaConfig) -> Self {
        self.mfea_config = Some(config);
        self
    }

    /// Set welcome message
    pub fn welcome_message(mut self, msg: impl Into<String>) -> Self {
        self.welcome_message = Some(msg.into());
        self
    }

    /// Set prompt
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Set rendering target
    pub fn platform(mut self, platform: BotPlatform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Build the config
    pub fn build(self) -> BotConfig {
        let defaults = BotConfig::default();
        BotConfig {
            mfea_config: self.mfea_config.unwrap_or(defaults.mfea_config),
            welcome_message: self.welcome_message.unwrap_or(defaults.welcome_message),
            prompt: self.prompt.unwrap_or(defaults.prompt),
            platform: self.platform.unwrap_or(defaults.platform),
        }
    }
}

/// MFEA bot
pub struct MfeaBot {
    evaluator: MarketEvaluator,
    formatter: Box<dyn Formatter>,
    commands: CommandTable,
    config: BotConfig,
}

impl MfeaBot {
    /// Create a bot backed by the configured live sources
    pub fn new(config: BotConfig) -> Result<Self> {
        let evaluator = MarketEvaluator::from_config(&config.mfea_config)?;
        Ok(Self::with_evaluator(config, evaluator))
    }

    /// Create a bot around an existing evaluator
    pub fn with_evaluator(config: BotConfig, evaluator: MarketEvaluator) -> Self {
        Self {
            evaluator,
            formatter: FormatterFactory::create(config.platform),
            commands: CommandTable::default(),
            config,
        }
    }

    /// Get the welcome message
    pub fn welcome(&self) -> &str {
        &self.config.welcome_message
    }

    /// Get the prompt
    pub fn prompt(&self) -> &str {
        &self.config.prompt
    }

    pub fn evaluator(&self) -> &MarketEvaluator {
        &self.evaluator
    }

    pub fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    pub fn link_url(&self) -> &str {
        &self.config.mfea_config.link_url
    }

    /// Process user input and return a response
    pub async fn process_input(&self, input: &str) -> Result<BotResponse> {
        let command = Command::parse(input)?;
        self.execute_command(command).await
    }

    /// Execute a parsed command
    pub async fn execute_command(&self, command: Command) -> Result<BotResponse> {
        self.commands.dispatch(command, self).await
    }
}

impl std::fmt::Debug for MfeaBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MfeaBot")
            .field("evaluator", &self.evaluator)
            .field("platform", &self.formatter.platform())
            .field("commands", &self.commands)
            .finish_non_exhaustive()
    }
}
