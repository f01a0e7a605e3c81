//! Command dispatch table

use crate::bot::MfeaBot;
use crate::bot::commands::Command;
use crate::error::{MarketError, Result};
use crate::interface::{BotResponse, RecommendationReport};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

/// Future returned by a command handler
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<BotResponse>> + Send + 'a>>;

/// Command handler
pub type Handler = for<'a> fn(&'a MfeaBot) -> HandlerFuture<'a>;

/// Maps each command to the function answering it
#[derive(Clone)]
pub struct CommandTable {
    handlers: HashMap<Command, Handler>,
}

impl Default for CommandTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.register(Command::Menu, |bot| Box::pin(menu(bot)));
        table.register(Command::Check, |bot| Box::pin(check(bot)));
        table.register(Command::Commands, |bot| Box::pin(commands(bot)));
        table.register(Command::Links, |bot| Box::pin(links(bot)));
        table.register(Command::Ping, |bot| Box::pin(ping(bot)));
        table.register(Command::Help, |bot| Box::pin(help(bot)));
        table.register(Command::Exit, |bot| Box::pin(exit(bot)));
        table
    }
}

impl CommandTable {
    /// Table with no handlers
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Add or replace the handler for `command`
    pub fn register(&mut self, command: Command, handler: Handler) {
        self.handlers.insert(command, handler);
    }

    pub fn contains(&self, command: Command) -> bool {
        self.handlers.contains_key(&command)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the handler registered for `command`
    pub async fn dispatch(&self, command: Command, bot: &MfeaBot) -> Result<BotResponse> {
        let handler = self.handlers.get(&command).ok_or_else(|| {
            MarketError::CommandError(format!("No handler for command: {}", command.id()))
        })?;
        tracing::debug!(
            command = command.id(),
            description = command.description(),
            "dispatching command"
        );
        handler(bot).await
    }
}

impl std::fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<_> = self.handlers.keys().map(Command::id).collect();
        ids.sort_unstable();
        f.debug_struct("CommandTable").field("commands", &ids).finish()
    }
}

async fn menu(bot: &MfeaBot) -> Result<BotResponse> {
    Ok(BotResponse::embed(bot.formatter().format_menu())
        .with_action("Check Market Data", Command::Check.id())
        .with_action("Commands List", Command::Commands.id())
        .with_link("Links", bot.link_url())
        .with_action("Ping", Command::Ping.id()))
}

async fn check(bot: &MfeaBot) -> Result<BotResponse> {
    match bot.evaluator().evaluate().await {
        Ok(evaluation) => {
            let report = RecommendationReport::from(&evaluation);
            Ok(
                BotResponse::embed(bot.formatter().format_evaluation(&evaluation))
                    .with_metadata(serde_json::to_value(report)?),
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "market check failed");
            Ok(BotResponse::error(bot.formatter().format_error(&e)))
        }
    }
}

async fn commands(bot: &MfeaBot) -> Result<BotResponse> {
    Ok(BotResponse::embed(bot.formatter().format_commands()).ephemeral())
}

async fn links(bot: &MfeaBot) -> Result<BotResponse> {
    Ok(BotResponse::text(bot.link_url()).with_link("Links", bot.link_url()))
}

async fn ping(_bot: &MfeaBot) -> Result<BotResponse> {
    Ok(BotResponse::text("Bot is ready!").ephemeral())
}

async fn help(_bot: &MfeaBot) -> Result<BotResponse> {
    Ok(BotResponse::text(Command::help_text().trim()))
}

async fn exit(_bot: &MfeaBot) -> Result<BotResponse> {
    Ok(BotResponse::text("Goodbye!"))
}
