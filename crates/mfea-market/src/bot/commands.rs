//! Command parsing for the MFEA bot
//!
//! Accepts slash and bang prefixes (`/check`, `!check`), bare button ids
//! (`check`) and mentions of the bot (`@MFEA`).

use crate::error::{MarketError, Result};

/// Title of the command listing
pub const COMMANDS_TITLE: &str = "MFEA Bot Commands";

/// Entries of the command listing, in display order
pub const COMMAND_CATALOG: &[(&str, &str)] = &[
    ("@MFEA bot#3562", "Shows this interactive interface."),
    (
        "Check Market Data",
        "Fetches market data and provides recommendations.",
    ),
    ("Links", "Provides a link to testfol.io."),
    ("Ping", "Checks if the bot is online and responsive."),
];

/// Parsed command from user input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Interactive menu shown when the bot is mentioned
    Menu,
    /// Evaluate the market and recommend an allocation
    Check,
    /// List what the bot can do
    Commands,
    /// External backtesting link
    Links,
    /// Liveness check
    Ping,
    /// Show input syntax
    Help,
    /// Exit the bot
    Exit,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Command::Menu,
        Command::Check,
        Command::Commands,
        Command::Links,
        Command::Ping,
        Command::Help,
        Command::Exit,
    ];

    /// Parse a command from user input
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(MarketError::CommandError("Empty input".to_string()));
        }

        let lowered = input.to_lowercase();
        if lowered.starts_with("@mfea") {
            return Ok(Command::Menu);
        }

        let name = lowered
            .strip_prefix('/')
            .or_else(|| lowered.strip_prefix('!'))
            .unwrap_or(&lowered);
        let Some(cmd) = name.split_whitespace().next() else {
            return Err(MarketError::CommandError("Empty command".to_string()));
        };

        match cmd {
            "menu" | "m" | "start" => Ok(Command::Menu),
            "check" | "c" => Ok(Command::Check),
            "commands" | "cmds" => Ok(Command::Commands),
            "links" | "link" | "l" => Ok(Command::Links),
            "ping" | "p" => Ok(Command::Ping),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            _ => Err(MarketError::CommandError(format!("Unknown command: {cmd}"))),
        }
    }

    /// Button id for the command
    pub fn id(&self) -> &'static str {
        match self {
            Command::Menu => "menu",
            Command::Check => "check",
            Command::Commands => "commands",
            Command::Links => "links",
            Command::Ping => "ping",
            Command::Help => "help",
            Command::Exit => "exit",
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r"
MFEA Bot
========

  @MFEA          Show the interactive menu
  /check         Evaluate the market and recommend an allocation
  /commands      List bot commands
  /links         Backtesting link
  /ping          Check the bot is responsive
  /help          Show this help
  /exit          Exit

Prefixes `/` and `!` are interchangeable; button ids (check, commands, ping)
work on their own.
"
    }

    /// Get a short description of the command
    pub fn description(&self) -> &'static str {
        match self {
            Command::Menu => "Interactive menu",
            Command::Check => "Market check and recommendation",
            Command::Commands => "Command list",
            Command::Links => "External links",
            Command::Ping => "Liveness check",
            Command::Help => "Show help",
            Command::Exit => "Exit the bot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefixes() {
        assert_eq!(Command::parse("/check").unwrap(), Command::Check);
        assert_eq!(Command::parse("!check").unwrap(), Command::Check);
        assert_eq!(Command::parse("check").unwrap(), Command::Check);
        assert_eq!(Command::parse("  /CHECK now ").unwrap(), Command::Check);
    }

    #[test]
    fn test_parse_button_ids() {
        for command in [Command::Check, Command::Commands, Command::Links, Command::Ping] {
            assert_eq!(Command::parse(command.id()).unwrap(), command);
        }
    }

    #[test]
    fn test_parse_mention() {
        assert_eq!(Command::parse("@MFEA bot#3562").unwrap(), Command::Menu);
        assert_eq!(Command::parse("@mfea").unwrap(), Command::Menu);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Command::parse("/q").unwrap(), Command::Exit);
        assert_eq!(Command::parse("/?").unwrap(), Command::Help);
        assert_eq!(Command::parse("!cmds").unwrap(), Command::Commands);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("").is_err());
        assert!(Command::parse("/").is_err());

        let err = Command::parse("/buy SPY").unwrap_err();
        assert_eq!(err.to_string(), "Command error: Unknown command: buy");
    }

    #[test]
    fn test_ids_round_trip() {
        for command in Command::ALL {
            assert_eq!(Command::parse(command.id()).unwrap(), command);
            assert!(!command.description().is_empty());
        }
    }

    #[test]
    fn test_catalog() {
        assert_eq!(COMMAND_CATALOG.len(), 4);
        assert_eq!(COMMAND_CATALOG[0].0, "@MFEA bot#3562");
    }
}
