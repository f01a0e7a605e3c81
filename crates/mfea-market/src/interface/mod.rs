//! Presentation layer
//!
//! Platform-agnostic responses plus formatters for the terminal and chat

pub mod formatter;
pub mod interface;
pub mod report;

pub use formatter::{ChatFormatter, CliFormatter, Formatter, FormatterFactory, error_message};
pub use interface::{ActionType, BotPlatform, BotResponse, ResponseType, SuggestedAction};
pub use report::RecommendationReport;
