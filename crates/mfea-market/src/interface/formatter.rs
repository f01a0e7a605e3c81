//! Response formatting utilities

use crate::bot::commands::{COMMAND_CATALOG, COMMANDS_TITLE};
use crate::engine::Evaluation;
use crate::error::MarketError;
use crate::interface::BotPlatform;
use crate::market::{MarketSnapshot, TreasuryRate};
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;

pub const EMBED_TITLE: &str = "Market Financial Evaluation Assistant (MFEA)";
pub const EMBED_FOOTER: &str = "Use @MFEA bot#3562 to interact again.";
pub const MENU_PROMPT: &str = "Choose an option below:";

pub trait Formatter: Send + Sync {
    fn platform(&self) -> BotPlatform;
    fn format_evaluation(&self, evaluation: &Evaluation) -> String;
    fn format_snapshot(&self, snapshot: &MarketSnapshot) -> String;
    fn format_rate(&self, rate: &TreasuryRate) -> String;
    fn format_menu(&self) -> String;
    fn format_commands(&self) -> String;
    fn format_error(&self, error: &MarketError) -> String;
}

/// User-facing text for a failed request
pub fn error_message(error: &MarketError) -> String {
    match error {
        MarketError::DataUnavailable(reason) => format!("Error fetching data: {reason}"),
        other => format!("An unexpected error occurred: {other}"),
    }
}

fn rate_value(evaluation: &Evaluation) -> String {
    evaluation
        .recommendation
        .rate_pct
        .map_or_else(|| "N/A".to_string(), |rate| format!("{rate}%"))
}

fn rate_notice(reason: &str) -> String {
    format!("Treasury rate unavailable ({reason}); Risk ALT was not considered.")
}

fn table(rows: Vec<[String; 2]>) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    for row in rows {
        table.add_row(row.to_vec());
    }
    table.to_string()
}

/// Terminal tables
pub struct CliFormatter;

impl Formatter for CliFormatter {
    fn platform(&self) -> BotPlatform {
        BotPlatform::Cli
    }

    fn format_evaluation(&self, evaluation: &Evaluation) -> String {
        let rec = &evaluation.recommendation;
        let mut output = format!("{EMBED_TITLE}\n");
        output.push_str(&table(vec![
            ["SPX Last Close".into(), rec.last_close.to_string()],
            ["SMA 220".into(), rec.sma_220.to_string()],
            ["Volatility (Annualized)".into(), format!("{}%", rec.volatility_pct)],
            ["3M Treasury Rate".into(), rate_value(evaluation)],
            ["MFEA Recommendation".into(), rec.level.to_string()],
        ]));
        if let Some(reason) = evaluation.rate_warning() {
            output.push_str("\n⚠️  ");
            output.push_str(&rate_notice(reason));
        }
        output
    }

    fn format_snapshot(&self, snapshot: &MarketSnapshot) -> String {
        table(vec![
            ["SPX Last Close".into(), snapshot.last_close.to_string()],
            ["SMA 220".into(), snapshot.sma_220.to_string()],
            ["Volatility (Annualized)".into(), format!("{}%", snapshot.volatility_pct)],
        ])
    }

    fn format_rate(&self, rate: &TreasuryRate) -> String {
        format!("3M Treasury Rate: {}%", rate.rate_pct)
    }

    fn format_menu(&self) -> String {
        let mut output = format!("{EMBED_TITLE}\n{MENU_PROMPT}\n");
        for (id, label) in [
            ("check", "Check Market Data"),
            ("commands", "Commands List"),
            ("links", "Links"),
            ("ping", "Ping"),
        ] {
            output.push_str(&format!("  [{id}] {label}\n"));
        }
        output
    }

    fn format_commands(&self) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec!["Command", "Description"]);
        for (name, description) in COMMAND_CATALOG {
            table.add_row(vec![*name, *description]);
        }
        format!("{COMMANDS_TITLE}\n{table}")
    }

    fn format_error(&self, error: &MarketError) -> String {
        format!("❌ {}", error_message(error))
    }
}

/// Markdown embeds for chat clients
pub struct ChatFormatter;

impl ChatFormatter {
    fn field(output: &mut String, name: &str, value: &str) {
        output.push_str(&format!("**{name}**\n{value}\n\n"));
    }
}

impl Formatter for ChatFormatter {
    fn platform(&self) -> BotPlatform {
        BotPlatform::Chat
    }

    fn format_evaluation(&self, evaluation: &Evaluation) -> String {
        let rec = &evaluation.recommendation;
        let mut output = format!("## {EMBED_TITLE}\n\n");
        Self::field(&mut output, "SPX Last Close", &rec.last_close.to_string());
        Self::field(&mut output, "SMA 220", &rec.sma_220.to_string());
        Self::field(
            &mut output,
            "Volatility (Annualized)",
            &format!("{}%", rec.volatility_pct),
        );
        Self::field(&mut output, "3M Treasury Rate", &rate_value(evaluation));
        Self::field(&mut output, "MFEA Recommendation", &rec.level.to_string());
        if let Some(reason) = evaluation.rate_warning() {
            output.push_str(&format!("> {}\n\n", rate_notice(reason)));
        }
        output.push_str(&format!("_{EMBED_FOOTER}_"));
        output
    }

    fn format_snapshot(&self, snapshot: &MarketSnapshot) -> String {
        let mut output = format!("## {EMBED_TITLE}\n\n");
        Self::field(&mut output, "SPX Last Close", &snapshot.last_close.to_string());
        Self::field(&mut output, "SMA 220", &snapshot.sma_220.to_string());
        Self::field(
            &mut output,
            "Volatility (Annualized)",
            &format!("{}%", snapshot.volatility_pct),
        );
        output.trim_end().to_string()
    }

    fn format_rate(&self, rate: &TreasuryRate) -> String {
        format!("**3M Treasury Rate**\n{}%", rate.rate_pct)
    }

    fn format_menu(&self) -> String {
        format!("## {EMBED_TITLE}\n\n{MENU_PROMPT}")
    }

    fn format_commands(&self) -> String {
        let mut output = format!("## {COMMANDS_TITLE}\n\n");
        for (name, description) in COMMAND_CATALOG {
            Self::field(&mut output, name, description);
        }
        output.trim_end().to_string()
    }

    fn format_error(&self, error: &MarketError) -> String {
        error_message(error)
    }
}

pub struct FormatterFactory;

impl FormatterFactory {
    pub fn create(platform: BotPlatform) -> Box<dyn Formatter> {
        match platform {
            BotPlatform::Chat => Box::new(ChatFormatter),
            BotPlatform::Cli => Box::new(CliFormatter),
        }
    }
}
