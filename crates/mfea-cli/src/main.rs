//! Command-line interface for MFEA

use clap::{Parser, Subcommand};
use mfea_market::interface::{CliFormatter, Formatter};
use mfea_market::{MarketEvaluator, MfeaConfig, RatePolicy, RecommendationReport};
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "mfea-cli")]
#[command(about = "Market Financial Evaluation Assistant", long_about = None)]
struct Cli {
    /// Index symbol to evaluate (overrides MFEA_SYMBOL)
    #[arg(long, global = true)]
    symbol: Option<String>,

    /// Fail when the treasury rate is unavailable instead of continuing without it
    #[arg(long, global = true)]
    require_rate: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Evaluate the market and print the recommendation
    Check {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print last close, SMA 220 and volatility
    Snapshot,
    /// Print the 3-month treasury rate
    Rate,
    /// List bot commands
    Commands,
}

impl Cli {
    fn config(&self) -> mfea_market::Result<MfeaConfig> {
        let mut builder = MfeaConfig::builder().with_lookup(&mfea_utils::env_lookup)?;
        if let Some(symbol) = &self.symbol {
            builder = builder.symbol(symbol);
        }
        if self.require_rate {
            builder = builder.rate_policy(RatePolicy::Required);
        }
        builder.build()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    mfea_utils::init_tracing_with("warn");

    let cli = Cli::parse();
    let formatter = CliFormatter;

    if cli.command == Commands::Commands {
        println!("{}", formatter.format_commands());
        return Ok(ExitCode::SUCCESS);
    }

    let config = cli.config()?;
    let evaluator = MarketEvaluator::from_config(&config)?;
    info!(command = ?cli.command, symbol = %config.symbol, "running");

    let output = match cli.command {
        Commands::Check { json } => evaluator.evaluate().await.and_then(|evaluation| {
            if json {
                let report = RecommendationReport::from(&evaluation);
                Ok(serde_json::to_string_pretty(&report)?)
            } else {
                Ok(formatter.format_evaluation(&evaluation))
            }
        }),
        Commands::Snapshot => evaluator
            .snapshot()
            .await
            .map(|snapshot| formatter.format_snapshot(&snapshot)),
        Commands::Rate => evaluator
            .rate()
            .await
            .map(|rate| formatter.format_rate(&rate)),
        Commands::Commands => Ok(formatter.format_commands()),
    };

    match output {
        Ok(text) => {
            println!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", formatter.format_error(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}
