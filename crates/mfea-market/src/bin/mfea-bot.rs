//! MFEA chat bot REPL
//!
//! Answers mentions and commands the way the chat bot does, over stdin/stdout.
//!
//! # Usage
//!
//! ```bash
//! # Optional: pick the rate source and failure policy
//! export MFEA_RATE_PROVIDER=cnbc
//! export MFEA_RATE_POLICY=optional
//!
//! cargo run --bin mfea-bot -p mfea-market
//! ```

use mfea_market::bot::{BotConfig, Command, MfeaBot};
use mfea_market::interface::{ActionType, BotResponse};
use std::io::{self, BufRead, Write};

fn print_banner() {
    println!(
        r"
╔══════════════════════════════════════════════════════════════╗
║        Market Financial Evaluation Assistant (MFEA)          ║
║                                                              ║
║  @MFEA        - Interactive menu                             ║
║  /check       - Market check and recommendation              ║
║  /commands    - Command list                                 ║
║  /help        - Help                                         ║
║  /exit        - Exit                                         ║
╚══════════════════════════════════════════════════════════════╝
"
    );
}

fn print_response(response: &BotResponse) {
    println!("{}", response.content);
    if !response.actions.is_empty() {
        let buttons: Vec<String> = response
            .actions
            .iter()
            .map(|action| match action.action_type {
                ActionType::Command => format!("[{}] {}", action.action, action.label),
                ActionType::Link => format!("[{}] {}", action.label, action.action),
            })
            .collect();
        println!("\n{}", buttons.join("  "));
    }
    if response.ephemeral {
        println!("(only visible to you)");
    }
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    mfea_utils::init_tracing_with("warn,mfea_market=info");

    print_banner();

    let bot = MfeaBot::new(BotConfig::from_env()?)?;
    println!("{}\n", bot.welcome());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", bot.prompt());
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                println!("\nGoodbye!");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let command = match Command::parse(input) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}\n");
                continue;
            }
        };

        match bot.execute_command(command).await {
            Ok(response) => print_response(&response),
            Err(e) => eprintln!("Error: {e}\n"),
        }

        if command == Command::Exit {
            break;
        }
    }

    Ok(())
}
