use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use smarttravel::{prompts, Config, TravelConcierge};

/// SmartTravel - your intelligent travel planning assistant
#[derive(Parser, Debug)]
#[command(name = "smarttravel")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Your travel planning query
    query: Option<String>,

    /// Run in interactive mode
    #[arg(short, long)]
    interactive: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to an alternate config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load .env files (local first, then home directory)
    // Errors are ignored - files are optional
    let _ = dotenvy::from_filename(".env");
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".env"));
    }

    // Load configuration
    let config = match args.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    tracing::info!("Initializing SmartTravel concierge...");
    let concierge = TravelConcierge::new(&config)?;

    if args.interactive {
        run_interactive(&concierge).await
    } else if let Some(query) = args.query {
        let answer = concierge.answer(&query).await?;
        println!("\n{}\n", answer);
        Ok(())
    } else {
        Args::command().print_help()?;
        std::process::exit(1)
    }
}

/// Prompt loop on stdin; `quit`, `exit`, or `q` ends the session
async fn run_interactive(concierge: &TravelConcierge) -> Result<()> {
    println!("\n{}", prompts::WELCOME_MESSAGE);
    println!("{}", "=".repeat(50));
    println!("Type your travel queries or 'quit' to exit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "quit" | "exit" | "q") {
            println!("\nThank you for using SmartTravel! Safe travels!");
            break;
        }

        match concierge.answer(input).await {
            Ok(answer) => println!("\nAssistant: {}\n", answer),
            Err(err) => eprintln!("\nError: {:#}\n", err),
        }
    }

    Ok(())
}
