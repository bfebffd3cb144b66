use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "deck-cli")]
#[command(about = "Command-line client for the deck server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search card names by prefix
    Search { prefix: String },
    /// Print the saved deck
    Deck,
    /// Save a deck from a JSON file
    Save { file: PathBuf },
    /// Check server and catalog status
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Search { prefix } => {
            let res = client
                .get(format!("{}/cards", base))
                .query(&[("name", prefix)])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Deck => {
            let res = client.get(format!("{}/deck", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Save { file } => {
            let content = tokio::fs::read(&file).await?;
            let deck: Value = serde_json::from_slice(&content)?;
            let res = client
                .post(format!("{}/save", base))
                .json(&deck)
                .send()
                .await?;
            if res.status().is_success() {
                println!("Saved {}", file.display());
            } else {
                print_response(res).await?;
            }
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", base)).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
