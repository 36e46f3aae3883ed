use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "rates-cli")]
#[command(about = "Command-line client for the freight rates API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the API is up and how much reference data it loaded
    Status,
    /// Fetch daily average rates
    Rates {
        /// Starting date (YYYY-M-D)
        #[arg(long)]
        from: Option<String>,
        /// Ending date (YYYY-M-D)
        #[arg(long)]
        to: Option<String>,
        /// Origin location code or region slug
        #[arg(long)]
        origin: Option<String>,
        /// Destination location code or region slug
        #[arg(long)]
        destination: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Rates { from, to, origin, destination } => {
            let query: Vec<(&str, String)> = [
                ("date_from", from),
                ("date_to", to),
                ("origin", origin),
                ("destination", destination),
            ]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect();

            let res = client
                .get(format!("{}/rates", cli.url))
                .query(&query)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: rates API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
