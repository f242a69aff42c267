use anyhow::Context;
use clap::Parser;
use mlviz_relay::{RelayClient, RelayError, render};
use std::io::{self, BufRead};
use tracing_subscriber::EnvFilter;

/// Ask the ML Concept Visualizer to explain a concept.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Concept to explain, e.g. "Decision Trees". Read from stdin when omitted.
    concept: Option<String>,

    /// Base URL of the explanation service.
    #[arg(long, env = "MLVIZ_BASE_URL", default_value = "http://localhost:8000")]
    base_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let concept = match args.concept {
        Some(concept) => concept,
        None => {
            eprint!("Enter an ML Concept: ");
            let mut line = String::new();
            io::stdin()
                .lock()
                .read_line(&mut line)
                .context("Failed to read concept from stdin")?;
            line
        }
    };

    let client = RelayClient::new(args.base_url);
    tracing::debug!(endpoint = %client.endpoint(), "Requesting explanation");

    match client.explain(&concept).await {
        Ok(explanation) => {
            print!("{}", render(&explanation));
            Ok(())
        }
        Err(RelayError::EmptyConcept(warning)) => {
            eprintln!("{}", warning);
            Ok(())
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
            std::process::exit(1);
        }
    }
}
