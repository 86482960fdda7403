//! eventuml - PlantUML class diagrams from Go event structs

mod config;
mod generate;

use clap::Parser;
use config::Config;
use generate::Outcome;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eventuml")]
#[command(about = "Generate a PlantUML class diagram from Go event structs", version)]
struct Cli {
    /// Input directory containing Go files [default: ./events]
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Output file path, `.json` writes the extracted model [default: ./event-structures.plantuml]
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().with_overrides(cli.input, cli.output);

    match generate::run(&config)? {
        Outcome::Written { path, records } => {
            tracing::debug!(path = %path.display(), records, "diagram written");
        }
        Outcome::Empty => {}
    }

    Ok(())
}
