mod commands;

use clap::{Parser, Subcommand};
use commands::RequestArgs;

#[derive(Parser)]
#[command(
    name = "restamp",
    about = "Rebuild imported Docker images with extra Dockerfile directives"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Dockerfile that would be built, without building it
    Render {
        #[command(flatten)]
        request: RequestArgs,
    },
    /// Build the image with docker and print its id
    Build {
        #[command(flatten)]
        request: RequestArgs,
        /// Print the resulting artifact as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render { request } => commands::render(&request)?,
        Commands::Build { request, json } => commands::build(&request, json).await?,
    }

    Ok(())
}
