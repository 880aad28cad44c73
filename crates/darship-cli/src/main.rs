//! darship CLI - upload, vet, and register DAR packages.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "darship")]
#[command(about = "Upload, vet, and register DAR packages on Canton participants")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a DAR to every participant, vet it, and update the registry
    Deploy {
        /// Version to deploy (defaults to the version in daml.yaml)
        version: Option<String>,
    },

    /// Vet an already-uploaded package on every participant
    Vet {
        /// Package id to vet
        package_id: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), anyhow::Error> = match cli.command {
        Commands::Deploy { version } => commands::deploy::run(version).await.map_err(Into::into),
        Commands::Vet { package_id } => commands::vet::run(&package_id).await.map_err(Into::into),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
