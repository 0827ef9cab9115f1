//! Klima CLI: submit pass requests or issue passes offline.
//!
//! `submit` talks to a running server; `issue` signs locally using CERT_DIR
//! and PASS_MODEL_DIR.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use klima_cli::{
    init_tracing, issue_offline, load_request, write_pass_atomically, PassClient, DEFAULT_OUTPUT,
    DEFAULT_SERVER,
};
use klima_core::Config;

#[derive(Parser)]
#[command(name = "klima", about = "Klima wallet pass CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a pass request to a running server and save the returned pass
    Submit {
        /// Path to the pass request JSON file
        request: PathBuf,
        /// Server address (host:port or URL)
        #[arg(long, env = "KLIMA_SERVER", default_value = DEFAULT_SERVER)]
        server: String,
        /// Where to write the pass
        #[arg(long, default_value = DEFAULT_OUTPUT)]
        out: PathBuf,
    },
    /// Issue a pass locally with the configured certificates and pass model
    Issue {
        /// Path to the pass request JSON file
        request: PathBuf,
        /// Where to write the pass
        #[arg(long, default_value = DEFAULT_OUTPUT)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Submit {
            request,
            server,
            out,
        } => {
            let body = load_request(&request)?;
            let client = PassClient::new(&server)?;
            let data = client.submit(&body).await?;
            write_pass_atomically(&out, &data)?;
            println!("pkpass file saved to {} ({} bytes)", out.display(), data.len());
        }
        Commands::Issue { request, out } => {
            let body = load_request(&request)?;
            let config = Config::from_env().context("Failed to load configuration")?;
            let artifact = issue_offline(&config, body)?;
            write_pass_atomically(&out, &artifact.data)?;
            println!(
                "Pass {} saved to {} ({} bytes)",
                artifact.serial_number,
                out.display(),
                artifact.len()
            );
        }
    }

    Ok(())
}
