//! dc-query: run one read-only chaincode query and print the answer.
//!
//! Builds the same session as the gateway (configuration, MSP credentials,
//! network) but sends a single query proposal instead of serving HTTP.

use anyhow::{Context, Result};
use clap::Parser;
use dc_01_transaction_submission::QueryRunner;
use gateway_runtime::{connect, init_logging, load_identity, LoggingConfig, RuntimeConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// Query the digital-contracts chaincode
#[derive(Parser, Debug)]
#[command(name = "dc-query")]
#[command(about = "Send a read-only chaincode query and print the first response")]
struct Args {
    /// Chaincode function to evaluate
    #[arg(short, long, default_value = "initLedger")]
    function: String,

    /// Function arguments
    args: Vec<String>,

    /// MSP directory (overrides DC_MSP_PATH)
    #[arg(long)]
    msp_path: Option<PathBuf>,

    /// MSP identifier (overrides DC_MSP_ID)
    #[arg(long)]
    msp_id: Option<String>,

    /// Sign with a generated key instead of the MSP directory
    #[arg(long)]
    ephemeral: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(&LoggingConfig {
        log_level: "warn".to_string(),
        ..LoggingConfig::from_env()
    })
    .context("failed to initialize logging")?;

    let mut config = RuntimeConfig::load().context("failed to load configuration")?;
    if let Some(path) = args.msp_path {
        config.identity.msp_path = path;
    }
    if let Some(msp_id) = args.msp_id {
        config.identity.msp_id = msp_id;
    }
    config.identity.ephemeral |= args.ephemeral;

    let identity = load_identity(&config.identity).context("failed to load credentials")?;
    let connection = connect(&config, identity).context("failed to build network session")?;
    let runner = QueryRunner::new(connection.session, config.submission.proposal_timeout);

    match runner.query(&args.function, args.args).await {
        Ok(result) => {
            println!("Query has completed, checking results");
            println!("Replies: {}", result.reply_count());
            println!("Response is {}", result.payload_text());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("error from query = {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
