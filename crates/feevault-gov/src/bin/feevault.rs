//! feevault: operator tool for FeeVault treasury approvals.
//!
//! - Generate approver keys and print their signer address
//! - Inspect and validate a treasury configuration
//! - Compute the approval digest for a governed action
//! - Sign an approval digest
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Configuration or signing failed
//! - 2: Invalid arguments or I/O error

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use feevault_crypto::ApprovalSigningKey;
use feevault_hash::approval_digest;
use feevault_types::{Address, GovernedAction, Hash32};
use feevault_gov::TreasuryConfig;

mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const FAILED: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
}

#[derive(Parser, Debug)]
#[command(name = "feevault", version, about = "FeeVault treasury approval tool")]
struct Cli {
    /// Log filter, e.g. "info" or "feevault_gov=debug".
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate an ML-DSA-44 approver key and write its secret to a file.
    Keygen {
        /// Output file for the hex-encoded secret key.
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Load and validate a treasury configuration.
    Inspect {
        /// Path to the treasury config JSON file.
        config: PathBuf,
    },

    /// Compute the approval digest for a governed action.
    Digest {
        #[arg(short, long)]
        config: PathBuf,

        /// Path to the action JSON file.
        #[arg(short, long)]
        action: PathBuf,

        /// Signer that will submit the action.
        #[arg(short, long)]
        executor: Address,

        #[arg(short, long)]
        nonce: u64,

        /// Unix timestamp after which the approval expires.
        #[arg(short, long)]
        deadline: u64,
    },

    /// Sign an approval digest with an approver key.
    Sign {
        /// Path to the hex-encoded secret key.
        #[arg(short, long)]
        key: PathBuf,

        /// 32-byte digest, hex.
        #[arg(short, long)]
        digest: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Keygen { out } => cmd_keygen(&out),
        Commands::Inspect { config } => cmd_inspect(&config),
        Commands::Digest {
            config,
            action,
            executor,
            nonce,
            deadline,
        } => cmd_digest(&config, &action, &executor, nonce, deadline),
        Commands::Sign { key, digest } => cmd_sign(&key, &digest),
    }
}

fn cmd_keygen(out: &Path) -> ExitCode {
    let key = match ApprovalSigningKey::generate() {
        Ok(k) => k,
        Err(e) => {
            eprintln!("Error generating key: {}", e);
            return ExitCode::from(exit_codes::FAILED);
        }
    };

    if let Err(e) = key.write_to_file(out) {
        eprintln!("Error writing key: {}", e);
        return ExitCode::from(exit_codes::INVALID_ARGS);
    }

    info!(address = %key.address(), path = %out.display(), "approver key generated");
    println!("Address:     {}", key.address());
    println!("Public key:  {}", hex::encode(key.public_key()));
    println!("Secret key written to {}", out.display());
    ExitCode::from(exit_codes::SUCCESS)
}

fn load_config(path: &Path) -> Result<TreasuryConfig, ExitCode> {
    TreasuryConfig::from_file(path).map_err(|e| {
        eprintln!("Error loading config: {}", e);
        ExitCode::from(exit_codes::INVALID_ARGS)
    })
}

fn cmd_inspect(path: &Path) -> ExitCode {
    let config = match load_config(path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    println!("=== Treasury Configuration ===");
    println!();
    println!("Network:             {}", config.network);
    println!("Chain ID:            {}", config.chain_id());
    println!("Authority:           {}", config.authority);
    println!("Domain:              {} v{}", config.domain_name, config.domain_version);
    println!("Signatures required: {}", config.signatures_required);
    println!("Execution delay:     {}s", config.execution_delay_secs);
    println!("Max fee:             {}", config.max_fee);
    println!("Signers ({}):", config.signers.len());
    for signer in &config.signers {
        println!("  {}", signer);
    }
    println!();

    match config.validate() {
        Ok(()) => {
            println!("Configuration valid.");
            ExitCode::from(exit_codes::SUCCESS)
        }
        Err(e) => {
            println!("Configuration INVALID: {}", e);
            ExitCode::from(exit_codes::FAILED)
        }
    }
}

fn cmd_digest(
    config_path: &Path,
    action_path: &Path,
    executor: &Address,
    nonce: u64,
    deadline: u64,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let action: GovernedAction = match std::fs::read_to_string(action_path)
        .map_err(|e| e.to_string())
        .and_then(|json| serde_json::from_str(&json).map_err(|e| e.to_string()))
    {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error loading action {}: {}", action_path.display(), e);
            return ExitCode::from(exit_codes::INVALID_ARGS);
        }
    };

    let digest = approval_digest(&config.domain(), executor, &action, nonce, deadline);
    debug!(action = action.name(), nonce, deadline, "approval digest computed");
    println!("0x{}", hex::encode(digest));
    ExitCode::from(exit_codes::SUCCESS)
}

fn parse_digest(text: &str) -> Result<Hash32, String> {
    let bytes = hex::decode(text.trim().trim_start_matches("0x")).map_err(|e| e.to_string())?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| format!("digest must be 32 bytes, got {}", b.len()))
}

fn cmd_sign(key_path: &Path, digest_hex: &str) -> ExitCode {
    let digest = match parse_digest(digest_hex) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Invalid digest: {}", e);
            return ExitCode::from(exit_codes::INVALID_ARGS);
        }
    };
    let key = match ApprovalSigningKey::read_from_file(key_path) {
        Ok(k) => k,
        Err(e) => {
            eprintln!("Error loading key: {}", e);
            return ExitCode::from(exit_codes::INVALID_ARGS);
        }
    };

    match key.sign_approval(&digest).map(|sig| (key.address(), sig)) {
        Ok((address, signature)) => {
            info!(signer = %address, "approval signed");
            println!("Signer:    {}", address);
            println!("Signature: 0x{}", hex::encode(signature));
            ExitCode::from(exit_codes::SUCCESS)
        }
        Err(e) => {
            eprintln!("Signing failed: {}", e);
            ExitCode::from(exit_codes::FAILED)
        }
    }
}
