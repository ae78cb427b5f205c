use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use subnet_authn::{
    AdapterConfig, AuthnAdapter, AuthnRequest, ChainedAttributes, SubnetAdapter,
    CHAINED_ATTR_USERNAME, DEFAULT_BASE_ADDRESS, DEFAULT_SUBNET_MASK, DESCRIPTOR,
    ENV_BASE_ADDRESS, ENV_SUBNET_MASK,
};

const EXIT_CONFIG: u8 = 2;

/// Authenticate client addresses against an IPv4 subnet.
#[derive(Debug, Parser)]
#[command(name = "subnet-authn", version)]
struct Cli {
    /// Base address of the authenticated subnet [default: 0.0.0.0]
    #[arg(long, global = true, env = ENV_BASE_ADDRESS)]
    base_address: Option<String>,

    /// Subnet mask [default: 255.255.255.0]
    #[arg(long, global = true, env = ENV_SUBNET_MASK)]
    subnet_mask: Option<String>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Flag, then environment, then descriptor default. Blank values count
    /// as unset, as in [`AdapterConfig::from_env`].
    fn adapter_config(&self) -> AdapterConfig {
        let pick = |value: &Option<String>, default: &str| {
            value
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(default)
                .to_string()
        };
        AdapterConfig::new(
            pick(&self.base_address, DEFAULT_BASE_ADDRESS),
            pick(&self.subnet_mask, DEFAULT_SUBNET_MASK),
        )
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decide each address and print one JSON response per line
    Check {
        #[arg(required = true)]
        addresses: Vec<String>,

        /// Partner entity id, logged with each attempt
        #[arg(long, default_value = "")]
        partner: String,

        /// Username established by an upstream adapter
        #[arg(long)]
        username: Option<String>,
    },
    /// Read JSON requests from stdin, one per line, and answer each
    ServeStdin,
    /// Print the adapter descriptor as JSON
    Describe,
}

#[derive(Serialize)]
struct ErrorLine {
    error: String,
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the JSON responses.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    if let Command::Describe = cli.command {
        return if emit(&DESCRIPTOR) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    let adapter = match SubnetAdapter::configure(&cli.adapter_config()) {
        Ok(adapter) => adapter,
        Err(e) => {
            tracing::error!("configuration rejected: {}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };
    tracing::info!("Authenticating against subnet {}", adapter.subnet());

    match cli.command {
        Command::Check {
            addresses,
            partner,
            username,
        } => {
            let chained = username.map(|name| {
                ChainedAttributes::from([(CHAINED_ATTR_USERNAME.to_string(), name.into())])
            });
            let mut all_ok = true;
            for addr in addresses {
                let request = AuthnRequest {
                    remote_addr: addr,
                    partner_entity_id: partner.clone(),
                    chained_attributes: chained.clone(),
                };
                all_ok &= answer(&adapter, &request);
            }
            if all_ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Command::ServeStdin => serve_stdin(&adapter),
        Command::Describe => ExitCode::SUCCESS,
    }
}

fn serve_stdin(adapter: &SubnetAdapter) -> ExitCode {
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("failed to read stdin: {}", e);
                return ExitCode::FAILURE;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<AuthnRequest>(&line) {
            Ok(request) => {
                answer(adapter, &request);
            }
            Err(e) => {
                tracing::warn!("skipping malformed request: {}", e);
                emit(&ErrorLine {
                    error: format!("invalid request: {e}"),
                });
            }
        }
    }
    ExitCode::SUCCESS
}

/// Returns false when the request was a processing fault or output failed.
fn answer(adapter: &SubnetAdapter, request: &AuthnRequest) -> bool {
    match adapter.lookup_authn(request) {
        Ok(response) => emit(&response),
        Err(e) => {
            emit(&ErrorLine {
                error: e.to_string(),
            });
            false
        }
    }
}

fn emit<T: Serialize>(value: &T) -> bool {
    let mut stdout = io::stdout().lock();
    let written = serde_json::to_writer(&mut stdout, value)
        .map_err(io::Error::from)
        .and_then(|()| writeln!(stdout));
    match written {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("failed to write output: {}", e);
            false
        }
    }
}
