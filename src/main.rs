//! Sidecar for a legacy HTTP service in a container.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌────────────────────────────────────────────┐
//!                 │                 SIDECAR                     │
//!                 │                                             │
//!  Client ────────┼─▶ reverse proxy (port 80) ──▶ legacy       │
//!                 │        │                      service      │
//!  Client ◀───────┼── Location rewrite ◀───────── (port 3333)  │
//!                 │                                   ▲         │
//!                 │   child supervisor ── spawns ─────┘         │
//!                 │        │                                    │
//!                 │        └── completion channel ──▶ shutdown  │
//!                 └────────────────────────────────────────────┘
//! ```
//!
//! The process halts when the child does: a clean child exit is a clean
//! shutdown, anything else is fatal. The listener is never drained; process
//! termination is the only stop mechanism.

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sidecar_proxy::child;
use sidecar_proxy::net::resolver::OutboundRouteResolver;
use sidecar_proxy::{ProxyIdentity, ProxyServer, SidecarConfig};

/// Run a legacy HTTP service behind a redirect-fixing reverse proxy.
#[derive(Parser, Debug)]
#[command(name = "sidecar-proxy", version)]
struct Cli {
    /// Child command to launch: executable followed by its arguments.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true, num_args = 1..)]
    command: Vec<String>,
}

#[tokio::main]
async fn main() {
    // Argument validation happens before any network resource is touched.
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sidecar_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("sidecar-proxy starting");

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "fatal error, halting");
        std::process::exit(1);
    }

    tracing::info!("shutdown complete");
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = SidecarConfig::default();

    // Identity is fully computed before the listener accepts anything, so no
    // request is ever proxied with the rewrite rules unset.
    let identity = ProxyIdentity::detect(&OutboundRouteResolver, config.backend_port)?;
    let server = ProxyServer::new(&identity)?;

    let listen_address = config.listen_address.clone();
    tokio::spawn(async move {
        let result = match TcpListener::bind(&listen_address).await {
            Ok(listener) => server.serve(listener).await,
            Err(e) => Err(e),
        };
        // Bind or serve failure kills the whole process. The child is not
        // cleaned up here; it inherits our streams and dies with the
        // container.
        if let Err(e) = result {
            tracing::error!(address = %listen_address, error = %e, "http listener failed");
            std::process::exit(1);
        }
    });

    let mut command = cli.command.into_iter();
    let program = command.next().ok_or("no child command given")?;
    let completion = child::supervise(program, command.collect());

    // Single blocking wait for the child's one terminal outcome.
    match completion.await {
        Ok(Ok(())) => {
            tracing::info!("child exited cleanly, shutting down");
            Ok(())
        }
        Ok(Err(e)) => Err(e.into()),
        Err(_) => Err("child supervisor ended without reporting an outcome".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Argument parsing happens before run(), so a rejected command line
    // means no socket was ever opened.
    #[test]
    fn missing_child_command_is_rejected() {
        assert!(Cli::try_parse_from(["sidecar-proxy"]).is_err());
    }

    #[test]
    fn child_command_captures_hyphenated_arguments() {
        let cli = Cli::try_parse_from(["sidecar-proxy", "legacyd", "-v", "--port=9"]).unwrap();
        assert_eq!(cli.command, vec!["legacyd", "-v", "--port=9"]);
    }

    #[test]
    fn bare_child_command_is_accepted() {
        let cli = Cli::try_parse_from(["sidecar-proxy", "legacyd"]).unwrap();
        assert_eq!(cli.command, vec!["legacyd"]);
    }
}
