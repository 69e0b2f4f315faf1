//! Anonymous chat matchmaking server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tandem-server
//! PORT=8080 cargo run --bin tandem-server
//! cargo run --bin tandem-server -- --host 127.0.0.1 --port 3000
//! ```

use std::time::Duration;

use clap::Parser;
use tandem_server::{config::ServerConfig, ui::Server};
use tandem_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tandem-server")]
#[command(about = "Anonymous one-on-one chat matchmaking server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Seconds between inactivity sweeps
    #[arg(long, default_value_t = 30)]
    cleanup_interval_secs: u64,

    /// Seconds without activity before a participant is removed
    #[arg(long, default_value_t = 300)]
    inactivity_timeout_secs: u64,

    /// Maximum pairings attempted per pairing pass
    #[arg(long, default_value_t = 100)]
    max_pairings_per_pass: usize,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            cleanup_interval: Duration::from_secs(args.cleanup_interval_secs.max(1)),
            inactivity_timeout: Duration::from_secs(args.inactivity_timeout_secs),
            max_pairings_per_pass: args.max_pairings_per_pass,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(&["tandem_server", "tower_http"], "info");

    let config = ServerConfig::from(Args::parse());
    tracing::info!("Starting with {:?}", config);

    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
