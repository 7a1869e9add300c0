use clap::Parser;
use pipedns_domain::CliOverrides;
use tracing::{error, info};

mod bootstrap;
mod di;

#[derive(Parser)]
#[command(name = "pipedns")]
#[command(version)]
#[command(about = "pipedns - PowerDNS pipe backend serving records from Consul KV")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Name of the environment being served for
    #[arg(short = 'e', long)]
    environment: Option<String>,

    /// Consul agent address (host name or IP)
    #[arg(short = 'a', long)]
    address: Option<String>,

    /// Consul HTTP port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// TTL in seconds attached to every answer
    #[arg(long)]
    ttl: Option<String>,

    /// Pipe ABI version expected in the HELO line (1-4)
    #[arg(long)]
    abi_version: Option<u8>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let cli_overrides = CliOverrides {
        environment: cli.environment,
        address: cli.address,
        port: cli.port,
        ttl: cli.ttl,
        abi_version: cli.abi_version,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    // Initialize logging; stdout belongs to the pipe
    bootstrap::init_logging(&config.logging);

    info!(
        "Starting pipedns v{} for environment {}",
        env!("CARGO_PKG_VERSION"),
        config.store.environment
    );

    // Dependency Injection
    let services = di::Services::new(&config)?;
    info!(
        ttl = services.resolver.ttl(),
        abi = %services.backend.settings().abi,
        "Waiting for handshake on stdin"
    );

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();
    if let Err(e) = services.backend.serve(stdin, stdout).await {
        error!(error = %e, "Pipe session aborted");
        return Err(e.into());
    }

    info!("Pipe session closed");
    Ok(())
}
