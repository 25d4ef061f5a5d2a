use clap::{Parser, Subcommand};
use netoverride_domain::{CliOverrides, ProxyEnablement};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "netoverride")]
#[command(version)]
#[command(about = "NetOverride - DNS interception proxy with local domain overrides")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// Listener bind address
    #[arg(short = 'b', long, global = true)]
    bind: Option<String>,

    /// Listener port
    #[arg(short = 'p', long, global = true)]
    port: Option<u16>,

    /// Mapping snapshot file
    #[arg(long, value_name = "FILE", global = true)]
    store: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Run the proxy (default)
    Run,
    /// Turn the proxy on
    Enable,
    /// Turn the proxy off
    Disable,
    /// Print whether the proxy is enabled
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind.clone(),
        store_path: cli.store.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    let control = di::control_use_case(&config);

    match cli.command.unwrap_or(Command::Run) {
        Command::Enable => {
            control.enable().await?;
            println!("enabled");
        }
        Command::Disable => {
            control.disable().await?;
            println!("disabled");
        }
        Command::Status => {
            println!("{}", control.status().await?.as_str());
        }
        Command::Run => {
            if control.status().await? == ProxyEnablement::Disabled {
                anyhow::bail!(
                    "proxy is disabled; run `netoverride enable` first (state file: {})",
                    config.control.state_path
                );
            }

            info!("Starting NetOverride v{}", env!("CARGO_PKG_VERSION"));

            let services = di::ProxyServices::new(&config);
            services.lifecycle.start().await?;

            let shutdown = CancellationToken::new();
            let signals = tokio::spawn(server::handle_signals(
                services.lifecycle.clone(),
                shutdown.clone(),
            ));

            let result =
                server::start_dns_server(&config, services.lifecycle.clone(), shutdown.clone())
                    .await;
            if let Err(e) = &result {
                error!(error = %e, "DNS listener error");
            }

            shutdown.cancel();
            signals.abort();
            services.lifecycle.stop().await;
            info!("Proxy shutdown complete");
            result?;
        }
    }

    Ok(())
}
