use clap::Parser;
use lib::config::ReceiverConfig;

/// Test double for a runtime message ingestion backend.
///
/// Listens on $PORT (default 3005) and $HOST (default 0.0.0.0), accepts
/// `POST /runtime-messages` with any JSON body, logs it and replies `Ok`.
///
/// Configuration comes from the environment only. The binary understands `--help`
/// and `--version`; any other argument is a usage error (exit status 2).
#[derive(Parser, Debug)]
#[command(name = "echo-receiver", version)]
struct Cli {}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Cli {} = Cli::parse();

    if let Err(e) = run().await {
        log::error!("echo receiver failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ReceiverConfig::from_env()?;
    lib::receiver::start(config).await
}
