use clap::Parser;
use kd_refresher::args::{Args, Command};
use kd_refresher::{OpGgClient, PubgClient, PubgConfig, RefreshConfig, Refresher};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .init();

    if let Err(e) = run(args.command).await {
        error!(error = %e, "aborted");
        std::process::exit(1);
    }
}

async fn run(command: Command) -> kd_refresher::Result<()> {
    match command {
        Command::Refresh(refresh) => {
            let config = RefreshConfig::from(refresh);
            let fetcher = OpGgClient::from_config(&config)?;
            Refresher::new(fetcher, config).run().await?;
        }
        Command::Lookup(lookup) => {
            let nickname = lookup.nickname.clone();
            let client = PubgClient::new(PubgConfig::from(lookup));
            let stats = client.lookup(&nickname).await?;
            let pretty = serde_json::to_string_pretty(&stats).unwrap_or_else(|_| stats.to_string());
            println!("{pretty}");
        }
    }
    Ok(())
}
