use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use reqtrack_cli::{CliConfig, LogFormat};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let fmt_layer = match LogFormat::from_env()? {
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reqtrack_cli=info,reqtrack_db=info".into()),
        )
        .with(fmt_layer)
        .init();

    let config = CliConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let table = reqtrack_cli::run(&config)?;
    print!("{table}");
    Ok(())
}
