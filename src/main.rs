use std::path::PathBuf;

use clap::Parser;
use overleaf_archiver::prelude::*;

/// Backs up Overleaf projects as zip archives, once or on a cron schedule.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// List the selected projects and exit without downloading anything
    #[arg(long)]
    list: bool,

    /// Ignore the configured schedule and back up a single time
    #[arg(long, conflicts_with = "list")]
    once: bool,
}

#[tokio::main]
async fn main() -> ArchiverResult<()> {
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{EnvFilter, Layer};

    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let env_filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(non_blocking_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();
    tracing::debug!("running overleaf-archiver {}", full_version());

    let args = Args::parse();

    let result = run(args).await;
    if let Err(err) = &result {
        tracing::error!("{err}");
    }

    result
}

async fn run(args: Args) -> ArchiverResult<()> {
    let config = Config::from_path(&args.config)?;
    let client = ApiClient::new(&config.client_settings()?)?;

    if args.list {
        let selected = config.projects.select(projects::discover(&client).await);

        for project in selected {
            let last_updated = project
                .last_updated
                .map(|ts| ts.to_rfc3339())
                .unwrap_or_else(|| "-".to_string());

            println!(
                "{}\t{}\t{}\t{}",
                project.id,
                last_updated,
                project.owner.display_name(),
                project.name
            );
        }

        return Ok(());
    }

    let mut settings = config.backup.clone();
    if args.once {
        settings.schedule.clear();
    }

    let manager = BackupManager::new(client, settings);

    match manager.run(&config.projects).await {
        Ok(Some(report)) => {
            tracing::info!(
                directory = ?report.directory,
                archives = report.archives.len(),
                pruned = report.pruned.len(),
                "backup finished"
            );

            Ok(())
        }
        Ok(None) => Ok(()),
        Err(err) => Err(err.into()),
    }
}
