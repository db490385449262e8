use anyhow::Result;
use asnlist::{config::Config, fetcher::RipeStat, updater::Updater};
use dotenv::dotenv;
use log::{error, info};

async fn run() -> Result<()> {
    let config = match Config::from_file(None).await {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to read configuration, error:{:#}", e);
            return Err(e);
        }
    };

    let source = RipeStat::build(&config.registry)?;
    let updater = Updater::build(config.target, config.sections, source);
    let report = updater.run().await?;

    for section in report.sections {
        info!(
            "{}: {} prefixes -> {} rules",
            section.name, section.prefixes, section.rules
        );
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    pretty_env_logger::init();

    if let Err(e) = run().await {
        eprintln!("{} failed: {:#}", env!("CARGO_PKG_NAME"), e);
        return Err(e);
    }
    Ok(())
}
