use std::process;
use clap::Parser;
use dotenv::dotenv;
use log::*;
use anyhow::Result;
use sentinel_conf::{generate, settings::Settings, Opts};

#[tokio::main]
async fn main()
{
    // read .env before the logger is set up, so RUST_LOG can be set in .env too.
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Opts::parse();
    info!("Starting up redis sentinel config generation");

    if let Err(error) = run(&options).await {
        error!("{:#}", error);
        process::exit(1);
    }
}

async fn run(
    options: &Opts,
) -> Result<()>
{
    let settings = Settings::from_opts(options)?;
    settings.log();
    generate::run(&settings).await?;
    Ok(())
}
