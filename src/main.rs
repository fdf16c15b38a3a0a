use clap::Parser;
use compendium::core::config::{CliOverrides, load_config, resolve};
use compendium::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "compendium", about = "Terminal browser for the Hyrule Compendium")]
struct Args {
    /// Compendium API base URL (overrides config and COMPENDIUM_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Config file to use instead of ~/.compendium/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config =
        load_config(args.config.as_deref()).map_err(|e| std::io::Error::other(e.to_string()))?;
    let config = resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url.as_deref(),
            timeout_secs: args.timeout,
        },
    );

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }

    log::info!(
        "Compendium starting up against {} (timeout {:?})",
        config.base_url,
        config.timeout
    );

    tui::run(config)
}
