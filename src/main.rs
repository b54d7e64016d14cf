use clap::Parser;
use log::LevelFilter;
use menagerie::core::config::{self, CliOverrides, MenagerieConfig};
use menagerie::core::screen::ScreenId;
use menagerie::tui;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "menagerie", about = "Terminal admin client for a zoo-management backend")]
struct Args {
    /// Backend base URL (overrides MENAGERIE_API_URL and the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Screen to open on startup, e.g. "list-keepers"
    #[arg(long)]
    screen: Option<ScreenId>,

    /// Log verbosity: off, error, warn, info, debug, trace
    #[arg(long, value_parser = parse_level)]
    log_level: Option<LevelFilter>,

    /// Where to write the log
    #[arg(long, default_value = "menagerie.log")]
    log_file: PathBuf,
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    raw.parse()
        .map_err(|_| format!("unknown log level: {raw}"))
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // A broken config file should not keep the client from starting
    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (MenagerieConfig::default(), Some(e)),
    };
    let resolved = config::resolve(
        &file_config,
        CliOverrides {
            api_url: args.api_url.as_deref(),
            start_screen: args.screen,
            log_level: args.log_level,
        },
    );

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
    }
    log::info!(
        "Menagerie starting up against {} (timeout: {:?}, start screen: {})",
        resolved.base_url,
        resolved.timeout,
        resolved.start_screen
    );

    tui::run(resolved)
}
