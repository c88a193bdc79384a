use clap::Parser;
use hubchat::core::config::{self, CliOverrides, HubchatConfig};
use hubchat::transport::Endpoint;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "hubchat", about = "Terminal client for a WebSocket chat hub")]
struct Args {
    /// Hub address as host[:port]
    #[arg(long)]
    host: Option<String>,

    /// Path of the WebSocket endpoint on the hub
    #[arg(long)]
    path: Option<String>,

    /// File to write the debug log to
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Config errors cannot be logged yet; keep them until the logger exists
    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (HubchatConfig::default(), Some(e)),
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            host: args.host,
            path: args.path,
            log_file: args.log_file,
        },
    );

    // The terminal belongs to the UI, so logs go to a file
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(&resolved.log_file) {
        Ok(log_file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
        }
        Err(e) => eprintln!("Cannot open log file {}: {}", resolved.log_file, e),
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
    }
    log::info!("hubchat starting up with {:?}", resolved);

    let endpoint = Endpoint::new(&resolved.host, &resolved.path).map_err(std::io::Error::other)?;

    hubchat::tui::run(endpoint)
}
