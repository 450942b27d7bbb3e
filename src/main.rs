use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use newsflash::ViewMode;
use newsflash::coordinator::Coordinator;
use newsflash::core::config::{self, CliOverrides};
use newsflash::core::state::App;
use newsflash::gateway::HttpGateway;
use newsflash::tui;

#[derive(Parser)]
#[command(name = "newsflash", about = "Terminal client for the news aggregation service")]
struct Args {
    /// Base URL of the news service (overrides config and NEWSFLASH_API_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Initial article layout
    #[arg(long, value_enum)]
    view: Option<ViewMode>,

    /// Articles per page
    #[arg(long)]
    page_size: Option<u32>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to newsflash.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("newsflash.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Ignoring config file: {}", e);
            eprintln!("newsflash: ignoring config file ({}), using defaults", e);
            config::NewsflashConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.base_url,
            view_mode: args.view,
            page_size: args.page_size,
        },
    );

    log::info!("Newsflash starting up against {}", resolved.base_url);

    let gateway = HttpGateway::with_timeout(&resolved.base_url, resolved.request_timeout)
        .map_err(std::io::Error::other)?;
    let mut coordinator = Coordinator::new(Arc::new(gateway), App::from_config(&resolved));

    // The probe reports back through the action channel; the first frame
    // is drawn while it is still retrying
    coordinator.begin_startup(resolved.probe);
    coordinator.start_auto_refresh(resolved.auto_refresh);

    tui::run(&mut coordinator)
}
