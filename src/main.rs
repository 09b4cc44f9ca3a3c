use anyhow::{anyhow, Context};
use chrono::Local;
use clap::Parser;
use confluence::config::{AppConfig, ConfigManager, ProviderKind};
use confluence::data::build_source;
use confluence::engines::{RefreshScheduler, SnapshotEngine, TickDecision};
use confluence::ui::ConfluenceApp;
use eframe::NativeOptions;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Multi-timeframe EMA confluence dashboard", long_about = None)]
struct Cli {
    /// TOML config file (defaults to ./confluence.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Market to show first, e.g. NAS100 or GOLD
    #[arg(long)]
    market: Option<String>,

    /// Use generated prices instead of the live provider
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Compute one snapshot, print it as JSON and exit
    #[arg(long, default_value_t = false, conflicts_with = "watch")]
    once: bool,

    /// Run headless, printing one summary line per refresh
    #[arg(long, default_value_t = false)]
    watch: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();
    log::debug!("Parsed arguments: {:?}", args);

    let manager = ConfigManager::new();
    manager
        .load_layered(args.config.as_deref())
        .context("loading configuration")?;
    manager.update(|config| {
        if let Some(market) = &args.market {
            config.dashboard.default_market = market.clone();
        }
        if args.synthetic {
            config.market_data.provider = ProviderKind::Synthetic;
        }
    })?;
    let config = manager.get();

    let source = build_source(&config.market_data)?;
    let engine = Arc::new(SnapshotEngine::new(source, config.signals.clone()));

    if args.once {
        let snapshot = engine.compute_snapshot(&config.dashboard.default_market, Local::now())?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }
    if args.watch {
        return watch(&engine, &config);
    }

    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 760.0])
            .with_min_inner_size([900.0, 560.0])
            .with_title(config.dashboard.window_title.clone()),
        ..Default::default()
    };

    let title = config.dashboard.window_title.clone();
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| Ok(Box::new(ConfluenceApp::new(cc, engine, &config)))),
    )
    .map_err(|e| anyhow!("GUI exited with error: {}", e))
}

/// Synchronous refresh loop; each cycle finishes before the next tick is considered.
fn watch(engine: &SnapshotEngine, config: &AppConfig) -> anyhow::Result<()> {
    let market = &config.dashboard.default_market;
    let mut scheduler = RefreshScheduler::new(config.dashboard.refresh_interval());

    loop {
        match scheduler.poll(Instant::now(), false) {
            TickDecision::Fire => {
                let snapshot = engine.compute_snapshot(market, Local::now())?;
                println!("{}", snapshot.summary_line());
            }
            TickDecision::Wait(remaining) => std::thread::sleep(remaining),
            TickDecision::Coalesced => {}
        }
    }
}
