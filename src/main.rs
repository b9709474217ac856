//! # Tide Clock Application Entry Point
//!
//! This binary drives the tide clock face from the host clock. It supports a one-shot mode
//! (print a single frame, or the upcoming tides as JSON) and a running mode that refreshes
//! once per tick and prints a frame whenever the displayed minute changes.
//!
//! Usage:
//!   tide-clock [--config PATH] [--next-site] [--once | --json]

use std::env;
use std::time::Duration;

use anyhow::Context;
use log::{info, warn};
use tide_clock::app::TideClock;
use tide_clock::clock::{Clock, SystemClock};
use tide_clock::config::{Config, CONFIG_FILE};
use tide_clock::renderer::render_ascii;

/// Value following `flag` on the command line, if any.
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let once = args.iter().any(|arg| arg == "--once");
    let json = args.iter().any(|arg| arg == "--json");
    let next_site = args.iter().any(|arg| arg == "--next-site");

    let config_path = flag_value(&args, "--config").unwrap_or_else(|| CONFIG_FILE.to_string());
    let config = Config::load_from_path(&config_path);

    let mut clock = TideClock::from_config(&config)
        .with_context(|| format!("building tide clock from {config_path}"))?;
    if next_site {
        clock.next_site().context("advancing to next site")?;
    }

    let host = SystemClock;

    // One-shot JSON output of the upcoming event chain
    if json {
        let now = host.now_standard();
        let events = clock.upcoming(now).to_vec();
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    // One-shot ASCII frame
    if once {
        println!("{}", render_ascii(&clock.frame(host.now_standard())));
        return Ok(());
    }

    let tick_ms = if config.display.tick_ms == 0 {
        warn!("tick_ms of 0 is not usable, refreshing every 1000 ms");
        1000
    } else {
        config.display.tick_ms
    };
    info!("Refreshing every {tick_ms} ms for {}", clock.site().name);

    // Single periodic tick; the clock face is only touched from this task
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let mut interval = tokio::time::interval(Duration::from_millis(tick_ms));
        loop {
            interval.tick().await;
            if let Some(frame) = clock.tick(host.now_standard()) {
                println!("{}", render_ascii(&frame));
            }
        }
    });

    Ok(())
}
