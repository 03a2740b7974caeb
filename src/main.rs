mod audio;
mod avatar;
mod capture;
mod config;
mod game;
mod input;
mod logging;
mod render;
mod roster;
mod screens;
mod types;
mod ui;

use clap::Parser;
use log::{LevelFilter, info};
use macroquad::prelude::*;
use std::path::PathBuf;
use std::process;

use crate::capture::{CommandCapture, DisabledCapture, PortraitSource};
use crate::roster::Roster;
use crate::types::{MenuAction, PlayerIdentity};

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path of the JSON player store.
    #[arg(long, default_value = "players.json")]
    db: PathBuf,

    /// Directory holding fonts, music and captured portraits.
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// External portrait capture tool, invoked as `<cmd> <name> <output>`.
    /// Without it, portrait capture always reports cancellation.
    #[arg(long)]
    capture_cmd: Option<String>,

    /// Debug filter to specify log topics (e.g., "ui,match,roster,capture")
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Blade Arena".to_owned(),
        window_width: config::WINDOW_WIDTH,
        window_height: config::WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize the logger
    let log_level = match args.log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    if let Err(e) = logging::init_logger(log_level, args.debug_filter) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    info!("Initializing Blade Arena...");

    // Portraits land in the assets directory, make sure it exists
    if let Err(e) = std::fs::create_dir_all(&args.assets) {
        log::warn!(
            "Could not create assets directory {}: {}",
            args.assets.display(),
            e
        );
    }

    // The player store must be valid before any screen runs
    let roster = match Roster::open(&args.db) {
        Ok(roster) => roster,
        Err(e) => {
            log::error!("Failed to open player store {}: {}", args.db.display(), e);
            process::exit(1);
        }
    };

    let capture: Box<dyn PortraitSource> = match args.capture_cmd {
        Some(cmd) => Box::new(CommandCapture::new(cmd)),
        None => Box::new(DisabledCapture),
    };

    let renderer = render::Renderer::load(&args.assets).await;
    let mut audio_manager = audio::AudioManager::new();
    audio_manager.load_assets(&args.assets).await;
    audio_manager.start_music();

    // Identities survive across matches so a pause -> main menu round trip
    // can fall back to them during reselection
    let mut identities: Option<[PlayerIdentity; 2]> = None;
    loop {
        let resolved = match screens::main_menu(&renderer.fonts).await {
            MenuAction::QuickStart => Some(
                screens::quick_start(&roster, capture.as_ref(), &renderer.fonts, &args.assets)
                    .await,
            ),
            MenuAction::PlayerSelect => {
                let previous = identities.clone();
                Some(
                    screens::player_select(
                        &roster,
                        capture.as_ref(),
                        &renderer.fonts,
                        &args.assets,
                        previous.as_ref(),
                    )
                    .await,
                )
            }
            MenuAction::Settings => {
                screens::settings(&renderer.fonts, &mut audio_manager).await;
                None
            }
            MenuAction::Credits => {
                screens::credits(&renderer.fonts).await;
                None
            }
            MenuAction::Quit => process::exit(0),
        };

        if let Some(current) = resolved {
            let avatars = render::load_avatars(&current).await;
            let mut state = game::MatchState::new(&current);
            game::run_match(&mut state, &avatars, &renderer, &audio_manager).await;
            identities = Some(current);
        }
    }
}
