// Rampart - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration and logging initialisation (debug mode support)
// 3. Fixture catalogue loading (built-in + user overrides)
// 4. Session restore and eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use rampart::app;

pub use rampart::core;
pub use rampart::platform;
pub use rampart::ui;
pub use rampart::util;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Duration;

/// Rampart - desktop console for the Rampart malware-analysis service.
///
/// Browse the sample repository, review full analysis reports, and run
/// the simulated upload pipeline against the bundled fixture data.
#[derive(Parser, Debug)]
#[command(name = "rampart", version, about)]
struct Cli {
    /// Directory of fixture JSON documents overriding the built-ins.
    #[arg(long = "fixtures", value_name = "DIR")]
    fixtures: Option<PathBuf>,

    /// Configuration file (defaults to the platform config path).
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fixed seed for the fabricated verdicts (replays a pipeline run).
    #[arg(long = "seed", value_name = "N")]
    seed: Option<u64>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Apply the configured theme and font scale to the egui context.
///
/// The scale is anchored at the default font size, so an untouched
/// config leaves egui's stock text styles exactly as shipped.
fn configure_appearance(ctx: &egui::Context, config: &platform::config::AppConfig) {
    if config.dark_mode {
        ctx.set_visuals(egui::Visuals::dark());
    } else {
        ctx.set_visuals(egui::Visuals::light());
    }

    let scale = config.font_size / util::constants::DEFAULT_FONT_SIZE;
    if (scale - 1.0).abs() > f32::EPSILON {
        let mut style = (*ctx.style()).clone();
        for font_id in style.text_styles.values_mut() {
            font_id.size = (font_id.size * scale).max(8.0);
        }
        ctx.set_style(style);
        tracing::debug!(font_size = config.font_size, "Applied font scale");
    }

    configure_fonts(ctx);
}

/// Configure fonts for the egui context.
///
/// On Windows, appends Segoe UI Emoji and Segoe UI Symbol from the
/// system font directory as fallbacks for both font families. The
/// status dots, shield, and warning glyphs used across the UI sit
/// outside the egui built-ins' coverage and would otherwise render as
/// squares. On non-Windows platforms the egui defaults are used
/// unchanged.
fn configure_fonts(ctx: &egui::Context) {
    #[cfg(target_os = "windows")]
    {
        let mut fonts = egui::FontDefinitions::default();

        let candidates: &[(&str, &str)] = &[
            ("Segoe UI Emoji", r"C:\Windows\Fonts\seguiemj.ttf"),
            ("Segoe UI Symbol", r"C:\Windows\Fonts\seguisym.ttf"),
        ];

        let mut loaded = false;
        for (name, path) in candidates {
            match std::fs::read(path) {
                Ok(data) => {
                    fonts
                        .font_data
                        .insert((*name).to_owned(), egui::FontData::from_owned(data).into());
                    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                        if let Some(list) = fonts.families.get_mut(&family) {
                            list.push((*name).to_owned());
                        }
                    }
                    loaded = true;
                    tracing::debug!(font = name, "Loaded Windows symbol font");
                }
                Err(e) => {
                    tracing::warn!(
                        font = name,
                        error = %e,
                        "Failed to load Windows symbol font; some glyphs may render as squares"
                    );
                }
            }
        }

        if loaded {
            ctx.set_fonts(fonts);
        }
    }

    #[cfg(not(target_os = "windows"))]
    let _ = ctx;
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and configuration before logging so the
    // configured level can take effect. Pre-init trace output from
    // these two steps is dropped; their warnings surface in the UI.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = match cli.config {
        Some(ref path) => platform::config::load_config_file(path),
        None => platform::config::load_config(&platform_paths.config_dir),
    };

    // Initialise logging subsystem
    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "Rampart starting"
    );

    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    // Determine fixture override directory: CLI override > platform default
    let fixtures_dir = cli
        .fixtures
        .clone()
        .unwrap_or_else(|| platform_paths.user_fixtures_dir.clone());

    // Load the fixture catalogue. A broken built-in set is fatal: the
    // console has nothing to show without it.
    let (catalogue, fixture_errors) = match app::catalogue::load_catalogue(Some(&fixtures_dir)) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(error = %e, "Cannot load built-in fixture data");
            eprintln!("Error: cannot load built-in fixture data: {e}");
            std::process::exit(1);
        }
    };

    // Build the ingestion queue. A fixed seed replays the same verdict
    // sequence; without one the verdicts differ per run.
    let tick_interval = Duration::from_millis(config.tick_interval_ms);
    let analysis_delay = Duration::from_millis(config.analysis_delay_ms);
    let queue = match cli.seed {
        Some(seed) => {
            tracing::info!(seed, "Using fixed verdict seed");
            core::ingest::IngestQueue::with_rng(
                tick_interval,
                analysis_delay,
                StdRng::seed_from_u64(seed),
            )
        }
        None => core::ingest::IngestQueue::new(tick_interval, analysis_delay),
    };

    // Create application state
    let mut state = app::state::AppState::new(catalogue, queue, cli.debug);
    for warning in config_warnings {
        state.push_warning(warning);
    }
    for error in &fixture_errors {
        state.push_warning(error.to_string());
    }
    state.fixtures_dir = Some(fixtures_dir);

    // Restore the previous session (silently starts fresh when absent
    // or unreadable), then enable saving for this session.
    let session_file = app::session::session_path(&platform_paths.data_dir);
    if let Some(data) = app::session::load(&session_file) {
        state.restore_session(data);
    }
    state.session_path = Some(session_file);

    tracing::info!(
        records = state.records.len(),
        reports = state.reports.len(),
        "Ready to launch GUI"
    );

    // Launch the GUI
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_appearance(&cc.egui_ctx, &config);
            Ok(Box::new(gui::RampartApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch Rampart GUI: {e}");
        std::process::exit(1);
    }
}
