// platform-switch - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading (platform config dir or --config)
// 3. Logging initialisation (debug mode support)
// 4. Platform detection and the switch run

use platform_switch::app::switch::{self, SwitchOptions};
use platform_switch::core::model::RunSummary;
use platform_switch::core::rewrite::RewriteOptions;
use platform_switch::platform::{self, config::AppConfig};
use platform_switch::util::{self, error::SwitchError};

use clap::Parser;
use std::path::PathBuf;

/// platform-switch - toggle platform-specific blocks in editor config files.
///
/// Finds settings.json, c_cpp_properties.json and launch.json under .vscode
/// directories and uncomments only the section between PLATFORM_SWITCH_START
/// and PLATFORM_SWITCH_END that matches the host operating system.
#[derive(Parser, Debug)]
#[command(name = "platform-switch", version, about)]
struct Cli {
    /// Directory to scan.
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Target platform instead of the detected one (windows, macos, linux).
    #[arg(short = 'p', long = "platform")]
    platform: Option<String>,

    /// Show what would change without writing any file.
    #[arg(short = 'n', long = "dry-run")]
    dry_run: bool,

    /// Configuration file to use instead of the platform default.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Do not touch the .vscode directory directly under ROOT.
    #[arg(long = "exclude-root-config")]
    exclude_root_config: bool,

    /// Print the run summary as JSON instead of progress lines.
    #[arg(long = "json")]
    json: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is loaded before logging so its level can take effect; its
    // warnings are replayed once tracing is up.
    let (app_config, config_warnings) = match &cli.config {
        Some(path) => match platform::config::load_config_file(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => platform::config::load_config(&platform::config::PlatformPaths::resolve()),
    };

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "platform-switch starting"
    );

    for w in &config_warnings {
        tracing::warn!(warning = %w, "Config warning");
    }

    if let Err(e) = run(&cli, app_config) {
        tracing::error!(error = %e, "Run failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, app_config: AppConfig) -> Result<(), SwitchError> {
    let active = platform::os::resolve_platform(cli.platform.as_deref())?;

    let mut discovery = app_config.discovery;
    discovery.exclude_root_config_dir |= cli.exclude_root_config;

    let options = SwitchOptions {
        discovery,
        rewrite: RewriteOptions {
            platform: active,
            syntax: app_config.syntax,
            outside_region: app_config.outside_region,
        },
        dry_run: cli.dry_run,
    };

    let quiet = cli.json;
    let summary = switch::run_switch(&cli.root, &options, |outcome| {
        if !quiet {
            println!("{} {}", outcome.status.label(), outcome.path.display());
        }
    })?;

    if cli.json {
        print_json(&summary);
    } else if summary.outcomes.is_empty() {
        println!(
            "No configuration files found under {}",
            summary.root.display()
        );
    }

    tracing::info!(
        platform = %summary.platform,
        files = summary.files_discovered,
        changed = summary.changed_count(),
        "Run complete"
    );

    Ok(())
}

fn print_json(summary: &RunSummary) {
    match serde_json::to_string_pretty(summary) {
        Ok(text) => println!("{text}"),
        Err(e) => tracing::error!(error = %e, "Failed to serialise run summary"),
    }
}
