//! Grid Dashboard - CLI entry point
//!
//! `gdash` drives a headless grid session against the saved dashboard
//! layout: inspect it, check it for repairs, apply a new arrangement, or
//! reset it to the built-in defaults.

use clap::{Parser, Subcommand};
use grid_dashboard::config::schema::Config;
use grid_dashboard::config::{default, loader::ConfigLoader, xdg};
use grid_dashboard::layout::DefaultSchema;
use grid_dashboard::widgets::WidgetCatalog;
use grid_dashboard::{
    logging, Breakpoint, FileStorage, GridOptions, GridSession, HeadlessSurface, KeyValueStore,
    Layout, LayoutItem, LayoutStore,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Grid Dashboard layout tool
#[derive(Parser)]
#[command(name = "gdash")]
#[command(version, about = "Inspect and manage the saved dashboard layout")]
struct Cli {
    /// Directory holding the saved layout (overrides `[storage] dir`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the gdash CLI
#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Layout(LayoutCommand),

    /// List the dashboard widgets
    Widgets,

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Commands that run against an activated grid session.
#[derive(Subcommand)]
enum LayoutCommand {
    /// Print the layout the dashboard would render
    Show {
        /// Only show the tier active at this viewport width in pixels
        #[arg(long, conflicts_with = "breakpoint")]
        width: Option<u32>,
        /// Only show this tier (lg, md, sm)
        #[arg(long)]
        breakpoint: Option<Breakpoint>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Report repairs needed by the saved layout (exit 1 if any)
    Check,

    /// Replace the saved layout with the one in FILE ("-" reads stdin)
    Apply {
        /// Layout JSON keyed by breakpoint
        file: PathBuf,
    },

    /// Discard the saved layout and restore the defaults
    Reset,
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

type Session = GridSession<FileStorage, HeadlessSurface>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Layout(command) => run_layout_command(command, cli.storage_dir),
        Commands::Widgets => run_widgets_command(),
        Commands::Config { action } => run_config_command(action),
    }
}

/// Loads config, starts logging, activates a session and runs `command`.
fn run_layout_command(command: LayoutCommand, storage_dir: Option<PathBuf>) -> ExitCode {
    let config = match ConfigLoader::load_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(config.logging.level);

    let mut session = match open_session(&config, storage_dir) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match command {
        LayoutCommand::Show {
            width,
            breakpoint,
            json,
        } => {
            let only = breakpoint.or_else(|| width.map(|w| session.active_breakpoint(w)));
            run_show_command(&session, only, json)
        }
        LayoutCommand::Check => run_check_command(&session),
        LayoutCommand::Apply { file } => run_apply_command(&mut session, &file),
        LayoutCommand::Reset => match session.reset_to_default() {
            Ok(_) => {
                println!("Layout reset to defaults");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

/// Builds a file-backed session and activates it.
fn open_session(
    config: &Config,
    storage_dir: Option<PathBuf>,
) -> Result<Session, grid_dashboard::SessionError> {
    let dir = storage_dir.unwrap_or_else(|| config.storage.resolved_dir());
    tracing::debug!("Using layout storage at {}", dir.display());

    let store = LayoutStore::with_key(FileStorage::new(dir), config.storage.key.as_str());
    let options = GridOptions::from_config(&config.grid);
    let mut session = GridSession::create(store, HeadlessSurface::new(), options);
    session.activate()?;
    Ok(session)
}

/// Prints the live layout, either every tier or just `only`.
fn run_show_command(session: &Session, only: Option<Breakpoint>, json: bool) -> ExitCode {
    let layout = match session.current_layout() {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if json {
        let rendered = match only {
            Some(bp) => serde_json::to_string_pretty(layout.items(bp)),
            None => serde_json::to_string_pretty(layout),
        };
        return match rendered {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to serialize layout: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let tiers: Vec<Breakpoint> = match only {
        Some(bp) => vec![bp],
        None => Breakpoint::ALL.to_vec(),
    };
    for (n, bp) in tiers.into_iter().enumerate() {
        if n > 0 {
            println!();
        }
        print_tier(bp, layout.items(bp));
    }
    ExitCode::SUCCESS
}

fn print_tier(bp: Breakpoint, items: &[LayoutItem]) {
    println!("{bp} (>= {}px, {} columns)", bp.min_width(), bp.columns());
    println!(
        "  {:<12} {:>3} {:>3} {:>3} {:>3}  {:>7}  {:>7}",
        "WIDGET", "X", "Y", "W", "H", "W RANGE", "H RANGE"
    );
    for item in items {
        println!(
            "  {:<12} {:>3} {:>3} {:>3} {:>3}  {:>7}  {:>7}",
            item.id.as_str(),
            item.x,
            item.y,
            item.w,
            item.h,
            format!("{}-{}", item.min_w, item.max_w),
            format!("{}-{}", item.min_h, item.max_h),
        );
    }
}

/// Prints the repairs made while loading the saved layout.
///
/// The session treats an unreadable store as empty, so the raw read is
/// repeated here to tell the two apart.
fn run_check_command(session: &Session) -> ExitCode {
    let store = session.store();
    if let Err(e) = store.storage().get(store.key()) {
        println!("Saved layout cannot be read; defaults will be used");
        println!("  - {e}");
        return ExitCode::FAILURE;
    }

    let report = session.activation_report();
    if report.is_clean() {
        println!("Saved layout is consistent");
        return ExitCode::SUCCESS;
    }

    if report.is_malformed() {
        println!("Saved layout is unreadable; defaults will be used");
    } else {
        println!("Saved layout needs {} repair(s):", report.anomalies().len());
    }
    for anomaly in report.anomalies() {
        println!("  - {anomaly}");
    }
    ExitCode::FAILURE
}

/// Reads a full layout and hands it to the session as a surface change.
fn run_apply_command(session: &mut Session, file: &Path) -> ExitCode {
    let text = match read_input(file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: failed to read {}: {e}", file.display());
            return ExitCode::FAILURE;
        }
    };
    let layout: Layout = match serde_json::from_str(&text) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("Error: invalid layout JSON: {e}");
            return ExitCode::FAILURE;
        }
    };

    for (bp, items) in layout.iter() {
        for item in items.iter().filter(|item| !item.is_valid(bp.columns())) {
            eprintln!(
                "Warning: {bp}/{} does not fit its constraints; it will be repaired on next load",
                item.id
            );
        }
    }

    match session.on_layout_change(layout) {
        Ok(()) => {
            println!("Layout saved");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn read_input(file: &Path) -> std::io::Result<String> {
    if file == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(file)
    }
}

/// Lists the catalog with each widget's size limits on the widest tier.
fn run_widgets_command() -> ExitCode {
    let catalog = WidgetCatalog::new();
    let schema = DefaultSchema::new();
    for info in catalog.iter() {
        let limits = schema
            .constraints_for_widget(info.id)
            .map(|c| format!("w {}-{}, h {}-{}", c.min_w, c.max_w, c.min_h, c.max_h))
            .unwrap_or_default();
        println!("{:<12} {:<6} {:<24} {}", info.id, info.kind, info.title, limits);
    }
    ExitCode::SUCCESS
}

fn run_config_command(action: ConfigAction) -> ExitCode {
    let result = match action {
        ConfigAction::Init { force } => default::create_default_config(force).map(|path| {
            println!("Created configuration at {}", path.display());
        }),
        ConfigAction::Path => {
            println!("{}", xdg::config_path().display());
            Ok(())
        }
        ConfigAction::Validate => ConfigLoader::load_default().map(|config| {
            println!("Configuration is valid");
            println!("{config:#?}");
        }),
    };
    if let Err(e) = result {
        eprintln!("Config error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_parses_breakpoint_name() {
        let cli = Cli::try_parse_from(["gdash", "show", "--breakpoint", "md"]).expect("parse");
        match cli.command {
            Commands::Layout(LayoutCommand::Show { breakpoint, .. }) => {
                assert_eq!(breakpoint, Some(Breakpoint::Md))
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn show_rejects_width_with_breakpoint() {
        let result = Cli::try_parse_from(["gdash", "show", "--width", "800", "--breakpoint", "lg"]);
        assert!(result.is_err());
    }

    #[test]
    fn storage_dir_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["gdash", "reset", "--storage-dir", "/tmp/layouts"])
            .expect("parse");
        assert_eq!(cli.storage_dir, Some(PathBuf::from("/tmp/layouts")));
    }

    #[test]
    fn apply_accepts_stdin_marker() {
        let cli = Cli::try_parse_from(["gdash", "apply", "-"]).expect("parse");
        match cli.command {
            Commands::Layout(LayoutCommand::Apply { file }) => {
                assert_eq!(file, PathBuf::from("-"))
            }
            _ => panic!("expected apply"),
        }
    }
}
