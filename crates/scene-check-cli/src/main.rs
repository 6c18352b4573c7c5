//! Command-line front end for the scene checks.
//!
//! Loads a scene description from JSON, maps flags onto the check
//! toggles, dispatches the requested action, and prints the report.
//! Exits with status 1 when violations were found, 2 on errors.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use scene_check::{Action, CheckOptions, Report, Scene};

mod output;

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliAction {
    /// Scale check only
    Scale,
    /// UV winding check only
    Uv,
    /// Pivot check only
    Pivot,
    /// Vertex overlap check only
    Overlap,
    /// All four checks in fixed order
    All,
}

impl From<CliAction> for Action {
    fn from(action: CliAction) -> Self {
        match action {
            CliAction::Scale => Action::VerifyScale,
            CliAction::Uv => Action::VerifyUv,
            CliAction::Pivot => Action::VerifyPivot,
            CliAction::Overlap => Action::VerifyOverlap,
            CliAction::All => Action::VerifyAll,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "scene-check",
    version,
    about = "Validate scene meshes: UV winding, scale, pivots, overlapping vertices"
)]
struct Cli {
    /// Scene description file (JSON)
    scene: PathBuf,

    /// Which check to run
    #[arg(long, value_enum, default_value_t = CliAction::All)]
    action: CliAction,

    /// Override the selection stored in the scene file
    #[arg(long, num_args = 1.., value_name = "OBJECT")]
    select: Vec<String>,

    /// Clear the report before each check instead of separating runs
    #[arg(long)]
    auto_clear: bool,

    /// Reset non-unit scales to (1,1,1)
    #[arg(long)]
    fix_scale: bool,

    /// Flip the UVs of wrong-winding faces
    #[arg(long)]
    flip_faces: bool,

    /// Reset off-origin pivots to (0,0,0)
    #[arg(long)]
    reset_pivot: bool,

    /// Move objects along with their pivot when resetting
    #[arg(long, requires = "reset_pivot")]
    move_with_pivot: bool,

    /// Weld overlapping vertices after the scan
    #[arg(long)]
    merge_overlapping: bool,

    /// Skip the O(n^2) overlap scan
    #[arg(long)]
    skip_overlap_check: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Suppress all output
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn check_options(&self) -> CheckOptions {
        CheckOptions {
            auto_clear: self.auto_clear,
            replace_scale: self.fix_scale,
            flip_faces: self.flip_faces,
            reset_pivot: self.reset_pivot,
            move_with_pivot: self.move_with_pivot,
            remove_overlapping: self.merge_overlapping,
            skip_overlap_check: self.skip_overlap_check,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(err) => {
            output::error(&format!("{err:#}"), cli.quiet);
            ExitCode::from(2)
        }
    }
}

/// Run the requested action; returns whether violations were found.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let data = fs::read_to_string(&cli.scene)
        .with_context(|| format!("failed to read scene file {}", cli.scene.display()))?;
    let mut scene: Scene = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse scene file {}", cli.scene.display()))?;

    if !cli.select.is_empty() {
        scene.select(cli.select.iter().cloned());
    }

    let opts = cli.check_options();
    let mut report = Report::new();
    scene.run(cli.action.into(), &opts, &mut report)?;

    output::print_report(&report, cli.format, cli.quiet);
    Ok(report.has_violations())
}
