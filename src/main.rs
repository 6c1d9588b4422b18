//! Replay a scripted scroll scenario and log what the controller did.
//!
//! ```text
//! snapscroll scenarios/tower.toml [--options options.toml]
//! ```
//!
//! Set `RUST_LOG=debug` to see per-event outcomes as they are decided.

use std::path::{Path, PathBuf};

use clap::Parser;
use snapscroll::options::Options;
use snapscroll::replay::{self, ReplayReport, Scenario};
use snapscroll::{EventOutcome, SnapError};

#[derive(Parser, Debug)]
#[command(name = "snapscroll")]
#[command(version, about = "Replay a scripted scroll scenario against the snap controller")]
struct Args {
    /// Scenario TOML file (sections, viewport, timed input)
    scenario: PathBuf,

    /// Options TOML file; defaults apply when omitted
    #[arg(long)]
    options: Option<PathBuf>,
}

fn load(args: &Args) -> Result<(Scenario, Options), SnapError> {
    let scenario = Scenario::load(&args.scenario)?;
    let options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    Ok((scenario, options))
}

fn report(path: &Path, report: &ReplayReport) {
    log::info!(
        "{}: {} inputs over {} frames",
        path.display(),
        report.steps.len(),
        report.frames
    );
    for step in &report.steps {
        let outcome = match step.response.map(|r| r.outcome) {
            None => "native".to_owned(),
            Some(EventOutcome::Navigated(t)) => {
                format!("section {} -> {} (y={})", t.from, t.to, t.target_y)
            }
            Some(EventOutcome::Scrolled(_)) => "free scroll".to_owned(),
            Some(EventOutcome::Ignored(reason)) => format!("ignored ({reason:?})"),
            Some(EventOutcome::Consumed) => "consumed".to_owned(),
            Some(EventOutcome::Passthrough) => "passthrough".to_owned(),
        };
        let prevented = step.response.is_some_and(|r| r.prevent_default);
        let input = format!("{:?}", step.input);
        log::info!(
            "{:>6}ms {input:<40} {outcome}{}",
            step.at_ms,
            if prevented { " [prevent default]" } else { "" }
        );
    }
    log::info!(
        "final: section {} at y={}, {} class changes",
        report.final_index,
        report.final_scroll_y,
        report.class_changes.len()
    );
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let args = Args::parse();

    let (scenario, options) = match load(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let result = replay::run(&scenario, options);
    report(&args.scenario, &result);
}
