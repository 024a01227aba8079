mod replay;
mod trace;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

use replay::{replay, ReplaySetup};
use trace::{parse_expected, parse_trace, ExpectedCrossing};

#[derive(Debug, Parser)]
#[command(name = "force_replay")]
#[command(about = "Replay a captured force trace through the threshold tracker")]
struct Cli {
    /// CSV of `force_trace,ms,phase,contact,force[,max_force]` lines.
    trace: PathBuf,
    /// Threshold config to use instead of the compiled `config/force.toml`.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Expected crossings, one `<index>+` or `<index>-` per line.
    #[arg(long)]
    expect: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let setup = match &cli.config {
        Some(path) => ReplaySetup::from_path(path)?,
        None => ReplaySetup::compiled()?,
    };
    let batches = parse_trace(&cli.trace)?;
    let report = replay(setup, &batches)?;
    print!("{}", report.render());

    if let Some(expect_path) = &cli.expect {
        let expected = parse_expected(expect_path)?;
        check_expected(&expected, &report.crossings())?;
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "force_replay=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn check_expected(expected: &[ExpectedCrossing], actual: &[ExpectedCrossing]) -> Result<()> {
    if expected == actual {
        return Ok(());
    }
    let join = |list: &[ExpectedCrossing]| {
        list.iter()
            .map(|c| c.token())
            .collect::<Vec<_>>()
            .join(",")
    };
    eprintln!("expected crossings: {}", join(expected));
    eprintln!("actual crossings:   {}", join(actual));
    bail!("crossing sequence mismatch")
}
