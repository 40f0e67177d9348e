use life_reel::{
    config::{check_period, Cli, Mode},
    draw::{self, Glyphs, Player},
    get_snapshot_sequence, Engine, Pattern, SnapshotSequence,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli.validate()?;

    let built;
    let sequence = if cli.is_reference() {
        get_snapshot_sequence().context("failed to precompute generations")?
    } else {
        let engine = Engine::new(Pattern::new_gun().clone());
        built = SnapshotSequence::build(&engine, cli.window(), cli.generations)
            .context("failed to precompute generations")?;
        &built
    };

    let (mode, period) = if cli.detect_period {
        match sequence.detect_period() {
            Some(p) => {
                info!(period = p, "detected period");
                (cli.mode, p)
            }
            None => {
                warn!("no repeat found among the stored generations, playing them once");
                (Mode::Once, sequence.len())
            }
        }
    } else {
        (cli.mode, cli.period)
    };
    if mode == Mode::Loop {
        check_period(period, sequence.len())?;
    }

    let glyphs = Glyphs { alive: cli.alive, dead: cli.dead };
    let player = Player::new(sequence, mode, cli.delay(), period)
        .glyphs(glyphs)
        .frames(cli.frames);
    draw::run(&player)?;
    Ok(())
}
