use anyhow::{Context, Result};
use clap::Parser;
use std::time::Instant;
use tracing::{info, warn};

mod config;

use config::Config;
use playoff_core::{
    run_simulation, BracketConfig, Conference, MatchupTable, Report, TeamRegistry, Tournament,
};

fn main() -> Result<()> {
    // Logs go to stderr; the report is the only thing on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let registry = TeamRegistry::from_path(&config.teams)
        .with_context(|| format!("loading teams from {}", config.teams.display()))?;

    let mut table = MatchupTable::new();
    for (conf, path) in [
        (Conference::Afc, &config.afc_matchups),
        (Conference::Nfc, &config.nfc_matchups),
    ] {
        table
            .load_conference_file(conf, path)
            .with_context(|| format!("loading {} matchups from {}", conf, path.display()))?;
    }

    let bracket = BracketConfig::from_path(&config.bracket)
        .and_then(|b| b.resolve(&registry))
        .with_context(|| format!("loading bracket from {}", config.bracket.display()))?;
    let tournament = Tournament::new(bracket, &table);

    if config.skip_preflight {
        warn!("skipping matchup coverage check");
    } else {
        tournament
            .validate_coverage()
            .context("matchup table does not cover the bracket")?;
    }

    let started = Instant::now();
    let totals = run_simulation(&tournament, &config.simulation_options())
        .with_context(|| format!("simulating with the {} method", config.method))?;
    info!(elapsed = ?started.elapsed(), "finished");

    let report = Report::new(&totals, &registry, config.method)?;
    print!("{}", report);

    Ok(())
}
