use clap::Parser;
use std::path::PathBuf;

use playoff_core::{DecisionMethod, SimulationOptions, DEFAULT_BATCHES, DEFAULT_TRIALS};

/// Monte Carlo simulation of a two-conference playoff bracket
#[derive(Parser, Debug, Clone)]
#[command(name = "playoff-sim", version, about)]
pub struct Config {
    /// Team records CSV (Name,Seed,Conf)
    #[arg(long, env = "PLAYOFF_TEAMS", default_value = "data/teams.csv")]
    pub teams: PathBuf,

    /// AFC away-at-home win probability matrix
    #[arg(long, env = "PLAYOFF_AFC_MATCHUPS", default_value = "data/afc_matchups.csv")]
    pub afc_matchups: PathBuf,

    /// NFC away-at-home win probability matrix
    #[arg(long, env = "PLAYOFF_NFC_MATCHUPS", default_value = "data/nfc_matchups.csv")]
    pub nfc_matchups: PathBuf,

    /// Bracket layout TOML (wild-card pairings and byes)
    #[arg(long, env = "PLAYOFF_BRACKET", default_value = "data/bracket.toml")]
    pub bracket: PathBuf,

    /// Number of tournaments to simulate
    #[arg(long, short = 'n', env = "PLAYOFF_TRIALS", default_value_t = DEFAULT_TRIALS)]
    pub trials: u64,

    /// How game winners are picked: random, seed or favored
    #[arg(long, env = "PLAYOFF_METHOD", default_value = "random")]
    pub method: DecisionMethod,

    /// Master RNG seed for reproducible runs
    #[arg(long, env = "PLAYOFF_SEED")]
    pub seed: Option<u64>,

    /// Number of independently seeded batches
    #[arg(long, env = "PLAYOFF_BATCHES", default_value_t = DEFAULT_BATCHES)]
    pub batches: usize,

    /// Skip checking that every reachable matchup has a probability
    #[arg(long, env = "PLAYOFF_SKIP_PREFLIGHT", default_value = "false")]
    pub skip_preflight: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.trials == 0 {
            anyhow::bail!("trials must be positive");
        }
        if self.batches == 0 {
            anyhow::bail!("batches must be positive");
        }
        Ok(())
    }

    pub fn simulation_options(&self) -> SimulationOptions {
        SimulationOptions {
            trials: self.trials,
            method: self.method,
            seed: self.seed,
            batches: self.batches,
        }
    }
}
