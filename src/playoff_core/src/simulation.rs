use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use crate::constants::{CHAMPIONSHIP_ROUND, DEFAULT_BATCHES, DEFAULT_TRIALS};
use crate::error::{Error, Result};
use crate::game::DecisionMethod;
use crate::team::Team;
use crate::tournament::{Tournament, TrialResult};

/// Per-round participation counts, indexed by `round_number - 1`.
pub type RoundCounts = [u64; CHAMPIONSHIP_ROUND as usize];

/// Counts summed over many trials.
///
/// Totals from independent batches combine with [`SimulationTotals::merge`];
/// merging is plain addition, so batch order does not matter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulationTotals<'a> {
    pub trials: u64,
    pub finalists: HashMap<&'a Team, u64>,
    pub champions: HashMap<&'a Team, u64>,
    pub games_played: HashMap<&'a Team, u64>,
    pub rounds_reached: HashMap<&'a Team, RoundCounts>,
}

impl<'a> SimulationTotals<'a> {
    pub fn record(&mut self, trial: &TrialResult<'a>) {
        self.trials += 1;
        for &team in &trial.finalists {
            *self.finalists.entry(team).or_insert(0) += 1;
        }
        for &team in &trial.final_winners {
            *self.champions.entry(team).or_insert(0) += 1;
        }
        for (&team, &games) in &trial.game_counts {
            *self.games_played.entry(team).or_insert(0) += u64::from(games);
        }
        for (&team, rounds) in &trial.rounds_played {
            let counts = self.rounds_reached.entry(team).or_default();
            for &round in rounds {
                counts[(round - 1) as usize] += 1;
            }
        }
    }

    pub fn merge(&mut self, other: SimulationTotals<'a>) {
        self.trials += other.trials;
        for (team, n) in other.finalists {
            *self.finalists.entry(team).or_insert(0) += n;
        }
        for (team, n) in other.champions {
            *self.champions.entry(team).or_insert(0) += n;
        }
        for (team, n) in other.games_played {
            *self.games_played.entry(team).or_insert(0) += n;
        }
        for (team, rounds) in other.rounds_reached {
            let counts = self.rounds_reached.entry(team).or_default();
            for (total, n) in counts.iter_mut().zip(rounds) {
                *total += n;
            }
        }
    }
}

/// How many trials to run and how.
#[derive(Clone, Debug)]
pub struct SimulationOptions {
    pub trials: u64,
    pub method: DecisionMethod,
    /// Master seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Number of independently seeded batches the trials are split into.
    pub batches: usize,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        SimulationOptions {
            trials: DEFAULT_TRIALS,
            method: DecisionMethod::Random,
            seed: None,
            batches: DEFAULT_BATCHES,
        }
    }
}

/// Run `trials` tournaments sequentially on one RNG.
pub fn run_batch<'a, R: Rng>(
    tournament: &Tournament<'a>,
    method: DecisionMethod,
    trials: u64,
    rng: &mut R,
) -> Result<SimulationTotals<'a>> {
    let mut totals = SimulationTotals::default();
    for _ in 0..trials {
        let trial = tournament.run(method, rng)?;
        totals.record(&trial);
    }
    Ok(totals)
}

/// Run all trials across rayon's pool.
///
/// Batch sizes and batch seeds are drawn from the master RNG before any
/// work starts, so a fixed seed and batch count reproduce the same totals
/// on any number of threads. Zero batches is an error.
pub fn run_simulation<'a>(
    tournament: &Tournament<'a>,
    options: &SimulationOptions,
) -> Result<SimulationTotals<'a>> {
    if options.batches == 0 {
        return Err(Error::InvalidOptions("batches must be positive".to_string()));
    }

    let mut master = match options.seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };

    let batches = options.batches as u64;
    let base = options.trials / batches;
    let extra = options.trials % batches;
    let plan: Vec<(u64, u64, u64)> = (0..batches)
        .map(|i| (i, base + u64::from(i < extra), master.gen::<u64>()))
        .collect();

    info!(
        trials = options.trials,
        batches,
        method = %options.method,
        "starting simulation"
    );

    let completed = AtomicU64::new(0);
    let totals = plan
        .into_par_iter()
        .map(|(batch, trials, seed)| -> Result<SimulationTotals<'a>> {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let totals = run_batch(tournament, options.method, trials, &mut rng)?;
            let done = completed.fetch_add(trials, Ordering::Relaxed) + trials;
            info!(batch, completed = done, total = options.trials, "batch complete");
            Ok(totals)
        })
        .try_reduce(SimulationTotals::default, |mut acc, batch| {
            acc.merge(batch);
            Ok(acc)
        })?;

    info!(trials = totals.trials, "simulation complete");
    Ok(totals)
}
