use statrs::distribution::{ContinuousCDF, Normal};
use std::cmp::Reverse;
use std::fmt;

use crate::constants::{CHAMPIONSHIP_ROUND, CONFIDENCE_LEVEL};
use crate::error::{Error, Result};
use crate::game::DecisionMethod;
use crate::simulation::{RoundCounts, SimulationTotals};
use crate::team::{Team, TeamRegistry};

/// Totals for one team across all trials.
#[derive(Clone, Debug, PartialEq)]
pub struct TeamSummary<'a> {
    pub team: &'a Team,
    pub finalist: u64,
    pub champion: u64,
    pub games: u64,
    pub rounds: RoundCounts,
}

/// Text summary of a finished simulation.
///
/// Every registered team gets a row, including teams that never played.
#[derive(Clone, Debug)]
pub struct Report<'a> {
    trials: u64,
    method: DecisionMethod,
    z: f64,
    rows: Vec<TeamSummary<'a>>,
}

impl<'a> Report<'a> {
    pub fn new(
        totals: &SimulationTotals<'a>,
        registry: &'a TeamRegistry,
        method: DecisionMethod,
    ) -> Result<Self> {
        if totals.trials == 0 {
            return Err(Error::Data("no trials to report".to_string()));
        }

        let normal = Normal::new(0.0, 1.0).map_err(|e| Error::Stats(e.to_string()))?;
        let z = normal.inverse_cdf(0.5 + CONFIDENCE_LEVEL / 2.0);

        let rows = registry
            .teams()
            .iter()
            .map(|team| TeamSummary {
                team,
                finalist: totals.finalists.get(team).copied().unwrap_or(0),
                champion: totals.champions.get(team).copied().unwrap_or(0),
                games: totals.games_played.get(team).copied().unwrap_or(0),
                rounds: totals.rounds_reached.get(team).copied().unwrap_or_default(),
            })
            .collect();

        Ok(Report {
            trials: totals.trials,
            method,
            z,
            rows,
        })
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Rows in registry order.
    pub fn rows(&self) -> &[TeamSummary<'a>] {
        &self.rows
    }

    /// Rows sorted by championship-game appearances, most first.
    pub fn by_finalist(&self) -> Vec<&TeamSummary<'a>> {
        self.sorted_by(|r| (r.finalist, r.champion))
    }

    /// Rows sorted by games played, most first.
    pub fn by_games(&self) -> Vec<&TeamSummary<'a>> {
        self.sorted_by(|r| r.games)
    }

    /// Rows sorted by deepest-round participation: round 4 count first,
    /// then round 3, and so on.
    pub fn by_rounds(&self) -> Vec<&TeamSummary<'a>> {
        self.sorted_by(|r| {
            let mut key = r.rounds;
            key.reverse();
            key
        })
    }

    fn sorted_by<K: Ord>(&self, key: impl Fn(&TeamSummary<'a>) -> K) -> Vec<&TeamSummary<'a>> {
        let mut rows: Vec<&TeamSummary<'a>> = self.rows.iter().collect();
        rows.sort_by_key(|r| Reverse(key(*r)));
        rows
    }

    fn fraction(&self, count: u64) -> f64 {
        count as f64 / self.trials as f64
    }

    /// Normal-approximation interval half-width for a proportion.
    fn margin(&self, p: f64) -> f64 {
        self.z * (p * (1.0 - p) / self.trials as f64).sqrt()
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Simulated {} tournaments (decision method: {})",
            self.trials, self.method
        )?;

        writeln!(f)?;
        writeln!(f, "Reached championship game")?;
        for row in self.by_finalist() {
            let p = self.fraction(row.finalist);
            let margin = self.margin(p);
            writeln!(
                f,
                "  {:<16} {:>9} or {:>7.3}% ({:.0}% CI {:.3}-{:.3}%), won {:>9} or {:>7.3}%",
                row.team.to_string(),
                row.finalist,
                100.0 * p,
                100.0 * CONFIDENCE_LEVEL,
                100.0 * (p - margin).max(0.0),
                100.0 * (p + margin).min(1.0),
                row.champion,
                100.0 * self.fraction(row.champion),
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Average games played")?;
        for row in self.by_games() {
            writeln!(
                f,
                "  {:<16} {:.2}",
                row.team.to_string(),
                self.fraction(row.games)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Rounds reached")?;
        for row in self.by_rounds() {
            let reached: Vec<String> = (1..=CHAMPIONSHIP_ROUND)
                .rev()
                .filter(|&round| row.rounds[(round - 1) as usize] > 0)
                .map(|round| {
                    format!(
                        "{} {:.2}",
                        round,
                        self.fraction(row.rounds[(round - 1) as usize])
                    )
                })
                .collect();
            if reached.is_empty() {
                writeln!(f, "  {:<16} -", row.team.to_string())?;
            } else {
                writeln!(f, "  {:<16} {}", row.team.to_string(), reached.join(", "))?;
            }
        }

        Ok(())
    }
}
