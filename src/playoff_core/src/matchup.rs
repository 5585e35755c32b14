use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};
use crate::team::Conference;

/// Historical away-team win probabilities for intra-conference matchups.
///
/// Keyed by conference, then away team name, then home team name. Entries
/// are directional: the probability stored for (away, home) is not used to
/// answer (home, away).
#[derive(Clone, Debug, Default)]
pub struct MatchupTable {
    chances: HashMap<Conference, HashMap<String, HashMap<String, f64>>>,
}

impl MatchupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load one conference's matrix from a CSV file.
    pub fn load_conference_file(&mut self, conf: Conference, path: &Path) -> Result<usize> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let count = self.load_conference(conf, file)?;
        info!(conference = %conf, path = %path.display(), entries = count, "loaded matchup table");
        Ok(count)
    }

    /// Load one conference's matrix.
    ///
    /// The first column names the away team; every other header names a
    /// home team, and the cell holds the away team's win probability.
    /// Blank cells and the diagonal are skipped. Returns the number of
    /// entries added.
    pub fn load_conference<R: Read>(&mut self, conf: Conference, reader: R) -> Result<usize> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if headers.len() < 2 {
            return Err(Error::Data(format!(
                "{} matchup table needs an away column and at least one home column",
                conf
            )));
        }

        let mut count = 0;
        for record in csv_reader.records() {
            let record = record?;
            let away = match record.get(0) {
                Some(name) if !name.is_empty() => name,
                _ => {
                    return Err(Error::Data(format!(
                        "{} matchup row without an away team",
                        conf
                    )))
                }
            };

            for (home, cell) in headers.iter().zip(record.iter()).skip(1) {
                if cell.is_empty() || home == away {
                    continue;
                }
                let prob: f64 = cell.parse().map_err(|_| {
                    Error::Data(format!(
                        "invalid probability {:?} for {} at {}",
                        cell, away, home
                    ))
                })?;
                self.try_insert(conf, away, home, prob)?;
                count += 1;
            }
        }

        Ok(count)
    }

    /// Add or replace the probability that `away` wins at `home`.
    pub fn insert(&mut self, conf: Conference, away: &str, home: &str, prob: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&prob) {
            return Err(Error::Data(format!(
                "probability {} for {} at {} is outside [0, 1]",
                prob, away, home
            )));
        }
        self.chances
            .entry(conf)
            .or_default()
            .entry(away.to_string())
            .or_default()
            .insert(home.to_string(), prob);
        Ok(())
    }

    /// Add the probability that `away` wins at `home`, rejecting a pair
    /// the table already holds.
    pub fn try_insert(&mut self, conf: Conference, away: &str, home: &str, prob: f64) -> Result<()> {
        if let Some(existing) = self.get(conf, away, home) {
            return Err(Error::Data(format!(
                "duplicate {} matchup for {} at {}: {} and {}",
                conf, away, home, existing, prob
            )));
        }
        self.insert(conf, away, home, prob)
    }

    /// Probability that `away` beats `home`, if the table has one.
    pub fn get(&self, conf: Conference, away: &str, home: &str) -> Option<f64> {
        self.chances
            .get(&conf)
            .and_then(|by_away| by_away.get(away))
            .and_then(|by_home| by_home.get(home))
            .copied()
    }

    /// Probability that `away` beats `home`; a missing entry is fatal.
    pub fn away_win_probability(&self, conf: Conference, away: &str, home: &str) -> Result<f64> {
        self.get(conf, away, home).ok_or_else(|| Error::MissingMatchup {
            conference: conf,
            away: away.to_string(),
            home: home.to_string(),
        })
    }

    /// Number of entries across both conferences.
    pub fn len(&self) -> usize {
        self.chances
            .values()
            .flat_map(|by_away| by_away.values())
            .map(|by_home| by_home.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
