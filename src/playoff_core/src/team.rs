use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// One of the two conferences a playoff team belongs to.
///
/// Ordering is AFC before NFC; round construction and championship
/// home-field designation both rely on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Conference {
    Afc,
    Nfc,
}

impl Conference {
    pub const ALL: [Conference; 2] = [Conference::Afc, Conference::Nfc];

    pub fn as_str(&self) -> &'static str {
        match self {
            Conference::Afc => "AFC",
            Conference::Nfc => "NFC",
        }
    }
}

impl fmt::Display for Conference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Conference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AFC" => Ok(Conference::Afc),
            "NFC" => Ok(Conference::Nfc),
            other => Err(Error::Data(format!("unknown conference {:?}", other))),
        }
    }
}

/// A seeded playoff team.
///
/// Seeds are only comparable within a conference; lower is better.
/// Equality and hashing cover every field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Team {
    pub name: String,
    pub seed: u8,
    pub conf: Conference,
}

impl Team {
    pub fn new(name: impl Into<String>, seed: u8, conf: Conference) -> Self {
        Team {
            name: name.into(),
            seed,
            conf,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.seed, self.conf)
    }
}

#[derive(Debug, Deserialize)]
struct TeamRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Seed")]
    seed: u8,
    #[serde(rename = "Conf")]
    conf: String,
}

/// Every playoff-eligible team, looked up by name.
///
/// Insertion order is preserved so reports list teams the way the input
/// file does.
#[derive(Clone, Debug, Default)]
pub struct TeamRegistry {
    teams: Vec<Team>,
    index: HashMap<String, usize>,
}

impl TeamRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a `Name,Seed,Conf` CSV file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let registry = Self::from_reader(file)?;
        info!(path = %path.display(), teams = registry.len(), "loaded team registry");
        Ok(registry)
    }

    /// Read `Name,Seed,Conf` records from any CSV source.
    ///
    /// The whole source is rejected on the first bad record.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut registry = TeamRegistry::new();
        for (row, record) in csv_reader.deserialize::<TeamRecord>().enumerate() {
            let record = record?;
            let conf = record
                .conf
                .parse::<Conference>()
                .map_err(|e| Error::Data(format!("team record {}: {}", row + 1, e)))?;
            registry.insert(Team::new(record.name, record.seed, conf))?;
        }
        Ok(registry)
    }

    /// Add a team. Re-inserting an identical team is a no-op; reusing a
    /// name with a different seed or conference is a data error.
    pub fn insert(&mut self, team: Team) -> Result<()> {
        if team.name.is_empty() {
            return Err(Error::Data("team record with empty name".to_string()));
        }
        if let Some(&idx) = self.index.get(&team.name) {
            let existing = &self.teams[idx];
            if *existing == team {
                debug!(team = %team, "ignoring duplicate team record");
                return Ok(());
            }
            return Err(Error::Data(format!(
                "conflicting records for {}: {} and {}",
                team.name, existing, team
            )));
        }
        self.index.insert(team.name.clone(), self.teams.len());
        self.teams.push(team);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&Team> {
        self.get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Team> {
        self.index.get(name).map(|&idx| &self.teams[idx])
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn conference(&self, conf: Conference) -> impl Iterator<Item = &Team> {
        self.teams.iter().filter(move |t| t.conf == conf)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}
