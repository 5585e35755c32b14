use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};
use crate::team::{Team, TeamRegistry};

/// Fixed bracket layout as written in configuration: opening-round
/// pairings and the teams that skip it, by name.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BracketConfig {
    pub wild_card: Vec<[String; 2]>,
    #[serde(default)]
    pub byes: Vec<String>,
}

impl BracketConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: BracketConfig = text.parse()?;
        info!(
            path = %path.display(),
            games = config.wild_card.len(),
            byes = config.byes.len(),
            "loaded bracket configuration"
        );
        Ok(config)
    }

    /// Look up every named team. Unknown names are `NotFound`; a team
    /// appearing twice anywhere in the bracket is an invalid bracket.
    pub fn resolve<'a>(&self, registry: &'a TeamRegistry) -> Result<Bracket<'a>> {
        if self.wild_card.is_empty() {
            return Err(Error::InvalidBracket(
                "bracket has no opening-round games".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let names = self.wild_card.iter().flatten().chain(&self.byes);
        for name in names {
            if !seen.insert(name.as_str()) {
                return Err(Error::InvalidBracket(format!(
                    "{} appears more than once in the bracket",
                    name
                )));
            }
        }

        let wild_card = self
            .wild_card
            .iter()
            .map(|[a, b]| -> Result<_> { Ok((registry.lookup(a)?, registry.lookup(b)?)) })
            .collect::<Result<Vec<_>>>()?;
        let byes = self
            .byes
            .iter()
            .map(|name| registry.lookup(name))
            .collect::<Result<Vec<_>>>()?;

        Ok(Bracket { wild_card, byes })
    }
}

impl std::str::FromStr for BracketConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// Bracket layout resolved against a registry.
#[derive(Clone, Debug)]
pub struct Bracket<'a> {
    pub wild_card: Vec<(&'a Team, &'a Team)>,
    pub byes: Vec<&'a Team>,
}

impl<'a> Bracket<'a> {
    /// Every team in the bracket: opening-round teams first, then byes.
    pub fn teams(&self) -> Vec<&'a Team> {
        self.wild_card
            .iter()
            .flat_map(|&(a, b)| [a, b])
            .chain(self.byes.iter().copied())
            .collect()
    }
}
