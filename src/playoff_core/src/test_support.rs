//! Shared fixtures: an eight-seed league with a six-team-per-conference
//! bracket (seeds 3-6 open, seeds 1-2 on byes).

use crate::bracket::BracketConfig;
use crate::matchup::MatchupTable;
use crate::team::{Conference, Team, TeamRegistry};

pub(crate) const BRACKET_TOML: &str = r#"
wild_card = [["AFC3", "AFC6"], ["AFC4", "AFC5"], ["NFC3", "NFC6"], ["NFC4", "NFC5"]]
byes = ["AFC1", "AFC2", "NFC1", "NFC2"]
"#;

pub(crate) fn registry() -> TeamRegistry {
    let mut registry = TeamRegistry::new();
    for conf in Conference::ALL {
        for seed in 1..=8 {
            registry
                .insert(Team::new(format!("{}{}", conf, seed), seed, conf))
                .unwrap();
        }
    }
    registry
}

/// Every worse-seed-at-better-seed pairing priced at `prob`, except the
/// listed (away, home) names.
pub(crate) fn table_without(registry: &TeamRegistry, prob: f64, skip: &[(&str, &str)]) -> MatchupTable {
    let mut table = MatchupTable::new();
    for away in registry.teams() {
        for home in registry.conference(away.conf) {
            if away.seed <= home.seed || skip.contains(&(away.name.as_str(), home.name.as_str())) {
                continue;
            }
            table.insert(away.conf, &away.name, &home.name, prob).unwrap();
        }
    }
    table
}

pub(crate) fn table(registry: &TeamRegistry, prob: f64) -> MatchupTable {
    table_without(registry, prob, &[])
}

pub(crate) fn bracket_config() -> BracketConfig {
    BRACKET_TOML.parse().unwrap()
}
