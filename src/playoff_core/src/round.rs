use rand::Rng;
use std::collections::BTreeMap;
use std::collections::VecDeque;
use tracing::debug;

use crate::constants::{round_name, WILD_CARD_ROUND};
use crate::error::{Error, Result};
use crate::game::{DecisionMethod, Game};
use crate::matchup::MatchupTable;
use crate::team::{Conference, Team};

/// All games of one bracket round.
#[derive(Clone, Debug)]
pub struct Round<'a> {
    games: Vec<Game<'a>>,
    round_number: u8,
    decision_method: DecisionMethod,
}

impl<'a> Round<'a> {
    /// The opening round, built from fixed pairings rather than seeding.
    pub fn opening(
        pairings: &[(&'a Team, &'a Team)],
        decision_method: DecisionMethod,
        table: &MatchupTable,
    ) -> Result<Self> {
        let games = pairings
            .iter()
            .map(|&(a, b)| Game::new(a, b, decision_method, table))
            .collect::<Result<Vec<_>>>()?;
        if games.iter().any(Game::is_championship) {
            return Err(Error::InvalidBracket(
                "opening round pairs teams from different conferences".to_string(),
            ));
        }
        Ok(Round {
            games,
            round_number: WILD_CARD_ROUND,
            decision_method,
        })
    }

    /// Build the next round from the previous round's winners.
    ///
    /// Returns `None` once a single winner remains. Otherwise the winners
    /// and `byes` are grouped by conference and each group, sorted by seed,
    /// is folded so the best remaining seed meets the worst. A conference
    /// left with one team has produced its finalist; when that happens both
    /// conferences must be down to one team, and the pair plays the
    /// championship.
    pub fn build_from_winners(
        winners: &[&'a Team],
        round_number: u8,
        byes: &[&'a Team],
        decision_method: DecisionMethod,
        table: &MatchupTable,
    ) -> Result<Option<Self>> {
        match winners.len() {
            0 => {
                return Err(Error::InvalidBracket(format!(
                    "no winners to build round {} from",
                    round_number
                )))
            }
            1 => return Ok(None),
            _ => {}
        }

        let mut by_conf: BTreeMap<Conference, Vec<&'a Team>> = BTreeMap::new();
        for &team in winners.iter().chain(byes) {
            by_conf.entry(team.conf).or_default().push(team);
        }

        let mut pairs = Vec::new();
        let mut finalists = Vec::new();
        for (conf, mut teams) in by_conf {
            teams.sort_by_key(|t| t.seed);
            if teams.len() % 2 == 1 {
                debug!(conference = %conf, remaining = teams.len(), "conference down to an odd field");
                finalists.extend(teams);
                continue;
            }
            pairs.extend(fold_pairs(teams));
        }

        if !finalists.is_empty() {
            if finalists.len() != 2 || !pairs.is_empty() {
                return Err(Error::InvalidBracket(format!(
                    "round {} has {} unpaired teams alongside {} conference games; \
                     a championship round needs exactly one finalist per conference",
                    round_number,
                    finalists.len(),
                    pairs.len()
                )));
            }
            pairs.push((finalists[0], finalists[1]));
        }

        let games = pairs
            .into_iter()
            .map(|(a, b)| Game::new(a, b, decision_method, table))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            round = round_number,
            name = %round_name(round_number),
            games = games.len(),
            "built round"
        );
        Ok(Some(Round {
            games,
            round_number,
            decision_method,
        }))
    }

    pub fn round_number(&self) -> u8 {
        self.round_number
    }

    pub fn decision_method(&self) -> DecisionMethod {
        self.decision_method
    }

    pub fn games(&self) -> &[Game<'a>] {
        &self.games
    }

    pub fn is_championship(&self) -> bool {
        self.games.len() == 1 && self.games[0].is_championship()
    }

    /// Winners of every game, in game order.
    pub fn simulate<R: Rng>(&self, rng: &mut R) -> Result<Vec<&'a Team>> {
        self.games.iter().map(|g| g.resolve_winner(rng)).collect()
    }

    /// Both participants of every game, in game order.
    pub fn all_teams(&self) -> Vec<&'a Team> {
        self.games.iter().flat_map(|g| g.teams()).collect()
    }
}

/// Pair a seed-sorted field best-versus-worst, working inwards.
fn fold_pairs<'a>(sorted: Vec<&'a Team>) -> Vec<(&'a Team, &'a Team)> {
    let mut field: VecDeque<&'a Team> = sorted.into();
    let mut pairs = Vec::with_capacity(field.len() / 2);
    while let (Some(best), Some(worst)) = (field.pop_front(), field.pop_back()) {
        pairs.push((best, worst));
    }
    pairs
}
