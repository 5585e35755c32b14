use rand::Rng;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::bracket::Bracket;
use crate::constants::{CHAMPIONSHIP_ROUND, WILD_CARD_ROUND};
use crate::error::{Error, Result};
use crate::game::DecisionMethod;
use crate::matchup::MatchupTable;
use crate::round::Round;
use crate::team::Team;

/// Outcome and bookkeeping of one simulated tournament.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrialResult<'a> {
    /// Winners of the last round played: the champion alone.
    pub final_winners: Vec<&'a Team>,

    /// Both teams in the championship game.
    pub finalists: Vec<&'a Team>,

    /// Games played per team.
    pub game_counts: HashMap<&'a Team, u32>,

    /// Round numbers each team played in, in order.
    pub rounds_played: HashMap<&'a Team, Vec<u8>>,
}

impl<'a> TrialResult<'a> {
    pub fn champion(&self) -> Option<&'a Team> {
        self.final_winners.first().copied()
    }

    fn record_round(&mut self, round: &Round<'a>) {
        for team in round.all_teams() {
            *self.game_counts.entry(team).or_insert(0) += 1;
            self.rounds_played
                .entry(team)
                .or_default()
                .push(round.round_number());
        }
    }
}

/// Fixed four-round playoff: wild card, divisional, conference
/// championship, championship.
#[derive(Clone, Debug)]
pub struct Tournament<'a> {
    bracket: Bracket<'a>,
    table: &'a MatchupTable,
}

impl<'a> Tournament<'a> {
    pub fn new(bracket: Bracket<'a>, table: &'a MatchupTable) -> Self {
        Tournament { bracket, table }
    }

    pub fn bracket(&self) -> &Bracket<'a> {
        &self.bracket
    }

    pub fn table(&self) -> &'a MatchupTable {
        self.table
    }

    /// Play one tournament from the wild-card round to the champion.
    ///
    /// Any bracket or game error aborts the trial.
    pub fn run<R: Rng>(&self, method: DecisionMethod, rng: &mut R) -> Result<TrialResult<'a>> {
        let mut result = TrialResult::default();
        let mut round = Round::opening(&self.bracket.wild_card, method, self.table)?;

        while round.round_number() < CHAMPIONSHIP_ROUND {
            result.record_round(&round);
            let winners = round.simulate(rng)?;
            round = self.next_round(&round, &winners, method)?;
        }

        if !round.is_championship() {
            return Err(Error::InvalidBracket(format!(
                "round {} has {} games instead of a championship",
                round.round_number(),
                round.games().len()
            )));
        }
        result.record_round(&round);
        result.finalists = round.all_teams();
        result.final_winners = round.simulate(rng)?;

        debug!(
            champion = %result.final_winners[0],
            "tournament complete"
        );
        Ok(result)
    }

    /// Walk every possible outcome of every round and build the rounds
    /// that follow, so a matchup missing from the table fails here rather
    /// than partway through a simulation. Returns the number of distinct
    /// bracket paths.
    pub fn validate_coverage(&self) -> Result<usize> {
        let opening = Round::opening(&self.bracket.wild_card, DecisionMethod::Seed, self.table)?;
        let paths = self.explore(&opening)?;
        info!(paths, "all reachable matchups are priced");
        Ok(paths)
    }

    fn explore(&self, round: &Round<'a>) -> Result<usize> {
        if round.round_number() >= CHAMPIONSHIP_ROUND {
            return if round.is_championship() {
                Ok(1)
            } else {
                Err(Error::InvalidBracket(format!(
                    "round {} is not a championship",
                    round.round_number()
                )))
            };
        }

        let games = round.games();
        if games.len() >= u64::BITS as usize {
            return Err(Error::InvalidBracket(format!(
                "round {} has too many games to enumerate",
                round.round_number()
            )));
        }

        let mut paths = 0;
        for outcome in 0..(1u64 << games.len()) {
            let winners: Vec<&'a Team> = games
                .iter()
                .enumerate()
                .map(|(i, g)| if outcome & (1 << i) != 0 { g.away() } else { g.home() })
                .collect();
            let next = self.next_round(round, &winners, DecisionMethod::Seed)?;
            paths += self.explore(&next)?;
        }
        Ok(paths)
    }

    fn next_round(
        &self,
        round: &Round<'a>,
        winners: &[&'a Team],
        method: DecisionMethod,
    ) -> Result<Round<'a>> {
        let byes: &[&'a Team] = if round.round_number() == WILD_CARD_ROUND {
            &self.bracket.byes
        } else {
            &[]
        };
        let number = round.round_number() + 1;
        Round::build_from_winners(winners, number, byes, method, self.table)?.ok_or_else(|| {
            Error::InvalidBracket(format!("champion decided before round {}", number))
        })
    }
}
