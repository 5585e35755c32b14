use rand::Rng;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

use crate::constants::CHAMPIONSHIP_WIN_PROB;
use crate::error::{Error, Result};
use crate::matchup::MatchupTable;
use crate::team::{Conference, Team};

/// Strategy used to pick the winner of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecisionMethod {
    /// Home team (better seed) always wins.
    Seed,
    /// Away team wins with its table probability.
    Random,
    /// Side with the strictly greater win probability wins.
    Favored,
}

impl DecisionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionMethod::Seed => "seed",
            DecisionMethod::Random => "random",
            DecisionMethod::Favored => "favored",
        }
    }
}

impl fmt::Display for DecisionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecisionMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seed" => Ok(DecisionMethod::Seed),
            "random" => Ok(DecisionMethod::Random),
            "favored" | "favoured" => Ok(DecisionMethod::Favored),
            other => Err(Error::InvalidMethod(other.to_string())),
        }
    }
}

/// Whether a game is played inside one conference or between the two
/// conference champions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameKind {
    Conference(Conference),
    Championship,
}

/// A single playoff game between two teams.
#[derive(Clone, Debug)]
pub struct Game<'a> {
    home: &'a Team,
    away: &'a Team,
    kind: GameKind,
    win_prob_away: f64,
    decision_method: DecisionMethod,
}

impl<'a> Game<'a> {
    /// Pair two teams, designate home and away, and price the matchup.
    ///
    /// Teams from the same conference play a conference game: the better
    /// seed hosts and the away probability comes from `table`. Teams from
    /// different conferences play the championship at even odds; the better
    /// seed is designated home, AFC on equal seeds.
    pub fn new(
        team_a: &'a Team,
        team_b: &'a Team,
        decision_method: DecisionMethod,
        table: &MatchupTable,
    ) -> Result<Self> {
        if team_a == team_b {
            return Err(Error::InvalidBracket(format!("{} cannot play itself", team_a)));
        }

        if team_a.conf != team_b.conf {
            let (home, away) = if (team_a.seed, team_a.conf) <= (team_b.seed, team_b.conf) {
                (team_a, team_b)
            } else {
                (team_b, team_a)
            };
            return Ok(Game {
                home,
                away,
                kind: GameKind::Championship,
                win_prob_away: CHAMPIONSHIP_WIN_PROB,
                decision_method,
            });
        }

        let (home, away) = match team_a.seed.cmp(&team_b.seed) {
            std::cmp::Ordering::Less => (team_a, team_b),
            std::cmp::Ordering::Greater => (team_b, team_a),
            std::cmp::Ordering::Equal => {
                return Err(Error::InvalidBracket(format!(
                    "{} and {} share a seed within the {}",
                    team_a, team_b, team_a.conf
                )))
            }
        };
        let win_prob_away = table.away_win_probability(home.conf, &away.name, &home.name)?;

        Ok(Game {
            home,
            away,
            kind: GameKind::Conference(home.conf),
            win_prob_away,
            decision_method,
        })
    }

    pub fn home(&self) -> &'a Team {
        self.home
    }

    pub fn away(&self) -> &'a Team {
        self.away
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn is_championship(&self) -> bool {
        self.kind == GameKind::Championship
    }

    pub fn decision_method(&self) -> DecisionMethod {
        self.decision_method
    }

    pub fn win_prob_away(&self) -> f64 {
        self.win_prob_away
    }

    pub fn win_prob_home(&self) -> f64 {
        1.0 - self.win_prob_away
    }

    /// Both participants, away first.
    pub fn teams(&self) -> [&'a Team; 2] {
        [self.away, self.home]
    }

    /// Pick the winner under this game's decision method.
    ///
    /// Only `Random` consumes randomness: exactly one draw per call.
    pub fn resolve_winner<R: Rng>(&self, rng: &mut R) -> Result<&'a Team> {
        let winner = match self.decision_method {
            DecisionMethod::Seed => self.home,
            DecisionMethod::Random => {
                let draw: f64 = rng.gen();
                if draw <= self.win_prob_away {
                    self.away
                } else {
                    self.home
                }
            }
            DecisionMethod::Favored => {
                let (away, home) = (self.win_prob_away, self.win_prob_home());
                if away > home {
                    self.away
                } else if home > away {
                    self.home
                } else {
                    return Err(Error::AmbiguousOutcome {
                        away: self.away.name.clone(),
                        home: self.home.name.clone(),
                        probability: away,
                    });
                }
            }
        };
        trace!(game = %self, winner = %winner.name, "resolved game");
        Ok(winner)
    }
}

impl fmt::Display for Game<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.away.name, self.home.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn afc(name: &str, seed: u8) -> Team {
        Team::new(name, seed, Conference::Afc)
    }

    fn table_with(away: &str, home: &str, prob: f64) -> MatchupTable {
        let mut table = MatchupTable::new();
        table.insert(Conference::Afc, away, home, prob).unwrap();
        table
    }

    #[test]
    fn test_home_is_better_seed() {
        let two = afc("NE", 2);
        let five = afc("KC", 5);
        let table = table_with("KC", "NE", 0.3);

        // Argument order does not matter
        for (a, b) in [(&two, &five), (&five, &two)] {
            let game = Game::new(a, b, DecisionMethod::Seed, &table).unwrap();
            assert_eq!(game.home(), &two);
            assert_eq!(game.away(), &five);
            assert_eq!(game.kind(), GameKind::Conference(Conference::Afc));
            assert_abs_diff_eq!(game.win_prob_away(), 0.3);
            assert_abs_diff_eq!(game.win_prob_home(), 0.7);
        }
    }

    #[test]
    fn test_seed_method_ignores_probabilities() {
        let two = afc("NE", 2);
        let five = afc("KC", 5);
        let table = table_with("KC", "NE", 0.99);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let game = Game::new(&five, &two, DecisionMethod::Seed, &table).unwrap();
        for _ in 0..100 {
            assert_eq!(game.resolve_winner(&mut rng).unwrap().seed, 2);
        }
    }

    #[test]
    fn test_random_method_extremes() {
        let two = afc("NE", 2);
        let five = afc("KC", 5);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let certain = table_with("KC", "NE", 1.0);
        let game = Game::new(&two, &five, DecisionMethod::Random, &certain).unwrap();
        for _ in 0..10_000 {
            assert_eq!(game.resolve_winner(&mut rng).unwrap(), &five);
        }

        let hopeless = table_with("KC", "NE", 0.0);
        let game = Game::new(&two, &five, DecisionMethod::Random, &hopeless).unwrap();
        for _ in 0..10_000 {
            assert_eq!(game.resolve_winner(&mut rng).unwrap(), &two);
        }
    }

    #[test]
    fn test_random_method_converges() {
        let prob = 0.37;
        let trials = 200_000;
        let two = afc("NE", 2);
        let five = afc("KC", 5);
        let table = table_with("KC", "NE", prob);
        let game = Game::new(&two, &five, DecisionMethod::Random, &table).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let away_wins = (0..trials)
            .filter(|_| game.resolve_winner(&mut rng).unwrap() == &five)
            .count();
        let observed = away_wins as f64 / trials as f64;

        // Five standard errors
        let tolerance = 5.0 * (prob * (1.0 - prob) / trials as f64).sqrt();
        assert!(
            (observed - prob).abs() < tolerance,
            "observed {} expected {} +/- {}",
            observed,
            prob,
            tolerance
        );
    }

    #[test]
    fn test_favored_method() {
        let two = afc("NE", 2);
        let five = afc("KC", 5);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let upset = table_with("KC", "NE", 0.6);
        let game = Game::new(&two, &five, DecisionMethod::Favored, &upset).unwrap();
        assert_eq!(game.resolve_winner(&mut rng).unwrap(), &five);

        let chalk = table_with("KC", "NE", 0.4);
        let game = Game::new(&two, &five, DecisionMethod::Favored, &chalk).unwrap();
        assert_eq!(game.resolve_winner(&mut rng).unwrap(), &two);

        let coin_flip = table_with("KC", "NE", 0.5);
        let game = Game::new(&two, &five, DecisionMethod::Favored, &coin_flip).unwrap();
        assert!(matches!(
            game.resolve_winner(&mut rng),
            Err(Error::AmbiguousOutcome { .. })
        ));
    }

    #[test]
    fn test_championship_game() {
        let den = afc("DEN", 1);
        let car = Team::new("CAR", 1, Conference::Nfc);
        let ari = Team::new("ARI", 2, Conference::Nfc);
        let table = MatchupTable::new();

        let game = Game::new(&car, &den, DecisionMethod::Seed, &table).unwrap();
        assert!(game.is_championship());
        assert_abs_diff_eq!(game.win_prob_away(), 0.5);
        // Equal seeds: AFC hosts
        assert_eq!(game.home(), &den);
        assert_eq!(game.away(), &car);

        let game = Game::new(&den, &ari, DecisionMethod::Seed, &table).unwrap();
        assert_eq!(game.home(), &den);

        let game = Game::new(&den, &car, DecisionMethod::Favored, &table).unwrap();
        assert!(matches!(
            game.resolve_winner(&mut ChaCha8Rng::seed_from_u64(1)),
            Err(Error::AmbiguousOutcome { .. })
        ));
    }

    #[test]
    fn test_invalid_pairings() {
        let table = MatchupTable::new();
        let den = afc("DEN", 1);
        let other_one = afc("NE", 1);

        assert!(matches!(
            Game::new(&den, &den, DecisionMethod::Seed, &table),
            Err(Error::InvalidBracket(_))
        ));
        assert!(matches!(
            Game::new(&den, &other_one, DecisionMethod::Seed, &table),
            Err(Error::InvalidBracket(_))
        ));
    }

    #[test]
    fn test_missing_matchup_is_fatal() {
        let two = afc("NE", 2);
        let five = afc("KC", 5);
        let table = table_with("NE", "KC", 0.5);

        assert!(matches!(
            Game::new(&two, &five, DecisionMethod::Random, &table),
            Err(Error::MissingMatchup { .. })
        ));
    }

    #[test]
    fn test_parse_decision_method() {
        assert_eq!("Random".parse::<DecisionMethod>().unwrap(), DecisionMethod::Random);
        assert_eq!("seed".parse::<DecisionMethod>().unwrap(), DecisionMethod::Seed);
        assert_eq!("favored".parse::<DecisionMethod>().unwrap(), DecisionMethod::Favored);
        assert!(matches!(
            "coin".parse::<DecisionMethod>(),
            Err(Error::InvalidMethod(_))
        ));
    }
}
