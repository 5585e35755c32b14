//! Playoff Core - Monte Carlo simulation of a two-conference football playoff.
//!
//! Teams are seeded within the AFC and NFC. A fixed wild-card round opens the
//! bracket, bye teams join in the divisional round, each conference folds its
//! field best-seed-versus-worst until one team remains, and the two
//! conference champions meet in the championship. Running many trials gives
//! each team's chance of reaching the final, its expected games played, and
//! how often it plays in each round.

pub mod bracket;
pub mod constants;
pub mod error;
pub mod game;
pub mod matchup;
pub mod report;
pub mod round;
pub mod simulation;
pub mod team;
pub mod tournament;

#[cfg(test)]
pub(crate) mod test_support;

pub use bracket::{Bracket, BracketConfig};
pub use constants::{CHAMPIONSHIP_ROUND, DEFAULT_BATCHES, DEFAULT_TRIALS, WILD_CARD_ROUND};
pub use error::{Error, Result};
pub use game::{DecisionMethod, Game, GameKind};
pub use matchup::MatchupTable;
pub use report::{Report, TeamSummary};
pub use round::Round;
pub use simulation::{run_batch, run_simulation, SimulationOptions, SimulationTotals};
pub use team::{Conference, Team, TeamRegistry};
pub use tournament::{Tournament, TrialResult};
