/// Round number of the wild-card round, the first round of the bracket
pub const WILD_CARD_ROUND: u8 = 1;

/// Round number of the championship game, the last round of the bracket
pub const CHAMPIONSHIP_ROUND: u8 = 4;

/// Display names for each round, indexed by `round_number - 1`
pub const ROUND_NAMES: [&str; CHAMPIONSHIP_ROUND as usize] =
    ["Wild Card", "Divisional", "Conference", "Championship"];

/// Win probability assigned to either side of a championship game
pub const CHAMPIONSHIP_WIN_PROB: f64 = 0.5;

/// Default number of Monte Carlo trials
pub const DEFAULT_TRIALS: u64 = 1_000_000;

/// Default number of independently seeded batches trials are split into
pub const DEFAULT_BATCHES: usize = 64;

/// Confidence level for the intervals printed in the report
pub const CONFIDENCE_LEVEL: f64 = 0.95;

/// Display name for a round number, falling back to "Round N"
pub fn round_name(round_number: u8) -> String {
    match round_number {
        1..=CHAMPIONSHIP_ROUND => ROUND_NAMES[(round_number - 1) as usize].to_string(),
        n => format!("Round {}", n),
    }
}
