pub mod evaluate;
pub mod range;

use chocolate::bar::Outcome;

pub fn verdict(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::FirstPlayerWins => "First player has a winning strategy.",
        Outcome::SecondPlayerWins => "Second player has a winning strategy.",
        Outcome::Indeterminate => "Was it really a chocolate?",
    }
}
