use anyhow::Result;
use chocolate::{
    bar::{Bar, Outcome},
    transposition_table::ParallelTranspositionTable,
    value::canonical_form::CanonicalForm,
};
use clap::{self, Parser};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Report {
    position: String,
    game_value: String,
    outcome: Outcome,
}

/// Evaluate all chocolate bars up to a given size.
#[derive(Debug, Clone, Parser)]
pub struct Args {
    #[arg(long, default_value_t = 4)]
    max_rows: u32,

    #[arg(long, default_value_t = 4)]
    max_cols: u32,
}

#[allow(clippy::needless_pass_by_value)]
pub fn run(args: Args) -> Result<()> {
    let transposition_table = ParallelTranspositionTable::new();

    for rows in 1..=args.max_rows {
        for cols in 1..=args.max_cols {
            let bar = Bar::new(rows, cols)?;
            let value: CanonicalForm = bar.game_value(&transposition_table);
            let report = Report {
                position: bar.to_string(),
                game_value: value.to_string(),
                outcome: bar.outcome::<CanonicalForm, _>(&transposition_table),
            };
            println!("{}", serde_json::ser::to_string(&report).unwrap());
        }
    }

    Ok(())
}
