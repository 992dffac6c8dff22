use crate::commands::verdict;
use anyhow::Result;
use chocolate::{
    bar::Bar, numeric::nimber::Nimber, transposition_table::ParallelTranspositionTable,
    value::canonical_form::CanonicalForm,
};
use clap::{self, Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    Canonical,
    Nimber,
}

/// Evaluate a single chocolate bar position.
#[derive(Debug, Clone, Parser)]
pub struct Args {
    #[arg(long)]
    rows: u32,

    #[arg(long)]
    cols: u32,

    #[arg(long, value_enum, default_value_t = Backend::Canonical)]
    backend: Backend,
}

pub fn run(args: Args) -> Result<()> {
    let bar = Bar::new(args.rows, args.cols)?;

    match args.backend {
        Backend::Canonical => {
            let transposition_table = ParallelTranspositionTable::new();
            let value: CanonicalForm = bar.game_value(&transposition_table);
            println!("{} = {}", bar, value);
            println!(
                "{}",
                verdict(bar.outcome::<CanonicalForm, _>(&transposition_table))
            );
        }
        Backend::Nimber => {
            let transposition_table = ParallelTranspositionTable::new();
            let value: Nimber = bar.game_value(&transposition_table);
            println!("{} = {}", bar, value);
            println!(
                "{}",
                verdict(bar.outcome::<Nimber, _>(&transposition_table))
            );
        }
    }

    Ok(())
}
