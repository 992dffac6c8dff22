use crate::commands::*;
use anyhow::Result;
use clap::{self, Parser, Subcommand};

mod commands;

#[derive(Subcommand, Debug)]
enum Command {
    Evaluate(evaluate::Args),
    Range(range::Args),
}

#[derive(Parser)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();
    match args.command {
        Command::Evaluate(args) => evaluate::run(args),
        Command::Range(args) => range::run(args),
    }
}
