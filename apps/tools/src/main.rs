use std::io::Write;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use game::{scramble, WordBank};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Parser, Debug)]
struct Cli {
    /// Print machine-readable JSON instead of plain lines.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List categories in menu order.
    Categories,
    /// List the words of one category.
    Words { category: String },
    /// Scramble a word the way the game does.
    Scramble {
        word: String,
        #[arg(long, default_value_t = 1)]
        count: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Validate the built-in word bank.
    Check,
}

fn main() -> Result<()> {
    run(Cli::parse(), WordBank::builtin(), &mut std::io::stdout().lock())
}

fn run<W: Write>(cli: Cli, bank: &WordBank, out: &mut W) -> Result<()> {

    match cli.command {
        Command::Categories => {
            let categories = bank.list_categories();
            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&categories)?)?;
            } else {
                for category in categories {
                    writeln!(out, "{} {}", category.icon, category.name)?;
                }
            }
        }
        Command::Words { category } => {
            let words = bank.words_for(&category)?;
            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(words)?)?;
            } else {
                for word in words {
                    writeln!(out, "{word}")?;
                }
            }
        }
        Command::Scramble { word, count, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let scrambled: Vec<String> = (0..count).map(|_| scramble(&word, &mut rng)).collect();
            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&scrambled)?)?;
            } else {
                for line in scrambled {
                    writeln!(out, "{line}")?;
                }
            }
        }
        Command::Check => {
            let problems = bank.validate();
            if !problems.is_empty() {
                for problem in &problems {
                    eprintln!("{problem}");
                }
                bail!("word bank has {} problem(s)", problems.len());
            }
            writeln!(
                out,
                "word bank ok: {} categories, {} words",
                bank.categories().len(),
                bank.categories()
                    .iter()
                    .map(|category| category.words.len())
                    .sum::<usize>()
            )?;
        }
    }

    Ok(())
}
