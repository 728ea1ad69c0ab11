mod cli_utils;

use clap::{Parser, Subcommand};
use log::info;

use int_skiplist::{SkipList, SkipListOptions};

#[derive(Parser)]
#[clap(name = "int-skiplist", about = "Interactive shell over an integer skiplist")]
struct Args {
    /// Tower capacity of the header node
    #[arg(long)]
    max_levels: Option<usize>,
    /// Chance of promoting a new node one level up
    #[arg(long)]
    probability: Option<f64>,
    /// Seed for reproducible tower heights
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser)]
#[clap(name = "", no_binary_name = true)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Insert {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    Search {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    Delete {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    Fill {
        #[arg(allow_negative_numbers = true)]
        lower: i64,
        #[arg(allow_negative_numbers = true)]
        upper: i64,
    },
    Count,
    Empty,
    Height,
    Dump,
    Quit,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let mut options = SkipListOptions::new_with_defaults()?;
    if let Some(max_levels) = args.max_levels {
        options.max_levels = max_levels;
    }
    if let Some(probability) = args.probability {
        options.promotion_probability = probability;
    }
    options.seed = args.seed;
    info!("starting with {:?}", options);
    let mut list = SkipList::with_options(options)?;

    loop {
        let line = match cli_utils::prompt_line("$ ")? {
            Some(line) => line,
            None => return Ok(()),
        };
        let args = shlex::split(&line).unwrap_or_default();
        if args.is_empty() {
            continue;
        }
        let command = match Cli::try_parse_from(args) {
            Ok(cli) => cli.command,
            Err(err) => {
                err.print()?;
                continue;
            }
        };
        match command {
            Command::Insert { value } => {
                println!("{}", list.insert(value));
            }
            Command::Search { value } => match list.search(value) {
                Some(node) => println!("found {} (level {})", node.value(), node.level()),
                None => println!("not found"),
            },
            Command::Delete { value } => {
                println!("{}", list.delete(value));
            }
            Command::Fill { lower, upper } => {
                let inserted = (lower..=upper).filter(|&v| list.insert(v)).count();
                println!("inserted {}", inserted);
            }
            Command::Count => println!("{}", list.count()),
            Command::Empty => println!("{}", list.is_empty()),
            Command::Height => println!("{}", list.height()),
            Command::Dump => println!("{}", list),
            Command::Quit => return Ok(()),
        }
    }
}
