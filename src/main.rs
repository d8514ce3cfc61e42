use std::io::BufRead;

use clap::Parser;
use log::error;

use proptable::config::{Options, DEFAULT_MAX_VARIABLES};
use proptable::truth_table::TruthTable;

#[derive(Debug, Parser)]
#[command(author, version, about = "Truth tables for propositional logic expressions")]
struct Cli {
	/// Expressions to tabulate, e.g. "(A ∧ B) → ¬C". Read from stdin, one per line, if absent.
	#[arg(value_name = "EXPR")]
	expressions: Vec<String>,

	/// Refuse expressions with more distinct variables than this.
	#[arg(long, value_name = "INT", env = "PROPTABLE_MAX_VARIABLES", default_value_t = DEFAULT_MAX_VARIABLES)]
	max_variables: usize,

	/// Enable debug logging.
	#[arg(long)]
	debug: bool,
}

fn disp(string: &str, options: &Options) {
	match TruthTable::build(string, options) {
		Ok(table) => println!("{}", table),
		Err(e) => error!("{:?}: {}", string.trim(), e),
	}
}

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = Cli::parse();

	simplelog::TermLogger::init(
		if args.debug {
			simplelog::LevelFilter::Debug
		} else {
			simplelog::LevelFilter::Info
		},
		simplelog::Config::default(),
		simplelog::TerminalMode::Mixed,
		simplelog::ColorChoice::Auto,
	)?;

	let options = Options::default().with_max_variables(args.max_variables);

	if args.expressions.is_empty() {
		for line in std::io::stdin().lock().lines() {
			let line = line?;
			if line.trim().is_empty() {
				continue;
			}
			disp(&line, &options);
		}
	} else {
		for expression in &args.expressions {
			disp(expression, &options);
		}
	}

	Ok(())
}
