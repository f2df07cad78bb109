//! Partition a set of Pauli strings into commuting families.
//!
//! Usage:
//!   families                              # the 4-qubit example from the paper
//!   families XXYY YYXX ZZ11 11ZZ          # strings on the command line
//!   families -f h2.txt --rule gc          # strings (and weights) from a file
//!   families -f h2.txt --dot-dir output   # also write Graphviz files
//!
//! Input files hold one string per line, optionally followed by its weight;
//! `#` starts a comment.

use std::{
    error::Error,
    fs,
    path::{ Path, PathBuf },
    process,
    time::Instant,
};
use clap::{ Parser, ValueEnum };
use itertools::Itertools;
use pauli_families::{
    cover::{ partition_with, Strategy },
    error::PadError,
    family::{ pad_family, summed_weight, WeightMap },
    graph::CommutationGraph,
    jordan_wigner,
    pauli::{ Commutation, PauliString },
};
use tracing_subscriber::EnvFilter;

/// Default input: the 4-qubit Hamiltonian terms of the H2 example.
const EXAMPLE: [&str; 14] = [
    "ZZ11", "111Z", "11Z1", "1Z11", "Z111", "Z1Z1", "1ZZ1", "Z11Z", "1Z1Z",
    "11ZZ", "XXYY", "YXXY", "XYYX", "YYXX",
];

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum RuleArg {
    /// Qubit-wise commutation
    Qwc,
    /// General commutation
    Gc,
    /// Both, one after the other
    Both,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// First maximal clique found in each round
    First,
    /// Largest maximal clique in each round
    Largest,
}

#[derive(Parser)]
#[command(name = "families")]
#[command(version)]
#[command(about = "Partition Pauli strings into commuting families")]
struct Cli {
    /// Pauli strings over I (or 1), X, Y, Z
    #[arg(value_name = "STRING")]
    strings: Vec<String>,

    /// Read strings, each optionally followed by a weight, from a file
    #[arg(short, long, value_name = "FILE", conflicts_with = "strings")]
    file: Option<PathBuf>,

    /// Commutation rule(s) to partition under
    #[arg(short, long, value_enum, default_value_t = RuleArg::Both)]
    rule: RuleArg,

    /// How to pick the clique kept in each round
    #[arg(short, long, value_enum, default_value_t = StrategyArg::First)]
    strategy: StrategyArg,

    /// Write Graphviz files for each graph and partition to this directory
    #[arg(long, value_name = "DIR")]
    dot_dir: Option<PathBuf>,

    /// Skip the Jordan-Wigner structure check
    #[arg(long)]
    no_validate: bool,

    /// Pad every family with trivial strings up to this size
    #[arg(long, value_name = "N")]
    pad: Option<usize>,
}

/// Everything a single run needs; nothing is read from global state.
#[derive(Clone, Debug)]
struct RunConfig {
    strings: Vec<PauliString>,
    weights: Option<WeightMap>,
    rules: Vec<Commutation>,
    strategy: Strategy,
    dot_dir: Option<PathBuf>,
    validate: bool,
    pad: Option<usize>,
}

impl RunConfig {
    fn from_cli(cli: Cli) -> Result<Self, Box<dyn Error>> {
        let (strings, weights)
            = if let Some(path) = cli.file.as_ref() {
                read_input(path)?
            } else if cli.strings.is_empty() {
                (parse_strings(EXAMPLE)?, None)
            } else {
                (parse_strings(cli.strings.iter().map(String::as_str))?, None)
            };
        let rules
            = match cli.rule {
                RuleArg::Qwc => vec![Commutation::Qwc],
                RuleArg::Gc => vec![Commutation::Gc],
                RuleArg::Both => vec![Commutation::Gc, Commutation::Qwc],
            };
        let strategy
            = match cli.strategy {
                StrategyArg::First => Strategy::FirstMaximal,
                StrategyArg::Largest => Strategy::Largest,
            };
        Ok(Self {
            strings,
            weights,
            rules,
            strategy,
            dot_dir: cli.dot_dir,
            validate: !cli.no_validate,
            pad: cli.pad,
        })
    }
}

fn parse_strings<'a, I>(strings: I) -> Result<Vec<PauliString>, Box<dyn Error>>
where I: IntoIterator<Item = &'a str>
{
    strings.into_iter()
        .map(|s| {
            s.parse::<PauliString>()
                .map_err(|e| -> Box<dyn Error> { format!("{:?}: {}", s, e).into() })
        })
        .collect()
}

fn read_input(path: &Path)
    -> Result<(Vec<PauliString>, Option<WeightMap>), Box<dyn Error>>
{
    let source
        = fs::read_to_string(path)
        .map_err(|e| format!("error reading file '{}': {}", path.display(), e))?;
    let mut strings: Vec<PauliString> = Vec::new();
    let mut weights = WeightMap::default();
    for (lineno, line) in source.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() { continue; }
        let mut tokens = line.split_whitespace();
        let Some(label) = tokens.next() else { continue; };
        let ps: PauliString
            = label.parse()
            .map_err(|e| format!("{}:{}: {}", path.display(), lineno + 1, e))?;
        if let Some(w) = tokens.next() {
            let w: f64
                = w.parse()
                .map_err(|e| {
                    format!("{}:{}: bad weight {:?}: {}",
                        path.display(), lineno + 1, w, e)
                })?;
            weights.insert(ps.clone(), w);
        }
        strings.push(ps);
    }
    let weights = (!weights.is_empty()).then_some(weights);
    Ok((strings, weights))
}

fn file_stem(rule: Commutation) -> &'static str {
    match rule {
        Commutation::Qwc => "qwc",
        Commutation::Gc => "gc",
    }
}

fn run(config: &RunConfig) -> Result<(), Box<dyn Error>> {
    if config.validate && !jordan_wigner::validate(&config.strings) {
        return Err("input is not consistent with a Jordan-Wigner transformation".into());
    }
    if let Some(dir) = config.dot_dir.as_ref() {
        fs::create_dir_all(dir)?;
    }

    let naive = config.strings.len();
    for &rule in config.rules.iter() {
        let start = Instant::now();
        let graph = CommutationGraph::build(&config.strings, rule);
        let families = partition_with(&graph, config.strategy);
        let time_ms = start.elapsed().as_secs_f64() * 1000.0;

        println!(
            "{}, #families: {}, #naive: {}, time: {:.3}ms",
            rule, families.len(), naive, time_ms,
        );
        for (k, family) in families.iter().enumerate() {
            let members = family.iter().join(" ");
            match config.weights.as_ref() {
                Some(weights) => {
                    let w = summed_weight(family, weights)?;
                    println!("  {:>3}: {}  (summed weight {:.6})", k, members, w);
                },
                None => println!("  {:>3}: {}", k, members),
            }
            if let Some(target) = config.pad {
                match pad_family(family, target, rule) {
                    Ok(padded) => {
                        println!("       padded: {}", padded.iter().join(" "));
                    },
                    Err(PadError::Exhausted { family: padded, missing }) => {
                        tracing::warn!(family = k, missing, "padding fell short");
                        println!("       padded: {}", padded.iter().join(" "));
                    },
                    Err(err) => return Err(err.into()),
                }
            }
        }

        if let Some(dir) = config.dot_dir.as_ref() {
            let name = file_stem(rule);
            let title = format!("{} commutation", rule);
            graph.save_graphviz(&title, dir.join(format!("{}_graph.gv", name)))?;
            let title
                = format!("{}, #families: {}, #naive: {}", rule, families.len(), naive);
            families.save_graphviz(&title, dir.join(format!("{}_families.gv", name)))?;
            tracing::info!(dir = %dir.display(), "wrote {} graphs", name);
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match RunConfig::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(1);
        },
    };
    if let Err(e) = run(&config) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}
