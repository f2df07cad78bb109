//! Compare qubit-wise and general commutation on random sets of Pauli
//! strings.
//!
//! Each round draws `count` uniformly random `qubits`-qubit strings, builds
//! both commutation graphs, and partitions them. The mean family counts are
//! printed at the end, along with a histogram of the GC/QWC savings.

use std::{ process, time::Instant };
use clap::Parser;
use pauli_families::{
    cover::{ partition_with, Strategy },
    graph::CommutationGraph,
    pauli::PauliString,
};
use rand::{ rngs::StdRng, SeedableRng };
use rustc_hash::FxHashMap;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "random_cover")]
#[command(about = "Average family counts for random Pauli strings")]
struct Cli {
    /// Number of qubits per string
    #[arg(short, long, default_value_t = 4)]
    qubits: usize,

    /// Number of strings drawn per round
    #[arg(short, long, default_value_t = 16)]
    count: usize,

    /// Seed for the random number generator
    #[arg(short, long, default_value_t = 10546)]
    seed: u64,

    /// Number of rounds to average over
    #[arg(short, long, default_value_t = 100)]
    rounds: usize,

    /// Keep the largest maximal clique in each round instead of the first
    #[arg(long)]
    largest: bool,
}

#[derive(Copy, Clone, Debug, Default)]
struct RoundResult {
    distinct: usize,
    qwc: usize,
    gc: usize,
}

fn eval_round(strings: &[PauliString], strategy: Strategy) -> RoundResult {
    let qwc = CommutationGraph::build_qwc(strings);
    let gc = CommutationGraph::build_gc(strings, false);
    RoundResult {
        distinct: qwc.num_nodes(),
        qwc: partition_with(&qwc, strategy).len(),
        gc: partition_with(&gc, strategy).len(),
    }
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
    if cli.rounds == 0 {
        tracing::error!("at least one round is required");
        process::exit(1);
    }
    let strategy
        = if cli.largest { Strategy::Largest } else { Strategy::FirstMaximal };

    let mut rng = StdRng::seed_from_u64(cli.seed);
    let mut savings: FxHashMap<isize, usize> = FxHashMap::default();
    let mut total = RoundResult::default();
    let start = Instant::now();
    for round in 0..cli.rounds {
        let strings: Vec<PauliString>
            = (0..cli.count)
            .map(|_| PauliString::gen(cli.qubits, &mut rng))
            .collect();
        let res = eval_round(&strings, strategy);
        tracing::debug!(round, ?res);
        *savings.entry(res.qwc as isize - res.gc as isize).or_insert(0) += 1;
        total.distinct += res.distinct;
        total.qwc += res.qwc;
        total.gc += res.gc;
    }
    let time_ms = start.elapsed().as_secs_f64() * 1000.0;

    let rounds = cli.rounds as f64;
    println!(
        "{} rounds of {} strings on {} qubits ({:.3}ms)",
        cli.rounds, cli.count, cli.qubits, time_ms,
    );
    println!("  mean distinct strings: {:.3}", total.distinct as f64 / rounds);
    println!("  mean QWC families:     {:.3}", total.qwc as f64 / rounds);
    println!("  mean GC families:      {:.3}", total.gc as f64 / rounds);
    let mut savings: Vec<(isize, usize)> = savings.into_iter().collect();
    savings.sort_unstable();
    println!("  QWC - GC:");
    for (diff, n) in savings {
        println!("    {:>3}: {}", diff, n);
    }
}
