use std::time::Instant;

use clap::Parser;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wavemaze_demos::{BenchStats, init_logging};
use wavemaze_gen::{GenConfig, LabyrinthGen, Method};
use wavemaze_paths::{Bfs, SolveError, WavefrontSolver};

/// Benchmark the wavefront solver on random labyrinths
#[derive(Parser, Debug)]
#[command(name = "wavemaze-bench")]
#[command(about = "Time the solver over many random labyrinths", long_about = None)]
struct Args {
    /// Width and height of each labyrinth
    #[arg(short, long, default_value_t = 50)]
    size: i32,

    /// Number of labyrinths to solve
    #[arg(short = 'n', long, default_value_t = 100)]
    count: usize,

    /// Wall probability
    #[arg(short, long, default_value_t = 0.4)]
    complexity: f64,

    /// Carve solvable labyrinths instead of scattering walls
    #[arg(long)]
    carved: bool,

    /// Seed for the generator
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Check every result against a plain breadth-first search
    #[arg(long)]
    verify: bool,

    /// Bins in the timing histogram
    #[arg(long, default_value_t = 10)]
    buckets: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging("warn");
    let args = Args::parse();

    let cfg = GenConfig {
        width: args.size,
        height: args.size,
        method: if args.carved {
            Method::Carved
        } else {
            Method::Random
        },
        complexity: args.complexity,
        ..GenConfig::default()
    };
    let mut generator = LabyrinthGen::new(StdRng::seed_from_u64(args.seed));
    let mut solver = WavefrontSolver::new();
    let mut bfs = None;
    let mut stats = BenchStats::new();
    let mut mismatches = 0;

    info!("solving {} labyrinths of {}x{}", args.count, args.size, args.size);
    for i in 0..args.count {
        let lab = generator.generate(&cfg)?;
        let started = Instant::now();
        let result = solver.solve(&lab, ());
        let elapsed = started.elapsed();

        let (steps, found) = match &result {
            Ok(sol) => (sol.steps, Some(sol.len())),
            Err(SolveError::Unreachable { steps }) => (*steps, None),
            Err(e) => return Err(format!("labyrinth {i}: {e}").into()),
        };
        stats.record(elapsed, steps, found.is_some());

        if args.verify {
            let bfs = bfs.get_or_insert_with(|| Bfs::new(lab.bounds()));
            let expected = bfs.path_len(&lab, lab.start(), lab.end());
            if expected != found {
                warn!("labyrinth {i}: solver {found:?}, bfs {expected:?}\n{lab}");
                mismatches += 1;
            }
        }
    }

    println!("runs:        {}", stats.runs());
    println!("solved:      {}", stats.solved());
    println!("min time:    {:?}", stats.min());
    println!("max time:    {:?}", stats.max());
    println!("total time:  {:?}", stats.total());
    println!("mean steps:  {:.1}", stats.mean_steps());
    println!("histogram:");
    let histogram = stats.histogram(args.buckets);
    let peak = histogram.iter().map(|&(_, n)| n).max().unwrap_or(0).max(1);
    for (edge, n) in histogram {
        let bar = "#".repeat(n * 40 / peak);
        println!("  <= {:>12} {n:>6} {bar}", format!("{edge:?}"));
    }
    if args.verify {
        println!("verified:    {mismatches} mismatches");
        if mismatches > 0 {
            return Err(format!("{mismatches} results differ from breadth-first search").into());
        }
    }
    Ok(())
}
