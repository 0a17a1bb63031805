use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wavemaze_demos::{init_logging, load_labyrinth};
use wavemaze_gen::{GenConfig, LabyrinthGen, Layout, Method};
use wavemaze_paths::{DeadEnd, SolveConfig, WavefrontSolver};

/// Solve a labyrinth with the bidirectional wavefront search
#[derive(Parser, Debug)]
#[command(name = "wavemaze-solve")]
#[command(about = "Find a shortest path through a grid labyrinth", long_about = None)]
struct Args {
    /// Labyrinth file: a text layout or a JSON array of code rows.
    /// A random labyrinth is generated when omitted.
    file: Option<PathBuf>,

    /// Width and height of a generated labyrinth
    #[arg(short, long, default_value_t = 10)]
    size: i32,

    /// Wall probability of a generated labyrinth
    #[arg(short, long, default_value_t = 0.4)]
    complexity: f64,

    /// Carve a solvable labyrinth instead of scattering walls
    #[arg(long)]
    carved: bool,

    /// Seed for the generator
    #[arg(long)]
    seed: Option<u64>,

    /// Write every intermediate state field to this JSON file
    #[arg(long)]
    states: Option<PathBuf>,

    /// Check for a meeting after every step
    #[arg(long)]
    no_gate: bool,

    /// Keep going while only one front is stalled
    #[arg(long)]
    both_fronts: bool,

    /// Give up after this many steps
    #[arg(long)]
    max_steps: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging("info");
    let args = Args::parse();

    let lab = match &args.file {
        Some(path) => {
            info!("loading {}", path.display());
            load_labyrinth(path)?
        }
        None => {
            let seed = args.seed.unwrap_or_else(rand::random);
            info!("generating {0}x{0} labyrinth with seed {seed}", args.size);
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
            LabyrinthGen::new(StdRng::seed_from_u64(seed)).generate(&cfg)?
        }
    };

    let mut solver = WavefrontSolver::with_config(SolveConfig {
        feasibility_gate: !args.no_gate,
        dead_end: if args.both_fronts {
            DeadEnd::BothFronts
        } else {
            DeadEnd::EitherFront
        },
        max_steps: args.max_steps,
    });

    let mut states = Vec::new();
    let result = if args.states.is_some() {
        solver.solve(&lab, &mut states)
    } else {
        solver.solve(&lab, ())
    };

    if let Some(path) = &args.states {
        serde_json::to_writer(BufWriter::new(File::create(path)?), &states)?;
        info!("wrote {} states to {}", states.len(), path.display());
    }

    match result {
        Ok(sol) => {
            println!("{}", Layout::render(&lab, &sol.path));
            println!();
            println!("path length:    {} ({} cells)", sol.len(), sol.path.len());
            println!("steps:          {}", sol.steps);
            println!("meeting:        {} | {}", sol.meeting.from_start, sol.meeting.from_end);
            println!("propagation:    {:?}", sol.propagation);
            println!("reconstruction: {:?}", sol.reconstruction);
            Ok(())
        }
        Err(e) => {
            println!("{lab}");
            Err(e.into())
        }
    }
}
