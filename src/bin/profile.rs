use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mazelab::{
    animation::NullSurface,
    config::MazeArgs,
    error::Result,
    session::{MazeSession, RunStats},
};

/// Time generation and solving without drawing anything.
#[derive(Debug, Parser)]
struct Args {
    #[command(flatten)]
    maze: MazeArgs,

    /// Number of generate-and-solve runs. Run `i` uses seed `seed + i` when a seed is given.
    #[arg(short = 'n', long, default_value_t = 10)]
    iterations: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = args.maze.into_config()?;
    config.interval = Duration::ZERO;
    let base_seed = config.seed;
    println!(
        "Profiling {} x {} on a {}x{} maze, {} runs",
        config.generator, config.solver, config.size, config.size, args.iterations
    );

    let mut session = MazeSession::new(config.clone(), NullSurface)?;
    let mut total = RunStats::default();
    for i in 0..args.iterations {
        if let Some(seed) = base_seed {
            let mut run_config = config.clone();
            run_config.seed = Some(seed.wrapping_add(i as u64));
            session.set_config(run_config)?;
        }
        session.generate()?;
        session.wait()?;
        session.solve()?;
        session.wait()?;

        let stats = session.stats();
        println!(
            "run {:>3}: generation {:>10.2?}  solve {:>10.2?}  path {} cells",
            i + 1,
            stats.generation_time,
            stats.solving_time,
            stats.path_length
        );
        total.generation_time += stats.generation_time;
        total.solving_time += stats.solving_time;
        total.path_length += stats.path_length;
    }

    if args.iterations > 0 {
        let n = args.iterations;
        println!(
            "average: generation {:.2?}  solve {:.2?}  path {} cells",
            total.generation_time / n,
            total.solving_time / n,
            total.path_length / n as usize
        );
    }
    Ok(())
}
