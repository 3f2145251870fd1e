//! MCSS command-line tool
//!
//! Loads a collection of molecular graphs, reduces it to its maximum common
//! substructure(s) on a thread pool and writes the result as JSON.

#[global_allocator]
/// Global allocator using jemalloc for better performance in parallel workloads.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;
mod report;

use clap::Parser;
use mcss_subgraph::{load_graphs_from, save_graphs_to};
use mcss_task::BatchRunner;
use tracing::{info, warn};

use args::Args;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.to_config()?;
    let graphs = load_graphs_from(&args.input)?;

    info!(
        "Reducing {} graphs from {} ({}, {}, chunk size {})",
        graphs.len(),
        args.input.display(),
        config.job_type,
        config.policy,
        config.chunk_size
    );

    let outcome = BatchRunner::new(config).run(graphs)?;
    info!(
        "Done: {} result graphs after {} rounds and {} tasks",
        outcome.graphs.len(),
        outcome.rounds,
        outcome.tasks
    );
    if outcome.degraded > 0 {
        warn!("{} tasks hit errors; results may be partial", outcome.degraded);
    }

    match &args.output {
        Some(path) => save_graphs_to(path, &outcome.graphs)?,
        None => println!("{}", serde_json::to_string_pretty(&outcome.graphs)?),
    }
    if let Some(path) = &args.report {
        report::write_report(path, &outcome.graphs)?;
    }

    mcss_subgraph::profiling::report();
    Ok(())
}
