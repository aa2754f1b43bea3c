use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing::info;

use fiedler_plot::generator::{default_output_path, generate_random_connected_graph, GeneratorConfig};
use fiedler_plot::graph::{export_to_graphviz, write_edges};

/// Generate a random connected graph with a target average degree
#[derive(Parser, Debug)]
#[command(name = "generate")]
struct Args {
    num_nodes: usize,

    avg_degree: usize,

    /// Seed for the random edge sampler; drawn from OS entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Edge list path [default: graph_{num_nodes}_nodes_{avg_degree}_deg.txt]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Cap on random pair samples before giving up
    #[arg(long)]
    max_attempts: Option<usize>,

    /// Also write the graph in Graphviz DOT format
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Write node/edge counts, realized average degree and component count as JSON
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                let _ = err.print();
                std::process::exit(1);
            }
        },
    }
}

fn main() -> anyhow::Result<()> {
    let args = parse_args();
    fiedler_plot::init_logging();

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "seeding edge sampler");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let config = GeneratorConfig {
        node_count: args.num_nodes,
        avg_degree: args.avg_degree,
        max_attempts: args.max_attempts,
    };
    let graph = generate_random_connected_graph(&config, &mut rng)?;

    let output = args
        .output
        .unwrap_or_else(|| default_output_path(args.num_nodes, args.avg_degree));
    write_edges(&graph, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    let summary = graph.summary();
    info!(
        edges = summary.edge_count,
        average_degree = summary.average_degree,
        components = summary.connected_components,
        "graph summary"
    );

    if let Some(path) = &args.dot {
        export_to_graphviz(&graph, path)?;
        info!(path = %path.display(), "wrote graphviz export");
    }

    if let Some(path) = &args.summary {
        std::fs::write(path, serde_json::to_string_pretty(&summary)?)?;
        info!(path = %path.display(), "wrote summary");
    }

    println!(
        "Generated connected graph with {} nodes and average degree {}.",
        args.num_nodes, args.avg_degree
    );
    println!("Saved to {}", output.display());

    Ok(())
}
