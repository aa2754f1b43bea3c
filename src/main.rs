use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use fiedler_plot::embedding::{filter_embedding, read_embedding, PercentileBand};
use fiedler_plot::graph::read_edges;
use fiedler_plot::plot::{render_embedding, PlotConfig};

/// Filter outlier vertices of a 2D spectral embedding by percentile and plot
/// the remaining vertices and edges
#[derive(Parser, Debug)]
#[command(name = "fiedler_plot")]
struct Args {
    /// Vertex coordinates, one "x y" pair per line
    #[arg(long, default_value = "embedding.txt")]
    embedding: PathBuf,

    /// Edge list, one "u v" pair per line
    #[arg(long, default_value = "graph.txt")]
    graph: PathBuf,

    /// Output PNG
    #[arg(short, long, default_value = "graph_embedding_filtered_a.png")]
    output: PathBuf,

    /// Lower percentile kept on each axis
    #[arg(long, default_value_t = 1.0)]
    low_pct: f64,

    /// Upper percentile kept on each axis
    #[arg(long, default_value_t = 99.0)]
    high_pct: f64,

    #[arg(long, default_value_t = 300)]
    dpi: u32,

    /// Side of the square figure in inches
    #[arg(long, default_value_t = 10.0)]
    figure_size: f64,

    /// Skip the vertex index labels (useful for large graphs)
    #[arg(long)]
    no_labels: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    fiedler_plot::init_logging();

    let band = PercentileBand::new(args.low_pct, args.high_pct)?;

    let coords = read_embedding(&args.embedding)?;
    let edges = read_edges(&args.graph)?;
    info!(vertices = coords.len(), edges = edges.len(), "loaded inputs");

    let filtered = filter_embedding(&coords, &edges, band)?;

    let config = PlotConfig {
        output: args.output,
        dpi: args.dpi,
        figure_inches: args.figure_size,
        labels: !args.no_labels,
    };
    render_embedding(&coords, &filtered, &config)?;

    println!("Filtered plot saved as {}", config.output.display());

    Ok(())
}
