use rand::Rng;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::EdgeList;

/// Samples allowed per requested random edge when no explicit cap is given.
const ATTEMPTS_PER_EDGE: usize = 1000;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub node_count: usize,
    pub avg_degree: usize,
    /// Upper bound on random pair samples. `None` picks a cap proportional
    /// to the number of random edges requested.
    pub max_attempts: Option<usize>,
}

impl GeneratorConfig {
    pub fn new(node_count: usize, avg_degree: usize) -> Self {
        GeneratorConfig {
            node_count,
            avg_degree,
            max_attempts: None,
        }
    }
}

/// `graph_{n}_nodes_{d}_deg.txt`
pub fn default_output_path(node_count: usize, avg_degree: usize) -> PathBuf {
    PathBuf::from(format!("graph_{}_nodes_{}_deg.txt", node_count, avg_degree))
}

/// Number of random edges to add on top of the chain:
/// `max(0, floor(avg_degree * node_count / 2) - (node_count - 1))`.
pub fn additional_edge_target(node_count: usize, avg_degree: usize) -> Result<usize> {
    let wanted = avg_degree.checked_mul(node_count).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "avg_degree {} * node_count {} overflows",
            avg_degree, node_count
        ))
    })? / 2;

    Ok(wanted.saturating_sub(node_count.saturating_sub(1)))
}

/// Builds a connected graph: a chain over all vertices, then uniformly
/// sampled extra edges until the edge count reaches the chain length plus
/// [`additional_edge_target`].
///
/// The requested average degree is only approximated. When the target is at
/// or below the chain length, the chain alone is returned.
pub fn generate_random_connected_graph<R: Rng>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<EdgeList> {
    let n = config.node_count;
    let additional = additional_edge_target(n, config.avg_degree)?;
    let target = n.saturating_sub(1) + additional;

    let max_pairs = n.saturating_mul(n.saturating_sub(1)) / 2;
    if target > max_pairs {
        return Err(Error::InfeasibleTarget {
            node_count: n,
            requested: target,
            max: max_pairs,
        });
    }

    let mut graph = EdgeList::chain(n);
    let max_attempts = config
        .max_attempts
        .unwrap_or_else(|| additional.saturating_mul(ATTEMPTS_PER_EDGE).saturating_add(ATTEMPTS_PER_EDGE));

    debug!(chain = graph.len(), additional, max_attempts, "sampling random edges");

    let mut attempts = 0;
    while graph.len() < target {
        if attempts == max_attempts {
            return Err(Error::SamplingExhausted {
                attempts,
                reached: graph.len(),
                requested: target,
            });
        }
        attempts += 1;

        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v {
            graph.insert(u, v);
        }
    }

    info!(
        nodes = n,
        edges = graph.len(),
        attempts,
        "generated random connected graph"
    );

    Ok(graph)
}
