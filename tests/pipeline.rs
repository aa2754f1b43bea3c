// End-to-end checks for the generator and the embedding filter
use fiedler_plot::embedding::{filter_embedding, read_embedding, PercentileBand};
use fiedler_plot::generator::{generate_random_connected_graph, GeneratorConfig};
use fiedler_plot::graph::{read_edges, write_edges, Edge, EdgeList};
use fiedler_plot::Error;
use petgraph::algo::connected_components;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use std::fs;
use std::process::Command;

#[test]
fn test_generated_graphs_are_connected_and_simple() {
    for (n, d) in [(2, 0), (2, 1), (3, 2), (10, 4), (57, 3), (200, 8)] {
        for seed in 0..5 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let graph =
                generate_random_connected_graph(&GeneratorConfig::new(n, d), &mut rng).unwrap();

            assert_eq!(connected_components(&graph.to_petgraph()), 1);
            assert!(graph.len() >= n - 1);
            assert!(graph.len() >= d * n / 2 || graph.len() == n - 1);

            let mut seen = HashSet::new();
            for (u, v) in graph.edges() {
                assert_ne!(u, v, "self-loop in n={n} d={d}");
                assert!(u < n && v < n);
                assert!(seen.insert((u.min(v), u.max(v))), "duplicate pair");
            }
        }
    }
}

#[test]
fn test_generated_file_feeds_the_filter() {
    let dir = tempfile::tempdir().unwrap();
    let graph_path = dir.path().join("graph.txt");
    let embedding_path = dir.path().join("embedding.txt");

    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let graph = generate_random_connected_graph(&GeneratorConfig::new(30, 4), &mut rng).unwrap();
    write_edges(&graph, &graph_path).unwrap();

    let lines: Vec<String> = (0..30)
        .map(|i| format!("{} {}", (i % 6) as f64 * 0.1, (i / 6) as f64 * -0.2))
        .collect();
    fs::write(&embedding_path, lines.join("\n") + "\n").unwrap();

    let edges = read_edges(&graph_path).unwrap();
    let written: Vec<Edge> = edges.iter().map(|&(u, v)| (u as usize, v as usize)).collect();
    assert_eq!(EdgeList::from_edges(&written), graph);

    let coords = read_embedding(&embedding_path).unwrap();
    let filtered = filter_embedding(&coords, &edges, PercentileBand::default()).unwrap();

    // every x and y value is repeated, so the percentile band keeps all vertices
    assert_eq!(filtered.indices.len(), 30);
    assert_eq!(filtered.edges, written);
}

#[test]
fn test_malformed_embedding_fails_before_plotting() {
    let dir = tempfile::tempdir().unwrap();
    let embedding_path = dir.path().join("embedding.txt");
    fs::write(&embedding_path, "0.1 0.2\n0.3 0.4 0.5\n").unwrap();

    let err = read_embedding(&embedding_path).unwrap_err();
    assert!(matches!(err, Error::ColumnCount { line: 2, .. }));
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_edges(dir.path().join("graph.txt")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_generate_cli_writes_named_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_generate"))
        .args(["12", "3", "--seed", "9"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Generated connected graph with 12 nodes and average degree 3."));
    assert!(stdout.contains("Saved to graph_12_nodes_3_deg.txt"));

    let edges = read_edges(dir.path().join("graph_12_nodes_3_deg.txt")).unwrap();
    assert_eq!(edges.len(), 18);
}

#[test]
fn test_generate_cli_usage_error_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_generate"))
        .arg("12")
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr).unwrap().contains("Usage"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_plot_cli_rejects_malformed_embedding_without_image() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("embedding.txt"), "1 2 3\n").unwrap();
    fs::write(dir.path().join("graph.txt"), "0 1\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_fiedler_plot"))
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(!dir.path().join("graph_embedding_filtered_a.png").exists());
}

fn write_grid_inputs(dir: &std::path::Path, graph: &str) {
    let lines: Vec<String> = (0..20)
        .map(|i| format!("{} {}", (i % 5) as f64 * 0.25, (i / 5) as f64 * 0.5))
        .collect();
    fs::write(dir.join("embedding.txt"), lines.join("\n") + "\n").unwrap();
    fs::write(dir.join("graph.txt"), graph).unwrap();
}

#[test]
fn test_plot_cli_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    write_grid_inputs(dir.path(), "0 1\n1 2\n5 6\n");

    let output = Command::new(env!("CARGO_BIN_EXE_fiedler_plot"))
        .args(["--dpi", "50", "--figure-size", "4"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Filtered plot saved as graph_embedding_filtered_a.png"));

    let png = fs::read(dir.path().join("graph_embedding_filtered_a.png")).unwrap();
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn test_plot_cli_skips_negative_edge_indices() {
    let dir = tempfile::tempdir().unwrap();
    write_grid_inputs(dir.path(), "0 1\n-1 2\n2 3\n");

    let edges = read_edges(dir.path().join("graph.txt")).unwrap();
    let coords = read_embedding(dir.path().join("embedding.txt")).unwrap();
    let filtered = filter_embedding(&coords, &edges, PercentileBand::default()).unwrap();
    assert_eq!(filtered.edges, vec![(0, 1), (2, 3)]);

    let output = Command::new(env!("CARGO_BIN_EXE_fiedler_plot"))
        .args(["--dpi", "50", "--figure-size", "4", "--output", "plot.png"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(dir.path().join("plot.png").exists());
}
