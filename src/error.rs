use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("embedding file contains no vertices")]
    EmptyEmbedding,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("cannot place {requested} edges on {node_count} nodes (at most {max} distinct pairs)")]
    InfeasibleTarget {
        node_count: usize,
        requested: usize,
        max: usize,
    },

    #[error("gave up after {attempts} samples with {reached} of {requested} edges placed")]
    SamplingExhausted {
        attempts: usize,
        reached: usize,
        requested: usize,
    },

    #[error("Plot error: {0}")]
    Plot(String),
}
