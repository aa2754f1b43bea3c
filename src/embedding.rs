use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{Edge, RawEdge};
use crate::records::read_records;

/// Coordinates of one vertex in the 2D spectral embedding. The vertex index
/// is the zero-based line number it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Percentile band kept on each axis, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileBand {
    pub low: f64,
    pub high: f64,
}

impl Default for PercentileBand {
    fn default() -> Self {
        PercentileBand {
            low: 1.0,
            high: 99.0,
        }
    }
}

impl PercentileBand {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !(0.0..=100.0).contains(&low) || !(0.0..=100.0).contains(&high) || low > high {
            return Err(Error::InvalidArgument(format!(
                "percentile band [{}, {}] must satisfy 0 <= low <= high <= 100",
                low, high
            )));
        }
        Ok(PercentileBand { low, high })
    }
}

/// Inclusive `[low, high]` range on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub low: f64,
    pub high: f64,
}

impl AxisBounds {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilteredEmbedding {
    pub x_bounds: AxisBounds,
    pub y_bounds: AxisBounds,
    /// Original indices of the vertices inside both bounds, ascending.
    pub indices: Vec<usize>,
    /// Input edges whose endpoints are both retained, in input order.
    pub edges: Vec<Edge>,
}

impl FilteredEmbedding {
    /// Retained vertices paired with their coordinates.
    pub fn points<'a>(&'a self, coords: &'a [Point]) -> impl Iterator<Item = (usize, Point)> + 'a {
        self.indices.iter().map(move |&i| (i, coords[i]))
    }
}

pub fn read_embedding<P: AsRef<Path>>(path: P) -> Result<Vec<Point>> {
    let coords: Vec<Point> = read_records(path.as_ref(), 2)?;
    debug!(vertices = coords.len(), path = %path.as_ref().display(), "read embedding");
    Ok(coords)
}

/// Percentile of `values` using linear interpolation between the two closest
/// ranks, with `rank = pct / 100 * (len - 1)`.
pub fn percentile(values: &[f64], pct: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(percentile_of_sorted(&sorted, pct))
}

fn percentile_of_sorted(sorted: &[f64], pct: f64) -> f64 {
    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

fn axis_bounds(values: &[f64], band: PercentileBand) -> Result<AxisBounds> {
    if values.is_empty() {
        return Err(Error::EmptyEmbedding);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(AxisBounds {
        low: percentile_of_sorted(&sorted, band.low),
        high: percentile_of_sorted(&sorted, band.high),
    })
}

/// Drops vertices outside the per-axis percentile band and every edge that
/// touches a dropped vertex.
///
/// The x and y bounds come from the two marginal distributions separately.
/// Edges referring to an index with no coordinate, negative ones included,
/// are dropped as well. Even when no point is an outlier, interpolated bounds
/// can cut off the single most extreme value on an axis.
pub fn filter_embedding(
    coords: &[Point],
    edges: &[RawEdge],
    band: PercentileBand,
) -> Result<FilteredEmbedding> {
    let xs: Vec<f64> = coords.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = coords.iter().map(|p| p.y).collect();

    let x_bounds = axis_bounds(&xs, band)?;
    let y_bounds = axis_bounds(&ys, band)?;

    let indices: Vec<usize> = coords
        .iter()
        .enumerate()
        .filter(|(_, p)| x_bounds.contains(p.x) && y_bounds.contains(p.y))
        .map(|(i, _)| i)
        .collect();

    let valid: HashSet<usize> = indices.iter().copied().collect();
    let vertex = |index: i64| usize::try_from(index).ok().filter(|i| valid.contains(i));
    let edges: Vec<Edge> = edges
        .iter()
        .filter_map(|&(u, v)| Some((vertex(u)?, vertex(v)?)))
        .collect();

    info!(
        vertices = coords.len(),
        kept_vertices = indices.len(),
        kept_edges = edges.len(),
        x_low = x_bounds.low,
        x_high = x_bounds.high,
        y_low = y_bounds.low,
        y_high = y_bounds.high,
        "filtered embedding"
    );

    Ok(FilteredEmbedding {
        x_bounds,
        y_bounds,
        indices,
        edges,
    })
}
