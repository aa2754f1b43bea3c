use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::PathBuf;

use tracing::info;

use crate::embedding::{FilteredEmbedding, Point};
use crate::error::{Error, Result};

pub const TITLE: &str = "Filtered Spectral Embedding (focus on main area)";
pub const X_LABEL: &str = "Eigenvector 1 (Fiedler vector)";
pub const Y_LABEL: &str = "Eigenvector 2";

/// Fraction of the data span added on each side of the axes.
const PAD: f64 = 0.02;

#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub output: PathBuf,
    pub dpi: u32,
    /// Width and height of the square figure, in inches.
    pub figure_inches: f64,
    /// Draw each retained vertex's original index next to it.
    pub labels: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            output: PathBuf::from("graph_embedding_filtered_a.png"),
            dpi: 300,
            figure_inches: 10.0,
            labels: true,
        }
    }
}

impl PlotConfig {
    pub fn pixel_size(&self) -> (u32, u32) {
        let side = (self.figure_inches * self.dpi as f64).round().max(1.0) as u32;
        (side, side)
    }

    /// Converts a size in typographic points to pixels at the configured DPI.
    fn px(&self, points: f64) -> u32 {
        (points * self.dpi as f64 / 72.0).round().max(1.0) as u32
    }
}

fn plot_err<E: std::fmt::Display>(err: E) -> Error {
    Error::Plot(err.to_string())
}

/// Axis ranges that enclose `points` with a small pad and give both axes the
/// same data units per pixel on a plotting area of `area` pixels.
pub fn equal_aspect_ranges<I>(points: I, area: (u32, u32)) -> (Range<f64>, Range<f64>)
where
    I: IntoIterator<Item = Point>,
{
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for p in points {
        x_min = x_min.min(p.x);
        x_max = x_max.max(p.x);
        y_min = y_min.min(p.y);
        y_max = y_max.max(p.y);
    }

    if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
        x_min = -1.0;
        x_max = 1.0;
        y_min = -1.0;
        y_max = 1.0;
    }

    let span = |low: f64, high: f64| {
        let span = (high - low) * (1.0 + 2.0 * PAD);
        if span > 0.0 {
            span
        } else {
            1.0
        }
    };
    let x_span = span(x_min, x_max);
    let y_span = span(y_min, y_max);

    let (width, height) = (area.0.max(1) as f64, area.1.max(1) as f64);
    let units_per_px = (x_span / width).max(y_span / height);

    let x_half = units_per_px * width / 2.0;
    let y_half = units_per_px * height / 2.0;
    let x_mid = (x_min + x_max) / 2.0;
    let y_mid = (y_min + y_max) / 2.0;

    (
        (x_mid - x_half)..(x_mid + x_half),
        (y_mid - y_half)..(y_mid + y_half),
    )
}

/// Renders the retained vertices, their labels and the retained edges to a
/// PNG at `config.output`.
pub fn render_embedding(
    coords: &[Point],
    filtered: &FilteredEmbedding,
    config: &PlotConfig,
) -> Result<()> {
    let (width, height) = config.pixel_size();
    let margin = config.px(8.0);
    let label_area = config.px(36.0);

    let root = BitMapBackend::new(&config.output, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let root = root
        .titled(TITLE, ("sans-serif", config.px(12.0)))
        .map_err(plot_err)?;

    let (area_w, area_h) = root.dim_in_pixel();
    let plot_area = (
        area_w.saturating_sub(2 * margin + label_area),
        area_h.saturating_sub(2 * margin + label_area),
    );
    let (x_range, y_range) = equal_aspect_ranges(filtered.points(coords).map(|(_, p)| p), plot_area);

    let mut chart = ChartBuilder::on(&root)
        .margin(margin)
        .x_label_area_size(label_area)
        .y_label_area_size(label_area)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .axis_desc_style(("sans-serif", config.px(10.0)))
        .label_style(("sans-serif", config.px(8.0)))
        .draw()
        .map_err(plot_err)?;

    let edge_style = BLUE.mix(0.6).stroke_width(config.px(1.0));
    chart
        .draw_series(filtered.edges.iter().map(|&(u, v)| {
            let (a, b) = (coords[u], coords[v]);
            PathElement::new(vec![(a.x, a.y), (b.x, b.y)], edge_style)
        }))
        .map_err(plot_err)?;

    // s=20 in matplotlib terms: marker area of 20 pt^2
    let radius = config.px(20f64.sqrt() / 2.0);
    chart
        .draw_series(
            filtered
                .points(coords)
                .map(|(_, p)| Circle::new((p.x, p.y), radius, RED.filled())),
        )
        .map_err(plot_err)?;

    if config.labels {
        let label_style = ("sans-serif", config.px(10.0))
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Bottom));
        chart
            .draw_series(
                filtered
                    .points(coords)
                    .map(|(i, p)| Text::new(i.to_string(), (p.x, p.y), label_style.clone())),
            )
            .map_err(plot_err)?;
    }

    root.present().map_err(plot_err)?;

    info!(
        path = %config.output.display(),
        width,
        height,
        vertices = filtered.indices.len(),
        edges = filtered.edges.len(),
        "rendered embedding plot"
    );
    Ok(())
}
