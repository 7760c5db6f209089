//! Four-panel PNG analysis figure
//!
//! Layout (2x2):
//! 1. E vs T′, colored by M
//! 2. R vs T′, colored by E
//! 3. 3-D (M, T′, E) scatter, colored by R
//! 4. T′ histogram grouped by label

use crate::batch::ResultBatch;
use crate::error::{PtlxError, Result};
use crate::histogram::{Histogram, DEFAULT_BINS};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::ops::Range;
use std::path::Path;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
type PlotResult = std::result::Result<(), Box<dyn Error>>;

const COLORBAR_WIDTH: i32 = 90;
const COLORBAR_STEPS: usize = 64;

/// Fill colors for histogram groups, cycled by group index
const SERIES_COLORS: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

/// Piecewise-linear color gradients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    /// Indigo to red
    Trauma,
    Viridis,
    Plasma,
}

impl Colormap {
    fn stops(&self) -> &'static [(u8, u8, u8)] {
        match self {
            Colormap::Trauma => &[(0x4b, 0x00, 0x82), (0xff, 0x00, 0x00)],
            Colormap::Viridis => &[
                (68, 1, 84),
                (59, 82, 139),
                (33, 145, 140),
                (94, 201, 98),
                (253, 231, 37),
            ],
            Colormap::Plasma => &[
                (13, 8, 135),
                (126, 3, 168),
                (204, 71, 120),
                (248, 149, 64),
                (240, 249, 33),
            ],
        }
    }

    /// Color at normalized position `t` (clamped to [0, 1]; NaN maps to 0)
    pub fn color_at(&self, t: f64) -> RGBColor {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (stops.len() - 1) as f64;
        let idx = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = scaled - idx as f64;

        let (r0, g0, b0) = stops[idx];
        let (r1, g1, b1) = stops[idx + 1];
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
    }
}

/// Render the analysis figure for `batch` to a PNG at `path`
pub fn render_analysis(path: &Path, batch: &ResultBatch, size: (u32, u32)) -> Result<()> {
    render(path, batch, size).map_err(|e| PtlxError::Plot(e.to_string()))?;
    tracing::info!(
        path = %path.display(),
        width = size.0,
        height = size.1,
        "rendered analysis figure"
    );
    Ok(())
}

fn render(path: &Path, batch: &ResultBatch, size: (u32, u32)) -> PlotResult {
    let samples = batch.samples();
    let t_prime = batch.time_distortion();

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((2, 2));

    draw_colored_scatter(
        &panels[0],
        &ScatterPanel {
            title: "Emotional Charge vs Time Distortion",
            x_desc: "Emotional Charge (E)",
            y_desc: "Subjective Time Distortion (T')",
            color_desc: "Memory Density (M)",
            colormap: Colormap::Trauma,
        },
        samples.e(),
        t_prime,
        samples.m(),
    )?;

    draw_colored_scatter(
        &panels[1],
        &ScatterPanel {
            title: "Recursion Intensity vs Time Distortion",
            x_desc: "Recursive Intensity (R)",
            y_desc: "Subjective Time Distortion (T')",
            color_desc: "Emotional Charge (E)",
            colormap: Colormap::Viridis,
        },
        samples.r(),
        t_prime,
        samples.e(),
    )?;

    draw_scatter_3d(&panels[2], samples.m(), samples.e(), t_prime, samples.r())?;

    let histogram = Histogram::grouped(t_prime, samples.labels(), DEFAULT_BINS);
    draw_histogram(&panels[3], &histogram)?;

    root.present()?;
    Ok(())
}

struct ScatterPanel {
    title: &'static str,
    x_desc: &'static str,
    y_desc: &'static str,
    color_desc: &'static str,
    colormap: Colormap,
}

fn draw_colored_scatter(
    area: &Area<'_>,
    panel: &ScatterPanel,
    xs: &[f64],
    ys: &[f64],
    cs: &[f64],
) -> PlotResult {
    let (plot_area, bar_area) = split_colorbar(area);

    let x_range = axis_range(xs);
    let y_range = axis_range(ys);
    let c_range = axis_range(cs);

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(panel.title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_desc)
        .y_desc(panel.y_desc)
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    let points = xs
        .iter()
        .zip(ys)
        .zip(cs)
        .filter(|((x, y), _)| x.is_finite() && y.is_finite());
    chart.draw_series(points.map(|((&x, &y), &c)| {
        let color = panel.colormap.color_at(normalize(c, &c_range));
        Circle::new((x, y), 4, color.mix(0.7).filled())
    }))?;

    draw_colorbar(&bar_area, panel.colormap, c_range, panel.color_desc)
}

fn draw_colorbar(area: &Area<'_>, colormap: Colormap, range: Range<f64>, desc: &str) -> PlotResult {
    let mut chart = ChartBuilder::on(area)
        .margin_top(50)
        .margin_bottom(50)
        .margin_right(10)
        .y_label_area_size(55)
        .build_cartesian_2d(0.0f64..1.0f64, range.clone())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(5)
        .y_desc(desc)
        .draw()?;

    let step = (range.end - range.start) / COLORBAR_STEPS as f64;
    chart.draw_series((0..COLORBAR_STEPS).map(|i| {
        let y0 = range.start + i as f64 * step;
        let color = colormap.color_at((i as f64 + 0.5) / COLORBAR_STEPS as f64);
        Rectangle::new([(0.0, y0), (1.0, y0 + step)], color.filled())
    }))?;

    Ok(())
}

fn draw_scatter_3d(area: &Area<'_>, ms: &[f64], es: &[f64], ts: &[f64], rs: &[f64]) -> PlotResult {
    let (plot_area, bar_area) = split_colorbar(area);

    let r_range = axis_range(rs);

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(
            "Memory-Emotion-Time Distortion Space (x: M, y: T', z: E)",
            ("sans-serif", 24),
        )
        .margin(20)
        .build_cartesian_3d(axis_range(ms), axis_range(ts), axis_range(es))?;

    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.35;
        pb.scale = 0.8;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.1))
        .max_light_lines(4)
        .draw()?;

    let points = ms
        .iter()
        .zip(ts)
        .zip(es)
        .zip(rs)
        .filter(|(((m, t), e), _)| m.is_finite() && t.is_finite() && e.is_finite());
    chart.draw_series(points.map(|(((&m, &t), &e), &r)| {
        let color = Colormap::Plasma.color_at(normalize(r, &r_range));
        Circle::new((m, t, e), 3, color.mix(0.7).filled())
    }))?;

    draw_colorbar(&bar_area, Colormap::Plasma, r_range, "Recursion (R)")
}

fn draw_histogram(area: &Area<'_>, histogram: &Histogram) -> PlotResult {
    let y_max = histogram.max_count().max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Time Distortion Distribution", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(histogram.min..histogram.max, 0.0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("T'")
        .y_desc("Frequency")
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    for (idx, group) in histogram.groups.iter().enumerate() {
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        let bars = group
            .counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(bin, &count)| {
                let x0 = histogram.bin_start(bin);
                let x1 = x0 + histogram.bin_width;
                Rectangle::new([(x0, 0.0), (x1, count as f64)], color.mix(0.6).filled())
            });

        chart
            .draw_series(bars)?
            .label(group.label.clone())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.mix(0.6).filled())
            });
    }

    if !histogram.groups.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}

/// Split off a fixed-width strip on the right for a colorbar
fn split_colorbar<'a>(area: &Area<'a>) -> (Area<'a>, Area<'a>) {
    let (width, _) = area.dim_in_pixel();
    let plot_width = (width as i32 - COLORBAR_WIDTH).max(1);
    area.split_horizontally(plot_width)
}

/// Padded axis range over the finite values; `0..1` when there are none
fn axis_range(values: &[f64]) -> Range<f64> {
    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if max - min <= f64::EPSILON {
        return (min - 0.5)..(max + 0.5);
    }

    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

fn normalize(value: f64, range: &Range<f64>) -> f64 {
    let span = range.end - range.start;
    if span <= 0.0 {
        return 0.0;
    }
    (value - range.start) / span
}
