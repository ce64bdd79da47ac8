//! Chart export
//!
//! The output format follows the file extension. `html` is an interactive
//! plotly page. `svg`, `png` and `pdf` are rendered in-process: plotters
//! draws the chart as SVG, resvg rasterizes it to PNG and svg2pdf converts it
//! to PDF. Every failure is returned as an [`ExportError`].

use std::fmt;
use std::path::Path;

use plotly::common::{Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Plot, Scatter};
use plotters::coord::Shift;
use plotters::prelude::*;
use portvar_core::VarianceCurve;

use crate::util::io::atomic_write_bytes;

pub const CHART_TITLE: &str = "Portfolio variance vs. number of tickers";
pub const X_AXIS_TITLE: &str = "Number of tickers";
pub const Y_AXIS_TITLE: &str = "Portfolio variance";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Pdf,
    Svg,
    Html,
}

impl ExportFormat {
    /// Infer the format from the extension of `path` (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or(ExportError::MissingExtension)?;

        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "pdf" => Ok(ExportFormat::Pdf),
            "svg" => Ok(ExportFormat::Svg),
            "html" | "htm" => Ok(ExportFormat::Html),
            _ => Err(ExportError::UnsupportedExtension(ext.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Pdf => "PDF",
            ExportFormat::Svg => "SVG",
            ExportFormat::Html => "HTML",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub enum ExportError {
    MissingExtension,
    UnsupportedExtension(String),
    EmptyCurve,
    /// Drawing, rasterizing or PDF conversion failed
    Render(String),
    Io(std::io::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::MissingExtension => {
                write!(f, "file name needs an extension (.png, .pdf, .svg or .html)")
            }
            ExportError::UnsupportedExtension(ext) => write!(
                f,
                "unsupported format .{ext}; use .png, .pdf, .svg or .html"
            ),
            ExportError::EmptyCurve => write!(f, "nothing to export"),
            ExportError::Render(msg) => write!(f, "failed to render chart: {msg}"),
            ExportError::Io(e) => write!(f, "failed to write chart: {e}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err)
    }
}

fn render_error(err: impl fmt::Display) -> ExportError {
    ExportError::Render(err.to_string())
}

/// Pixel size of exported images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: usize,
    pub height: usize,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
        }
    }
}

/// Build the interactive variance-vs-size line chart.
pub fn build_plot(curve: &VarianceCurve, size: ChartSize) -> Plot {
    let (x, y): (Vec<usize>, Vec<f64>) = curve.points().unzip();

    let trace = Scatter::new(x, y)
        .name("Equal-weight variance")
        .mode(Mode::LinesMarkers);

    let layout = Layout::new()
        .width(size.width)
        .height(size.height)
        .title(Title::from(CHART_TITLE))
        .x_axis(Axis::new().title(Title::from(X_AXIS_TITLE)))
        .y_axis(Axis::new().title(Title::from(Y_AXIS_TITLE)));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

/// Draw the curve as an SVG document of the given size.
pub fn render_svg(curve: &VarianceCurve, size: ChartSize) -> Result<String, ExportError> {
    let dims = (
        u32::try_from(size.width).map_err(render_error)?,
        u32::try_from(size.height).map_err(render_error)?,
    );
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, dims).into_drawing_area();
        draw_chart(&root, curve).map_err(render_error)?;
    }
    Ok(svg)
}

fn draw_chart(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    curve: &VarianceCurve,
) -> Result<(), DrawingAreaErrorKind<std::io::Error>> {
    let points: Vec<(u32, f64)> = curve.points().map(|(k, v)| (k as u32, v)).collect();
    let x_max = points.len() as u32 + 1;
    let y_max = match curve.max() {
        m if m > 0.0 => m * 1.1,
        _ => 1.0,
    };

    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(root)
        .caption(CHART_TITLE, ("sans-serif", 22))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(80)
        .build_cartesian_2d(0u32..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc(X_AXIS_TITLE)
        .y_desc(Y_AXIS_TITLE)
        .x_labels(points.len().min(10) + 1)
        .y_label_formatter(&|v| format!("{v:.2e}"))
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), BLUE.stroke_width(2)))?;
    chart.draw_series(points.iter().map(|&p| Circle::new(p, 3, BLUE.filled())))?;

    root.present()
}

fn png_bytes(svg: &str) -> Result<Vec<u8>, ExportError> {
    use resvg::{tiny_skia, usvg};

    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).map_err(render_error)?;

    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| ExportError::Render("chart has no area".to_string()))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap.encode_png().map_err(render_error)
}

fn pdf_bytes(svg: &str) -> Result<Vec<u8>, ExportError> {
    use svg2pdf::{ConversionOptions, PageOptions, usvg};

    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).map_err(render_error)?;
    svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
        .map_err(render_error)
}

/// Write the curve to `path`, choosing the format from its extension.
///
/// The file is written at `path` exactly as given, whatever the case of its
/// extension.
pub fn export_curve(
    curve: &VarianceCurve,
    path: &Path,
    size: ChartSize,
) -> Result<ExportFormat, ExportError> {
    let format = ExportFormat::from_path(path)?;
    if curve.is_empty() {
        return Err(ExportError::EmptyCurve);
    }

    let bytes = match format {
        ExportFormat::Html => build_plot(curve, size).to_html().into_bytes(),
        ExportFormat::Svg => render_svg(curve, size)?.into_bytes(),
        ExportFormat::Png => png_bytes(&render_svg(curve, size)?)?,
        ExportFormat::Pdf => pdf_bytes(&render_svg(curve, size)?)?,
    };
    atomic_write_bytes(path, &bytes)?;

    tracing::info!(
        path = %path.display(),
        %format,
        bytes = bytes.len(),
        "exported variance chart"
    );
    Ok(format)
}
