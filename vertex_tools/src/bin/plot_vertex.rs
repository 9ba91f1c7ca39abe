//! Render a `.vertex` point file as an SVG scatter plot for a quick
//! visual check of generated geometry.
//!
//! Usage: `plot-vertex cylinder2d.vertex [--out cylinder2d.svg]`

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use vertex_io::{read_vertex_file, VertexRecord};
use vertex_tools::init_logging;

#[derive(Parser, Debug)]
#[command(name = "plot-vertex")]
#[command(about = "Render a .vertex point file as an SVG scatter plot")]
struct Args {
    /// Input .vertex file
    input: PathBuf,

    /// Output .svg filename (defaults to the input with a .svg extension)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Keep every k-th point before sampling
    #[arg(long, default_value_t = 1)]
    stride: usize,

    /// Randomly subsample down to at most this many points
    #[arg(long, default_value_t = 200_000)]
    max_points: usize,

    /// Seed for the subsampling RNG
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Image width in pixels
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 700)]
    height: u32,

    /// Marker radius in pixels
    #[arg(long, default_value_t = 0.6)]
    point_radius: f64,

    /// Marker opacity in [0, 1]
    #[arg(long, default_value_t = 0.6)]
    alpha: f64,

    /// Plot title (defaults to the input filename)
    #[arg(long)]
    title: Option<String>,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let records = read_vertex_file(&args.input)?;
    let stride = args.stride.max(1);
    let mut selected: Vec<&VertexRecord> = records.iter().step_by(stride).collect();
    if selected.is_empty() {
        anyhow::bail!(
            "no points selected from {} (stride {})",
            args.input.display(),
            stride
        );
    }

    if selected.len() > args.max_points {
        let mut rng = StdRng::seed_from_u64(args.seed);
        let keep = rand::seq::index::sample(&mut rng, selected.len(), args.max_points);
        let mut indices: Vec<usize> = keep.into_iter().collect();
        indices.sort_unstable();
        selected = indices.into_iter().map(|i| selected[i]).collect();
    }

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| args.input.with_extension("svg"));
    let title = args.title.clone().unwrap_or_else(|| {
        args.input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    });

    let file = File::create(&out)?;
    let mut writer = BufWriter::new(file);
    render_svg(&mut writer, &selected, args, &title)?;
    writer.flush()?;

    info!(
        path = %out.display(),
        points = selected.len(),
        total = records.len(),
        "wrote scatter plot"
    );
    Ok(())
}

/// Maps data coordinates to pixel coordinates (y axis flipped so that
/// larger y is up) and pads the data bounding box by 2% of the larger
/// span on each side.
struct PlotFrame {
    x_min: f64,
    y_max: f64,
    scale: f64,
    margin: f64,
}

impl PlotFrame {
    fn fit(points: &[&VertexRecord], width: u32, height: u32) -> PlotFrame {
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
        let span = (x_max - x_min).max(y_max - y_min).max(f64::MIN_POSITIVE);
        let pad = 0.02 * span;
        x_min -= pad;
        x_max += pad;
        y_min -= pad;
        y_max += pad;

        let margin = 40.0;
        let avail_w = f64::from(width) - 2.0 * margin;
        let avail_h = f64::from(height) - 2.0 * margin;
        // Uniform scale so the geometry keeps its aspect ratio.
        let scale = (avail_w / (x_max - x_min)).min(avail_h / (y_max - y_min));
        PlotFrame {
            x_min,
            y_max,
            scale,
            margin,
        }
    }

    fn pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let sx = self.margin + (x - self.x_min) * self.scale;
        let sy = self.margin + (self.y_max - y) * self.scale;
        (sx, sy)
    }
}

fn render_svg<W: Write>(
    writer: &mut W,
    points: &[&VertexRecord],
    args: &Args,
    title: &str,
) -> std::io::Result<()> {
    let frame = PlotFrame::fit(points, args.width, args.height);

    writeln!(
        writer,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" \
         viewBox=\"0 0 {} {}\">",
        args.width, args.height, args.width, args.height
    )?;
    writeln!(
        writer,
        "  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>"
    )?;
    writeln!(
        writer,
        "  <text x=\"{}\" y=\"24\" text-anchor=\"middle\" \
         font-family=\"sans-serif\" font-size=\"16\">{} ({} points)</text>",
        args.width / 2,
        xml_escape(title),
        points.len()
    )?;
    writeln!(
        writer,
        "  <g fill=\"#1f77b4\" fill-opacity=\"{}\">",
        args.alpha
    )?;
    for p in points {
        let (sx, sy) = frame.pixel(p.x, p.y);
        writeln!(
            writer,
            "    <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\"/>",
            sx, sy, args.point_radius
        )?;
    }
    writeln!(writer, "  </g>")?;
    writeln!(writer, "</svg>")
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn main() {
    init_logging();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{:#}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(x: f64, y: f64) -> VertexRecord {
        VertexRecord { x, y, z: None }
    }

    #[test]
    fn test_frame_preserves_aspect_and_flips_y() {
        let pts = [record(0.0, 0.0), record(2.0, 1.0)];
        let refs: Vec<&VertexRecord> = pts.iter().collect();
        let frame = PlotFrame::fit(&refs, 1200, 700);

        let (x0, y0) = frame.pixel(0.0, 0.0);
        let (x1, y1) = frame.pixel(2.0, 1.0);
        // Larger y lands higher on the image.
        assert!(y1 < y0);
        // One data unit maps to the same pixel span on both axes.
        let per_unit_x = (x1 - x0) / 2.0;
        let per_unit_y = (y0 - y1) / 1.0;
        assert!((per_unit_x - per_unit_y).abs() < 1e-9);
    }

    #[test]
    fn test_svg_contains_all_points() {
        let pts = [record(0.0, 0.0), record(1.0, 1.0), record(0.5, 0.25)];
        let refs: Vec<&VertexRecord> = pts.iter().collect();
        let args = Args::parse_from(["plot-vertex", "input.vertex"]);
        let mut buf = Vec::new();
        render_svg(&mut buf, &refs, &args, "input.vertex").unwrap();
        let svg = String::from_utf8(buf).unwrap();
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("3 points"));
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("a<b>&c"), "a&lt;b&gt;&amp;c");
    }
}
