//! Generate a 2D IBAMR `.vertex` file of static rectangular obstacles
//! from a pair of `.npy` arrays (obstacle centers and side lengths).
//!
//! Usage: `gen-rect-obstacles --centers centers.npy --sizes sizes.npy`

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{debug, error, info};

use vertex_core::{rect_points_iter, total_rect_points, LatticeSpacing};
use vertex_io::{load_npy, rects_from_arrays, write_vertex};
use vertex_tools::init_logging;

#[derive(Parser, Debug)]
#[command(name = "gen-rect-obstacles")]
#[command(about = "Generate a 2D .vertex file of rectangular obstacles from .npy arrays")]
struct Args {
    /// (N, 2) array of obstacle center coordinates
    #[arg(long)]
    centers: PathBuf,

    /// (N,), (N, 1) or (N, 2) array of obstacle side lengths
    #[arg(long)]
    sizes: PathBuf,

    /// Lattice spacing along x
    #[arg(long, default_value_t = 0.03)]
    dx: f64,

    /// Lattice spacing along y (defaults to --dx)
    #[arg(long)]
    dy: Option<f64>,

    /// Output .vertex filename
    #[arg(long, default_value = "static_obstacles.vertex")]
    out: PathBuf,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let centers_arr = load_npy(&args.centers)?;
    let sizes_arr = load_npy(&args.sizes)?;
    debug!(
        centers_shape = ?centers_arr.shape(),
        sizes_shape = ?sizes_arr.shape(),
        "loaded obstacle arrays"
    );

    let rects = rects_from_arrays(&centers_arr, &sizes_arr)?;

    let spacing = LatticeSpacing::new(args.dx, args.dy.unwrap_or(args.dx))?;
    let total = total_rect_points(&rects, spacing);

    let file = File::create(&args.out)?;
    let mut writer = BufWriter::new(file);
    let points = rects
        .iter()
        .flat_map(|rect| rect_points_iter(rect, spacing));
    write_vertex(&mut writer, total, points)?;
    writer.flush()?;

    info!(
        path = %args.out.display(),
        obstacles = rects.len(),
        points = total,
        "wrote vertex file"
    );
    Ok(())
}

fn main() {
    init_logging();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{:#}", e);
        process::exit(1);
    }
}
