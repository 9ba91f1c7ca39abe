//! Vertex Tools
//!
//! CLI tools for generating and inspecting immersed-boundary `.vertex`
//! files: `gen-cylinders`, `gen-rect-obstacles`, and `plot-vertex`.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing_subscriber::{fmt, EnvFilter};

use vertex_core::LatticeSpacing;
use vertex_io::{eval_expr, spacing_from_input2d};

/// Initialize logging with a default filter.
///
/// Use `RUST_LOG` environment variable to override the default filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vertex_tools=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Lattice spacing sources shared by the generator binaries.
///
/// Exactly one source wins, in precedence order: explicit `--dx` (with
/// `--dy` defaulting to dx), then the domain-length/grid-count quadruple,
/// then `--input2d`, then the tool's built-in default spacing.
#[derive(clap::Args, Debug, Default)]
pub struct SpacingArgs {
    /// Point lattice spacing in x
    #[arg(long)]
    pub dx: Option<f64>,

    /// Point lattice spacing in y (defaults to dx)
    #[arg(long)]
    pub dy: Option<f64>,

    /// Domain length in x (used with --ly/--nx/--ny; dx = lx/nx)
    #[arg(long)]
    pub lx: Option<f64>,

    /// Domain length in y
    #[arg(long)]
    pub ly: Option<f64>,

    /// Grid count in x; supports simple expressions like '64*4*4*4*4'
    #[arg(long)]
    pub nx: Option<String>,

    /// Grid count in y; supports simple expressions like '32*4*4*4*4'
    #[arg(long)]
    pub ny: Option<String>,

    /// Parse dx/dy from an IBAMR-style input2d file (finest level spacing)
    #[arg(long)]
    pub input2d: Option<PathBuf>,
}

/// Resolve the lattice spacing from the argument set.
pub fn resolve_spacing(args: &SpacingArgs, default_dx: f64) -> anyhow::Result<LatticeSpacing> {
    if args.dx.is_some() || args.dy.is_some() {
        let dx = args.dx.unwrap_or(default_dx);
        let dy = args.dy.unwrap_or(dx);
        return LatticeSpacing::new(dx, dy).context("invalid --dx/--dy");
    }

    let quad = [
        args.lx.is_some(),
        args.ly.is_some(),
        args.nx.is_some(),
        args.ny.is_some(),
    ];
    if quad.iter().any(|&b| b) {
        if !quad.iter().all(|&b| b) {
            bail!("if using --lx/--ly/--nx/--ny, you must provide all four");
        }
        let names = HashMap::new();
        let nx = eval_expr(args.nx.as_deref().unwrap(), &names).context("bad --nx expression")?;
        let ny = eval_expr(args.ny.as_deref().unwrap(), &names).context("bad --ny expression")?;
        if nx <= 0.0 || ny <= 0.0 {
            bail!("--nx and --ny must evaluate to positive counts");
        }
        let dx = args.lx.unwrap() / nx;
        let dy = args.ly.unwrap() / ny;
        return LatticeSpacing::new(dx, dy).context("invalid spacing from --lx/--ly/--nx/--ny");
    }

    if let Some(path) = &args.input2d {
        return spacing_from_input2d(path)
            .with_context(|| format!("could not derive spacing from {}", path.display()));
    }

    LatticeSpacing::isotropic(default_dx).context("invalid default spacing")
}
