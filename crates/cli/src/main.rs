use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lifted_delaunay::api::{
    triangulate_with, validate, BruteForceHull, DelaunayCfg, IncrementalHull, LowerHull,
    PointSetKind, ReplayToken, VALIDATE_EPS,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;
mod provenance;

use provenance::Payload;

#[derive(Parser)]
#[command(name = "lifted-delaunay")]
#[command(about = "Delaunay triangulation of planar point sets via the lifted lower hull")]
struct Cmd {
    /// Optional run tag; propagated to outputs and logs
    #[arg(long, global = true)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Write a reproducible random point set (.csv, .parquet or .json)
    Generate {
        #[arg(long, value_enum, default_value_t = Kind::Uniform)]
        kind: Kind,
        /// Number of points (grid: rounded up to a square)
        #[arg(long, default_value_t = 100)]
        n: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        /// Half-width (uniform) or radius (circle)
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
        /// Grid jitter in lattice units
        #[arg(long, default_value_t = 0.0)]
        jitter: f64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Triangulate a point file and write triangles + boundary as JSON
    Triangulate {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = Backend::Incremental)]
        backend: Backend,
        /// Check empty circumcircles, area and adjacency before writing
        #[arg(long)]
        validate: bool,
        /// Lift raw coordinates instead of the unit-box frame
        #[arg(long)]
        no_normalize: bool,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Uniform,
    Circle,
    Grid,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Backend {
    Incremental,
    Brute,
}

impl Backend {
    fn name(self) -> &'static str {
        match self {
            Backend::Incremental => "incremental",
            Backend::Brute => "brute",
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate {
            kind,
            n,
            seed,
            index,
            scale,
            jitter,
            out,
        } => {
            let kind = point_set(kind, n, scale, jitter);
            generate(kind, ReplayToken::new(seed, index), &out, cmd.tag)
        }
        Action::Triangulate {
            input,
            out,
            backend,
            validate,
            no_normalize,
        } => {
            let cfg = DelaunayCfg {
                normalize: !no_normalize,
                ..DelaunayCfg::default()
            };
            run_triangulate(&input, &out, backend, &cfg, validate, cmd.tag).map(|_| ())
        }
        Action::Report => report(cmd.tag),
    }
}

fn point_set(kind: Kind, n: usize, scale: f64, jitter: f64) -> PointSetKind {
    match kind {
        Kind::Uniform => PointSetKind::Uniform {
            n,
            half_width: scale,
        },
        Kind::Circle => PointSetKind::Circle { n, radius: scale },
        Kind::Grid => {
            let side = (n as f64).sqrt().ceil() as usize;
            PointSetKind::Grid {
                nx: side,
                ny: side,
                jitter,
            }
        }
    }
}

fn generate(kind: PointSetKind, tok: ReplayToken, out: &Path, tag: Option<String>) -> Result<()> {
    tracing::info!(?kind, seed = tok.seed, index = tok.index, out = %out.display(), tag = ?tag, "generate");
    let pts = kind.draw(tok);
    io::write_points(out, &pts)?;
    let params = json!({
        "kind": format!("{kind:?}"),
        "seed": tok.seed,
        "index": tok.index,
        "n_points": pts.len(),
    });
    provenance::write_sidecar(out, Payload::new(params, tag))?;
    Ok(())
}

/// Returns the number of triangles written.
fn run_triangulate(
    input: &Path,
    out: &Path,
    backend: Backend,
    cfg: &DelaunayCfg,
    check: bool,
    tag: Option<String>,
) -> Result<usize> {
    tracing::info!(input = %input.display(), out = %out.display(), backend = backend.name(), tag = ?tag, "triangulate");
    let pts = io::read_points(input)?;
    let hull: &dyn LowerHull = match backend {
        Backend::Incremental => &IncrementalHull,
        Backend::Brute => &BruteForceHull,
    };
    let t = triangulate_with(&pts, cfg, hull)
        .with_context(|| format!("triangulating {} points from {}", pts.len(), input.display()))?;
    tracing::info!(
        points = pts.len(),
        triangles = t.len(),
        boundary = t.hull.len(),
        "triangulated"
    );
    if check {
        let rep = validate(&pts, &t, VALIDATE_EPS).context("triangulation failed validation")?;
        tracing::info!(area = rep.area, max_in_circle = rep.max_in_circle, "validated");
    }
    io::write_triangulation(out, &t)?;
    let params = json!({
        "input": input.to_string_lossy(),
        "backend": backend.name(),
        "normalize": cfg.normalize,
        "validated": check,
        "n_points": t.n_points,
        "n_triangles": t.len(),
    });
    provenance::write_sidecar(out, Payload::new(params, tag))?;
    Ok(t.len())
}

fn report(tag: Option<String>) -> Result<()> {
    let cfg = DelaunayCfg::default();
    let params = json!({
        "eps_plane": cfg.eps_plane,
        "eps_lower": cfg.eps_lower,
        "eps_collinear": cfg.eps_collinear,
        "eps_area": cfg.eps_area,
        "normalize": cfg.normalize,
    });
    let obj = provenance::document(&Payload::new(params, tag), &[]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
