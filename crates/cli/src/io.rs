//! Point files in and triangulation files out.
//!
//! Formats are picked by extension:
//! - `.csv`: header row with columns `x` and `y` (extra columns ignored).
//! - `.parquet`: same columns.
//! - `.json`: `[[x, y], ...]`.
//!
//! Output is a single JSON document (`TriangulationFile`).

use anyhow::{anyhow, bail, Context, Result};
use lifted_delaunay::{Point2, Triangulation};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Csv,
    Parquet,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet") | Some("pq") => Ok(Self::Parquet),
            Some("json") => Ok(Self::Json),
            _ => bail!(
                "unsupported point file {} (expected .csv, .parquet or .json)",
                path.display()
            ),
        }
    }
}

/// Written by `triangulate`; `triangles` are CCW vertex ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriangulationFile {
    pub n_points: usize,
    pub triangles: Vec<[usize; 3]>,
    pub hull: Vec<usize>,
}

impl From<&Triangulation> for TriangulationFile {
    fn from(t: &Triangulation) -> Self {
        Self {
            n_points: t.n_points,
            triangles: t.triangles.iter().map(|tr| tr.0).collect(),
            hull: t.hull.clone(),
        }
    }
}

pub fn read_points(path: &Path) -> Result<Vec<Point2>> {
    match Format::from_path(path)? {
        Format::Csv => {
            let df = LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(Some(100))
                .finish()
                .and_then(|lf| lf.collect())
                .with_context(|| format!("reading csv {}", path.display()))?;
            points_from_frame(&df).with_context(|| format!("parsing {}", path.display()))
        }
        Format::Parquet => {
            let df = LazyFrame::scan_parquet(path, ScanArgsParquet::default())
                .and_then(|lf| lf.collect())
                .with_context(|| format!("reading parquet {}", path.display()))?;
            points_from_frame(&df).with_context(|| format!("parsing {}", path.display()))
        }
        Format::Json => {
            let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            let xy: Vec<[f64; 2]> = serde_json::from_slice(&raw)
                .with_context(|| format!("parsing {}", path.display()))?;
            Ok(xy.into_iter().map(|[x, y]| Point2::new(x, y)).collect())
        }
    }
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let col = df
        .column(name)
        .with_context(|| format!("missing column `{name}`"))?
        .cast(&DataType::Float64)?;
    col.f64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| anyhow!("null `{name}` in row {row}")))
        .collect()
}

fn points_from_frame(df: &DataFrame) -> Result<Vec<Point2>> {
    let xs = float_column(df, "x")?;
    let ys = float_column(df, "y")?;
    Ok(xs
        .into_iter()
        .zip(ys)
        .map(|(x, y)| Point2::new(x, y))
        .collect())
}

pub fn write_points(path: &Path, pts: &[Point2]) -> Result<()> {
    ensure_parent(path)?;
    let format = Format::from_path(path)?;
    if format == Format::Json {
        let xy: Vec<[f64; 2]> = pts.iter().map(|p| [p.x, p.y]).collect();
        return fs::write(path, serde_json::to_vec(&xy)?)
            .with_context(|| format!("writing {}", path.display()));
    }
    let xs: Vec<f64> = pts.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = pts.iter().map(|p| p.y).collect();
    let mut df = df!("x" => xs, "y" => ys)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    if format == Format::Parquet {
        ParquetWriter::new(&mut file).finish(&mut df)?;
    } else {
        CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
    }
    Ok(())
}

pub fn write_triangulation(path: &Path, t: &Triangulation) -> Result<()> {
    ensure_parent(path)?;
    let doc = TriangulationFile::from(t);
    fs::write(path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating dir {}", parent.display()))?;
        }
    }
    Ok(())
}
