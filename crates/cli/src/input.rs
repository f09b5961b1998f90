use anyhow::{bail, Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Polygon file layout: points plus exclusive ring-end offsets.
///
/// JSON: `{ "points": [[x, y], ...], "rings": [4, 8] }`.
/// CSV: columns `x, y, ring`, one row per point, rings contiguous.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonFile {
    pub points: Vec<[f64; 2]>,
    pub rings: Vec<i64>,
}

/// Triangulation output: flat indices, three per triangle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrianglesFile {
    pub indices: Vec<u32>,
    #[serde(default)]
    pub triangles: usize,
}

impl From<ringcut::shapes::Polygon> for PolygonFile {
    fn from(p: ringcut::shapes::Polygon) -> Self {
        Self {
            points: p.points,
            rings: p.ring_ends.into_iter().map(i64::from).collect(),
        }
    }
}

pub fn load_polygon(path: &Path) -> Result<PolygonFile> {
    let is_csv = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        load_csv(path)
    } else {
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
    }
}

pub fn load_triangles(path: &Path) -> Result<TrianglesFile> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

fn load_csv(path: &Path) -> Result<PolygonFile> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::debug!(rows = df.height(), cols = df.width(), "input_csv_shape");

    let x = df.column("x")?.cast(&DataType::Float64)?;
    let y = df.column("y")?.cast(&DataType::Float64)?;
    let ring = df.column("ring")?.cast(&DataType::Int64)?;

    let mut file = PolygonFile::default();
    let mut current: Option<i64> = None;
    for (row, ((x, y), r)) in x
        .f64()?
        .into_iter()
        .zip(y.f64()?.into_iter())
        .zip(ring.i64()?.into_iter())
        .enumerate()
    {
        let (Some(x), Some(y), Some(r)) = (x, y, r) else {
            bail!("row {row}: missing x, y or ring");
        };
        if current.is_some_and(|c| c != r) {
            file.rings.push(row as i64);
        }
        current = Some(r);
        file.points.push([x, y]);
    }
    if !file.points.is_empty() {
        file.rings.push(file.points.len() as i64);
    }
    Ok(file)
}
