mod input;
mod provenance;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ringcut::prelude::*;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::fmt::SubscriberBuilder;

use input::{load_polygon, load_triangles, PolygonFile, TrianglesFile};
use provenance::{PolygonSummary, Sidecar};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Triangulate polygons with holes and inspect the results")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Triangulate a polygon file (JSON or CSV) and write the indices as JSON
    Run {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Coordinate type the engine runs on; integer types round the input
        #[arg(long, value_enum, default_value_t = Dtype::F64)]
        dtype: Dtype,
        /// Node count above which the Z-order index is used
        #[arg(long)]
        hash_threshold: Option<usize>,
        /// Drop the rest of a cycle instead of force-clipping it
        #[arg(long)]
        no_recover: bool,
        /// Keep single-point holes as interior vertices
        #[arg(long)]
        steiner_points: bool,
    },
    /// Compare triangle area against polygon area
    Check {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        triangles: PathBuf,
    },
    /// Write a sample polygon file
    Sample {
        #[arg(long, value_enum)]
        shape: Shape,
        #[arg(long)]
        out: PathBuf,
        /// Vertex count (regular, radial), spike count (star) or grid size (holes)
        #[arg(long, default_value_t = 12)]
        n: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Dtype {
    F64,
    F32,
    I32,
    I64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Shape {
    Regular,
    Star,
    Holes,
    Radial,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run {
            input,
            out,
            dtype,
            hash_threshold,
            no_recover,
            steiner_points,
        } => {
            let mut cfg = EarcutCfg {
                recover: !no_recover,
                steiner_points,
                ..EarcutCfg::default()
            };
            if let Some(t) = hash_threshold {
                cfg.hash_threshold = t;
            }
            run(&input, &out, dtype, cfg)
        }
        Action::Check { input, triangles } => check(&input, &triangles),
        Action::Sample {
            shape,
            out,
            n,
            seed,
        } => sample(shape, &out, n, seed),
        Action::Report => report(),
    }
}

fn triangulate_as(poly: &PolygonFile, dtype: Dtype, cfg: EarcutCfg) -> Result<Vec<u32>> {
    let rings = &poly.rings;
    let tri = match dtype {
        Dtype::F64 => triangulate_with(&poly.points, rings, cfg)?,
        Dtype::F32 => {
            let pts: Vec<[f32; 2]> = poly.points.iter().map(|p| [p[0] as f32, p[1] as f32]).collect();
            triangulate_with(&pts, rings, cfg)?
        }
        Dtype::I32 => {
            let pts: Vec<[i32; 2]> = poly
                .points
                .iter()
                .map(|p| [p[0].round() as i32, p[1].round() as i32])
                .collect();
            triangulate_with(&pts, rings, cfg)?
        }
        Dtype::I64 => {
            let pts: Vec<[i64; 2]> = poly
                .points
                .iter()
                .map(|p| [p[0].round() as i64, p[1].round() as i64])
                .collect();
            triangulate_with(&pts, rings, cfg)?
        }
    };
    Ok(tri)
}

fn write_json<T: serde::Serialize>(out: &Path, value: &T) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec(value)?)
        .with_context(|| format!("writing {}", out.display()))
}

fn run(input: &Path, out: &Path, dtype: Dtype, cfg: EarcutCfg) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), ?dtype, ?cfg, "run");
    let poly = load_polygon(input)?;

    let started = Instant::now();
    let indices = triangulate_as(&poly, dtype, cfg)
        .with_context(|| format!("triangulating {}", input.display()))?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1e3;
    let deviation = deviation(&poly.points, &poly.rings, &indices)?;
    tracing::info!(
        points = poly.points.len(),
        rings = poly.rings.len(),
        triangles = indices.len() / 3,
        deviation,
        elapsed_ms,
        "triangulated"
    );

    let triangles = indices.len() / 3;
    write_json(out, &TrianglesFile { indices, triangles })?;

    let params = json!({
        "dtype": format!("{dtype:?}").to_lowercase(),
        "hash_threshold": cfg.hash_threshold,
        "recover": cfg.recover,
        "steiner_points": cfg.steiner_points,
    });
    Sidecar::new("run", PolygonSummary::of(&poly), params)
        .with_input(input)
        .with_stats(json!({
            "triangles": triangles,
            "deviation": deviation,
            "elapsed_ms": elapsed_ms,
        }))
        .write(out)?;
    Ok(())
}

fn check(input: &Path, triangles: &Path) -> Result<()> {
    let poly = load_polygon(input)?;
    let tri = load_triangles(triangles)?;
    let deviation = deviation(&poly.points, &poly.rings, &tri.indices)
        .with_context(|| format!("checking {} against {}", triangles.display(), input.display()))?;
    tracing::info!(triangles = tri.indices.len() / 3, deviation, "check");
    let obj = json!({
        "triangles": tri.indices.len() / 3,
        "deviation": deviation,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn sample_polygon(shape: Shape, n: usize, seed: u64) -> Polygon {
    match shape {
        Shape::Regular => regular(n.max(3), 1.0),
        Shape::Star => star(n.max(2), 1.0, 0.4),
        Shape::Holes => square_with_holes(100.0, n, 0.5),
        Shape::Radial => draw_radial(
            RadialCfg {
                vertex_count: VertexCount::Fixed(n),
                ..RadialCfg::default()
            },
            ReplayToken { seed, index: 0 },
        ),
    }
}

fn sample(shape: Shape, out: &Path, n: usize, seed: u64) -> Result<()> {
    let poly = PolygonFile::from(sample_polygon(shape, n, seed));
    let summary = PolygonSummary::of(&poly);
    tracing::info!(?shape, n, seed, points = summary.points, holes = summary.holes, "sample");
    write_json(out, &poly)?;
    let params = json!({
        "shape": format!("{shape:?}").to_lowercase(),
        "n": n,
        "seed": seed,
    });
    Sidecar::new("sample", summary, params).write(out)?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "revision": provenance::revision(),
        "engine": provenance::Engine::current(),
        "defaults": {
            "hash_threshold": EarcutCfg::default().hash_threshold,
            "recover": EarcutCfg::default().recover,
            "steiner_points": EarcutCfg::default().steiner_points,
        },
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
