//! Provenance sidecars: `<stem>.provenance.json` next to every written file,
//! naming the command, engine build, polygon shape and run parameters.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::input::PolygonFile;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    pub name: String,
    pub version: String,
}

impl Engine {
    pub fn current() -> Self {
        Self {
            name: "ringcut".to_owned(),
            version: ringcut::VERSION.to_owned(),
        }
    }
}

/// Size and extent of the polygon an artifact was computed from (or is).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolygonSummary {
    pub points: usize,
    pub holes: usize,
    /// `[min_x, min_y, max_x, max_y]`; absent for an empty polygon.
    pub bbox: Option<[f64; 4]>,
}

impl PolygonSummary {
    pub fn of(poly: &PolygonFile) -> Self {
        let bbox = poly.points.iter().fold(None, |acc: Option<[f64; 4]>, p| {
            Some(match acc {
                None => [p[0], p[1], p[0], p[1]],
                Some(b) => [b[0].min(p[0]), b[1].min(p[1]), b[2].max(p[0]), b[3].max(p[1])],
            })
        });
        Self {
            points: poly.points.len(),
            holes: poly.rings.len().saturating_sub(1),
            bbox,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sidecar {
    pub command: String,
    pub revision: String,
    pub engine: Engine,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub polygon: PolygonSummary,
    pub params: Value,
    #[serde(default)]
    pub stats: Value,
    pub artifact: String,
}

impl Sidecar {
    pub fn new(command: &str, polygon: PolygonSummary, params: Value) -> Self {
        Self {
            command: command.to_owned(),
            revision: revision(),
            engine: Engine::current(),
            input: None,
            polygon,
            params,
            stats: Value::Null,
            artifact: String::new(),
        }
    }

    pub fn with_input(mut self, input: &Path) -> Self {
        self.input = Some(input.to_string_lossy().into_owned());
        self
    }

    pub fn with_stats(mut self, stats: Value) -> Self {
        self.stats = stats;
        self
    }

    /// Write the sidecar for `artifact` and return its path.
    pub fn write(mut self, artifact: &Path) -> Result<PathBuf> {
        self.artifact = artifact.to_string_lossy().into_owned();
        let path = sidecar_path(artifact);
        std::fs::write(&path, serde_json::to_vec_pretty(&self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), command = %self.command, "provenance");
        Ok(path)
    }
}

pub fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// Source revision: `RINGCUT_REV` (build time, then run time), else `git describe`.
pub fn revision() -> String {
    let pinned = option_env!("RINGCUT_REV")
        .map(str::to_owned)
        .into_iter()
        .chain(std::env::var("RINGCUT_REV").ok())
        .find(|r| !r.is_empty());
    pinned
        .or_else(|| {
            let out = Command::new("git")
                .args(["describe", "--always", "--dirty"])
                .output()
                .ok()?;
            out.status
                .success()
                .then(|| String::from_utf8_lossy(&out.stdout).trim().to_owned())
        })
        .unwrap_or_else(|| "unknown".to_owned())
}
