//! Minimum bounding box: computing it from a mesh, printing and parsing it.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use stl_types::{BoundingBox, Mesh, Vec3};

use crate::errors::ToolError;

/// Bounds of every vertex in `mesh`.
pub fn mesh_bounds(mesh: &Mesh) -> Result<BoundingBox, ToolError> {
    mesh.bounding_box().ok_or(ToolError::EmptyMesh)
}

/// JSON shape printed by `stl-mbb --json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MbbReport {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl From<BoundingBox> for MbbReport {
    fn from(bb: BoundingBox) -> Self {
        Self {
            min: bb.min.to_array(),
            max: bb.max.to_array(),
        }
    }
}

fn mbb_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*\(([^,]+),([^,]+),([^,]+)\)\s*-\s*\(([^,]+),([^,]+),([^,]+)\)\s*$")
            .expect("bounding box pattern is valid")
    })
}

/// Parse the `(minx,miny,minz)-(maxx,maxy,maxz)` form printed by `stl-mbb`.
pub fn parse_mbb(input: &str) -> Result<BoundingBox, ToolError> {
    let bad = || ToolError::BadBoundingBox {
        input: input.to_string(),
    };
    let caps = mbb_regex().captures(input).ok_or_else(bad)?;
    let mut values = [0.0f32; 6];
    for (i, v) in values.iter_mut().enumerate() {
        *v = caps[i + 1].trim().parse().map_err(|_| bad())?;
    }
    Ok(BoundingBox::new(
        Vec3::new(values[0], values[1], values[2]),
        Vec3::new(values[3], values[4], values[5]),
    ))
}
