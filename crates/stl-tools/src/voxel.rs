//! Voxel binning of mesh vertices into one subregion of a design-wide lattice.
//!
//! The design bounding box is divided into `divisions` subregions per axis.
//! Each vertex is mapped to the lattice by per-axis linear scaling,
//! `floor((v - min) * dots / extent)`, where `dots = floor(extent * dpi / 25.4)`.
//! Only the selected subregion is materialized; it is written out as one PGM
//! image per Z slice.

use std::io::{self, Write};

use stl_types::{BoundingBox, Mesh, Vec3};
use tracing::{debug, info};

use crate::errors::ToolError;

pub const MM_PER_INCH: f64 = 25.4;

/// Largest subregion grid that will be allocated.
pub const MAX_CELLS: u128 = 1 << 28;

/// Upper bound on the design lattice size along one axis.
const MAX_LATTICE_DOTS: f64 = (1u64 << 53) as f64;

/// Grey level written for a fully occupied voxel.
pub const PGM_MAX: u32 = 255;

/// Inputs of the binner. All lengths are in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelParams {
    /// Bounding box of the whole design.
    pub design: BoundingBox,
    /// Lattice resolution in dots per inch.
    pub dpi: f64,
    /// Number of subregions along X, Y, Z.
    pub divisions: [i64; 3],
    /// Index of the selected subregion along X, Y, Z.
    pub subregion: [i64; 3],
}

impl VoxelParams {
    pub fn validate(&self) -> Result<(), ToolError> {
        let invalid = |reason: String| -> Result<(), ToolError> {
            Err(ToolError::InvalidVoxelParams { reason })
        };
        if self.divisions.iter().any(|&n| n < 1) {
            return invalid(format!(
                "number of divisions in all directions must be > 0, got {:?}",
                self.divisions
            ));
        }
        if self.subregion.iter().any(|&s| s < 0) {
            return invalid(format!(
                "subregion index must be >= 0, got {:?}",
                self.subregion
            ));
        }
        if self
            .subregion
            .iter()
            .zip(self.divisions.iter())
            .any(|(s, n)| s >= n)
        {
            return invalid(format!(
                "subregion index must be < {:?}, got {:?}",
                self.divisions, self.subregion
            ));
        }
        if !(self.dpi >= 1.0 && self.dpi.is_finite()) {
            return invalid(format!("dpi must be finite and >= 1, got {}", self.dpi));
        }
        let size = self.design.size();
        if size.to_array().iter().any(|c| !c.is_finite()) {
            return invalid(format!("design bounding box is not finite: {}", self.design));
        }
        if !(size.x > 0.0 && size.y > 0.0 && size.z > 0.0) {
            return invalid(format!("design bounding box is degenerate: {}", self.design));
        }
        Ok(())
    }

    fn dots_per_mm(&self) -> f64 {
        self.dpi / MM_PER_INCH
    }
}

/// The selected subregion, as a dense grid of intensities in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    params: VoxelParams,
    min: [f64; 3],
    extent: [f64; 3],
    /// Whole-design lattice size per axis.
    design_dots: [i64; 3],
    /// Subregion size in voxels per axis.
    dims: [usize; 3],
    /// Lattice coordinate of the subregion's first voxel.
    offset: [i64; 3],
    cells: Vec<f32>,
}

impl VoxelGrid {
    pub fn new(params: VoxelParams) -> Result<Self, ToolError> {
        params.validate()?;
        let min = to_f64(params.design.min);
        let max = to_f64(params.design.max);
        let extent = [max[0] - min[0], max[1] - min[1], max[2] - min[2]];
        let dpm = params.dots_per_mm();

        let mut design_dots = [0i64; 3];
        let mut voxels = [0f64; 3];
        for axis in 0..3 {
            let dots = (extent[axis] * dpm).floor();
            if dots >= MAX_LATTICE_DOTS {
                return Err(ToolError::InvalidVoxelParams {
                    reason: format!(
                        "lattice along axis {axis} has {dots} dots (extent {} mm at {} dpi)",
                        extent[axis], params.dpi
                    ),
                });
            }
            design_dots[axis] = dots as i64;
            voxels[axis] = (extent[axis] * dpm / params.divisions[axis] as f64).floor();
            if voxels[axis] < 1.0 {
                return Err(ToolError::InvalidVoxelParams {
                    reason: format!(
                        "voxel size rounds to zero along axis {axis} (extent {} mm at {} dpi)",
                        extent[axis], params.dpi
                    ),
                });
            }
        }

        let cells_f = voxels.iter().product::<f64>();
        if cells_f > MAX_CELLS as f64 {
            return Err(ToolError::GridTooLarge {
                cells: cells_f as u128,
                limit: MAX_CELLS,
            });
        }
        let dims = voxels.map(|n| n as usize);
        let cells = dims.iter().product::<usize>();

        let mut offset = [0i64; 3];
        for axis in 0..3 {
            offset[axis] = params.subregion[axis]
                .checked_mul(dims[axis] as i64)
                .ok_or_else(|| ToolError::InvalidVoxelParams {
                    reason: format!("subregion offset overflows along axis {axis}"),
                })?;
        }

        info!(
            design = %params.design,
            dots = ?design_dots,
            "design lattice"
        );
        info!(voxels = ?dims, offset = ?offset, "subregion grid");

        Ok(Self {
            params,
            min,
            extent,
            design_dots,
            dims,
            offset,
            cells: vec![0.0; cells],
        })
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn design_dots(&self) -> [i64; 3] {
        self.design_dots
    }

    /// Size of one subregion in millimetres.
    pub fn subregion_size_mm(&self) -> [f64; 3] {
        let d = self.params.divisions;
        [
            self.extent[0] / d[0] as f64,
            self.extent[1] / d[1] as f64,
            self.extent[2] / d[2] as f64,
        ]
    }

    /// Design-wide lattice coordinate of a point.
    pub fn lattice_index(&self, v: &Vec3) -> [i64; 3] {
        let p = to_f64(*v);
        let mut idx = [0i64; 3];
        for axis in 0..3 {
            let scale = self.design_dots[axis] as f64 / self.extent[axis];
            idx[axis] = ((p[axis] - self.min[axis]) * scale).floor() as i64;
        }
        idx
    }

    /// Local cell of a lattice coordinate, if it falls inside the subregion.
    fn local_cell(&self, lattice: [i64; 3]) -> Option<usize> {
        let mut local = [0usize; 3];
        for axis in 0..3 {
            let l = lattice[axis].saturating_sub(self.offset[axis]);
            if l < 0 || l >= self.dims[axis] as i64 {
                return None;
            }
            local[axis] = l as usize;
        }
        Some(self.cell_index(local[0], local[1], local[2]))
    }

    fn cell_index(&self, x: usize, y: usize, z: usize) -> usize {
        let [nx, ny, _] = self.dims;
        z * nx * ny + y * nx + x
    }

    /// Bin every triangle vertex, marking occupied voxels. Returns how many
    /// vertices landed inside the subregion.
    pub fn bin_mesh(&mut self, mesh: &Mesh) -> usize {
        let mut hits = 0;
        for (i, t) in mesh.iter().enumerate() {
            for v in &t.vertices {
                let lattice = self.lattice_index(v);
                debug!(triangle = i, ?lattice, "vertex lattice index");
                if let Some(cell) = self.local_cell(lattice) {
                    self.cells[cell] = 1.0;
                    hits += 1;
                }
            }
        }
        info!(hits, "binned mesh vertices");
        hits
    }

    /// Intensity of a local voxel.
    pub fn value(&self, x: usize, y: usize, z: usize) -> f32 {
        self.cells[self.cell_index(x, y, z)]
    }

    /// File stem of the PGM for slice `z`: `<prefix><sx>-<sy>-<sz>-<zzz>`.
    pub fn slice_stem(&self, prefix: &str, z: usize) -> String {
        let [sx, sy, sz] = self.params.subregion;
        format!("{prefix}{sx}-{sy}-{sz}-{z:03}")
    }

    /// Write slice `z` as a plain (`P2`) greyscale PGM.
    pub fn write_pgm(&self, z: usize, comment: &str, out: &mut dyn Write) -> io::Result<()> {
        let [nx, ny, _] = self.dims;
        write!(out, "P2\n# {comment}\n{nx} {ny}\n{PGM_MAX}\n")?;
        for y in 0..ny {
            for x in 0..nx {
                writeln!(out, "{}", clamp(f64::from(self.value(x, y, z)), PGM_MAX))?;
            }
        }
        Ok(())
    }
}

/// Map an intensity in `[0, 1]` to `0..=max`, rounding to nearest.
pub fn clamp(v: f64, max: u32) -> u32 {
    if v < 0.0 {
        0
    } else if v >= 1.0 {
        max
    } else {
        (0.5 + v * f64::from(max)).floor() as u32
    }
}

fn to_f64(v: Vec3) -> [f64; 3] {
    [f64::from(v.x), f64::from(v.y), f64::from(v.z)]
}
