//! Bin an STL file's vertices into one subregion of a voxel lattice and write
//! each Z slice as a PGM image.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stl_tools::cli::{init_tracing, read_mesh};
use stl_tools::mbb::{mesh_bounds, parse_mbb};
use stl_tools::voxel::{VoxelGrid, VoxelParams};
use stl_types::BoundingBox;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "stl2voxels", about = "Convert an STL file to voxel slices")]
struct Args {
    /// Design bounding box `(minx,miny,minz)-(maxx,maxy,maxz)` in mm, as printed
    /// by `stl-mbb`. Defaults to the bounds of the input mesh.
    #[arg(long, value_parser = parse_mbb)]
    mbb: Option<BoundingBox>,

    /// Lattice resolution in dots per inch.
    #[arg(long, default_value_t = 600.0)]
    dpi: f64,

    /// Number of subregions along X.
    #[arg(long, default_value_t = 10)]
    ndx: i64,

    /// Number of subregions along Y.
    #[arg(long, default_value_t = 10)]
    ndy: i64,

    /// Number of subregions along Z.
    #[arg(long, default_value_t = 10)]
    ndz: i64,

    /// Subregion index along X.
    #[arg(short, default_value_t = 0)]
    x: i64,

    /// Subregion index along Y.
    #[arg(short, default_value_t = 0)]
    y: i64,

    /// Subregion index along Z.
    #[arg(short, default_value_t = 0)]
    z: i64,

    /// Prefix for the generated PGM files.
    #[arg(long, default_value = "out-")]
    out_prefix: String,

    /// Input STL file.
    file: PathBuf,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mesh = read_mesh(&args.file)?;
    let design = match args.mbb {
        Some(bb) => bb,
        None => mesh_bounds(&mesh)?,
    };
    let mut grid = VoxelGrid::new(VoxelParams {
        design,
        dpi: args.dpi,
        divisions: [args.ndx, args.ndy, args.ndz],
        subregion: [args.x, args.y, args.z],
    })?;
    let hits = grid.bin_mesh(&mesh);
    info!(hits, "vertices inside subregion");

    let [_, _, nz] = grid.dims();
    for z in 0..nz {
        let stem = grid.slice_stem(&args.out_prefix, z);
        let pgm = format!("{stem}.pgm");
        let file = File::create(&pgm).with_context(|| format!("failed to create {pgm}"))?;
        let mut out = BufWriter::new(file);
        grid.write_pgm(z, &pgm, &mut out)
            .and_then(|()| out.flush())
            .with_context(|| format!("failed to write {pgm}"))?;
        println!("autotrace -input-format PGM -output-file {stem}.svg {pgm}");
    }
    Ok(())
}
