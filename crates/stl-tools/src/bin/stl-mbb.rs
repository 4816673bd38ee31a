//! Print the minimum bounding box of an STL file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use stl_tools::cli::{init_tracing, read_mesh};
use stl_tools::mbb::{mesh_bounds, MbbReport};

#[derive(Parser, Debug)]
#[command(name = "stl-mbb", about = "Print the minimum bounding box of an STL file")]
struct Args {
    /// Input STL file (ASCII or binary).
    file: PathBuf,

    /// Print `{"min":[..],"max":[..]}` instead of `(x,y,z)-(x,y,z)`.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mesh = read_mesh(&args.file)?;
    let bb = mesh_bounds(&mesh)?;
    if args.json {
        println!("{}", serde_json::to_string(&MbbReport::from(bb))?);
    } else {
        println!("{bb}");
    }
    Ok(())
}
