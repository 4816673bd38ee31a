//! Emit Go source embedding STL meshes as goxjs/gl vertex buffers.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stl_tools::cli::{init_tracing, read_mesh};
use stl_tools::codegen::{go_identifiers, GlEmitter, GoEmitter};

#[derive(Parser, Debug)]
#[command(
    name = "stl2gl",
    about = "Emit Go source embedding STL meshes as goxjs/gl vertex buffers"
)]
struct Args {
    /// Go package name of the generated file.
    #[arg(long, default_value = "main")]
    pkg: String,

    /// Input STL files; each becomes a symbol named after its file stem.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let emitter = GlEmitter;
    emitter.write_preamble(&args.pkg, &mut out)?;
    let names = go_identifiers(&args.files);
    for (path, name) in args.files.iter().zip(&names) {
        let mesh = read_mesh(path)?;
        emitter
            .write_mesh(name, &mesh, &mut out)
            .with_context(|| format!("failed to emit {}", path.display()))?;
    }
    out.flush()?;
    Ok(())
}
