//! Re-encode an STL file as ASCII or binary.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use stl_codec::{EncodeOptions, Encoding};
use stl_tools::cli::{init_tracing, read_mesh, write_mesh};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Target {
    Ascii,
    Binary,
}

impl From<Target> for Encoding {
    fn from(t: Target) -> Self {
        match t {
            Target::Ascii => Encoding::Ascii,
            Target::Binary => Encoding::Binary,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "stl-convert", about = "Convert an STL file between ASCII and binary")]
struct Args {
    /// Input STL file.
    input: PathBuf,

    /// Output STL file.
    output: PathBuf,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = Target::Binary)]
    to: Target,

    /// Solid name; defaults to the input file stem.
    #[arg(long)]
    name: Option<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mesh = read_mesh(&args.input)?;
    let name = args.name.unwrap_or_else(|| {
        args.input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    let options = EncodeOptions {
        encoding: args.to.into(),
        name,
    };
    write_mesh(&args.output, &mesh, &options)?;
    tracing::info!(output = %args.output.display(), triangles = mesh.len(), "wrote mesh");
    Ok(())
}
