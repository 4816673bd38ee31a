//! Shared setup for the binaries: logging and file lifecycle around the codec.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use stl_codec::{read_stl, write_stl, EncodeOptions, Mesh};
use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Open and decode an STL file.
pub fn read_mesh(path: &Path) -> Result<Mesh> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mesh = read_stl(BufReader::new(file))
        .with_context(|| format!("failed to read STL {}", path.display()))?;
    tracing::info!(path = %path.display(), triangles = mesh.len(), "loaded mesh");
    Ok(mesh)
}

/// Encode `mesh` into a newly created file.
pub fn write_mesh(path: &Path, mesh: &Mesh, options: &EncodeOptions) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_stl(mesh, BufWriter::new(file), options)
        .with_context(|| format!("failed to write STL {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stl_codec::{Triangle, Vec3};

    #[test]
    fn write_then_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.stl");
        let mesh: Mesh = vec![Triangle::new(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )]
        .into();

        write_mesh(&path, &mesh, &EncodeOptions::ascii("tri")).unwrap();
        assert_eq!(read_mesh(&path).unwrap(), mesh);
    }

    #[test]
    fn missing_file_names_path() {
        let err = read_mesh(Path::new("definitely_missing_12345.stl")).unwrap_err();
        assert!(format!("{err:#}").contains("definitely_missing_12345.stl"));
    }

    #[test]
    fn decode_error_is_wrapped_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.stl");
        std::fs::write(&path, b"abc").unwrap();
        let err = read_mesh(&path).unwrap_err();
        assert!(err.to_string().contains("short.stl"));
        assert!(err.downcast_ref::<stl_codec::DecodeError>().is_some());
    }
}
