use std::io::Write;

use stl_types::{Mesh, Vec3};
use tracing::{debug, instrument};

use crate::binary::{encode_record, HEADER_LEN};
use crate::errors::EncodeError;
use crate::options::EncodeOptions;
use crate::sniff::Encoding;

/// Serialize `mesh` into a new buffer.
pub fn encode(mesh: &Mesh, options: &EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Vec::new();
    write_stl(mesh, &mut buf, options)?;
    Ok(buf)
}

/// Serialize `mesh` to `writer` in the requested encoding.
///
/// Floats are written so that decoding the output reproduces the mesh exactly:
/// bit-for-bit in binary, value-for-value in ASCII.
#[instrument(skip_all, fields(encoding = ?options.encoding, triangles = mesh.len()))]
pub fn write_stl<W: Write>(
    mesh: &Mesh,
    mut writer: W,
    options: &EncodeOptions,
) -> Result<(), EncodeError> {
    if options.name.contains(['\n', '\r']) {
        return Err(EncodeError::InvalidName {
            name: options.name.clone(),
        });
    }
    match options.encoding {
        Encoding::Ascii => write_ascii(mesh, &mut writer, &options.name)?,
        Encoding::Binary => write_binary(mesh, &mut writer, &options.name)?,
    }
    writer.flush()?;
    debug!("encoded STL");
    Ok(())
}

fn write_binary<W: Write>(mesh: &Mesh, writer: &mut W, name: &str) -> Result<(), EncodeError> {
    let count = u32::try_from(mesh.len())
        .map_err(|_| EncodeError::TooManyTriangles { count: mesh.len() })?;

    // Starts with "binary", so the sniffer never mistakes it for ASCII.
    let mut header = [0u8; HEADER_LEN];
    let text = format!("binary STL: {name}");
    let len = text.len().min(HEADER_LEN);
    header[..len].copy_from_slice(&text.as_bytes()[..len]);
    writer.write_all(&header)?;

    writer.write_all(&count.to_le_bytes())?;
    for triangle in mesh {
        writer.write_all(&encode_record(triangle))?;
    }
    Ok(())
}

fn write_ascii<W: Write>(mesh: &Mesh, writer: &mut W, name: &str) -> Result<(), EncodeError> {
    writeln!(writer, "{}", format!("solid {name}").trim_end())?;
    for triangle in mesh {
        writeln!(writer, "  facet normal {}", Floats(&triangle.normal))?;
        writeln!(writer, "    outer loop")?;
        for v in &triangle.vertices {
            writeln!(writer, "      vertex {}", Floats(v))?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "{}", format!("endsolid {name}").trim_end())?;
    Ok(())
}

/// Space-separated components in shortest round-trip decimal form.
struct Floats<'a>(&'a Vec3);

impl std::fmt::Display for Floats<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.0.x, self.0.y, self.0.z)
    }
}
