//! ASCII STL decoder.
//!
//! ```text
//! solid <name>
//!   facet normal <nx> <ny> <nz>
//!     outer loop
//!       vertex <x> <y> <z>     (three times)
//!     endloop
//!   endfacet
//! endsolid <name>
//! ```
//!
//! Lines are trimmed before matching. Keywords are case-sensitive prefixes.

use std::io::BufRead;

use stl_types::{Mesh, Triangle, Vec3};
use tracing::{debug, instrument};

use crate::errors::{Component, DecodeError, Phase, Triple};

const FACET: &str = "facet normal ";
const OUTER_LOOP: &str = "outer loop";
const VERTEX: &str = "vertex ";
const END_LOOP: &str = "endloop";
const END_FACET: &str = "endfacet";
const END_SOLID: &str = "endsolid";

/// Decode an ASCII STL body. The 5-byte `solid` prefix must already be consumed.
#[instrument(skip_all)]
pub fn read_ascii<R: BufRead>(reader: R) -> Result<Mesh, DecodeError> {
    let mut lines = Lines::new(reader);
    lines.skip_name_line()?;

    let mut mesh = Mesh::new();
    loop {
        let line = lines.number + 1;
        let text = lines.next_line("facet normal or endsolid")?;
        if text.starts_with(END_SOLID) {
            break;
        }
        let rest = text
            .strip_prefix(FACET)
            .ok_or_else(|| DecodeError::UnexpectedLine {
                line,
                expected: FACET,
                found: text.to_string(),
            })?;
        let normal = parse_triple(rest, Triple::Normal, line)?;

        lines.expect(OUTER_LOOP)?;
        let mut vertices = [Vec3::ZERO; 3];
        for (slot, triple) in vertices.iter_mut().zip(Triple::VERTICES) {
            let line = lines.number + 1;
            let rest = lines.expect(VERTEX)?;
            *slot = parse_triple(rest, triple, line)?;
        }
        lines.expect(END_LOOP)?;
        lines.expect(END_FACET)?;

        let [v1, v2, v3] = vertices;
        mesh.push(Triangle::new(normal, v1, v2, v3));
    }

    debug!(triangles = mesh.len(), lines = lines.number, "decoded ASCII STL");
    Ok(mesh)
}

/// Line cursor over the input with 1-based numbering.
struct Lines<R> {
    reader: R,
    number: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            number: 0,
            buf: Vec::new(),
        }
    }

    /// Read raw bytes of the next line, returning how many were read.
    fn fill(&mut self) -> Result<usize, DecodeError> {
        self.buf.clear();
        self.number += 1;
        self.reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| DecodeError::Io {
                phase: Phase::Line {
                    number: self.number,
                },
                source,
            })
    }

    /// Discard the remainder of the `solid <name>` line without inspecting it.
    fn skip_name_line(&mut self) -> Result<(), DecodeError> {
        if self.fill()? == 0 {
            return Err(DecodeError::UnexpectedEof {
                line: self.number,
                expected: "solid name line",
            });
        }
        Ok(())
    }

    fn next_line(&mut self, expected: &'static str) -> Result<&str, DecodeError> {
        if self.fill()? == 0 {
            return Err(DecodeError::UnexpectedEof {
                line: self.number,
                expected,
            });
        }
        let text = std::str::from_utf8(&self.buf)
            .map_err(|_| DecodeError::InvalidUtf8 { line: self.number })?;
        Ok(text.trim())
    }

    /// Read the next line and strip `keyword` from its front.
    fn expect(&mut self, keyword: &'static str) -> Result<&str, DecodeError> {
        let line = self.number + 1;
        let text = self.next_line(keyword)?;
        text.strip_prefix(keyword)
            .ok_or_else(|| DecodeError::UnexpectedLine {
                line,
                expected: keyword,
                found: text.to_string(),
            })
    }
}

/// Parse the first three whitespace-separated floats of `rest`.
fn parse_triple(rest: &str, triple: Triple, line: usize) -> Result<Vec3, DecodeError> {
    let mut tokens = rest.split_whitespace();
    let mut out = [0.0f32; 3];
    for (slot, component) in out.iter_mut().zip(Component::ALL) {
        let token = tokens.next().ok_or(DecodeError::MissingComponent {
            line,
            triple,
            component,
        })?;
        *slot = parse_float(token).map_err(|source| DecodeError::InvalidFloat {
            line,
            triple,
            component,
            token: token.to_string(),
            source,
        })?;
    }
    Ok(Vec3::from_array(out))
}

/// Parse an `f32`, accepting a decimal comma in place of the point.
fn parse_float(token: &str) -> Result<f32, std::num::ParseFloatError> {
    if token.contains(',') {
        token.replace(',', ".").parse()
    } else {
        token.parse()
    }
}
