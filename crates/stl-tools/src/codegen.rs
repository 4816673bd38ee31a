//! Go source emitters that embed a mesh as literal data.
//!
//! Each emitter writes a package preamble once, then one block per mesh. The
//! mesh is walked once, in order; face indices in the generated code are
//! derived from triangle positions.

use std::io::{self, Write};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use stl_types::Mesh;

/// A target that turns meshes into Go declarations.
pub trait GoEmitter {
    /// `package` clause and imports.
    fn write_preamble(&self, package: &str, out: &mut dyn Write) -> io::Result<()>;

    /// Declarations and an `init()` for a single mesh bound to `name`.
    fn write_mesh(&self, name: &str, mesh: &Mesh, out: &mut dyn Write) -> io::Result<()>;
}

/// Buffers for `github.com/goxjs/gl`: a flat `[]float32` of vertex positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlEmitter;

impl GoEmitter for GlEmitter {
    fn write_preamble(&self, package: &str, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "package {package}")?;
        writeln!(out)?;
        writeln!(out, "import (")?;
        writeln!(out, "\t\"encoding/binary\"")?;
        writeln!(out)?;
        writeln!(out, "\t\"github.com/goxjs/gl\"")?;
        writeln!(out, "\t\"golang.org/x/mobile/exp/f32\"")?;
        writeln!(out, ")")
    }

    fn write_mesh(&self, name: &str, mesh: &Mesh, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "var {name} gl.Buffer")?;
        writeln!(out, "var {name}NumVerts int")?;
        writeln!(out)?;
        writeln!(out, "func init() {{")?;
        writeln!(out, "\t{name} = gl.CreateBuffer()")?;
        writeln!(out, "\tgl.BindBuffer(gl.ARRAY_BUFFER, {name})")?;
        writeln!(out, "\t{name}NumVerts = {}", mesh.len() * 3)?;
        writeln!(out, "\tvertices := []float32{{")?;
        for t in mesh {
            let [a, b, c] = t.vertices;
            writeln!(
                out,
                "{}, {}, {}, {}, {}, {}, {}, {}, {},",
                a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z
            )?;
        }
        writeln!(out, "\t}}")?;
        writeln!(
            out,
            "\tgl.BufferData(gl.ARRAY_BUFFER, f32.Bytes(binary.LittleEndian, vertices...), gl.STATIC_DRAW)"
        )?;
        writeln!(out, "}}")
    }
}

/// Geometry for `github.com/gmlewis/go-threejs`: vertices plus `Face3` with the facet normal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeEmitter;

impl GoEmitter for ThreeEmitter {
    fn write_preamble(&self, package: &str, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "package {package}")?;
        writeln!(out)?;
        writeln!(out, "import (")?;
        writeln!(out, "\t\"github.com/gmlewis/go-threejs/three\"")?;
        writeln!(out, "\t\"github.com/gopherjs/gopherjs/js\"")?;
        writeln!(out, ")")
    }

    fn write_mesh(&self, name: &str, mesh: &Mesh, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "var {name} *js.Object")?;
        writeln!(out)?;
        writeln!(out, "func init() {{")?;
        writeln!(out, "\tt := three.New()")?;
        writeln!(out, "\t{name} = t.Geometry()")?;
        for (i, t) in mesh.iter().enumerate() {
            let [a, b, c] = t.vertices;
            let n = t.normal;
            writeln!(out, "\t{name}.Get(\"vertices\").Call(\"push\",")?;
            writeln!(out, "\t\tt.Vector3({}, {}, {}),", a.x, a.y, a.z)?;
            writeln!(out, "\t\tt.Vector3({}, {}, {}),", b.x, b.y, b.z)?;
            writeln!(out, "\t\tt.Vector3({}, {}, {}))", c.x, c.y, c.z)?;
            writeln!(
                out,
                "\t{name}.Get(\"faces\").Call(\"push\", t.Face3({}, {}, {}, t.Vector3({}, {}, {})))",
                i * 3,
                i * 3 + 1,
                i * 3 + 2,
                n.x,
                n.y,
                n.z
            )?;
        }
        writeln!(out, "\t{name}.Call(\"computeBoundingSphere\")")?;
        writeln!(out, "}}")
    }
}

const GO_KEYWORDS: [&str; 25] = [
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

/// Derive a Go identifier from a file path: the file stem with every
/// character outside `[A-Za-z0-9_]` replaced by `_`, prefixed with `_` when it
/// would start with a digit or is a Go keyword.
pub fn go_identifier(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut ident: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty()
        || ident.starts_with(|c: char| c.is_ascii_digit())
        || GO_KEYWORDS.contains(&ident.as_str())
    {
        ident.insert(0, '_');
    }
    ident
}

/// Identifiers for a batch of files, one per path in order. A name already
/// taken gets the first free `_2`, `_3`, ... suffix.
pub fn go_identifiers(paths: &[PathBuf]) -> Vec<String> {
    let mut taken = HashSet::new();
    paths
        .iter()
        .map(|path| {
            let base = go_identifier(path);
            let mut ident = base.clone();
            let mut n = 2;
            while !taken.insert(ident.clone()) {
                ident = format!("{base}_{n}");
                n += 1;
            }
            ident
        })
        .collect()
}
