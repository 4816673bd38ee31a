use std::fmt;
use std::num::ParseFloatError;

/// Where in the input a read failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The 5-byte format prefix.
    Sniff,
    /// The remaining 75 bytes of the binary header.
    Header,
    /// The binary `u32` triangle count.
    TriangleCount,
    /// A 50-byte binary triangle record (0-based).
    Triangle { index: u32 },
    /// An ASCII line (1-based, the `solid` line is line 1).
    Line { number: usize },
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Sniff => f.write_str("format prefix"),
            Phase::Header => f.write_str("binary header"),
            Phase::TriangleCount => f.write_str("triangle count"),
            Phase::Triangle { index } => write!(f, "triangle #{index}"),
            Phase::Line { number } => write!(f, "line {number}"),
        }
    }
}

/// Which float triple of an ASCII facet a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triple {
    Normal,
    Vertex1,
    Vertex2,
    Vertex3,
}

impl Triple {
    pub const VERTICES: [Triple; 3] = [Triple::Vertex1, Triple::Vertex2, Triple::Vertex3];
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Triple::Normal => "normal",
            Triple::Vertex1 => "vertex 1",
            Triple::Vertex2 => "vertex 2",
            Triple::Vertex3 => "vertex 3",
        })
    }
}

/// Position of a float inside its triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    First,
    Second,
    Third,
}

impl Component {
    pub const ALL: [Component; 3] = [Component::First, Component::Second, Component::Third];
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Component::First => "first float",
            Component::Second => "second float",
            Component::Third => "third float",
        })
    }
}

/// Errors while decoding an STL stream.
///
/// Every variant aborts the whole decode; no partial mesh is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("I/O error reading {phase}: {source}")]
    Io {
        phase: Phase,
        #[source]
        source: std::io::Error,
    },

    #[error("input truncated in {phase}")]
    Truncated { phase: Phase },

    #[error("line {line}: unexpected end of input, expected {expected:?}")]
    UnexpectedEof { line: usize, expected: &'static str },

    #[error("line {line}: expected {expected:?}, got {found:?}")]
    UnexpectedLine {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("line {line}: {triple} is missing its {component}")]
    MissingComponent {
        line: usize,
        triple: Triple,
        component: Component,
    },

    #[error("line {line}: {triple} {component} {token:?}: {source}")]
    InvalidFloat {
        line: usize,
        triple: Triple,
        component: Component,
        token: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("line {line}: not valid UTF-8")]
    InvalidUtf8 { line: usize },

    #[error("triangle count {count} exceeds the limit of {limit}")]
    TooManyTriangles { count: u32, limit: u32 },
}

impl DecodeError {
    /// Map an I/O error from `read_exact`, turning a short read into `Truncated`.
    pub(crate) fn from_read(phase: Phase, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::UnexpectedEof {
            DecodeError::Truncated { phase }
        } else {
            DecodeError::Io { phase, source }
        }
    }
}

/// Errors while encoding a mesh.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("I/O error writing STL: {0}")]
    Io(#[from] std::io::Error),

    #[error("{count} triangles do not fit the binary u32 triangle count")]
    TooManyTriangles { count: usize },

    #[error("solid name {name:?} contains a line break")]
    InvalidName { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_read_becomes_truncated() {
        let eof = std::io::Error::from(std::io::ErrorKind::UnexpectedEof);
        let err = DecodeError::from_read(Phase::Triangle { index: 3 }, eof);
        assert!(matches!(
            err,
            DecodeError::Truncated {
                phase: Phase::Triangle { index: 3 }
            }
        ));
        assert_eq!(err.to_string(), "input truncated in triangle #3");
    }

    #[test]
    fn other_io_errors_are_kept() {
        let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let err = DecodeError::from_read(Phase::Header, denied);
        assert!(matches!(err, DecodeError::Io { phase: Phase::Header, .. }));
    }

    #[test]
    fn float_error_names_triple_and_component() {
        let source = "x".parse::<f32>().unwrap_err();
        let err = DecodeError::InvalidFloat {
            line: 5,
            triple: Triple::Vertex2,
            component: Component::Third,
            token: "x".into(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("line 5: vertex 2 third float \"x\""), "{msg}");
    }
}
