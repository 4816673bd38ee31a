//! Configuration for decoding and encoding.

use crate::sniff::Encoding;

/// Resource limits applied while decoding.
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    /// Reject binary inputs declaring more triangles than this, before reading any record.
    pub max_triangles: Option<u32>,
    /// Upper bound on the triangles reserved up front from an untrusted binary count.
    /// The mesh still grows past this as records are actually read.
    pub preallocate_limit: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_triangles: None,
            preallocate_limit: 1 << 16,
        }
    }
}

impl DecodeOptions {
    /// Default options with a hard cap on the declared triangle count.
    pub fn with_max_triangles(limit: u32) -> Self {
        Self {
            max_triangles: Some(limit),
            ..Self::default()
        }
    }
}

/// Output settings for [`crate::encode::write_stl`].
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    pub encoding: Encoding,
    /// Written after `solid`/`endsolid` in ASCII, and into the binary header.
    pub name: String,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            encoding: Encoding::Binary,
            name: "mesh".to_string(),
        }
    }
}

impl EncodeOptions {
    pub fn ascii(name: impl Into<String>) -> Self {
        Self {
            encoding: Encoding::Ascii,
            name: name.into(),
        }
    }

    pub fn binary(name: impl Into<String>) -> Self {
        Self {
            encoding: Encoding::Binary,
            name: name.into(),
        }
    }
}
