//! Format detection from the first bytes of the input.
//!
//! Only the literal prefix `solid` is inspected. A binary file whose free-form
//! header happens to begin with `solid` is routed to the ASCII decoder and will fail there.

use std::io::Read;

use crate::errors::{DecodeError, Phase};

/// Number of leading bytes inspected by [`Encoding::sniff`].
pub const SNIFF_LEN: usize = 5;

const ASCII_MAGIC: &[u8; SNIFF_LEN] = b"solid";

/// The two STL encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Ascii,
    Binary,
}

impl Encoding {
    /// Classify a prefix. Anything other than a case-sensitive `solid` is binary.
    pub fn sniff(prefix: &[u8]) -> Encoding {
        if prefix.starts_with(ASCII_MAGIC) {
            Encoding::Ascii
        } else {
            Encoding::Binary
        }
    }
}

/// Consume exactly [`SNIFF_LEN`] bytes from `reader` and classify them.
pub(crate) fn read_prefix<R: Read>(reader: &mut R) -> Result<Encoding, DecodeError> {
    let mut prefix = [0u8; SNIFF_LEN];
    reader
        .read_exact(&mut prefix)
        .map_err(|e| DecodeError::from_read(Phase::Sniff, e))?;
    Ok(Encoding::sniff(&prefix))
}
