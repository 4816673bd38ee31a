//! Entry points that sniff the encoding and run the matching decoder.

use std::io::BufRead;

use stl_types::Mesh;
use tracing::{debug, instrument, warn};

use crate::ascii::read_ascii;
use crate::binary::read_binary;
use crate::errors::DecodeError;
use crate::options::DecodeOptions;
use crate::sniff::{read_prefix, Encoding};

/// Decode an STL stream positioned at its first byte, with default options.
pub fn read_stl<R: BufRead>(reader: R) -> Result<Mesh, DecodeError> {
    read_stl_with(reader, &DecodeOptions::default())
}

/// Sniff the encoding from the first five bytes, then run the matching decoder.
///
/// Any error aborts the decode; a partially built mesh is never returned.
#[instrument(skip_all)]
pub fn read_stl_with<R: BufRead>(
    mut reader: R,
    options: &DecodeOptions,
) -> Result<Mesh, DecodeError> {
    let encoding = read_prefix(&mut reader)?;
    debug!(?encoding, "sniffed STL encoding");

    match encoding {
        Encoding::Ascii => read_ascii(reader).inspect_err(|e| {
            if matches!(e, DecodeError::InvalidUtf8 { .. }) {
                warn!(
                    "input starts with \"solid\" but is not ASCII text; \
                     it may be a binary STL with a misleading header"
                );
            }
        }),
        Encoding::Binary => read_binary(reader, options),
    }
}

/// Decode an in-memory STL file.
pub fn decode(bytes: &[u8]) -> Result<Mesh, DecodeError> {
    read_stl(bytes)
}

/// Decode an in-memory STL file with explicit limits.
pub fn decode_with(bytes: &[u8], options: &DecodeOptions) -> Result<Mesh, DecodeError> {
    read_stl_with(bytes, options)
}
