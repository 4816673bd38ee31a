//! Binary STL layout.
//!
//! ```text
//! UINT8[80]    header (free-form, discarded)
//! UINT32       triangle count N
//! N times:
//!     REAL32[3]  normal
//!     REAL32[3]  vertex 1
//!     REAL32[3]  vertex 2
//!     REAL32[3]  vertex 3
//!     UINT16     attribute byte count (discarded)
//! ```
//!
//! All multi-byte fields are little-endian.

use std::io::Read;

use stl_types::{Mesh, Triangle};
use tracing::{debug, instrument};

use crate::errors::{DecodeError, Phase};
use crate::options::DecodeOptions;
use crate::sniff::SNIFF_LEN;

/// Full header length, including the sniffed prefix.
pub const HEADER_LEN: usize = 80;

/// Bytes per triangle record: 12 floats plus the 2-byte attribute.
pub const RECORD_LEN: usize = 50;

/// Decode a binary STL body. The first [`SNIFF_LEN`] header bytes must already be consumed.
///
/// Nothing past the last record is read, so bytes following the mesh stay in `reader`.
#[instrument(skip_all)]
pub fn read_binary<R: Read>(
    mut reader: R,
    options: &DecodeOptions,
) -> Result<Mesh, DecodeError> {
    let mut header = [0u8; HEADER_LEN - SNIFF_LEN];
    read_exact(&mut reader, &mut header, Phase::Header)?;

    let mut count = [0u8; 4];
    read_exact(&mut reader, &mut count, Phase::TriangleCount)?;
    let count = u32::from_le_bytes(count);

    if let Some(limit) = options.max_triangles {
        if count > limit {
            return Err(DecodeError::TooManyTriangles { count, limit });
        }
    }

    // The count is untrusted: reserve at most `preallocate_limit` and let the
    // vector grow only with records that actually arrive.
    let reserve = (count as usize).min(options.preallocate_limit);
    let mut mesh = Mesh::with_capacity(reserve);

    let mut record = [0u8; RECORD_LEN];
    for index in 0..count {
        read_exact(&mut reader, &mut record, Phase::Triangle { index })?;
        mesh.push(decode_record(&record));
    }

    debug!(triangles = count, "decoded binary STL");
    Ok(mesh)
}

fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8], phase: Phase) -> Result<(), DecodeError> {
    reader
        .read_exact(buf)
        .map_err(|e| DecodeError::from_read(phase, e))
}

fn decode_record(record: &[u8; RECORD_LEN]) -> Triangle {
    let mut floats = [0.0f32; 12];
    for (i, f) in floats.iter_mut().enumerate() {
        let o = i * 4;
        *f = f32::from_le_bytes([record[o], record[o + 1], record[o + 2], record[o + 3]]);
    }
    Triangle::from_floats(floats)
}

/// Serialize one triangle as a 50-byte record with a zero attribute.
pub(crate) fn encode_record(triangle: &Triangle) -> [u8; RECORD_LEN] {
    let mut record = [0u8; RECORD_LEN];
    for (i, f) in triangle.to_floats().iter().enumerate() {
        record[i * 4..i * 4 + 4].copy_from_slice(&f.to_le_bytes());
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use stl_types::Vec3;

    fn body(count: u32, records: &[[u8; RECORD_LEN]]) -> Vec<u8> {
        let mut buf = vec![0u8; HEADER_LEN - SNIFF_LEN];
        buf.extend_from_slice(&count.to_le_bytes());
        for r in records {
            buf.extend_from_slice(r);
        }
        buf
    }

    fn sample() -> Triangle {
        Triangle::new(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn record_layout() {
        let record = encode_record(&sample());
        // nz sits at bytes 8..12, v2x at bytes 24..28.
        assert_eq!(f32::from_le_bytes([record[8], record[9], record[10], record[11]]), 1.0);
        assert_eq!(f32::from_le_bytes([record[24], record[25], record[26], record[27]]), 1.0);
        assert_eq!(&record[48..], &[0, 0]);
        assert_eq!(decode_record(&record), sample());
    }

    #[test]
    fn attribute_bytes_are_discarded() {
        let mut record = encode_record(&sample());
        record[48] = 0xab;
        record[49] = 0xcd;
        let mesh = read_binary(&body(1, &[record])[..], &DecodeOptions::default()).unwrap();
        assert_eq!(mesh.triangles, vec![sample()]);
    }

    #[test]
    fn truncated_in_header() {
        let err = read_binary(&[0u8; 10][..], &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, DecodeError::Truncated { phase: Phase::Header }));
    }

    #[test]
    fn truncated_in_count() {
        let err = read_binary(&[0u8; 77][..], &DecodeOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Truncated {
                phase: Phase::TriangleCount
            }
        ));
    }

    #[test]
    fn truncated_in_padding_reports_index() {
        let record = encode_record(&sample());
        let mut buf = body(2, &[record, record]);
        buf.pop(); // second record loses one attribute byte
        let err = read_binary(&buf[..], &DecodeOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Truncated {
                phase: Phase::Triangle { index: 1 }
            }
        ));
    }

    #[test]
    fn count_limit_is_enforced_before_reading() {
        let buf = body(1_000, &[]);
        let err = read_binary(&buf[..], &DecodeOptions::with_max_triangles(10)).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TooManyTriangles {
                count: 1_000,
                limit: 10
            }
        ));
    }

    #[test]
    fn huge_count_does_not_preallocate() {
        let buf = body(u32::MAX, &[]);
        let err = read_binary(&buf[..], &DecodeOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Truncated {
                phase: Phase::Triangle { index: 0 }
            }
        ));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut buf = body(1, &[encode_record(&sample())]);
        buf.extend_from_slice(b"extra");
        let mesh = read_binary(&buf[..], &DecodeOptions::default()).unwrap();
        assert_eq!(mesh.len(), 1);
    }

    #[test]
    fn bytes_after_last_record_are_left_unread() {
        let mut buf = body(1, &[encode_record(&sample())]);
        buf.extend_from_slice(b"NEXT");
        let mut src = &buf[..];
        let mesh = read_binary(&mut src, &DecodeOptions::default()).unwrap();
        assert_eq!(mesh.len(), 1);
        assert_eq!(src, b"NEXT");
    }

    #[test]
    fn empty_mesh_leaves_following_stream_intact() {
        let mut buf = body(0, &[]);
        buf.extend_from_slice(b"NEXT");
        let mut src = &buf[..];
        assert!(read_binary(&mut src, &DecodeOptions::default()).unwrap().is_empty());
        assert_eq!(src, b"NEXT");
    }
}
