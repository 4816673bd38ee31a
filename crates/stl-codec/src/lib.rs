//! Reading and writing STL triangle meshes, in both the ASCII and the binary encoding.

pub mod ascii;
pub mod binary;
pub mod decode;
pub mod encode;
pub mod errors;
pub mod options;
pub mod sniff;

pub use decode::{decode, decode_with, read_stl, read_stl_with};
pub use encode::{encode, write_stl};
pub use errors::{Component, DecodeError, EncodeError, Phase, Triple};
pub use options::{DecodeOptions, EncodeOptions};
pub use sniff::{Encoding, SNIFF_LEN};
pub use stl_types::{BoundingBox, Mesh, Triangle, Vec3};
