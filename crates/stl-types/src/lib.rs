pub mod bbox;
pub mod mesh;
pub mod vector;

pub use bbox::*;
pub use mesh::*;
pub use vector::*;
