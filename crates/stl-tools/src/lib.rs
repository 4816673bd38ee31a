//! Consumers of decoded STL meshes and the shared plumbing of the command-line tools.

pub mod cli;
pub mod codegen;
pub mod errors;
pub mod mbb;
pub mod voxel;

pub use errors::ToolError;
