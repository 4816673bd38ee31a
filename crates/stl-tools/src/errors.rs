/// Errors raised by the mesh consumers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ToolError {
    #[error("mesh has no triangles")]
    EmptyMesh,

    #[error("unable to parse bounding box {input:?}: expected \"(x,y,z)-(x,y,z)\"")]
    BadBoundingBox { input: String },

    #[error("invalid voxel parameters: {reason}")]
    InvalidVoxelParams { reason: String },

    #[error("voxel grid of {cells} cells exceeds the limit of {limit}")]
    GridTooLarge { cells: u128, limit: u128 },
}
