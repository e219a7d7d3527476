/// Shape kinds and their precomputed geometry.
pub mod descriptor;
/// Progress-to-geometry mapping.
pub mod mapper;
