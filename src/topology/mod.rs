//! Topological elements, their pools and the model operators.

pub mod compact;
pub mod construct2;
pub mod construct3;
pub mod delete;
pub mod elements;
pub mod handle;
pub mod model;
pub mod pool;
pub mod radial;
pub mod validate;
pub(crate) mod vertex_index;

pub use handle::{
    DiskUseId, EdgeId, EdgeUseId, FaceId, Handle, LoopUseId, ShellId, VertexId, VertexUseId,
};
pub use model::Model;
