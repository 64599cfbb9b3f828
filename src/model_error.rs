//! Error types for geometric model operations.
//!
//! All fallible operations in this crate return [`ModelError`]. The enum is
//! deliberately small: most kernel operations cannot fail once their inputs
//! have been validated, so the variants cover handle staleness, dimension
//! mismatches, the acknowledged unsupported cases and the model stream
//! decoder.

use thiserror::Error;

use crate::geometry::position::Dim;

/// The kind of a topological element, used in error reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElemKind {
    Vertex,
    VertexUse,
    DiskUse,
    Edge,
    EdgeUse,
    Face,
    LoopUse,
    Shell,
}

impl std::fmt::Display for ElemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ElemKind::Vertex => "vertex",
            ElemKind::VertexUse => "vertex-use",
            ElemKind::DiskUse => "disk-use",
            ElemKind::Edge => "edge",
            ElemKind::EdgeUse => "edge-use",
            ElemKind::Face => "face",
            ElemKind::LoopUse => "loop-use",
            ElemKind::Shell => "shell",
        };
        f.write_str(s)
    }
}

/// Error type for all model operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A handle refers to an element that has been freed (or never existed).
    #[error("stale {kind} handle {raw:#x}")]
    StaleHandle { kind: ElemKind, raw: u64 },

    /// A simplex of the wrong dimension was offered to the model.
    #[error("model is {found:?}-dimensional, operation needs {expected:?}")]
    WrongDimension { expected: Dim, found: Dim },

    /// Triangle insertion where all three edges already exist but do not lie
    /// on a common loop. The incremental kernel has no operator for this
    /// configuration.
    #[error("triangle with three existing edges not on a common loop")]
    UnsupportedTriangle,

    /// Vertex deletion is only implemented for planar models.
    #[error("vertex deletion is not implemented for 3D models")]
    VertexDeleteNotPlanar,

    /// A structural invariant does not hold.
    #[error("model invariant violated: {0}")]
    CorruptModel(String),

    /// The model stream carries an unknown model-kind tag.
    #[error("unknown model kind tag {0:#x} in model stream")]
    UnknownModelKind(u8),

    /// The model stream carries an unknown encoding-method byte.
    #[error("unknown model stream encoding {0:#x}")]
    UnknownEncoding(u8),

    /// A simplex record indexes a vertex that was never read.
    #[error("simplex vertex index {index} out of range (model has {count} vertices)")]
    VertexIndexOutOfRange { index: u32, count: u32 },

    /// The model stream ended before the header and vertex table were read.
    #[error("model stream truncated")]
    Truncated,
}
