//! # geomod
//!
//! geomod is an incremental non-manifold boundary-representation (B-rep)
//! modelling kernel for piecewise-linear geometry. A model is built one
//! simplex at a time, line segments in the plane or triangles in space,
//! and the kernel maintains the full adjacency structure as it grows:
//! vertices, edges and faces with their use records, loops, disks and
//! shells, welded together by a tolerance-aware spatial vertex index.
//!
//! ## Features
//! - Planar (segment) and spatial (triangle) models with integral or
//!   double precision vertex storage
//! - Incremental construction that welds coincident endpoints and keeps
//!   shells, loops and radial edge cycles consistent across splits and
//!   joins
//! - Deletion operators that cascade to dependent elements and split or
//!   merge shells as needed
//! - Generational handles that detect staleness instead of aliasing,
//!   plus whole-model compaction
//! - A simplex stream format for serializing models, with graceful
//!   handling of truncated streams
//! - Resource observers for tracking element creation and destruction
//!
//! ## Usage
//! Add `geomod` as a dependency in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! geomod = "0.3"
//! ```
//!
//! Build a model by feeding it simplices:
//!
//! ```
//! use geomod::prelude::*;
//!
//! let mut model = Model::new(ModelKind::Dbl2);
//! model.add_segment(DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0))?;
//! model.add_segment(DVec2::new(1.0, 0.0), DVec2::new(1.0, 1.0))?;
//! assert_eq!(model.shell_count(), 1);
//! assert_eq!(model.edge_count(), 2);
//! # Ok::<(), geomod::ModelError>(())
//! ```

pub mod geometry;
pub mod io;
pub mod model_error;
pub mod observer;
pub mod topology;

pub use model_error::{ElemKind, ModelError};
pub use topology::model::Model;

/// A convenient prelude to import the most-used types:
pub mod prelude {
    pub use crate::geometry::position::{Dim, ModelKind, Position};
    pub use crate::geometry::vec::{DVec2, DVec3};
    pub use crate::geometry::{ShellBounds, TOLERANCE};
    pub use crate::io::{ReadModel, read_model, write_model};
    pub use crate::model_error::ModelError;
    pub use crate::observer::{ElemRef, ResourceEvent};
    pub use crate::topology::handle::{
        DiskUseId, EdgeId, EdgeUseId, FaceId, Handle, LoopUseId, ShellId, VertexId, VertexUseId,
    };
    pub use crate::topology::model::Model;
}
