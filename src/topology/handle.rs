//! Generational handles for topological elements.
//!
//! Every element lives in a slot arena ([`crate::topology::pool::Pool`])
//! and is named by a handle packing the slot index in the low 32 bits and a
//! non-zero generation counter in the high 32 bits. Freeing a slot retires
//! the generation, so a handle held across a deletion goes stale instead of
//! silently renaming itself to whatever reuses the slot.
//!
//! Handles are niche-optimized: `Option<VertexId>` is the same size as
//! `VertexId`.
//!
//! ```
//! use geomod::topology::handle::{Handle, VertexId};
//!
//! let v = VertexId::compose(7, 1);
//! assert_eq!(v.slot(), 7);
//! assert_eq!(v.generation(), 1);
//! ```

use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::model_error::ElemKind;

/// Common interface of the element handles, used by the pool.
pub trait Handle: Copy + Eq + Ord + std::hash::Hash + fmt::Debug {
    /// Element kind, for error reports.
    const KIND: ElemKind;

    /// Packs a slot and a generation. `generation` must be non-zero.
    fn compose(slot: u32, generation: u32) -> Self;

    fn slot(self) -> u32;

    fn generation(self) -> u32;

    /// The packed representation, for diagnostics.
    fn raw(self) -> u64;
}

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident, $kind:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[repr(transparent)]
        pub struct $name(NonZeroU64);

        impl $name {
            /// Placeholder for links that are wired later in the same
            /// operation. Never stored in a completed model.
            pub(crate) const DANGLING: Self = Self(NonZeroU64::MAX);
        }

        impl Handle for $name {
            const KIND: ElemKind = ElemKind::$kind;

            #[inline]
            fn compose(slot: u32, generation: u32) -> Self {
                debug_assert!(generation != 0);
                let bits = ((generation as u64) << 32) | slot as u64;
                // generation is non-zero, so bits is non-zero
                match NonZeroU64::new(bits) {
                    Some(nz) => Self(nz),
                    None => Self::DANGLING,
                }
            }

            #[inline]
            fn slot(self) -> u32 {
                (self.0.get() & 0xffff_ffff) as u32
            }

            #[inline]
            fn generation(self) -> u32 {
                (self.0.get() >> 32) as u32
            }

            #[inline]
            fn raw(self) -> u64 {
                self.0.get()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if *self == Self::DANGLING {
                    write!(f, concat!(stringify!($name), "(dangling)"))
                } else {
                    write!(
                        f,
                        concat!(stringify!($name), "({}g{})"),
                        self.slot(),
                        self.generation()
                    )
                }
            }
        }

        static_assertions::assert_eq_size!($name, u64);
        static_assertions::assert_eq_size!(Option<$name>, u64);
    };
}

define_handle!(
    /// Handle of a vertex.
    VertexId,
    Vertex
);
define_handle!(
    /// Handle of a vertex-use.
    VertexUseId,
    VertexUse
);
define_handle!(
    /// Handle of a disk-use.
    DiskUseId,
    DiskUse
);
define_handle!(
    /// Handle of an edge.
    EdgeId,
    Edge
);
define_handle!(
    /// Handle of an edge-use (half-edge).
    EdgeUseId,
    EdgeUse
);
define_handle!(
    /// Handle of a face.
    FaceId,
    Face
);
define_handle!(
    /// Handle of a loop-use.
    LoopUseId,
    LoopUse
);
define_handle!(
    /// Handle of a shell.
    ShellId,
    Shell
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_round_trips() {
        let h = EdgeUseId::compose(0xdead_beef, 0x17);
        assert_eq!(h.slot(), 0xdead_beef);
        assert_eq!(h.generation(), 0x17);
    }

    #[test]
    fn debug_shows_slot_and_generation() {
        let h = VertexId::compose(3, 2);
        assert_eq!(format!("{h:?}"), "VertexId(3g2)");
    }

    #[test]
    fn serde_round_trip() {
        let h = FaceId::compose(5, 3);
        let json = serde_json::to_string(&h).unwrap();
        let back: FaceId = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }
}
