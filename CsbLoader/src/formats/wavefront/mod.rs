//! Wavefront OBJ bridge for collision meshes
//!
//! Only the subset needed to carry a [`CollisionBinary`] through a mesh
//! editor is supported:
//!
//! ```text
//! v x y z          vertex
//! o NN_Name [...]  vertex group, labelled with index, name and metadata
//! f a b c          triangle, 1-indexed into the vertex pool
//! l a b            other vector of an empty group
//! ```
//!
//! OBJ has no slot for a free-standing vector, so an empty group's other
//! vector is stored as an edge from the origin to the vector scaled by
//! [`OTHER_VECTOR_SCALE`].
//!
//! [`CollisionBinary`]: crate::formats::csb::CollisionBinary

mod reader;
mod writer;

pub use reader::parse_obj_str;
pub use writer::to_obj_string;

/// Scale applied to other vectors so that editors leave the edge alone
pub const OTHER_VECTOR_SCALE: f64 = 1e41;
