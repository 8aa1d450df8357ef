//! File format handlers
//!
//! - `csb` - binary collision meshes
//! - `wavefront` - the OBJ subset used to edit them

pub mod common;
pub mod csb;
pub mod wavefront;

// Re-export main document types
pub use csb::{CollisionBinary, CsbReadOptions, VertexGroup, parse_csb_bytes, serialize_csb};
pub use wavefront::{parse_obj_str, to_obj_string};
