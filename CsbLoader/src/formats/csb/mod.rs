//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! CSB collision mesh format
//!
//! Binary collision meshes used by Paper Mario: The Origami King. The layout
//! is reverse-engineered and drifts between revisions; everything is anchored
//! off the `Collision` string that opens the string table:
//!
//! ```text
//! [unknown prefix]
//! "Collision\0" name\0 name\0 ...     string table, ends with a 16-bit zero
//! [pad to 4]
//! u32 word                             group count in the upper 16 bits
//! [index, ?, defined, ?] * count       group descriptor table
//! vertex group records                 one per defined group
//! [3 * Vector3]                        only when a single group is defined
//! ```

mod document;
mod geometry;
mod heuristics;
mod label;
mod options;
mod reader;
mod vertex_group;
mod writer;

pub use document::{CollisionBinary, Tri, VertexGroup, VertexGroupHeader, Violation};
pub use geometry::{BoundingBox, BoundsCheck, Vector3};
pub use heuristics::{GroupHeaderCheck, looks_like_group_header};
pub use label::{GroupLabel, METADATA_SLOTS, format_label};
pub use options::CsbReadOptions;
pub use reader::{CsbLayout, parse_csb_bytes, parse_csb_bytes_with_layout, parse_csb_bytes_with_options};
pub use vertex_group::{read_vertex_group, write_vertex_group};
pub use writer::serialize_csb;

/// Marker that opens the string table
pub const COLLISION_MARKER: &[u8] = b"Collision";

/// Offset of the string table in files written by the game's tooling.
/// Hand-rebuilt files generally start it elsewhere.
pub const CANONICAL_STRING_TABLE_OFFSET: usize = 0x4E;

/// Name of the implicit group that is present in every file
pub const DEADBEEF_NAME: &str = "DEADBEEF";

/// Prefix marking the implicit group of a serializable file in labels
pub const RESERVED_TAG: &str = "[mobj]_";

/// Expected value of a group header's first field
pub const HEADER_SENTINEL: i32 = 3;

/// Size of a vertex group header on disk
pub const HEADER_SIZE: usize = 0x7C;

/// Size of the null-padded name field in a group header
pub const GROUP_NAME_SIZE: usize = 64;

/// Labels have room for two decimal digits
pub const MAX_GROUP_INDEX: i32 = 99;

/// Descriptor flag value of a group that is present in the file
pub const DEFINED_FLAG: u8 = 1;

/// Number of trailing vectors in single-group files
pub const TRAILING_VECTOR_COUNT: usize = 3;
