//! # csbloader
//!
//! A pure-Rust library for the collision meshes (`.csb`) of Paper Mario: The
//! Origami King.
//!
//! ## Supported Formats
//!
//! - **CSB** - Binary collision meshes, decoded and re-encoded byte for byte
//! - **OBJ** - Wavefront text meshes with labelled vertex groups, for editing
//!
//! ## Quick Start
//!
//! ### Converting a Collision Mesh
//!
//! ```no_run
//! use csbloader::converter::{csb_to_obj, obj_to_csb};
//!
//! let data = std::fs::read("field.csb")?;
//! let obj = csb_to_obj(&data)?;
//! let rebuilt = obj_to_csb(&obj)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Checking Fidelity
//!
//! ```no_run
//! use csbloader::converter::verify_round_trip;
//!
//! let data = std::fs::read("field.csb")?;
//! let report = verify_round_trip(&data)?;
//! if let Some(offset) = report.first_difference {
//!     println!("re-encoded bytes differ at {offset:#x}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Using the Prelude
//!
//! ```
//! use csbloader::prelude::*;
//!
//! // Now you have access to:
//! // - CollisionBinary, VertexGroup, VertexGroupHeader, Tri, Vector3
//! // - parse_csb_bytes, serialize_csb, to_obj_string, parse_obj_str
//! // - Error, Result, and more
//! ```

pub mod converter;
pub mod error;
pub mod formats;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::csb::{
        BoundingBox, CollisionBinary, CsbReadOptions, Tri, Vector3, VertexGroup, VertexGroupHeader,
        Violation, parse_csb_bytes, parse_csb_bytes_with_options, serialize_csb,
    };
    pub use crate::formats::wavefront::{parse_obj_str, to_obj_string};

    pub use crate::converter;
    pub use crate::converter::{RoundTripReport, verify_round_trip};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
