//! In-memory model of a decoded CSB file
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use thiserror::Error;

use super::geometry::{BoundingBox, Vector3};
use super::{DEADBEEF_NAME, HEADER_SENTINEL};

/// Fixed-layout record at the start of every vertex group.
///
/// Most fields have no known meaning. They are kept as raw integers, named
/// after their byte offset, and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VertexGroupHeader {
    /// Observed as 3 in files written by the game's tooling
    pub field_0x00: i32,
    pub group_index: i32,
    pub field_0x08: i32,
    pub field_0x0c: i32,
    pub field_0x10: i32,
    pub field_0x14: i32,
    /// Up to 63 bytes, null-padded to 64 on disk
    pub group_name: String,
    pub field_0x58: i32,
    pub vertex_amount: i32,
    pub tri_amount: i32,
    pub field_0x64: i32,
    pub field_0x68: i32,
    pub field_0x6c: i32,
    pub field_0x70: i32,
    pub field_0x74: i32,
    pub field_0x78: i32,
}

impl VertexGroupHeader {
    /// Build a header the way the game's tooling fills in fields that are
    /// not carried by labels.
    #[must_use]
    pub fn new(
        group_index: i32,
        group_name: impl Into<String>,
        metadata: [i32; 6],
        vertex_amount: i32,
        tri_amount: i32,
    ) -> Self {
        let mut header = Self {
            field_0x00: HEADER_SENTINEL,
            group_index,
            group_name: group_name.into(),
            field_0x58: i32::from(group_index > 0),
            vertex_amount,
            tri_amount,
            ..Self::default()
        };
        header.set_metadata(metadata);
        header
    }

    /// The six fields surfaced in labels, in label order.
    #[must_use]
    pub fn metadata(&self) -> [i32; 6] {
        [
            self.field_0x08,
            self.field_0x0c,
            self.field_0x10,
            self.field_0x70,
            self.field_0x74,
            self.field_0x78,
        ]
    }

    pub fn set_metadata(&mut self, metadata: [i32; 6]) {
        [
            self.field_0x08,
            self.field_0x0c,
            self.field_0x10,
            self.field_0x70,
            self.field_0x74,
            self.field_0x78,
        ] = metadata;
    }

    #[must_use]
    pub fn is_deadbeef(&self) -> bool {
        self.group_name == DEADBEEF_NAME
    }

    /// Whether the label of this header may carry the reserved tag: the
    /// DEADBEEF group at index 0 with no metadata.
    #[must_use]
    pub fn takes_reserved_tag(&self) -> bool {
        self.is_deadbeef() && self.group_index == 0 && self.metadata() == [0; 6]
    }
}

/// A triangle: three group-local vertex indices and a face normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tri {
    pub indices: [i32; 3],
    pub normal: Vector3,
}

impl Tri {
    /// Size of a triangle record on disk
    pub const SIZE: usize = 3 * 4 + Vector3::SIZE;

    #[must_use]
    pub fn new(indices: [i32; 3], normal: Vector3) -> Self {
        Self { indices, normal }
    }

    /// Build a triangle whose normal is computed from the winding of `corners`.
    #[must_use]
    pub fn from_corners(indices: [i32; 3], corners: [Vector3; 3]) -> Self {
        let [a, b, c] = corners;
        let normal = (b - a).cross(c - a).normalize();
        Self { indices, normal }
    }
}

/// Why a decoded vertex group would not re-encode to identical bytes.
///
/// These are recorded on the group rather than raised, so that edited or
/// slightly malformed files can still be inspected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    #[error("vertex group does not start with three (0, 0, 0) vectors")]
    NonZeroLeadingVectors,

    #[error("vertex group's origin is not zero")]
    NonZeroOrigin,

    #[error("invalid bounding box: should be {expected} when it actually is {stored}")]
    BoundingBoxMismatch {
        stored: BoundingBox,
        expected: BoundingBox,
    },
}

/// One named sub-object of the collision mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexGroup {
    pub header: VertexGroupHeader,
    pub bounding_box: BoundingBox,
    pub vertices: Vec<Vector3>,
    pub tris: Vec<Tri>,
    /// Stored in place of vertex data; only present when `vertices` is empty
    pub other_vector: Option<Vector3>,
    /// First violation found while decoding, `None` when serializable
    pub violation: Option<Violation>,
}

impl VertexGroup {
    #[must_use]
    pub fn is_serializable(&self) -> bool {
        self.violation.is_none()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.header.group_name
    }
}

/// A complete decoded CSB file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollisionBinary {
    pub vertex_groups: Vec<VertexGroup>,
    /// Trailing vectors; only present when the file defines a single group
    pub other_vectors: Vec<Vector3>,
    /// Whether re-encoding is expected to reproduce the original bytes
    pub is_serializable: bool,
}

impl CollisionBinary {
    /// Position of the implicit `DEADBEEF` group, if there is one.
    #[must_use]
    pub fn deadbeef_index(&self) -> Option<usize> {
        self.vertex_groups.iter().position(|g| g.header.is_deadbeef())
    }

    /// Groups with a recorded violation, paired with their names
    pub fn violations(&self) -> impl Iterator<Item = (&str, &Violation)> {
        self.vertex_groups
            .iter()
            .filter_map(|g| g.violation.as_ref().map(|v| (g.name(), v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_slots() {
        let mut header = VertexGroupHeader::new(4, "Floor", [1, 2, 3, 4, 5, 6], 0, 0);
        assert_eq!(header.field_0x08, 1);
        assert_eq!(header.field_0x10, 3);
        assert_eq!(header.field_0x70, 4);
        assert_eq!(header.field_0x78, 6);
        assert_eq!(header.metadata(), [1, 2, 3, 4, 5, 6]);

        header.set_metadata([0; 6]);
        assert_eq!(header.metadata(), [0; 6]);
        assert_eq!(header.field_0x00, HEADER_SENTINEL);
        assert_eq!(header.field_0x58, 1);
    }

    #[test]
    fn test_tri_normal_from_winding() {
        let tri = Tri::from_corners(
            [0, 1, 2],
            [
                Vector3::ZERO,
                Vector3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, 1.0, 0.0),
            ],
        );
        assert_eq!(tri.normal, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_reserved_tag_eligibility() {
        assert!(VertexGroupHeader::new(0, DEADBEEF_NAME, [0; 6], 0, 0).takes_reserved_tag());
        assert!(!VertexGroupHeader::new(3, DEADBEEF_NAME, [0; 6], 0, 0).takes_reserved_tag());
        assert!(!VertexGroupHeader::new(0, DEADBEEF_NAME, [1, 0, 0, 0, 0, 0], 0, 0).takes_reserved_tag());
        assert!(!VertexGroupHeader::new(0, "Floor", [0; 6], 0, 0).takes_reserved_tag());
    }

    #[test]
    fn test_deadbeef_index() {
        let group = |index: i32, name: &str| VertexGroup {
            header: VertexGroupHeader::new(index, name, [0; 6], 0, 0),
            bounding_box: BoundingBox::default(),
            vertices: Vec::new(),
            tris: Vec::new(),
            other_vector: Some(Vector3::ZERO),
            violation: None,
        };
        let mut binary = CollisionBinary {
            vertex_groups: vec![group(1, "Floor"), group(0, DEADBEEF_NAME)],
            other_vectors: Vec::new(),
            is_serializable: true,
        };
        assert_eq!(binary.deadbeef_index(), Some(1));

        binary.vertex_groups.remove(1);
        assert_eq!(binary.deadbeef_index(), None);
    }
}
