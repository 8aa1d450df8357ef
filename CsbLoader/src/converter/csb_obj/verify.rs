//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! Round-trip fidelity check
//!
//! Decodes a CSB buffer, re-encodes it and compares the part of the file the
//! codec models (group records and trailing vectors) byte for byte. The
//! decoded binary is also sent through OBJ and back to check that the mesh
//! bridge keeps every group's geometry.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::formats::csb::{
    CollisionBinary, CsbReadOptions, Vector3, VertexGroup, Violation, parse_csb_bytes_with_layout,
    serialize_csb,
};
use crate::formats::wavefront;

/// Outcome of [`verify_round_trip`].
#[derive(Debug, Clone, PartialEq)]
pub struct RoundTripReport {
    /// Serializability reported by the decoder
    pub is_serializable: bool,
    /// Length of the compared group section in the original buffer
    pub section_len: usize,
    /// Offset in the original buffer of the first byte that re-encoded
    /// differently, `None` when the section matched
    pub first_difference: Option<usize>,
    /// Violations recorded while decoding, by group name
    pub violations: Vec<(String, Violation)>,
    /// Groups whose geometry changed going through OBJ and back
    pub mesh_mismatches: Vec<String>,
}

impl RoundTripReport {
    /// Whether both the bytes and the mesh survived the round trip.
    #[must_use]
    pub fn is_faithful(&self) -> bool {
        self.first_difference.is_none() && self.mesh_mismatches.is_empty()
    }
}

/// Decode, re-encode and compare a CSB buffer.
///
/// # Errors
/// Returns an error if the buffer cannot be decoded or re-encoded. Byte and
/// mesh differences are reported, not raised.
pub fn verify_round_trip(data: &[u8]) -> Result<RoundTripReport> {
    let options = CsbReadOptions::default();
    let (binary, layout) = parse_csb_bytes_with_layout(data, &options)?;

    let reencoded = serialize_csb(&binary)?;
    let (_, new_layout) = parse_csb_bytes_with_layout(&reencoded, &options)?;

    let original = &data[layout.groups_offset..layout.end_offset];
    let rewritten = &reencoded[new_layout.groups_offset..new_layout.end_offset];
    let first_difference = first_difference(original, rewritten).map(|i| layout.groups_offset + i);

    match first_difference {
        Some(offset) => tracing::info!("Re-encoded bytes differ from offset {:#x}", offset),
        None => tracing::info!("Re-encoded {} bytes identically", original.len()),
    }
    if binary.is_serializable && first_difference.is_some() {
        tracing::warn!("File was reported serializable but did not re-encode identically");
    }

    let report = RoundTripReport {
        is_serializable: binary.is_serializable,
        section_len: original.len(),
        first_difference,
        violations: binary
            .violations()
            .map(|(name, violation)| (name.to_string(), violation.clone()))
            .collect(),
        mesh_mismatches: mesh_mismatches(&binary)?,
    };
    Ok(report)
}

fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    a.iter()
        .zip(b)
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then_some(a.len().min(b.len())))
}

fn mesh_mismatches(binary: &CollisionBinary) -> Result<Vec<String>> {
    let obj = wavefront::to_obj_string(binary)?;
    let imported = match wavefront::parse_obj_str(&obj) {
        Ok(imported) => imported,
        Err(err) => {
            tracing::warn!("Exported OBJ does not import: {}", err);
            return Ok(binary.vertex_groups.iter().map(|g| g.name().to_string()).collect());
        }
    };

    let mut mismatches = Vec::new();
    for (i, group) in binary.vertex_groups.iter().enumerate() {
        let same = imported
            .vertex_groups
            .get(i)
            .is_some_and(|other| same_geometry(group, other));
        if !same {
            tracing::warn!("Vertex group {:?} changed going through OBJ", group.name());
            mismatches.push(group.name().to_string());
        }
    }
    Ok(mismatches)
}

type VertexBits = [u32; 3];

fn bits(v: Vector3) -> VertexBits {
    [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()]
}

/// Triangles as corner positions, so that re-indexing does not matter.
fn tri_corners(group: &VertexGroup) -> Vec<Option<[VertexBits; 3]>> {
    group
        .tris
        .iter()
        .map(|tri| {
            let corner = |i: i32| {
                usize::try_from(i)
                    .ok()
                    .and_then(|i| group.vertices.get(i))
                    .map(|&v| bits(v))
            };
            let [a, b, c] = tri.indices;
            Some([corner(a)?, corner(b)?, corner(c)?])
        })
        .collect()
}

fn same_geometry(original: &VertexGroup, imported: &VertexGroup) -> bool {
    let original_set: BTreeSet<VertexBits> = original.vertices.iter().map(|&v| bits(v)).collect();
    let imported_set: BTreeSet<VertexBits> = imported.vertices.iter().map(|&v| bits(v)).collect();

    original_set == imported_set
        && tri_corners(original) == tri_corners(imported)
        && original.other_vector.map(bits) == imported.other_vector.map(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::csb::{BoundingBox, Tri, VertexGroupHeader};
    use pretty_assertions::assert_eq;

    fn sample() -> CollisionBinary {
        let vertices = vec![
            Vector3::new(-1.0, 0.0, -1.0),
            Vector3::new(1.0, 0.0, -1.0),
            Vector3::new(1.0, 0.0, 1.0),
            Vector3::new(-1.0, 0.0, 1.0),
        ];
        let corners = |[a, b, c]: [i32; 3]| {
            Tri::from_corners([a, b, c], [vertices[a as usize], vertices[b as usize], vertices[c as usize]])
        };
        CollisionBinary {
            vertex_groups: vec![
                VertexGroup {
                    header: VertexGroupHeader::new(0, "DEADBEEF", [0; 6], 0, 0),
                    bounding_box: BoundingBox::from_vertices(&vertices).unwrap(),
                    vertices: Vec::new(),
                    tris: Vec::new(),
                    other_vector: Some(Vector3::new(0.1, 20.0, -0.003)),
                    violation: None,
                },
                VertexGroup {
                    header: VertexGroupHeader::new(1, "Floor", [0x3FC, 0, 5, 1, 0, 0], 4, 2),
                    bounding_box: BoundingBox::from_vertices(&vertices).unwrap(),
                    tris: vec![corners([0, 2, 1]), corners([0, 3, 2])],
                    vertices,
                    other_vector: None,
                    violation: None,
                },
            ],
            other_vectors: Vec::new(),
            is_serializable: true,
        }
    }

    #[test]
    fn test_faithful_file() {
        let data = serialize_csb(&sample()).unwrap();
        let report = verify_round_trip(&data).unwrap();

        assert!(report.is_serializable);
        assert_eq!(report.first_difference, None);
        assert!(report.violations.is_empty());
        assert_eq!(report.mesh_mismatches, Vec::<String>::new());
        assert!(report.is_faithful());
    }

    #[test]
    fn test_violation_is_reported() {
        let mut binary = sample();
        // Stored box that does not match the vertices
        binary.vertex_groups[1].bounding_box.high.y = 3.0;
        let data = serialize_csb(&binary).unwrap();

        let report = verify_round_trip(&data).unwrap();
        assert!(!report.is_serializable);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].0, "Floor");
        // The stored box is carried through unchanged
        assert_eq!(report.first_difference, None);
    }

    #[test]
    fn test_first_difference() {
        assert_eq!(first_difference(b"abcd", b"abcd"), None);
        assert_eq!(first_difference(b"abcd", b"abxd"), Some(2));
        assert_eq!(first_difference(b"abcd", b"ab"), Some(2));
    }
}
