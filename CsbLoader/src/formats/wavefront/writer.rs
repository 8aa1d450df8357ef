//! Collision binary to OBJ text
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use std::fmt::Write;

use super::OTHER_VECTOR_SCALE;
use crate::error::Result;
use crate::formats::csb::{CollisionBinary, Vector3, format_label};

/// Render a collision binary as OBJ text.
///
/// All vertices come first, group by group; an empty group contributes the
/// origin and its scaled other vector. Each group then gets an `o` line and
/// its faces, or an `l` line over the synthetic pair when it has no vertices.
///
/// # Errors
///
/// Returns [`crate::Error::GroupIndexOutOfRange`] when a group index cannot be
/// written as a two-digit label.
pub fn to_obj_string(binary: &CollisionBinary) -> Result<String> {
    let mut obj = String::new();
    let mut offsets = Vec::with_capacity(binary.vertex_groups.len());
    let mut total = 0usize;

    for group in &binary.vertex_groups {
        offsets.push(total);

        if group.vertices.is_empty() {
            let other = group.other_vector.unwrap_or_else(|| {
                tracing::warn!("Vertex group {:?} has neither vertices nor an other vector", group.name());
                Vector3::ZERO
            });
            if !group.header.is_deadbeef() {
                tracing::warn!(
                    "Vertex group {:?} is empty; its line element will not import outside DEADBEEF",
                    group.name()
                );
            }
            let _ = writeln!(obj, "v 0 0 0");
            let _ = writeln!(
                obj,
                "v {} {} {}",
                f64::from(other.x) * OTHER_VECTOR_SCALE,
                f64::from(other.y) * OTHER_VECTOR_SCALE,
                f64::from(other.z) * OTHER_VECTOR_SCALE
            );
            total += 2;
        } else {
            if group.tris.is_empty() {
                tracing::warn!(
                    "Vertex group {:?} has vertices but no triangles; its vertices will not import",
                    group.name()
                );
            }
            for v in &group.vertices {
                let _ = writeln!(obj, "v {} {} {}", v.x, v.y, v.z);
            }
            total += group.vertices.len();
        }
    }

    for (group, &offset) in binary.vertex_groups.iter().zip(&offsets) {
        let reserved = binary.is_serializable && group.header.takes_reserved_tag();
        let _ = writeln!(obj, "\no {}", format_label(&group.header, reserved)?);

        // OBJ is 1-indexed
        let base = offset as i64 + 1;
        for tri in &group.tris {
            let [a, b, c] = tri.indices.map(|i| i64::from(i) + base);
            let _ = writeln!(obj, "f {a} {b} {c}");
        }
        if group.vertices.is_empty() {
            let _ = writeln!(obj, "l {} {}", base, base + 1);
        }
    }

    tracing::debug!(
        "Wrote {} vertices in {} groups",
        total,
        binary.vertex_groups.len()
    );
    Ok(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::csb::{BoundingBox, Tri, VertexGroup, VertexGroupHeader};
    use pretty_assertions::assert_eq;

    fn binary(is_serializable: bool) -> CollisionBinary {
        let vertices = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.5, 0.0, 0.0),
            Vector3::new(0.0, 0.0, -2.25),
        ];
        CollisionBinary {
            vertex_groups: vec![
                VertexGroup {
                    header: VertexGroupHeader::new(0, "DEADBEEF", [0; 6], 0, 0),
                    bounding_box: BoundingBox::default(),
                    vertices: Vec::new(),
                    tris: Vec::new(),
                    other_vector: Some(Vector3::new(0.5, 0.0, -1.0)),
                    violation: None,
                },
                VertexGroup {
                    header: VertexGroupHeader::new(1, "Wall", [0xA, 0, 5, 0, 2, 0], 3, 1),
                    bounding_box: BoundingBox::from_vertices(&vertices).unwrap(),
                    tris: vec![Tri::from_corners([0, 2, 1], [vertices[0], vertices[2], vertices[1]])],
                    vertices,
                    other_vector: None,
                    violation: None,
                },
            ],
            other_vectors: Vec::new(),
            is_serializable,
        }
    }

    #[test]
    fn test_obj_layout() {
        let obj = to_obj_string(&binary(true)).unwrap();
        let expected = "\
v 0 0 0
v 50000000000000000000000000000000000000000 0 -100000000000000000000000000000000000000000
v 0 0 0
v 1.5 0 0
v 0 0 -2.25

o 00_[mobj]_DEADBEEF
l 1 2

o 01_Wall [A::5::2:]
f 3 5 4
";
        assert_eq!(obj, expected);
    }

    #[test]
    fn test_unserializable_drops_reserved_tag() {
        let obj = to_obj_string(&binary(false)).unwrap();
        assert!(obj.contains("\no 00_DEADBEEF\n"));
        assert!(!obj.contains("[mobj]"));
    }

    #[test]
    fn test_reserved_tag_only_on_plain_deadbeef() {
        let mut binary = binary(true);
        binary.vertex_groups[0].header.set_metadata([1, 0, 0, 0, 0, 0]);
        let obj = to_obj_string(&binary).unwrap();
        assert!(obj.contains("\no 00_DEADBEEF [1:::::]\n"));
        assert!(!obj.contains("[mobj]"));
    }

    #[test]
    fn test_vertices_without_triangles_are_not_referenced() {
        let mut binary = binary(true);
        binary.vertex_groups[1].tris.clear();
        let obj = to_obj_string(&binary).unwrap();

        // Pool still carries the vertices, but no element uses them
        assert!(obj.contains("v 1.5 0 0\n"));
        assert!(obj.ends_with("\no 01_Wall [A::5::2:]\n"));
    }

    #[test]
    fn test_label_errors_propagate() {
        let mut binary = binary(true);
        binary.vertex_groups[1].header.group_index = 100;
        assert!(to_obj_string(&binary).is_err());
    }
}
