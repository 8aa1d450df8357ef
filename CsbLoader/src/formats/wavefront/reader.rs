//! OBJ text to collision binary
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use std::collections::{BTreeSet, HashMap};

use super::OTHER_VECTOR_SCALE;
use crate::error::{Error, Result};
use crate::formats::csb::{
    BoundingBox, CollisionBinary, DEADBEEF_NAME, GroupLabel, METADATA_SLOTS, RESERVED_TAG,
    TRAILING_VECTOR_COUNT, Tri, Vector3, VertexGroup,
};

/// A pool vertex, kept both as the `f32` stored in CSB files and as `f64`
/// for decoding scaled other vectors.
#[derive(Debug, Clone, Copy)]
struct PoolVertex {
    single: Vector3,
    double: [f64; 3],
}

/// One `o` block while it is being read
struct ObjectBlock {
    label: GroupLabel,
    text: String,
    /// 0-based pool indices, three per face
    faces: Vec<[usize; 3]>,
    line: Option<[usize; 2]>,
}

impl ObjectBlock {
    fn is_deadbeef(&self) -> bool {
        self.label.name == DEADBEEF_NAME
    }

    /// Exactly `00_[mobj]_DEADBEEF`, which marks the source as serializable
    fn is_reserved_deadbeef(&self) -> bool {
        self.label.reserved
            && self.is_deadbeef()
            && self.label.index == 0
            && self.label.metadata == [0; METADATA_SLOTS]
    }
}

/// Parse OBJ text into a collision binary.
///
/// Vertices are collected first, so faces may reference vertices defined
/// further down. Each group keeps the vertices its faces reference, in
/// ascending pool order, and recomputes normals and bounding boxes. The
/// DEADBEEF group's box spans the whole pool minus the endpoints of line
/// elements.
///
/// # Errors
///
/// Returns the first structural problem found, with its 1-based line number.
pub fn parse_obj_str(text: &str) -> Result<CollisionBinary> {
    let pool = collect_vertices(text)?;
    let objects = collect_objects(text, pool.len())?;

    let excluded: BTreeSet<usize> = objects.iter().filter_map(|o| o.line).flatten().collect();
    let pool_box = {
        let kept: Vec<Vector3> = pool
            .iter()
            .enumerate()
            .filter(|(i, _)| !excluded.contains(i))
            .map(|(_, v)| v.single)
            .collect();
        BoundingBox::from_vertices(&kept).unwrap_or_default()
    };

    let is_serializable = objects.iter().any(ObjectBlock::is_reserved_deadbeef);
    let vertex_groups: Vec<VertexGroup> = objects
        .iter()
        .map(|object| build_group(object, &pool, pool_box))
        .collect();

    // Single-group files carry trailing vectors the mesh cannot express
    let other_vectors = if vertex_groups.len() == 1 {
        vec![Vector3::ZERO; TRAILING_VECTOR_COUNT]
    } else {
        Vec::new()
    };

    tracing::debug!(
        "Read {} vertices into {} groups (serializable: {})",
        pool.len(),
        vertex_groups.len(),
        is_serializable
    );

    Ok(CollisionBinary {
        vertex_groups,
        other_vectors,
        is_serializable,
    })
}

fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().map(|(i, line)| (i + 1, line.trim()))
}

fn collect_vertices(text: &str) -> Result<Vec<PoolVertex>> {
    let mut pool = Vec::new();
    for (line_no, line) in numbered_lines(text) {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("v") {
            continue;
        }
        let invalid = || Error::InvalidVector {
            line: line_no,
            literal: line.to_string(),
        };

        let coords: Vec<&str> = tokens.take(3).collect();
        if coords.len() != 3 {
            return Err(invalid());
        }
        let mut single = [0f32; 3];
        let mut double = [0f64; 3];
        for (i, token) in coords.iter().enumerate() {
            single[i] = token.parse::<f32>().map_err(|_| invalid())?;
            double[i] = token.parse::<f64>().map_err(|_| invalid())?;
        }

        pool.push(PoolVertex {
            single: Vector3::new(single[0], single[1], single[2]),
            double,
        });
    }
    Ok(pool)
}

/// Turn a 1-indexed reference (`7`, `7/2`, `7//3`) into a 0-based pool index.
fn resolve_reference(token: &str, line: usize, pool_size: usize) -> Result<usize> {
    let position = token.split('/').next().unwrap_or(token);
    match position.parse::<usize>() {
        Ok(index) if (1..=pool_size).contains(&index) => Ok(index - 1),
        _ => Err(Error::VertexOutOfRange {
            line,
            token: token.to_string(),
            pool_size,
        }),
    }
}

fn resolve_references<const N: usize>(
    tokens: &[&str],
    element: &'static str,
    line: usize,
    pool_size: usize,
) -> Result<[usize; N]> {
    if tokens.len() != N {
        return Err(Error::WrongReferenceCount {
            line,
            element,
            expected: N,
            found: tokens.len(),
        });
    }
    let mut indices = [0usize; N];
    for (slot, token) in indices.iter_mut().zip(tokens) {
        *slot = resolve_reference(token, line, pool_size)?;
    }
    Ok(indices)
}

fn collect_objects(text: &str, pool_size: usize) -> Result<Vec<ObjectBlock>> {
    let mut objects: Vec<ObjectBlock> = Vec::new();

    for (line_no, line) in numbered_lines(text) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match keyword {
            "v" => {}
            "o" => {
                let object = ObjectBlock {
                    label: GroupLabel::parse(rest, line_no)?,
                    text: rest.to_string(),
                    faces: Vec::new(),
                    line: None,
                };
                if object.label.reserved && !object.is_reserved_deadbeef() {
                    tracing::warn!(
                        "Line {}: reserved tag on {:?} is ignored; only 00_{}{} carries it",
                        line_no,
                        object.text,
                        RESERVED_TAG,
                        DEADBEEF_NAME
                    );
                }
                objects.push(object);
            }
            "f" | "l" => {
                let object = objects
                    .last_mut()
                    .ok_or(Error::GeometryOutsideObject { line: line_no })?;
                let tokens: Vec<&str> = rest.split_whitespace().collect();

                if keyword == "f" {
                    object
                        .faces
                        .push(resolve_references::<3>(&tokens, "f", line_no, pool_size)?);
                    continue;
                }

                if !object.is_deadbeef() {
                    return Err(Error::MisplacedLineElement {
                        line: line_no,
                        object: object.text.clone(),
                    });
                }
                if object.line.is_some() {
                    return Err(Error::DuplicateLineElement {
                        line: line_no,
                        object: object.text.clone(),
                    });
                }
                object.line = Some(resolve_references::<2>(&tokens, "l", line_no, pool_size)?);
            }
            other => tracing::trace!("Line {}: ignoring {:?} directive", line_no, other),
        }
    }

    Ok(objects)
}

fn build_group(object: &ObjectBlock, pool: &[PoolVertex], pool_box: BoundingBox) -> VertexGroup {
    let referenced: BTreeSet<usize> = object.faces.iter().flatten().copied().collect();
    let local: HashMap<usize, i32> = referenced
        .iter()
        .enumerate()
        .map(|(local, &global)| (global, local as i32))
        .collect();
    let vertices: Vec<Vector3> = referenced.iter().map(|&i| pool[i].single).collect();

    let tris: Vec<Tri> = object
        .faces
        .iter()
        .map(|face| {
            let indices = face.map(|global| local[&global]);
            Tri::from_corners(indices, face.map(|global| pool[global].single))
        })
        .collect();

    let other_vector = object.line.map(|[from, to]| {
        let (a, b) = (pool[from].double, pool[to].double);
        let component = |axis: usize| ((b[axis] - a[axis]) / OTHER_VECTOR_SCALE) as f32;
        Vector3::new(component(0), component(1), component(2))
    });

    let bounding_box = if object.is_deadbeef() {
        pool_box
    } else {
        BoundingBox::from_vertices(&vertices).unwrap_or_default()
    };

    VertexGroup {
        header: object.label.to_header(vertices.len() as i32, tris.len() as i32),
        bounding_box,
        vertices,
        tris,
        other_vector,
        violation: None,
    }
}
