//! Vertex group record reading and writing
//!
//! A record is a fixed header followed by geometry whose shape depends on
//! whether the group has vertices:
//!
//! ```text
//! vertex_amount == 0:  (0,0,0) x3, other vector, bounding box, tris
//! vertex_amount  > 0:  (0,0,0),    bounding box, vertices,     tris
//! ```

use super::document::{Tri, VertexGroup, VertexGroupHeader, Violation};
use super::geometry::{BoundingBox, BoundsCheck, Vector3};
use super::options::CsbReadOptions;
use super::{GROUP_NAME_SIZE, HEADER_SENTINEL};
use crate::error::{Error, Result};
use crate::formats::common::{BinaryReader, BinaryWriter};

/// Number of zero vectors that stand in for vertex data in empty groups
const EMPTY_GROUP_ZERO_VECTORS: usize = 3;

fn read_header(reader: &mut BinaryReader<'_>, options: &CsbReadOptions) -> Result<VertexGroupHeader> {
    let offset = reader.position();

    let field_0x00 = reader.read_i32()?;
    if field_0x00 != HEADER_SENTINEL {
        if options.strict {
            return Err(Error::UnexpectedSentinel {
                offset,
                found: field_0x00,
                expected: HEADER_SENTINEL,
            });
        }
        tracing::warn!(
            "Vertex group header at {:#x} starts with {} instead of {}",
            offset,
            field_0x00,
            HEADER_SENTINEL
        );
    }

    let group_index = reader.read_i32()?;
    let field_0x08 = reader.read_i32()?;
    let field_0x0c = reader.read_i32()?;
    let field_0x10 = reader.read_i32()?;
    let field_0x14 = reader.read_i32()?;

    // Name: 64 bytes, null-padded
    let name_bytes = reader.read_bytes(GROUP_NAME_SIZE)?;
    let name_len = name_bytes.iter().position(|&b| b == 0).unwrap_or(GROUP_NAME_SIZE);
    let group_name = String::from_utf8_lossy(&name_bytes[..name_len]).into_owned();

    let field_0x58 = reader.read_i32()?;
    let vertex_amount = reader.read_i32()?;
    let tri_amount = reader.read_i32()?;

    for (kind, value) in [("vertex", vertex_amount), ("triangle", tri_amount)] {
        if value < 0 {
            return Err(Error::InvalidCount { offset, kind, value });
        }
    }

    Ok(VertexGroupHeader {
        field_0x00,
        group_index,
        field_0x08,
        field_0x0c,
        field_0x10,
        field_0x14,
        group_name,
        field_0x58,
        vertex_amount,
        tri_amount,
        field_0x64: reader.read_i32()?,
        field_0x68: reader.read_i32()?,
        field_0x6c: reader.read_i32()?,
        field_0x70: reader.read_i32()?,
        field_0x74: reader.read_i32()?,
        field_0x78: reader.read_i32()?,
    })
}

fn write_header(writer: &mut BinaryWriter, header: &VertexGroupHeader, vertex_amount: i32, tri_amount: i32) -> Result<()> {
    let name = header.group_name.as_bytes();
    if name.len() >= GROUP_NAME_SIZE {
        return Err(Error::NameTooLong {
            name: header.group_name.clone(),
            len: name.len(),
        });
    }

    writer.write_i32(header.field_0x00);
    writer.write_i32(header.group_index);
    writer.write_i32(header.field_0x08);
    writer.write_i32(header.field_0x0c);
    writer.write_i32(header.field_0x10);
    writer.write_i32(header.field_0x14);

    writer.write_bytes(name);
    writer.write_zeros(GROUP_NAME_SIZE - name.len());

    writer.write_i32(header.field_0x58);
    writer.write_i32(vertex_amount);
    writer.write_i32(tri_amount);
    writer.write_i32(header.field_0x64);
    writer.write_i32(header.field_0x68);
    writer.write_i32(header.field_0x6c);
    writer.write_i32(header.field_0x70);
    writer.write_i32(header.field_0x74);
    writer.write_i32(header.field_0x78);
    Ok(())
}

/// Fail before allocating when `count` records of `record_size` cannot fit.
fn ensure_fits(reader: &BinaryReader<'_>, kind: &'static str, count: usize, record_size: usize) -> Result<()> {
    let needed = count.saturating_mul(record_size);
    if needed > reader.remaining() {
        return Err(Error::CountExceedsBuffer {
            offset: reader.position(),
            kind,
            count,
            needed,
            available: reader.remaining(),
        });
    }
    Ok(())
}

fn read_tri(reader: &mut BinaryReader<'_>) -> Result<Tri> {
    let indices = [reader.read_i32()?, reader.read_i32()?, reader.read_i32()?];
    let normal = Vector3::read(reader)?;
    Ok(Tri::new(indices, normal))
}

/// Decode one vertex group record at the reader's position.
///
/// Sanity-check failures (non-zero padding vectors, a wrong bounding box)
/// do not abort; the first one is recorded in [`VertexGroup::violation`].
pub fn read_vertex_group(reader: &mut BinaryReader<'_>, options: &CsbReadOptions) -> Result<VertexGroup> {
    let header = read_header(reader, options)?;
    let mut violation: Option<Violation> = None;
    let mut record = |v: Violation| {
        tracing::warn!("Vertex group {:?}: {}", header.group_name, v);
        violation.get_or_insert(v);
    };

    let (vertices, other_vector, bounding_box) = if header.vertex_amount == 0 {
        let mut all_zero = true;
        for _ in 0..EMPTY_GROUP_ZERO_VECTORS {
            all_zero &= Vector3::read(reader)?.is_exact_zero();
        }
        if !all_zero {
            record(Violation::NonZeroLeadingVectors);
        }

        let other_vector = Vector3::read(reader)?;
        let bounding_box = BoundingBox::read(reader)?;
        (Vec::new(), Some(other_vector), bounding_box)
    } else {
        if !Vector3::read(reader)?.is_exact_zero() {
            record(Violation::NonZeroOrigin);
        }
        let bounding_box = BoundingBox::read(reader)?;

        let count = header.vertex_amount as usize;
        ensure_fits(reader, "vertex", count, Vector3::SIZE)?;
        let vertices = (0..count)
            .map(|_| Vector3::read(reader))
            .collect::<Result<Vec<_>>>()?;
        (vertices, None, bounding_box)
    };

    if let BoundsCheck::Expected(expected) = bounding_box.verify(&vertices) {
        record(Violation::BoundingBoxMismatch {
            stored: bounding_box,
            expected,
        });
    }

    let count = header.tri_amount as usize;
    ensure_fits(reader, "triangle", count, Tri::SIZE)?;
    let tris = (0..count)
        .map(|_| read_tri(reader))
        .collect::<Result<Vec<_>>>()?;

    Ok(VertexGroup {
        header,
        bounding_box,
        vertices,
        tris,
        other_vector,
        violation,
    })
}

/// Encode one vertex group record.
///
/// The header's counts are taken from the actual vertex and triangle lists.
/// A group without vertices must carry an other vector: the format has no
/// way to say "nothing here".
pub fn write_vertex_group(writer: &mut BinaryWriter, group: &VertexGroup) -> Result<()> {
    let header = &group.header;
    let vertex_amount = group.vertices.len() as i32;
    let tri_amount = group.tris.len() as i32;
    if header.vertex_amount != vertex_amount || header.tri_amount != tri_amount {
        tracing::debug!(
            "Vertex group {:?}: header counts {}/{} replaced by {}/{}",
            header.group_name,
            header.vertex_amount,
            header.tri_amount,
            vertex_amount,
            tri_amount
        );
    }

    if group.vertices.is_empty() {
        let other_vector = group.other_vector.ok_or_else(|| Error::MissingOtherVector {
            group: header.group_name.clone(),
        })?;

        write_header(writer, header, vertex_amount, tri_amount)?;
        for _ in 0..EMPTY_GROUP_ZERO_VECTORS {
            Vector3::ZERO.write(writer);
        }
        other_vector.write(writer);
        group.bounding_box.write(writer);
    } else {
        write_header(writer, header, vertex_amount, tri_amount)?;
        Vector3::ZERO.write(writer);
        group.bounding_box.write(writer);
        for vertex in &group.vertices {
            vertex.write(writer);
        }
    }

    for tri in &group.tris {
        for index in tri.indices {
            writer.write_i32(index);
        }
        tri.normal.write(writer);
    }

    Ok(())
}
