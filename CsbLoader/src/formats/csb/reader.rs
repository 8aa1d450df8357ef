//! CSB decoding
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use super::document::CollisionBinary;
use super::geometry::Vector3;
use super::options::CsbReadOptions;
use super::vertex_group::read_vertex_group;
use super::{CANONICAL_STRING_TABLE_OFFSET, COLLISION_MARKER, DEFINED_FLAG, TRAILING_VECTOR_COUNT};
use crate::error::{Error, Result};
use crate::formats::common::{BinaryReader, Endian};
use crate::utils::BoyerMoore;

/// Size of one entry in the group descriptor table
const DESCRIPTOR_SIZE: usize = 4;

/// Where the decoder found each section of a CSB buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsbLayout {
    /// Offset of the `Collision` marker (start of the string table)
    pub marker_offset: usize,
    /// Offset of the count word
    pub count_word_offset: usize,
    /// Groups declared in the count word, defined or not
    pub declared_groups: usize,
    /// Groups actually present in the file
    pub defined_groups: usize,
    /// Offset of the first vertex group record
    pub groups_offset: usize,
    /// Offset just past the last byte the decoder consumed
    pub end_offset: usize,
}

/// Parse CSB data from bytes using the default (little-endian) options.
///
/// # Errors
///
/// Returns [`Error::MarkerNotFound`] if the buffer has no `Collision` marker,
/// and [`Error::UnexpectedEof`] or [`Error::CountExceedsBuffer`] if it is
/// truncated.
pub fn parse_csb_bytes(data: &[u8]) -> Result<CollisionBinary> {
    parse_csb_bytes_with_options(data, &CsbReadOptions::default())
}

/// Parse CSB data from bytes.
///
/// # Errors
///
/// See [`parse_csb_bytes`]. With [`CsbReadOptions::strict`] set, sentinel
/// and header plausibility failures are errors too.
pub fn parse_csb_bytes_with_options(data: &[u8], options: &CsbReadOptions) -> Result<CollisionBinary> {
    parse_csb_bytes_with_layout(data, options).map(|(binary, _)| binary)
}

/// Parse CSB data from bytes, also reporting where each section was found.
pub fn parse_csb_bytes_with_layout(
    data: &[u8],
    options: &CsbReadOptions,
) -> Result<(CollisionBinary, CsbLayout)> {
    let marker_offset = BoyerMoore::new(COLLISION_MARKER)
        .find(data)
        .ok_or(Error::MarkerNotFound)?;
    tracing::debug!("Found string table at {:#x}", marker_offset);

    let mut reader = BinaryReader::new(data, options.header_endian);
    reader.seek(marker_offset)?;
    skip_string_table(&mut reader)?;

    let count_word_offset = reader.position();
    let count_word = reader.read_u32()?;
    // Lower half is unknown in this revision
    let declared_groups = (count_word >> 16) as usize;

    let descriptors = reader.read_bytes(declared_groups * DESCRIPTOR_SIZE)?;
    // The implicit DEADBEEF group is never flagged
    let defined_groups = descriptors
        .chunks_exact(DESCRIPTOR_SIZE)
        .filter(|descriptor| descriptor[2] == DEFINED_FLAG)
        .count()
        + 1;
    tracing::debug!(
        "{} vertex groups declared, {} defined",
        declared_groups,
        defined_groups
    );

    // Group records are little-endian in every known revision
    reader.set_endian(Endian::Little);
    let groups_offset = reader.position();

    let mut vertex_groups = Vec::with_capacity(defined_groups);
    for _ in 0..defined_groups {
        let offset = reader.position();
        if !(options.group_header_check)(reader.rest()) {
            if options.strict {
                return Err(Error::ImplausibleGroupHeader { offset });
            }
            tracing::warn!("Bytes at {:#x} do not look like a vertex group header", offset);
        }
        vertex_groups.push(read_vertex_group(&mut reader, options)?);
    }

    let other_vectors = if defined_groups == 1 {
        (0..TRAILING_VECTOR_COUNT)
            .map(|_| Vector3::read(&mut reader))
            .collect::<Result<Vec<_>>>()?
    } else {
        Vec::new()
    };

    if reader.remaining() > 0 {
        tracing::debug!("{} trailing bytes after the last vertex group", reader.remaining());
    }

    let canonical_offset = marker_offset == CANONICAL_STRING_TABLE_OFFSET;
    if !canonical_offset {
        tracing::debug!(
            "String table starts at {:#x} instead of {:#x}; file is not serializable",
            marker_offset,
            CANONICAL_STRING_TABLE_OFFSET
        );
    }
    let is_serializable = canonical_offset && vertex_groups.iter().all(|g| g.is_serializable());

    let layout = CsbLayout {
        marker_offset,
        count_word_offset,
        declared_groups,
        defined_groups,
        groups_offset,
        end_offset: reader.position(),
    };

    Ok((
        CollisionBinary {
            vertex_groups,
            other_vectors,
            is_serializable,
        },
        layout,
    ))
}

/// Step over the null-separated name list.
///
/// The list ends at the first 16-bit zero; the count word follows at the
/// next 4-byte boundary counted from that zero.
fn skip_string_table(reader: &mut BinaryReader<'_>) -> Result<()> {
    while reader.read_u16()? != 0 {}
    reader.skip(-2)?;
    reader.align(4)
}
