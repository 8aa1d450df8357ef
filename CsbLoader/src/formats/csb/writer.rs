//! CSB encoding
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use super::document::CollisionBinary;
use super::geometry::Vector3;
use super::vertex_group::write_vertex_group;
use super::{CANONICAL_STRING_TABLE_OFFSET, COLLISION_MARKER, DEFINED_FLAG, TRAILING_VECTOR_COUNT};
use crate::error::{Error, Result};
use crate::formats::common::{BinaryWriter, Endian};

/// Descriptor indices are a single byte
const MAX_GROUPS: usize = u8::MAX as usize + 1;

/// Encode a collision binary in the canonical little-endian layout.
///
/// The bytes before the string table are unknown and written as zeros.
/// Everything from the first group record onward matches what the game's
/// tooling writes for a serializable binary.
///
/// # Errors
///
/// Returns [`Error::NoVertexGroups`] for an empty binary,
/// [`Error::TooManyVertexGroups`] past 256 groups, and the per-group errors of
/// [`write_vertex_group`].
pub fn serialize_csb(binary: &CollisionBinary) -> Result<Vec<u8>> {
    let groups = &binary.vertex_groups;
    if groups.is_empty() {
        return Err(Error::NoVertexGroups);
    }
    if groups.len() > MAX_GROUPS {
        return Err(Error::TooManyVertexGroups {
            count: groups.len(),
            max: MAX_GROUPS,
        });
    }

    let mut writer = BinaryWriter::new(Endian::Little);
    writer.write_zeros(CANONICAL_STRING_TABLE_OFFSET);

    // String table
    let table_start = writer.len();
    writer.write_bytes(COLLISION_MARKER);
    writer.write_u8(0);
    for group in groups.iter().filter(|g| !g.name().is_empty()) {
        writer.write_bytes(group.name().as_bytes());
        writer.write_u8(0);
    }
    place_count_word(&mut writer, table_start);
    writer.write_u32((groups.len() as u32) << 16);

    // Descriptors; the implicit group is the only one left unflagged
    let implicit = binary.deadbeef_index().unwrap_or(0);
    for i in 0..groups.len() {
        let flag = if i == implicit { 0 } else { DEFINED_FLAG };
        writer.write_bytes(&[i as u8, 0, flag, 0]);
    }

    for group in groups {
        write_vertex_group(&mut writer, group)?;
    }

    if groups.len() == 1 {
        if binary.other_vectors.len() != TRAILING_VECTOR_COUNT {
            tracing::warn!(
                "Single-group binary has {} trailing vectors instead of {}; padding with zeros",
                binary.other_vectors.len(),
                TRAILING_VECTOR_COUNT
            );
        }
        let trailing = binary.other_vectors.iter().copied().chain(std::iter::repeat(Vector3::ZERO));
        for vector in trailing.take(TRAILING_VECTOR_COUNT) {
            vector.write(&mut writer);
        }
    }

    Ok(writer.into_inner())
}

/// Move the writer to where the decoder will look for the count word.
///
/// The decoder scans 16-bit pairs from the marker and stops at the first
/// zero pair. When the table's last null byte starts a pair, that pair is
/// completed by the next byte written, which may be the count word itself.
fn place_count_word(writer: &mut BinaryWriter, table_start: usize) {
    let end = writer.len();
    let terminator = if (end - 1 - table_start) % 2 == 0 { end - 1 } else { end };
    let word_offset = terminator.next_multiple_of(4);

    if word_offset < end {
        // The word's two low zero bytes stand in for the last null
        writer.truncate(word_offset);
    } else {
        writer.write_zeros(word_offset - end);
    }
}
