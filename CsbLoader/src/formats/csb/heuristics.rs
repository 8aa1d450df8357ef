//! Layout plausibility checks
//!
//! Older revisions needed to guess whether the next bytes were another vertex
//! or the next group's header. The current layout carries explicit counts, so
//! the check only guards against drifting off a record boundary. It is kept
//! behind a plain function pointer so another revision can plug in its own.

use byteorder::{ByteOrder, LittleEndian};

use super::{GROUP_NAME_SIZE, HEADER_SIZE, MAX_GROUP_INDEX};

/// Decides whether `bytes` (the rest of the buffer) start with a group header.
pub type GroupHeaderCheck = fn(bytes: &[u8]) -> bool;

/// Default check for the little-endian revision.
///
/// A header is plausible when its index fits a label, its counts are not
/// negative and its name is non-empty printable ASCII terminated inside the
/// 64-byte field.
pub fn looks_like_group_header(bytes: &[u8]) -> bool {
    if bytes.len() < HEADER_SIZE {
        return false;
    }

    let group_index = LittleEndian::read_i32(&bytes[0x04..]);
    let vertex_amount = LittleEndian::read_i32(&bytes[0x5C..]);
    let tri_amount = LittleEndian::read_i32(&bytes[0x60..]);
    if !(0..=MAX_GROUP_INDEX).contains(&group_index) || vertex_amount < 0 || tri_amount < 0 {
        return false;
    }

    let name_field = &bytes[0x18..0x18 + GROUP_NAME_SIZE];
    match name_field.iter().position(|&b| b == 0) {
        Some(0) | None => false,
        Some(len) => name_field[..len].iter().all(|b| b.is_ascii_graphic()),
    }
}
