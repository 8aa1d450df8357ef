//! Textual vertex group labels
//!
//! Labels carry a header's index, name and metadata through formats that
//! only have a name slot (OBJ `o` lines). Examples:
//!
//! ```text
//! 00_[mobj]_DEADBEEF
//! 01_Sync_1_Col [3FC::5:1::]
//! 58_Yeah [:21::1::]
//! ```
//!
//! The metadata suffix always has six slots, written as upper-case hex with
//! zero left empty, and is omitted entirely when all six are zero.

use std::sync::OnceLock;

use regex::Regex;

use super::document::VertexGroupHeader;
use super::{MAX_GROUP_INDEX, RESERVED_TAG};
use crate::error::{Error, Result};

/// Number of metadata slots in a label
pub const METADATA_SLOTS: usize = 6;

static LABEL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Captures: index, reserved tag, name, metadata
fn label_regex() -> &'static Regex {
    LABEL_REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]{2})_(\[mobj\]_)?([^ \[\]]+)(?: \[((?:-?[0-9A-F]*:)*-?[0-9A-F]*)\])?$")
            .expect("label regex is valid")
    })
}

/// The pieces of a label, before they are turned into a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupLabel {
    pub index: i32,
    pub name: String,
    pub metadata: [i32; METADATA_SLOTS],
    /// Whether the name carried the `[mobj]_` tag
    pub reserved: bool,
}

impl GroupLabel {
    /// Parse a label. `line` is only used for error reporting.
    pub fn parse(label: &str, line: usize) -> Result<Self> {
        let invalid = || Error::InvalidLabel {
            line,
            label: label.to_string(),
        };

        let captures = label_regex().captures(label).ok_or_else(invalid)?;
        let index = captures[1].parse::<i32>().map_err(|_| invalid())?;
        let reserved = captures.get(2).is_some();
        let name = captures[3].to_string();

        let metadata = match captures.get(4) {
            None => [0; METADATA_SLOTS],
            Some(slots) => parse_metadata(slots.as_str()).ok_or_else(|| Error::InvalidMetadata {
                line,
                label: label.to_string(),
            })?,
        };

        Ok(Self {
            index,
            name,
            metadata,
            reserved,
        })
    }

    /// Build a header for a group with the given geometry counts.
    #[must_use]
    pub fn to_header(&self, vertex_amount: i32, tri_amount: i32) -> VertexGroupHeader {
        VertexGroupHeader::new(
            self.index,
            self.name.clone(),
            self.metadata,
            vertex_amount,
            tri_amount,
        )
    }
}

fn parse_metadata(slots: &str) -> Option<[i32; METADATA_SLOTS]> {
    let values = slots
        .split(':')
        .map(|slot| {
            if slot.is_empty() {
                Some(0)
            } else {
                i32::from_str_radix(slot, 16).ok()
            }
        })
        .collect::<Option<Vec<i32>>>()?;

    values.try_into().ok()
}

fn format_slot(value: i32) -> String {
    match value {
        0 => String::new(),
        v if v < 0 => format!("-{:X}", v.unsigned_abs()),
        v => format!("{v:X}"),
    }
}

/// Format a header as `NN_Name[ [metadata]]`.
///
/// `reserved` prefixes the name with the `[mobj]_` tag.
pub fn format_label(header: &VertexGroupHeader, reserved: bool) -> Result<String> {
    if !(0..=MAX_GROUP_INDEX).contains(&header.group_index) {
        return Err(Error::GroupIndexOutOfRange {
            index: header.group_index,
        });
    }

    let tag = if reserved { RESERVED_TAG } else { "" };
    let mut label = format!("{:02}_{tag}{}", header.group_index, header.group_name);

    let metadata = header.metadata();
    if metadata.iter().any(|&v| v != 0) {
        let slots: Vec<String> = metadata.iter().copied().map(format_slot).collect();
        label.push_str(" [");
        label.push_str(&slots.join(":"));
        label.push(']');
    }

    Ok(label)
}
