//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! OBJ to CSB conversion

use crate::converter::{ConvertPhase, ConvertProgress, ConvertProgressCallback};
use crate::error::Result;
use crate::formats::{csb, wavefront};

/// Convert OBJ text to CSB bytes
///
/// # Errors
/// Returns an error if the OBJ text is malformed or a group cannot be
/// encoded.
pub fn obj_to_csb(text: &str) -> Result<Vec<u8>> {
    obj_to_csb_with_progress(text, &|_| {})
}

/// Convert OBJ text to CSB bytes with progress callback
///
/// # Errors
/// Returns an error if the OBJ text is malformed or a group cannot be
/// encoded.
pub fn obj_to_csb_with_progress(text: &str, progress: ConvertProgressCallback) -> Result<Vec<u8>> {
    tracing::info!("Converting OBJ→CSB: {} lines", text.lines().count());

    progress(&ConvertProgress::new(ConvertPhase::ReadingSource, 1, 3, "Parsing OBJ..."));
    let binary = wavefront::parse_obj_str(text)?;

    let group_count = binary.vertex_groups.len();
    progress(&ConvertProgress::new(
        ConvertPhase::Converting,
        2,
        3,
        format!("Checking {group_count} vertex groups..."),
    ));
    if !binary.is_serializable {
        tracing::info!("No tagged DEADBEEF object; output will not match the original file");
    }
    if binary.deadbeef_index().is_none() {
        tracing::warn!("No DEADBEEF object; the first group is written as the implicit one");
    }

    progress(&ConvertProgress::new(ConvertPhase::WritingOutput, 3, 3, "Encoding CSB..."));
    let bytes = csb::serialize_csb(&binary)?;

    tracing::info!("Conversion complete");
    Ok(bytes)
}
