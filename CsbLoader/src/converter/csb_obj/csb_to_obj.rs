//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! CSB to OBJ conversion

use crate::converter::{ConvertPhase, ConvertProgress, ConvertProgressCallback};
use crate::error::Result;
use crate::formats::{csb, wavefront};

/// Convert CSB bytes to OBJ text
///
/// # Errors
/// Returns an error if the CSB data cannot be decoded or a group cannot be
/// labelled.
pub fn csb_to_obj(data: &[u8]) -> Result<String> {
    csb_to_obj_with_progress(data, &|_| {})
}

/// Convert CSB bytes to OBJ text with progress callback
///
/// # Errors
/// Returns an error if the CSB data cannot be decoded or a group cannot be
/// labelled.
pub fn csb_to_obj_with_progress(data: &[u8], progress: ConvertProgressCallback) -> Result<String> {
    tracing::info!("Converting CSB→OBJ: {} bytes", data.len());

    progress(&ConvertProgress::new(ConvertPhase::ReadingSource, 1, 3, "Decoding CSB..."));
    let binary = csb::parse_csb_bytes(data)?;

    let group_count = binary.vertex_groups.len();
    progress(&ConvertProgress::new(
        ConvertPhase::Converting,
        2,
        3,
        format!("Checking {group_count} vertex groups..."),
    ));
    for (group, violation) in binary.violations() {
        tracing::info!("Group {:?} will not re-encode identically: {}", group, violation);
    }

    progress(&ConvertProgress::new(ConvertPhase::WritingOutput, 3, 3, "Writing OBJ text..."));
    let obj = wavefront::to_obj_string(&binary)?;

    tracing::info!("Conversion complete");
    Ok(obj)
}
