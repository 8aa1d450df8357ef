//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! Format conversion utilities
//!
//! In-memory conversions between CSB collision meshes and OBJ text, plus a
//! round-trip check that tells whether a CSB file survives re-encoding.
//! Nothing here touches the file system.

pub mod csb_obj;

pub use csb_obj::{
    RoundTripReport, csb_to_obj, csb_to_obj_with_progress, obj_to_csb, obj_to_csb_with_progress,
    verify_round_trip,
};

/// Step of a conversion reported to progress callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertPhase {
    ReadingSource,
    Converting,
    WritingOutput,
}

/// Progress update passed to a [`ConvertProgressCallback`]
#[derive(Debug, Clone)]
pub struct ConvertProgress {
    pub phase: ConvertPhase,
    pub current: usize,
    pub total: usize,
    pub message: String,
}

impl ConvertProgress {
    #[must_use]
    pub fn new(phase: ConvertPhase, current: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            phase,
            current,
            total,
            message: message.into(),
        }
    }
}

/// Progress callback type for conversion operations.
pub type ConvertProgressCallback<'a> = &'a dyn Fn(&ConvertProgress);
