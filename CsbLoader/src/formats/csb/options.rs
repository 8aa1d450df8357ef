//! Decode options for CSB revisions

use super::heuristics::{GroupHeaderCheck, looks_like_group_header};
use crate::formats::common::Endian;

/// Options controlling how a CSB buffer is decoded.
///
/// # Example
///
/// ```
/// use csbloader::formats::csb::CsbReadOptions;
///
/// // Revision that stores the count word big-endian
/// let options = CsbReadOptions::big_endian_header().with_strict(true);
/// assert!(options.strict);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CsbReadOptions {
    /// Byte order of the count word and descriptor table after the string table
    pub header_endian: Endian,

    /// Treat an unexpected header sentinel or an implausible group header as
    /// fatal instead of logging a warning
    pub strict: bool,

    /// Revision-specific test for "the next bytes are a group header"
    pub group_header_check: GroupHeaderCheck,
}

impl CsbReadOptions {
    /// Options for the little-endian revision, warnings only.
    #[must_use]
    pub fn new() -> Self {
        Self {
            header_endian: Endian::Little,
            strict: false,
            group_header_check: looks_like_group_header,
        }
    }

    /// Options for the revision that reads the fields after the string table
    /// big-endian.
    #[must_use]
    pub fn big_endian_header() -> Self {
        Self::new().with_header_endian(Endian::Big)
    }

    #[must_use]
    pub fn with_header_endian(mut self, endian: Endian) -> Self {
        self.header_endian = endian;
        self
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_group_header_check(mut self, check: GroupHeaderCheck) -> Self {
        self.group_header_check = check;
        self
    }
}

impl Default for CsbReadOptions {
    fn default() -> Self {
        Self::new()
    }
}
