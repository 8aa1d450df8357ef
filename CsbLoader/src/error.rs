//! Error types for `CsbLoader`

use thiserror::Error;

/// The error type for `CsbLoader` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== Binary Cursor Errors ====================
    /// A fixed-size read ran past the end of the buffer (truncated file).
    #[error("unexpected end of file at offset {offset:#x}: needed {needed} bytes, {available} available")]
    UnexpectedEof {
        /// Offset where the read started.
        offset: usize,
        /// Number of bytes the read required.
        needed: usize,
        /// Number of bytes left in the buffer.
        available: usize,
    },

    /// A seek targeted a position outside the buffer.
    #[error("seek to offset {offset} is outside the buffer (length {len})")]
    SeekOutOfBounds {
        /// The requested position (may be negative for relative seeks).
        offset: i64,
        /// Length of the buffer.
        len: usize,
    },

    // ==================== CSB Decode Errors ====================
    /// The `Collision` marker anchoring the string table was not found.
    #[error("invalid CSB file: \"Collision\" marker not found")]
    MarkerNotFound,

    /// A vertex or triangle count in a group header is negative.
    #[error("invalid {kind} count {value} in vertex group header at offset {offset:#x}")]
    InvalidCount {
        /// Offset of the group header.
        offset: usize,
        /// Which count was invalid ("vertex" or "triangle").
        kind: &'static str,
        /// The value found in the file.
        value: i32,
    },

    /// A vertex or triangle count would read past the end of the buffer.
    #[error("{kind} count {count} at offset {offset:#x} needs {needed} bytes, only {available} available")]
    CountExceedsBuffer {
        /// Offset where the records begin.
        offset: usize,
        /// Which records ("vertex" or "triangle").
        kind: &'static str,
        /// The declared record count.
        count: usize,
        /// Bytes the records would occupy.
        needed: usize,
        /// Bytes left in the buffer.
        available: usize,
    },

    /// The leading header field did not hold the expected version sentinel.
    #[error("unexpected vertex group sentinel {found} at offset {offset:#x} (expected {expected})")]
    UnexpectedSentinel {
        /// Offset of the group header.
        offset: usize,
        /// The sentinel value found.
        found: i32,
        /// The sentinel value expected.
        expected: i32,
    },

    /// The bytes where a group header should start do not look like one.
    #[error("no plausible vertex group header at offset {offset:#x}")]
    ImplausibleGroupHeader {
        /// Offset that was checked.
        offset: usize,
    },

    // ==================== CSB Encode Errors ====================
    /// An empty vertex group has no auxiliary vector to write in place of vertices.
    #[error("vertex group {group:?} has no vertices and no other vector; the CSB format cannot represent it")]
    MissingOtherVector {
        /// Name of the offending group.
        group: String,
    },

    /// A group name does not fit the 64-byte header field.
    #[error("vertex group name {name:?} is {len} bytes long (maximum 63)")]
    NameTooLong {
        /// The group name.
        name: String,
        /// Its length in bytes.
        len: usize,
    },

    /// A group index cannot be written as a two-digit label.
    #[error("too many vertex groups: group index {index} exceeds 99")]
    GroupIndexOutOfRange {
        /// The group index.
        index: i32,
    },

    /// More groups than the descriptor table can index.
    #[error("too many vertex groups: {count} (the descriptor table holds at most {max})")]
    TooManyVertexGroups {
        /// Number of groups to encode.
        count: usize,
        /// Largest encodable group count.
        max: usize,
    },

    /// A collision binary without any vertex group cannot be encoded.
    #[error("collision binary has no vertex groups")]
    NoVertexGroups,

    // ==================== Wavefront OBJ Errors ====================
    /// A vertex line did not hold three numbers.
    #[error("line {line}: invalid vector {literal:?}")]
    InvalidVector {
        /// 1-based line number.
        line: usize,
        /// The offending line content.
        literal: String,
    },

    /// A face or line element referenced a vertex outside the pool.
    #[error("line {line}: vertex reference {token:?} is out of range (valid 1-indexed range is 1..={pool_size})")]
    VertexOutOfRange {
        /// 1-based line number.
        line: usize,
        /// The offending reference token.
        token: String,
        /// Number of vertices in the file.
        pool_size: usize,
    },

    /// A face or line element needs a different number of references.
    #[error("line {line}: {element} element needs {expected} vertex references, found {found}")]
    WrongReferenceCount {
        /// 1-based line number.
        line: usize,
        /// `f` or `l`.
        element: &'static str,
        /// Required reference count.
        expected: usize,
        /// Reference count found.
        found: usize,
    },

    /// A face or line element appeared before any `o` line.
    #[error("line {line}: geometry found outside of any object")]
    GeometryOutsideObject {
        /// 1-based line number.
        line: usize,
    },

    /// A line element appeared in an object other than `DEADBEEF`.
    #[error("line {line}: line elements are only allowed in the DEADBEEF object, found in {object:?}")]
    MisplacedLineElement {
        /// 1-based line number.
        line: usize,
        /// Label of the current object.
        object: String,
    },

    /// An object held more than one line element.
    #[error("line {line}: object {object:?} has more than one line element")]
    DuplicateLineElement {
        /// 1-based line number.
        line: usize,
        /// Label of the current object.
        object: String,
    },

    /// An object label does not match `NN_Name[ [metadata]]`.
    #[error("line {line}: invalid vertex group label {label:?}")]
    InvalidLabel {
        /// 1-based line number.
        line: usize,
        /// The offending label.
        label: String,
    },

    /// An object label's metadata does not hold six hexadecimal slots.
    #[error("line {line}: invalid metadata in vertex group label {label:?} (expected 6 hexadecimal slots)")]
    InvalidMetadata {
        /// 1-based line number.
        line: usize,
        /// The offending label.
        label: String,
    },
}

/// A specialized Result type for `CsbLoader` operations.
pub type Result<T> = std::result::Result<T, Error>;
