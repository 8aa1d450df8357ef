//! Common binary plumbing shared across formats

pub mod cursor;

pub use cursor::{BinaryReader, BinaryWriter, Endian};
