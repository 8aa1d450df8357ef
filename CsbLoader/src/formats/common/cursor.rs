//! Position-tracked binary reader and writer
//!
//! CSB revisions disagree on byte order for some header fields, so the
//! endianness is a per-instance setting rather than a type parameter.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// Byte order used by a cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

macro_rules! read_fn {
    ($name:ident, $ty:ty, $size:expr, $read:ident) => {
        pub fn $name(&mut self) -> Result<$ty> {
            let bytes = self.read_bytes($size)?;
            Ok(match self.endian {
                Endian::Little => LittleEndian::$read(bytes),
                Endian::Big => BigEndian::$read(bytes),
            })
        }
    };
}

macro_rules! write_fn {
    ($name:ident, $ty:ty, $size:expr, $write:ident) => {
        pub fn $name(&mut self, value: $ty) {
            let mut buf = [0u8; $size];
            match self.endian {
                Endian::Little => LittleEndian::$write(&mut buf, value),
                Endian::Big => BigEndian::$write(&mut buf, value),
            }
            self.data.extend_from_slice(&buf);
        }
    };
}

/// Sequential reader over a borrowed byte buffer.
///
/// Every read advances the position; reading past the end is an
/// [`Error::UnexpectedEof`] carrying the offending offset.
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
    endian: Endian,
}

impl<'a> BinaryReader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8], endian: Endian) -> Self {
        Self {
            data,
            position: 0,
            endian,
        }
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the position and the end of the buffer
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    #[must_use]
    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// Move to an absolute position. Seeking to the end of the buffer is allowed.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.data.len() {
            return Err(Error::SeekOutOfBounds {
                offset: position as i64,
                len: self.data.len(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Move the position by `delta` bytes in either direction.
    pub fn skip(&mut self, delta: isize) -> Result<()> {
        let target = self.position as i64 + delta as i64;
        if target < 0 || target > self.data.len() as i64 {
            return Err(Error::SeekOutOfBounds {
                offset: target,
                len: self.data.len(),
            });
        }
        self.position = target as usize;
        Ok(())
    }

    /// Advance to the next multiple of `alignment` (no-op when already aligned).
    pub fn align(&mut self, alignment: usize) -> Result<()> {
        let aligned = self.position.next_multiple_of(alignment);
        self.seek(aligned)
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(len)?;
        self.position += len;
        Ok(bytes)
    }

    /// Borrow the next `len` bytes without advancing.
    pub fn peek_bytes(&self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::UnexpectedEof {
                offset: self.position,
                needed: len,
                available: self.remaining(),
            });
        }
        Ok(&self.data[self.position..self.position + len])
    }

    /// Everything from the position to the end of the buffer
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.position..]
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    read_fn!(read_u16, u16, 2, read_u16);
    read_fn!(read_i16, i16, 2, read_i16);
    read_fn!(read_u32, u32, 4, read_u32);
    read_fn!(read_i32, i32, 4, read_i32);
    read_fn!(read_f32, f32, 4, read_f32);
}

/// Growing binary writer; the counterpart of [`BinaryReader`].
#[derive(Debug, Clone, Default)]
pub struct BinaryWriter {
    data: Vec<u8>,
    endian: Endian,
}

impl BinaryWriter {
    #[must_use]
    pub fn new(endian: Endian) -> Self {
        Self {
            data: Vec::new(),
            endian,
        }
    }

    /// Total bytes written so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    /// Drop everything written after `len` bytes.
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub fn write_zeros(&mut self, count: usize) {
        self.data.resize(self.data.len() + count, 0);
    }

    /// Zero-pad to the next multiple of `alignment`.
    pub fn align(&mut self, alignment: usize) {
        let aligned = self.data.len().next_multiple_of(alignment);
        self.data.resize(aligned, 0);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.data.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.data.push(value as u8);
    }

    write_fn!(write_u16, u16, 2, write_u16);
    write_fn!(write_i16, i16, 2, write_i16);
    write_fn!(write_u32, u32, 4, write_u32);
    write_fn!(write_i32, i32, 4, write_i32);
    write_fn!(write_f32, f32, 4, write_f32);
}
