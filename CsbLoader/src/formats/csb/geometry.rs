//! Vector and bounding box primitives
//!
//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT

use std::fmt;
use std::ops::Sub;

use glam::Vec3;

use crate::error::Result;
use crate::formats::common::{BinaryReader, BinaryWriter};

/// Three 32-bit floats as stored in CSB files.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Size of a vector on disk
    pub const SIZE: usize = 12;

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// True only for `+0.0` in every component.
    ///
    /// Compared bitwise: `-0.0` would not re-encode to the same bytes.
    #[must_use]
    pub fn is_exact_zero(&self) -> bool {
        self.x.to_bits() == 0 && self.y.to_bits() == 0 && self.z.to_bits() == 0
    }

    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Vec3::from(self).cross(Vec3::from(other)).into()
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    #[must_use]
    pub fn normalize(self) -> Self {
        Vec3::from(self).normalize_or_zero().into()
    }

    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            x: reader.read_f32()?,
            y: reader.read_f32()?,
            z: reader.read_f32()?,
        })
    }

    pub fn write(&self, writer: &mut BinaryWriter) {
        writer.write_f32(self.x);
        writer.write_f32(self.y);
        writer.write_f32(self.z);
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl From<Vec3> for Vector3 {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for Vec3 {
    fn from(v: Vector3) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Result of [`BoundingBox::verify`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundsCheck {
    /// The stored box matches the vertices
    Correct,
    /// The stored box is wrong; this is the box the vertices describe
    Expected(BoundingBox),
}

/// Axis-aligned box stored after each group's origin vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub low: Vector3,
    pub high: Vector3,
}

impl BoundingBox {
    /// Size of a bounding box on disk
    pub const SIZE: usize = 2 * Vector3::SIZE;

    #[must_use]
    pub const fn new(low: Vector3, high: Vector3) -> Self {
        Self { low, high }
    }

    /// Component-wise min/max of `vertices`, or `None` when there are none.
    #[must_use]
    pub fn from_vertices(vertices: &[Vector3]) -> Option<Self> {
        let first = *vertices.first()?;
        let (mut low, mut high) = (first, first);

        for v in &vertices[1..] {
            if v.x < low.x {
                low.x = v.x;
            }
            if v.y < low.y {
                low.y = v.y;
            }
            if v.z < low.z {
                low.z = v.z;
            }
            if v.x > high.x {
                high.x = v.x;
            }
            if v.y > high.y {
                high.y = v.y;
            }
            if v.z > high.z {
                high.z = v.z;
            }
        }

        Some(Self { low, high })
    }

    /// Recompute the box from `vertices` and compare.
    ///
    /// An empty vertex list has nothing to check against and always verifies.
    #[must_use]
    pub fn verify(&self, vertices: &[Vector3]) -> BoundsCheck {
        match Self::from_vertices(vertices) {
            Some(expected) if expected != *self => BoundsCheck::Expected(expected),
            _ => BoundsCheck::Correct,
        }
    }

    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        Ok(Self {
            low: Vector3::read(reader)?,
            high: Vector3::read(reader)?,
        })
    }

    pub fn write(&self, writer: &mut BinaryWriter) {
        self.low.write(writer);
        self.high.write(writer);
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoundingBox({} -> {})", self.low, self.high)
    }
}
