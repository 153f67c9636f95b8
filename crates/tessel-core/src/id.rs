//! Strongly-typed identifiers and periodic element keys.
//!
//! A tesselation repeats one finite set of base faces and base vertices
//! over an integer lattice. Every element of the infinite tiling is named
//! by a base identifier plus the [`Period`] of the lattice copy it lives in.

use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Identifies a base face of a tesselation.
///
/// Base face ids are chosen by the caller in the construction config and
/// are opaque to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub u32);

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FaceId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a base vertex of a tesselation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub u32);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VertexId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// An integer offset in units of the two lattice vectors.
///
/// Ordered lexicographically by `dx`, then `dy`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    /// Multiple of the first lattice vector.
    pub dx: i32,
    /// Multiple of the second lattice vector.
    pub dy: i32,
}

impl Period {
    /// The period of the base copy.
    pub const ZERO: Period = Period { dx: 0, dy: 0 };

    /// Construct a period from its two components.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Returns `true` for the zero period.
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// `self + rhs`, or `None` if either component overflows.
    pub fn checked_add(self, rhs: Period) -> Option<Period> {
        Some(Period::new(
            self.dx.checked_add(rhs.dx)?,
            self.dy.checked_add(rhs.dy)?,
        ))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}

impl From<(i32, i32)> for Period {
    fn from((dx, dy): (i32, i32)) -> Self {
        Self { dx, dy }
    }
}

impl Add for Period {
    type Output = Period;

    fn add(self, rhs: Period) -> Period {
        Period::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl Sub for Period {
    type Output = Period;

    fn sub(self, rhs: Period) -> Period {
        Period::new(self.dx - rhs.dx, self.dy - rhs.dy)
    }
}

impl Neg for Period {
    type Output = Period;

    fn neg(self) -> Period {
        Period::new(-self.dx, -self.dy)
    }
}

/// A key that names an element of one lattice copy.
///
/// Shifting a key moves the element it names by a whole period; the base
/// part of the key is unchanged.
pub trait Periodic: Copy {
    /// The lattice copy this key lives in.
    fn period(&self) -> Period;

    /// The same element moved by `by`.
    fn shifted(self, by: Period) -> Self;

    /// [`shifted`](Self::shifted), or `None` if the period overflows.
    fn checked_shifted(self, by: Period) -> Option<Self>;
}

/// A face of the infinite tiling: a base face in one lattice copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceKey {
    /// Lattice copy.
    pub period: Period,
    /// Base face.
    pub face: FaceId,
}

impl FaceKey {
    /// Construct a face key from raw components.
    pub const fn new(dx: i32, dy: i32, face: u32) -> Self {
        Self {
            period: Period::new(dx, dy),
            face: FaceId(face),
        }
    }
}

impl Periodic for FaceKey {
    fn period(&self) -> Period {
        self.period
    }

    fn shifted(self, by: Period) -> Self {
        Self {
            period: self.period + by,
            ..self
        }
    }

    fn checked_shifted(self, by: Period) -> Option<Self> {
        Some(Self {
            period: self.period.checked_add(by)?,
            ..self
        })
    }
}

impl fmt::Display for FaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.period.dx, self.period.dy, self.face)
    }
}

/// A vertex of the infinite tiling: a base vertex in one lattice copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey {
    /// Lattice copy.
    pub period: Period,
    /// Base vertex.
    pub vertex: VertexId,
}

impl VertexKey {
    /// Construct a vertex key from raw components.
    pub const fn new(dx: i32, dy: i32, vertex: u32) -> Self {
        Self {
            period: Period::new(dx, dy),
            vertex: VertexId(vertex),
        }
    }
}

impl Periodic for VertexKey {
    fn period(&self) -> Period {
        self.period
    }

    fn shifted(self, by: Period) -> Self {
        Self {
            period: self.period + by,
            ..self
        }
    }

    fn checked_shifted(self, by: Period) -> Option<Self> {
        Some(Self {
            period: self.period.checked_add(by)?,
            ..self
        })
    }
}

impl fmt::Display for VertexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.period.dx, self.period.dy, self.vertex)
    }
}

/// An edge of the infinite tiling, named by one face that bounds it.
///
/// `index` is the position of the edge on the boundary of `face`: edge `i`
/// runs from boundary vertex `i` to boundary vertex `i + 1` (cyclically).
/// An edge shared by two faces has two names; the engine designates one
/// of them as canonical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    /// Lattice copy of the naming face.
    pub period: Period,
    /// Position on the naming face's boundary.
    pub index: u32,
    /// Naming base face.
    pub face: FaceId,
}

impl EdgeKey {
    /// Construct an edge key from raw components.
    pub const fn new(dx: i32, dy: i32, index: u32, face: u32) -> Self {
        Self {
            period: Period::new(dx, dy),
            index,
            face: FaceId(face),
        }
    }

    /// The face this name refers to the edge through.
    pub fn naming_face(&self) -> FaceKey {
        FaceKey {
            period: self.period,
            face: self.face,
        }
    }
}

impl Periodic for EdgeKey {
    fn period(&self) -> Period {
        self.period
    }

    fn shifted(self, by: Period) -> Self {
        Self {
            period: self.period + by,
            ..self
        }
    }

    fn checked_shifted(self, by: Period) -> Option<Self> {
        Some(Self {
            period: self.period.checked_add(by)?,
            ..self
        })
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.period.dx, self.period.dy, self.index, self.face
        )
    }
}
