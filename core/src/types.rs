use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = i32;

/// Two-dimensional position or displacement `(x, y)`.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coord2 {
    pub x: Coord,
    pub y: Coord,
}

impl Coord2 {
    pub const ZERO: Self = Self::new(0, 0);

    pub const NORTH: Self = Self::new(0, 1);
    pub const SOUTH: Self = Self::new(0, -1);
    pub const EAST: Self = Self::new(1, 0);
    pub const WEST: Self = Self::new(-1, 0);
    pub const NORTHEAST: Self = Self::new(1, 1);
    pub const SOUTHEAST: Self = Self::new(1, -1);
    pub const NORTHWEST: Self = Self::new(-1, 1);
    pub const SOUTHWEST: Self = Self::new(-1, -1);

    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Self::new(self.x.checked_add(rhs.x)?, self.y.checked_add(rhs.y)?))
    }

    pub fn checked_mul(self, factor: Coord) -> Option<Self> {
        Some(Self::new(self.x.checked_mul(factor)?, self.y.checked_mul(factor)?))
    }
}

/// The eight unit displacements, clockwise starting at north.
///
/// This order is the neighbor visiting order everywhere in the crate, so anything that walks
/// neighbors (mine counting, flood reveal) is reproducible.
pub const DIRECTIONS: [Coord2; 8] = [
    Coord2::NORTH,
    Coord2::NORTHEAST,
    Coord2::EAST,
    Coord2::SOUTHEAST,
    Coord2::SOUTH,
    Coord2::SOUTHWEST,
    Coord2::WEST,
    Coord2::NORTHWEST,
];

impl From<(Coord, Coord)> for Coord2 {
    fn from((x, y): (Coord, Coord)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coord2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Coord2 {
    type Output = Coord2;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord2 {
    type Output = Coord2;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Coord2 {
    type Output = Coord2;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<Coord> for Coord2 {
    type Output = Coord2;

    fn mul(self, factor: Coord) -> Self::Output {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl Mul<Coord2> for Coord {
    type Output = Coord2;

    fn mul(self, v: Coord2) -> Self::Output {
        v * self
    }
}

pub(crate) trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

/// Storage is row-major: `[y, x]`. Only meaningful for in-bounds positions.
impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.y as usize, self.x as usize]
    }
}
