//! Tuples (points, vectors and colors) and tolerant float comparison
//!
//! Operators are provided for the arithmetic that reads naturally
//! (negation, addition, subtraction, scaling).

use std::ops::{Add, Mul, Neg, Sub};

/// Tolerance used for single-precision equality tests
pub const EPSILON: f32 = 0.0001;

/// Larger of two values
pub fn max2(a: f32, b: f32) -> f32 {
    if a > b {
        a
    } else {
        b
    }
}

/// Largest of three values
pub fn max3(a: f32, b: f32, c: f32) -> f32 {
    max2(max2(a, b), c)
}

/// Compare two floats using [`EPSILON`] as both the absolute and the
/// relative tolerance.
pub fn fleq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON * max3(1.0, a.abs(), b.abs())
}

/// Compare two floats with separate absolute and relative tolerances.
///
/// The absolute tolerance dominates near zero, the relative one for large
/// magnitudes.
pub fn fleq_with(a: f32, b: f32, abs_tolerance: f32, rel_tolerance: f32) -> bool {
    (a - b).abs() <= max2(abs_tolerance, rel_tolerance * max2(a.abs(), b.abs()))
}

/// Four-component tuple used for points (w = 1), vectors (w = 0) and RGBA
/// colors (x, y, z, w = r, g, b, a).
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug, Default)]
pub struct Tuple4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

/// Tuple from raw components
pub fn tuple4(x: f32, y: f32, z: f32, w: f32) -> Tuple4 {
    Tuple4 { x, y, z, w }
}

/// Point in 3-space
pub fn point(x: f32, y: f32, z: f32) -> Tuple4 {
    tuple4(x, y, z, 1.0)
}

/// Direction in 3-space
pub fn vector(x: f32, y: f32, z: f32) -> Tuple4 {
    tuple4(x, y, z, 0.0)
}

/// Opaque RGB color
pub fn color3(r: f32, g: f32, b: f32) -> Tuple4 {
    tuple4(r, g, b, 1.0)
}

/// RGBA color
pub fn color4(r: f32, g: f32, b: f32, a: f32) -> Tuple4 {
    tuple4(r, g, b, a)
}

impl Tuple4 {
    pub fn is_point(&self) -> bool {
        fleq(self.w, 1.0)
    }

    pub fn is_vector(&self) -> bool {
        fleq(self.w, 0.0)
    }

    pub fn r(&self) -> f32 {
        self.x
    }

    pub fn g(&self) -> f32 {
        self.y
    }

    pub fn b(&self) -> f32 {
        self.z
    }

    pub fn a(&self) -> f32 {
        self.w
    }

    /// Components as an array
    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl PartialEq for Tuple4 {
    fn eq(&self, other: &Self) -> bool {
        fleq(self.x, other.x) && fleq(self.y, other.y) && fleq(self.z, other.z) && fleq(self.w, other.w)
    }
}

impl Neg for Tuple4 {
    type Output = Tuple4;

    fn neg(self) -> Tuple4 {
        tuple4(-self.x, -self.y, -self.z, -self.w)
    }
}

impl Add for Tuple4 {
    type Output = Tuple4;

    fn add(self, rhs: Tuple4) -> Tuple4 {
        tuple4(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl Sub for Tuple4 {
    type Output = Tuple4;

    fn sub(self, rhs: Tuple4) -> Tuple4 {
        tuple4(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl Mul<f32> for Tuple4 {
    type Output = Tuple4;

    fn mul(self, s: f32) -> Tuple4 {
        tuple4(self.x * s, self.y * s, self.z * s, self.w * s)
    }
}

impl Mul<Tuple4> for f32 {
    type Output = Tuple4;

    fn mul(self, t: Tuple4) -> Tuple4 {
        t * self
    }
}
