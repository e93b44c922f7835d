//! Logical and physical pixel spaces
//!
//! A logical pixel is one physical pixel at [`REFERENCE_DPI`]. Conversions
//! truncate toward zero in both directions; every geometry computation in
//! the shell goes through these functions so repeated resize events convert
//! the same way each time.

/// DPI at which logical and physical pixels coincide
pub const REFERENCE_DPI: u32 = 96;

/// Convert a physical extent to logical pixels
pub fn physical_to_logical(dim: u32, dpi: u32) -> u32 {
    if dpi == 0 {
        return dim;
    }
    (u64::from(dim) * u64::from(REFERENCE_DPI) / u64::from(dpi)) as u32
}

/// Convert a logical extent to physical pixels
pub fn logical_to_physical(dim: u32, dpi: u32) -> u32 {
    (u64::from(dim) * u64::from(dpi) / u64::from(REFERENCE_DPI)).min(u64::from(u32::MAX)) as u32
}

/// Per-axis DPI of a display output
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dpi {
    pub x: u32,
    pub y: u32,
}

impl Dpi {
    /// 100% scaling
    pub const REFERENCE: Dpi = Dpi::uniform(REFERENCE_DPI);

    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub const fn uniform(dpi: u32) -> Self {
        Self { x: dpi, y: dpi }
    }

    /// Both axes nonzero, so it can divide a conversion
    pub const fn is_valid(&self) -> bool {
        self.x != 0 && self.y != 0
    }
}

impl Default for Dpi {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Extent in logical (DPI-independent) pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LogicalSize {
    pub width: u32,
    pub height: u32,
}

impl LogicalSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn to_physical(self, dpi: Dpi) -> PhysicalSize {
        PhysicalSize::new(
            logical_to_physical(self.width, dpi.x),
            logical_to_physical(self.height, dpi.y),
        )
    }
}

/// Extent in device pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn to_logical(self, dpi: Dpi) -> LogicalSize {
        LogicalSize::new(
            physical_to_logical(self.width, dpi.x),
            physical_to_logical(self.height, dpi.y),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
