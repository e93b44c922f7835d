//! Window style bits
//!
//! Values are the Win32 `WS_*` bits so the platform layer can pass them
//! through unchanged.

pub const WS_POPUP: u32 = 0x8000_0000;
pub const WS_CLIPSIBLINGS: u32 = 0x0400_0000;
pub const WS_CLIPCHILDREN: u32 = 0x0200_0000;
pub const WS_OVERLAPPEDWINDOW: u32 = 0x00CF_0000;

/// Style and extended style of a window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WindowStyle {
    pub style: u32,
    pub ex_style: u32,
}

impl WindowStyle {
    pub const fn new(style: u32, ex_style: u32) -> Self {
        Self { style, ex_style }
    }

    /// Framed, resizable top-level window
    pub const fn windowed() -> Self {
        Self::new(WS_OVERLAPPEDWINDOW | WS_CLIPCHILDREN | WS_CLIPSIBLINGS, 0)
    }

    /// Borderless popup keeping the given extended style
    pub const fn borderless(ex_style: u32) -> Self {
        Self::new(WS_POPUP, ex_style)
    }

    /// Popup windows have no border or caption
    pub fn is_popup(&self) -> bool {
        self.style & WS_POPUP != 0
    }
}
