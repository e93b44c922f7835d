//! WindowState - the single source of truth for one window
//!
//! Geometry is stored in logical pixels; the DPI of the hosting monitor is
//! kept alongside so physical extents can be derived on demand.

use super::backbuffer::{Backbuffer, Framebuffer, FramebufferError};
use super::flags::{EventFlags, StatusFlags};
use super::pixels::{Dpi, LogicalSize, PhysicalSize};
use super::rect::PixelRect;
use super::style::WindowStyle;

/// Windowed-mode placement saved while fullscreen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RestoreState {
    /// Window rectangle (with borders) in physical pixels
    pub rect: PixelRect,
    pub style: WindowStyle,
}

/// Window position in virtual screen coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

impl WindowPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Complete window state
#[derive(Debug)]
pub struct WindowState {
    pub status: StatusFlags,
    pub events: EventFlags,
    pub position: WindowPosition,
    /// Size including borders and chrome, logical pixels
    pub window_size: LogicalSize,
    /// Size of the client area, logical pixels
    pub client_size: LogicalSize,
    /// DPI of the monitor currently hosting the window
    pub dpi: Dpi,
    /// Present only while fullscreen
    pub restore: Option<RestoreState>,
    pub backbuffer: Backbuffer,
}

impl WindowState {
    /// State for a window about to be created at `position` with a client
    /// area of `client_size` logical pixels.
    pub fn new(position: WindowPosition, client_size: LogicalSize) -> Self {
        Self::with_backbuffer(position, client_size, Backbuffer::new())
    }

    pub fn with_backbuffer(
        position: WindowPosition,
        client_size: LogicalSize,
        backbuffer: Backbuffer,
    ) -> Self {
        Self {
            status: StatusFlags::empty(),
            events: EventFlags::empty(),
            position,
            window_size: client_size,
            client_size,
            dpi: Dpi::REFERENCE,
            restore: None,
            backbuffer,
        }
    }

    pub fn is_created(&self) -> bool {
        self.status.contains(StatusFlags::CREATED)
    }

    pub fn is_visible(&self) -> bool {
        self.status.contains(StatusFlags::VISIBLE)
    }

    pub fn is_active(&self) -> bool {
        self.status.contains(StatusFlags::ACTIVE)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.status.contains(StatusFlags::FULLSCREEN)
    }

    /// Client area in physical pixels at the current DPI
    pub fn physical_client_size(&self) -> PhysicalSize {
        self.client_size.to_physical(self.dpi)
    }

    /// Read and clear the accumulated events
    pub fn take_events(&mut self) -> EventFlags {
        std::mem::take(&mut self.events)
    }

    /// Resize the backbuffer, keeping the previous one on failure
    pub(crate) fn resize_backbuffer(&mut self, size: PhysicalSize) -> bool {
        match self.backbuffer.resize(size) {
            Ok(()) => true,
            Err(e) => {
                log!(
                    "WARN: backbuffer resize to {}x{} failed: {}; keeping {}x{}",
                    size.width,
                    size.height,
                    e,
                    self.backbuffer.width(),
                    self.backbuffer.height()
                );
                false
            }
        }
    }

    /// Describe the active backbuffer to rendering code
    pub fn framebuffer(&mut self) -> Result<Framebuffer<'_>, FramebufferError> {
        self.backbuffer.framebuffer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_uninitialized() {
        let state = WindowState::new(WindowPosition::new(560, 240), LogicalSize::new(800, 600));
        assert!(state.status.is_empty());
        assert!(state.events.is_empty());
        assert!(!state.is_created());
        assert_eq!(state.dpi, Dpi::REFERENCE);
        assert_eq!(state.window_size, state.client_size);
        assert!(state.restore.is_none());
        assert!(!state.backbuffer.is_allocated());
    }

    #[test]
    fn test_take_events_clears() {
        let mut state = WindowState::new(WindowPosition::default(), LogicalSize::new(1, 1));
        state.events |= EventFlags::SHOWN | EventFlags::ACTIVATED;

        assert_eq!(state.take_events(), EventFlags::SHOWN | EventFlags::ACTIVATED);
        assert!(state.events.is_empty());
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_physical_client_size_tracks_dpi() {
        let mut state = WindowState::new(WindowPosition::default(), LogicalSize::new(800, 600));
        state.dpi = Dpi::uniform(144);
        assert_eq!(state.physical_client_size(), PhysicalSize::new(1200, 900));
    }

    #[test]
    fn test_framebuffer_requires_backbuffer() {
        let mut state = WindowState::new(WindowPosition::default(), LogicalSize::new(4, 4));
        assert_eq!(state.framebuffer().unwrap_err(), FramebufferError::NoBackbuffer);

        assert!(state.resize_backbuffer(PhysicalSize::new(4, 4)));
        let fb = state.framebuffer().unwrap();
        assert_eq!((fb.width, fb.height, fb.stride), (4, 4, 16));
    }
}
