//! Platform seams used by the handlers, presenter and main loop
//!
//! Handlers read window and monitor properties through [`WindowHost`];
//! they never write to the platform directly (see
//! [`Request`](super::message::Request)).

use super::backbuffer::ImageHeader;
use super::pixels::Dpi;
use super::rect::PixelRect;
use super::style::WindowStyle;

/// Which device context a blit goes through
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlitTarget {
    /// Paint DC, inside paint message handling
    Paint,
    /// Window DC, outside paint handling
    Window,
}

/// Stretch-copy of the backbuffer into the client area
#[derive(Clone, Copy, Debug)]
pub struct Blit<'a> {
    pub dest: PixelRect,
    pub source: PixelRect,
    pub header: &'a ImageHeader,
    pub pixels: &'a [u8],
}

/// Something the backbuffer can be blitted onto
pub trait Surface {
    fn stretch_blit(&mut self, target: BlitTarget, blit: &Blit<'_>);
}

/// Read access to the window being handled
pub trait WindowHost: Surface {
    /// Window rectangle including borders, physical screen pixels
    fn window_rect(&self) -> PixelRect;

    /// Client rectangle, physical pixels, origin at the client's top-left
    fn client_rect(&self) -> PixelRect;

    /// Effective DPI of the monitor nearest the window
    fn monitor_dpi(&self) -> Dpi;

    /// Full rectangle of the monitor nearest the window
    fn monitor_rect(&self) -> PixelRect;

    fn style(&self) -> WindowStyle;

    /// Whether the platform currently has the window marked visible
    fn is_visible(&self) -> bool;

    /// Window rectangle needed for a client rectangle of `client` under
    /// `style`
    fn adjust_window_rect(&self, client: PixelRect, style: WindowStyle) -> PixelRect;
}
