//! Presenter - stretches the backbuffer into the client area
//!
//! The source is the whole backbuffer (already physical). The destination is
//! the logical client size converted at the *current* DPI, so a DPI change
//! without a reallocation still fills the client area.

use super::host::{Blit, BlitTarget, Surface};
use super::rect::PixelRect;
use super::state::WindowState;

/// Blit parameters for the current state, or None without a backbuffer
pub fn blit_for(state: &WindowState) -> Option<Blit<'_>> {
    let pixels = state.backbuffer.pixels()?;
    Some(Blit {
        dest: PixelRect::from_size(state.physical_client_size()),
        source: PixelRect::from_size(state.backbuffer.size()),
        header: state.backbuffer.header(),
        pixels,
    })
}

/// Present the backbuffer. Returns false when there was nothing to present.
pub fn present(state: &WindowState, surface: &mut dyn Surface, target: BlitTarget) -> bool {
    match blit_for(state) {
        Some(blit) => {
            surface.stretch_blit(target, &blit);
            true
        }
        None => false,
    }
}
