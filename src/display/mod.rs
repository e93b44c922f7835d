//! Display - window state, DPI-aware geometry and the software backbuffer
//!
//! Everything here is platform independent. The platform layer decodes
//! messages into [`WindowMessage`], implements [`WindowHost`] and
//! [`MessagePump`], and applies the [`Request`]s handlers return.

pub mod backbuffer;
pub mod capability;
pub mod flags;
pub mod handlers;
pub mod host;
pub mod main_loop;
pub mod message;
pub mod pixels;
pub mod placement;
pub mod presenter;
pub mod rect;
pub mod router;
pub mod state;
pub mod style;

#[cfg(test)]
pub(crate) mod testing;

use std::time::Duration;

pub use backbuffer::{Backbuffer, BackbufferError, Framebuffer, FramebufferError, ImageHeader};
pub use capability::{CapabilityBackend, CapabilityError, CapabilityTable, DpiApi, DpiAwareness, MonitorDpiType, MonitorId};
pub use flags::{EventFlags, StatusFlags};
pub use host::{Blit, BlitTarget, Surface, WindowHost};
pub use main_loop::{LoopExit, MainLoop, MessagePump, PumpStatus};
pub use message::{Dispatch, Reply, Request, ShowCommand, SizeKind, WindowMessage};
pub use pixels::{Dpi, LogicalSize, PhysicalSize, REFERENCE_DPI};
pub use placement::initial_placement;
pub use rect::PixelRect;
pub use router::{Router, WindowId};
pub use state::{RestoreState, WindowPosition, WindowState};
pub use style::WindowStyle;

/// Title of the main window
pub const WINDOW_TITLE: &str = "The Ray Tracer Challenge";

/// Window class registered for the main window
pub const WINDOW_CLASS_NAME: &str = "WSI_WndClass_rtc";

/// Initial client area, logical pixels
pub const DEFAULT_CLIENT_SIZE: LogicalSize = LogicalSize::new(800, 600);

/// Pause between main loop iterations
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);
