//! Window messages understood by the shell and the replies handlers give
//!
//! Platform messages are decoded into [`WindowMessage`] by the platform
//! layer. Anything the shell does not handle arrives as
//! [`WindowMessage::Other`] and goes to default processing.

use super::pixels::{Dpi, PhysicalSize};
use super::rect::PixelRect;
use super::style::WindowStyle;

/// `SC_KEYMENU`: system menu opened from the keyboard
pub const SC_KEYMENU: u32 = 0xF100;
/// `VK_RETURN`
pub const VK_RETURN: u32 = 0x0D;

/// Why a window was resized
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeKind {
    Restored,
    Minimized,
    Maximized,
    /// Another window was restored to its former size
    MaxShow,
    /// Another window was maximized over this one
    MaxHide,
}

impl SizeKind {
    /// Decode the platform's `SIZE_*` value
    pub fn from_raw(raw: usize) -> Self {
        match raw {
            1 => SizeKind::Minimized,
            2 => SizeKind::Maximized,
            3 => SizeKind::MaxShow,
            4 => SizeKind::MaxHide,
            _ => SizeKind::Restored,
        }
    }

    /// Minimized or covered by a maximized window
    pub fn hides_window(&self) -> bool {
        matches!(self, SizeKind::Minimized | SizeKind::MaxHide)
    }
}

/// Decoded window message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowMessage {
    Create,
    Close,
    Activate {
        active: bool,
        minimized: bool,
    },
    ShowWindow {
        shown: bool,
    },
    Move,
    Size {
        kind: SizeKind,
        /// New client area in physical pixels
        client: PhysicalSize,
    },
    DpiChanged {
        dpi: Dpi,
        /// Window rectangle proposed by the platform for the new DPI
        suggested: PixelRect,
    },
    SysCommand {
        /// Command with the low four bits masked off
        command: u32,
        /// Key that triggered a keyboard menu command
        key: u32,
    },
    Paint,
    /// Anything else, by raw message id
    Other(u32),
}

impl WindowMessage {
    /// Alt+Enter arrives as a keyboard system menu command for Return
    pub fn is_alt_enter(&self) -> bool {
        matches!(
            self,
            WindowMessage::SysCommand { command, key } if *command == SC_KEYMENU && *key == VK_RETURN
        )
    }
}

/// How to show a window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowCommand {
    Hide,
    Normal,
    Maximize,
}

/// Window mutation requested by a handler.
///
/// Requests run after the handler returns, so messages the platform sends
/// synchronously while applying them reach the router normally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    /// Resize without moving or activating
    Resize { size: PhysicalSize },
    /// Move and resize without activating
    Place { rect: PixelRect },
    /// Change style, then move and resize to `rect` on top with frame
    /// recalculation
    Reframe { rect: PixelRect, style: WindowStyle },
    Show(ShowCommand),
}

/// What to return to the platform for a message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Handled; return this value
    Handled(isize),
    /// Run the platform's default processing
    Default,
}

/// Result of routing one message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch {
    pub reply: Reply,
    pub requests: Vec<Request>,
}

impl Dispatch {
    pub fn handled() -> Self {
        Self {
            reply: Reply::Handled(0),
            requests: Vec::new(),
        }
    }

    pub fn default_processing() -> Self {
        Self {
            reply: Reply::Default,
            requests: Vec::new(),
        }
    }

    pub fn with(mut self, request: Request) -> Self {
        self.requests.push(request);
        self
    }

    pub fn is_default(&self) -> bool {
        self.reply == Reply::Default
    }
}
