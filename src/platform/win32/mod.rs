//! Win32 platform implementation

pub mod dpi;
pub mod event;
pub mod paint;
pub mod window;

pub use dpi::{resolve_capabilities, GdiDpi, ShcoreDpi};
pub use event::{translate_message, Win32Pump};
pub use window::{
    apply_request, clear_window_callback, create_window, install_router, primary_work_area,
    register_window_class, set_window_callback, show_window, window_id, ShellError, Win32Host,
};
