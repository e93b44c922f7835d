//! Win32 window class, creation, window procedure and host queries

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;
use windows::core::{Error, HSTRING, PCWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    GetMonitorInfoW, GetStockObject, MonitorFromWindow, HBRUSH, MONITORINFO,
    MONITOR_DEFAULTTONEAREST, MONITOR_DEFAULTTOPRIMARY, MONITOR_FROM_FLAGS, WHITE_BRUSH,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::*;

use super::event::translate_message;
use super::paint;
use crate::display::{
    Blit, BlitTarget, CapabilityTable, Dpi, LogicalSize, MonitorId, PixelRect, Reply, Request,
    Router, ShowCommand, Surface, WindowHost, WindowId, WindowMessage, WindowPosition,
    WindowStyle, WINDOW_CLASS_NAME,
};

/// Startup failure carrying the platform error
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("window class registration failed: {0}")]
    RegisterClass(Error),

    #[error("window creation failed: {0}")]
    CreateWindow(Error),
}

impl ShellError {
    /// Process exit code: the Win32 error code when the HRESULT wraps one
    pub fn exit_code(&self) -> i32 {
        let error = match self {
            ShellError::RegisterClass(e) | ShellError::CreateWindow(e) => e,
        };
        let hr = error.code().0 as u32;
        if hr & 0xFFFF_0000 == 0x8007_0000 {
            (hr & 0xFFFF) as i32
        } else {
            hr as i32
        }
    }
}

type WindowCallback = Rc<dyn Fn(HWND, u32, WPARAM, LPARAM) -> Option<LRESULT>>;

thread_local! {
    static WINDOW_CALLBACK: RefCell<Option<WindowCallback>> = RefCell::new(None);
}

/// Set the window procedure callback
pub fn set_window_callback<F>(callback: F)
where
    F: Fn(HWND, u32, WPARAM, LPARAM) -> Option<LRESULT> + 'static,
{
    WINDOW_CALLBACK.with(|cb| {
        *cb.borrow_mut() = Some(Rc::new(callback));
    });
}

/// Clear the window procedure callback
pub fn clear_window_callback() {
    WINDOW_CALLBACK.with(|cb| {
        *cb.borrow_mut() = None;
    });
}

/// Window procedure
unsafe extern "system" fn wnd_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    // Cloned out so nested messages sent while the callback runs can call it
    // again
    let callback = WINDOW_CALLBACK.with(|cb| cb.borrow().clone());

    if let Some(callback) = callback {
        if let Some(result) = callback(hwnd, msg, wparam, lparam) {
            return result;
        }
    }
    DefWindowProcW(hwnd, msg, wparam, lparam)
}

/// Register the window class unless this instance already has it
pub fn register_window_class() -> Result<(), ShellError> {
    let class_name = HSTRING::from(WINDOW_CLASS_NAME);
    unsafe {
        let hinstance = GetModuleHandleW(None).map_err(ShellError::RegisterClass)?;

        let mut existing = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            ..Default::default()
        };
        if GetClassInfoExW(hinstance, &class_name, &mut existing).is_ok() {
            log!("register_window_class: {} already registered", WINDOW_CLASS_NAME);
            return Ok(());
        }

        let icon = LoadIconW(None, IDI_APPLICATION).unwrap_or_default();
        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(wnd_proc),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: hinstance.into(),
            hIcon: icon,
            hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
            hbrBackground: HBRUSH(GetStockObject(WHITE_BRUSH).0),
            lpszMenuName: PCWSTR::null(),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            hIconSm: icon,
        };

        let atom = RegisterClassExW(&wc);
        if atom == 0 {
            return Err(ShellError::RegisterClass(Error::from_win32()));
        }
        log!("register_window_class: registered {}", WINDOW_CLASS_NAME);
        Ok(())
    }
}

/// Create the main window, hidden, at `position` with an outer size of
/// `size`. The create handler resizes it to fit the client area.
pub fn create_window(
    title: &str,
    position: WindowPosition,
    size: LogicalSize,
    style: WindowStyle,
) -> Result<HWND, ShellError> {
    unsafe {
        let hinstance = GetModuleHandleW(None).map_err(ShellError::CreateWindow)?;

        CreateWindowExW(
            WINDOW_EX_STYLE(style.ex_style),
            &HSTRING::from(WINDOW_CLASS_NAME),
            &HSTRING::from(title),
            WINDOW_STYLE(style.style),
            position.x,
            position.y,
            size.width as i32,
            size.height as i32,
            None,
            None,
            hinstance,
            None,
        )
        .map_err(ShellError::CreateWindow)
    }
}

pub fn show_window(hwnd: HWND) {
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
    }
}

fn to_pixel_rect(rect: RECT) -> PixelRect {
    PixelRect::new(rect.left, rect.top, rect.right, rect.bottom)
}

fn to_rect(rect: PixelRect) -> RECT {
    RECT {
        left: rect.left,
        top: rect.top,
        right: rect.right,
        bottom: rect.bottom,
    }
}

fn monitor_info(hwnd: HWND, fallback: MONITOR_FROM_FLAGS) -> MONITORINFO {
    unsafe {
        let monitor = MonitorFromWindow(hwnd, fallback);
        let mut info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        let _ = GetMonitorInfoW(monitor, &mut info);
        info
    }
}

/// Work area of the primary display
pub fn primary_work_area() -> PixelRect {
    to_pixel_rect(monitor_info(HWND::default(), MONITOR_DEFAULTTOPRIMARY).rcWork)
}

/// Live queries against one window
pub struct Win32Host {
    hwnd: HWND,
    capabilities: Rc<CapabilityTable>,
}

impl Win32Host {
    pub fn new(hwnd: HWND, capabilities: Rc<CapabilityTable>) -> Self {
        Self { hwnd, capabilities }
    }
}

impl Surface for Win32Host {
    fn stretch_blit(&mut self, target: BlitTarget, blit: &Blit<'_>) {
        paint::stretch_blit(self.hwnd, target, blit);
    }
}

impl WindowHost for Win32Host {
    fn window_rect(&self) -> PixelRect {
        let mut rect = RECT::default();
        unsafe {
            let _ = GetWindowRect(self.hwnd, &mut rect);
        }
        to_pixel_rect(rect)
    }

    fn client_rect(&self) -> PixelRect {
        let mut rect = RECT::default();
        unsafe {
            let _ = GetClientRect(self.hwnd, &mut rect);
        }
        to_pixel_rect(rect)
    }

    fn monitor_dpi(&self) -> Dpi {
        let monitor = unsafe { MonitorFromWindow(self.hwnd, MONITOR_DEFAULTTONEAREST) };
        self.capabilities.effective_dpi(MonitorId(monitor.0 as isize))
    }

    fn monitor_rect(&self) -> PixelRect {
        to_pixel_rect(monitor_info(self.hwnd, MONITOR_DEFAULTTONEAREST).rcMonitor)
    }

    fn style(&self) -> WindowStyle {
        unsafe {
            WindowStyle::new(
                GetWindowLongW(self.hwnd, GWL_STYLE) as u32,
                GetWindowLongW(self.hwnd, GWL_EXSTYLE) as u32,
            )
        }
    }

    fn is_visible(&self) -> bool {
        unsafe { IsWindowVisible(self.hwnd).as_bool() }
    }

    fn adjust_window_rect(&self, client: PixelRect, style: WindowStyle) -> PixelRect {
        let mut rect = to_rect(client);
        unsafe {
            if let Err(e) = AdjustWindowRectEx(
                &mut rect,
                WINDOW_STYLE(style.style),
                false,
                WINDOW_EX_STYLE(style.ex_style),
            ) {
                log!("WARN: AdjustWindowRectEx failed: {:?}", e);
                return client;
            }
        }
        to_pixel_rect(rect)
    }
}

/// Perform a window mutation a handler asked for
pub fn apply_request(hwnd: HWND, request: &Request) {
    unsafe {
        let result = match *request {
            Request::Resize { size } => SetWindowPos(
                hwnd,
                HWND::default(),
                0,
                0,
                size.width as i32,
                size.height as i32,
                SWP_NOACTIVATE | SWP_NOMOVE | SWP_NOZORDER,
            ),
            Request::Place { rect } => SetWindowPos(
                hwnd,
                HWND::default(),
                rect.left,
                rect.top,
                rect.width(),
                rect.height(),
                SWP_NOACTIVATE | SWP_NOZORDER,
            ),
            Request::Reframe { rect, style } => {
                SetWindowLongW(hwnd, GWL_STYLE, style.style as i32);
                SetWindowLongW(hwnd, GWL_EXSTYLE, style.ex_style as i32);
                SetWindowPos(
                    hwnd,
                    HWND_TOP,
                    rect.left,
                    rect.top,
                    rect.width(),
                    rect.height(),
                    SWP_FRAMECHANGED | SWP_NOACTIVATE | SWP_NOZORDER | SWP_NOOWNERZORDER,
                )
            }
            Request::Show(command) => {
                let cmd = match command {
                    ShowCommand::Hide => SW_HIDE,
                    ShowCommand::Normal => SW_NORMAL,
                    ShowCommand::Maximize => SW_MAXIMIZE,
                };
                let _ = ShowWindow(hwnd, cmd);
                Ok(())
            }
        };
        if let Err(e) = result {
            log!("WARN: apply_request({:?}) failed: {:?}", request, e);
        }
    }
}

/// Route this thread's window messages through `router`.
///
/// The staged state is bound on the non-client create message. Requests a
/// handler returns are applied after the router borrow ends.
pub fn install_router(router: Rc<RefCell<Router>>, capabilities: Rc<CapabilityTable>) {
    set_window_callback(move |hwnd, msg, wparam, lparam| {
        let id = window_id(hwnd);

        if msg == WM_NCCREATE {
            match router.try_borrow_mut() {
                Ok(mut router) => {
                    router.associate(id);
                }
                Err(_) => log!("WARN: WM_NCCREATE while the router is busy, window not associated"),
            }
            return None;
        }

        // SAFETY: only wnd_proc calls this, with the system's own parameters
        let message = unsafe { translate_message(msg, wparam, lparam) };
        if let WindowMessage::Other(_) = message {
            return None;
        }

        let mut host = Win32Host::new(hwnd, capabilities.clone());
        let dispatch = match router.try_borrow_mut() {
            Ok(mut router) => router.dispatch(id, &mut host, &message),
            Err(_) => {
                log!("WARN: {:?} arrived while the router is busy, using default handling", message);
                return None;
            }
        };

        for request in &dispatch.requests {
            apply_request(hwnd, request);
        }
        match dispatch.reply {
            Reply::Handled(value) => Some(LRESULT(value)),
            Reply::Default => None,
        }
    });
}

/// Window id for a handle
pub fn window_id(hwnd: HWND) -> WindowId {
    WindowId(hwnd.0 as isize)
}
