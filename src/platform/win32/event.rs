//! Win32 message decoding and the non-blocking message pump

use std::time::Duration;

use windows::Win32::Foundation::{HWND, LPARAM, RECT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::*;

use super::paint;
use crate::display::{
    Blit, BlitTarget, Dpi, MessagePump, PhysicalSize, PixelRect, PumpStatus, SizeKind, Surface,
    WindowMessage,
};

/// Upper bound on messages dispatched while draining after destroy
pub const MAX_DRAIN_MESSAGES: usize = 256;

fn loword(value: usize) -> u32 {
    (value & 0xFFFF) as u32
}

fn hiword(value: usize) -> u32 {
    ((value >> 16) & 0xFFFF) as u32
}

/// Decode a raw window message
///
/// # Safety
///
/// `lparam` must be the parameter the system delivered with `msg`. For
/// `WM_DPICHANGED` that is a pointer to the suggested window `RECT`, read
/// here unless it is null.
pub unsafe fn translate_message(msg: u32, wparam: WPARAM, lparam: LPARAM) -> WindowMessage {
    match msg {
        WM_CREATE => WindowMessage::Create,
        WM_CLOSE => WindowMessage::Close,
        WM_ACTIVATE => WindowMessage::Activate {
            active: loword(wparam.0) != 0,
            minimized: hiword(wparam.0) != 0,
        },
        WM_SHOWWINDOW => WindowMessage::ShowWindow {
            shown: wparam.0 != 0,
        },
        WM_MOVE => WindowMessage::Move,
        WM_SIZE => WindowMessage::Size {
            kind: SizeKind::from_raw(wparam.0),
            client: PhysicalSize::new(loword(lparam.0 as usize), hiword(lparam.0 as usize)),
        },
        WM_DPICHANGED => {
            let Some(rect) = (lparam.0 as *const RECT).as_ref() else {
                log!("WARN: WM_DPICHANGED without a suggested rectangle");
                return WindowMessage::Other(msg);
            };
            WindowMessage::DpiChanged {
                dpi: Dpi::new(loword(wparam.0), hiword(wparam.0)),
                suggested: PixelRect::new(rect.left, rect.top, rect.right, rect.bottom),
            }
        }
        WM_SYSCOMMAND => WindowMessage::SysCommand {
            command: (wparam.0 & 0xFFF0) as u32,
            key: lparam.0 as u32,
        },
        WM_PAINT => WindowMessage::Paint,
        other => WindowMessage::Other(other),
    }
}

/// Message pump and window DC for the main window
pub struct Win32Pump {
    hwnd: HWND,
}

impl Win32Pump {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }
}

impl Surface for Win32Pump {
    fn stretch_blit(&mut self, target: BlitTarget, blit: &Blit<'_>) {
        paint::stretch_blit(self.hwnd, target, blit);
    }
}

impl MessagePump for Win32Pump {
    fn pump_messages(&mut self) -> PumpStatus {
        unsafe {
            let mut msg = MSG::default();
            while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
                if msg.message == WM_QUIT {
                    return PumpStatus::Quit;
                }
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
        PumpStatus::Continue
    }

    fn wait_frame(&mut self, interval: Duration) {
        std::thread::sleep(interval);
    }

    fn destroy_window(&mut self) -> bool {
        match unsafe { DestroyWindow(self.hwnd) } {
            Ok(()) => true,
            Err(e) => {
                log!("DestroyWindow failed: {:?}", e);
                false
            }
        }
    }

    fn drain_messages(&mut self) {
        let mut drained = 0;
        unsafe {
            let mut msg = MSG::default();
            while drained < MAX_DRAIN_MESSAGES && PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
                drained += 1;
                if msg.message == WM_QUIT {
                    break;
                }
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
        log!("Win32Pump: drained {} messages after destroy", drained);
    }
}
