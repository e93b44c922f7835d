//! GDI presentation of the backbuffer

use std::ffi::c_void;

use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    BeginPaint, EndPaint, GetDC, ReleaseDC, StretchDIBits, BITMAPINFO, BITMAPINFOHEADER, BI_RGB,
    DIB_RGB_COLORS, HDC, PAINTSTRUCT, SRCCOPY,
};

use crate::display::{Blit, BlitTarget, ImageHeader};

fn bitmap_info(header: &ImageHeader) -> BITMAPINFO {
    BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: header.width,
            biHeight: header.height,
            biPlanes: header.planes,
            biBitCount: header.bit_count,
            biCompression: BI_RGB.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

unsafe fn blit_to_dc(dc: HDC, blit: &Blit<'_>) {
    let info = bitmap_info(blit.header);
    let lines = StretchDIBits(
        dc,
        blit.dest.left,
        blit.dest.top,
        blit.dest.width(),
        blit.dest.height(),
        blit.source.left,
        blit.source.top,
        blit.source.width(),
        blit.source.height(),
        Some(blit.pixels.as_ptr() as *const c_void),
        &info,
        DIB_RGB_COLORS,
        SRCCOPY,
    );
    if lines == 0 {
        log!("WARN: StretchDIBits copied no scan lines");
    }
}

/// Stretch the backbuffer into the client area of `hwnd`
pub fn stretch_blit(hwnd: HWND, target: BlitTarget, blit: &Blit<'_>) {
    unsafe {
        match target {
            BlitTarget::Paint => {
                let mut ps = PAINTSTRUCT::default();
                let dc = BeginPaint(hwnd, &mut ps);
                blit_to_dc(dc, blit);
                let _ = EndPaint(hwnd, &ps);
            }
            BlitTarget::Window => {
                let dc = GetDC(hwnd);
                blit_to_dc(dc, blit);
                ReleaseDC(hwnd, dc);
            }
        }
    }
}
