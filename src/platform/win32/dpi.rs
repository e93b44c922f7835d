//! DPI entry points for Windows
//!
//! `GetDpiForMonitor` and `SetProcessDpiAwareness` live in Shcore.dll, which
//! older systems lack, so they are resolved at runtime. Each missing entry
//! falls back to a GDI emulation.

use std::ffi::c_void;

use windows::core::{s, w, HRESULT};
use windows::Win32::Foundation::{E_ACCESSDENIED, E_INVALIDARG, HMODULE};
use windows::Win32::Graphics::Gdi::{GetDC, GetDeviceCaps, ReleaseDC, HMONITOR, LOGPIXELSX, LOGPIXELSY};
use windows::Win32::System::LibraryLoader::{FreeLibrary, GetProcAddress, LoadLibraryW};
use windows::Win32::UI::HiDpi::{
    MDT_ANGULAR_DPI, MDT_EFFECTIVE_DPI, MDT_RAW_DPI, MONITOR_DPI_TYPE, PROCESS_DPI_AWARENESS,
    PROCESS_DPI_UNAWARE, PROCESS_PER_MONITOR_DPI_AWARE, PROCESS_SYSTEM_DPI_AWARE,
};
use windows::Win32::UI::WindowsAndMessaging::SetProcessDPIAware;

use crate::display::{CapabilityBackend, CapabilityError, CapabilityTable, Dpi, DpiApi, DpiAwareness, MonitorDpiType, MonitorId};

type GetDpiForMonitorFn = unsafe extern "system" fn(HMONITOR, MONITOR_DPI_TYPE, *mut u32, *mut u32) -> HRESULT;
type SetProcessDpiAwarenessFn = unsafe extern "system" fn(PROCESS_DPI_AWARENESS) -> HRESULT;

fn hresult_error(hr: HRESULT) -> CapabilityError {
    if hr == E_ACCESSDENIED {
        CapabilityError::AccessDenied
    } else if hr == E_INVALIDARG {
        CapabilityError::InvalidArgument
    } else {
        CapabilityError::Platform(hr.0 as u32)
    }
}

/// Emulation on primitives every Windows version has: system-wide DPI
/// awareness and the screen DC's logical pixels per inch.
pub struct GdiDpi;

impl DpiApi for GdiDpi {
    fn backend(&self) -> CapabilityBackend {
        CapabilityBackend::Emulated
    }

    fn set_process_dpi_awareness(&self, _awareness: DpiAwareness) -> Result<(), CapabilityError> {
        if unsafe { SetProcessDPIAware() }.as_bool() {
            Ok(())
        } else {
            Err(CapabilityError::AccessDenied)
        }
    }

    /// Only the effective DPI can be emulated; it is the same on every
    /// monitor.
    fn dpi_for_monitor(&self, _monitor: MonitorId, kind: MonitorDpiType) -> Result<Dpi, CapabilityError> {
        if kind != MonitorDpiType::Effective {
            return Err(CapabilityError::InvalidArgument);
        }
        unsafe {
            let dc = GetDC(None);
            let x = GetDeviceCaps(dc, LOGPIXELSX);
            let y = GetDeviceCaps(dc, LOGPIXELSY);
            ReleaseDC(None, dc);
            Ok(Dpi::new(x.max(0) as u32, y.max(0) as u32))
        }
    }
}

/// Entry points resolved from Shcore.dll
pub struct ShcoreDpi {
    module: HMODULE,
    get_dpi_for_monitor: Option<GetDpiForMonitorFn>,
    set_process_dpi_awareness: Option<SetProcessDpiAwarenessFn>,
}

impl ShcoreDpi {
    /// Load Shcore.dll. Returns None when the library is missing.
    pub fn load() -> Option<Self> {
        unsafe {
            let module = match LoadLibraryW(w!("Shcore.dll")) {
                Ok(module) => module,
                Err(e) => {
                    log!("ShcoreDpi::load: Shcore.dll unavailable: {:?}", e);
                    return None;
                }
            };

            let get_dpi_for_monitor = GetProcAddress(module, s!("GetDpiForMonitor"))
                .map(|f| std::mem::transmute::<unsafe extern "system" fn() -> isize, GetDpiForMonitorFn>(f));
            let set_process_dpi_awareness = GetProcAddress(module, s!("SetProcessDpiAwareness")).map(|f| {
                std::mem::transmute::<unsafe extern "system" fn() -> isize, SetProcessDpiAwarenessFn>(f)
            });
            log!(
                "ShcoreDpi::load: GetDpiForMonitor={}, SetProcessDpiAwareness={}",
                get_dpi_for_monitor.is_some(),
                set_process_dpi_awareness.is_some()
            );

            Some(Self {
                module,
                get_dpi_for_monitor,
                set_process_dpi_awareness,
            })
        }
    }
}

impl DpiApi for ShcoreDpi {
    fn backend(&self) -> CapabilityBackend {
        CapabilityBackend::Native
    }

    fn set_process_dpi_awareness(&self, awareness: DpiAwareness) -> Result<(), CapabilityError> {
        let Some(set_awareness) = self.set_process_dpi_awareness else {
            return GdiDpi.set_process_dpi_awareness(awareness);
        };
        let level = match awareness {
            DpiAwareness::Unaware => PROCESS_DPI_UNAWARE,
            DpiAwareness::System => PROCESS_SYSTEM_DPI_AWARE,
            DpiAwareness::PerMonitor => PROCESS_PER_MONITOR_DPI_AWARE,
        };
        let hr = unsafe { set_awareness(level) };
        if hr.is_ok() {
            Ok(())
        } else {
            Err(hresult_error(hr))
        }
    }

    fn dpi_for_monitor(&self, monitor: MonitorId, kind: MonitorDpiType) -> Result<Dpi, CapabilityError> {
        let Some(get_dpi) = self.get_dpi_for_monitor else {
            return GdiDpi.dpi_for_monitor(monitor, kind);
        };
        let kind = match kind {
            MonitorDpiType::Effective => MDT_EFFECTIVE_DPI,
            MonitorDpiType::Angular => MDT_ANGULAR_DPI,
            MonitorDpiType::Raw => MDT_RAW_DPI,
        };
        let mut x = 0u32;
        let mut y = 0u32;
        let hr = unsafe { get_dpi(HMONITOR(monitor.0 as *mut c_void), kind, &mut x, &mut y) };
        if hr.is_ok() {
            Ok(Dpi::new(x, y))
        } else {
            Err(hresult_error(hr))
        }
    }
}

impl Drop for ShcoreDpi {
    fn drop(&mut self) {
        unsafe {
            let _ = FreeLibrary(self.module);
        }
    }
}

/// Resolve the DPI entry points once for the process
pub fn resolve_capabilities() -> CapabilityTable {
    CapabilityTable::select(
        ShcoreDpi::load().map(|api| Box::new(api) as Box<dyn DpiApi>),
        || Box::new(GdiDpi),
    )
}
