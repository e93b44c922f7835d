//! DPI capability table
//!
//! The two DPI entry points the shell needs are resolved once at startup.
//! Newer systems provide them natively; older ones get emulations built on
//! always-available primitives. Callers only ever see [`CapabilityTable`].

use thiserror::Error;

use super::pixels::Dpi;

/// Opaque monitor identifier (the platform's monitor handle value)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MonitorId(pub isize);

/// Process DPI awareness level
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DpiAwareness {
    Unaware,
    System,
    PerMonitor,
}

/// Which DPI of a monitor to query
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonitorDpiType {
    Effective,
    Angular,
    Raw,
}

/// Where the entry points came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapabilityBackend {
    Native,
    Emulated,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("access denied")]
    AccessDenied,

    #[error("invalid argument")]
    InvalidArgument,

    #[error("platform call failed with HRESULT 0x{0:08X}")]
    Platform(u32),
}

/// DPI entry points
pub trait DpiApi {
    fn backend(&self) -> CapabilityBackend;

    fn set_process_dpi_awareness(&self, awareness: DpiAwareness) -> Result<(), CapabilityError>;

    fn dpi_for_monitor(&self, monitor: MonitorId, kind: MonitorDpiType) -> Result<Dpi, CapabilityError>;
}

/// Resolved DPI entry points
pub struct CapabilityTable {
    api: Box<dyn DpiApi>,
}

impl CapabilityTable {
    /// Use `native` when it resolved, otherwise build the emulation
    pub fn select<F>(native: Option<Box<dyn DpiApi>>, emulated: F) -> Self
    where
        F: FnOnce() -> Box<dyn DpiApi>,
    {
        let api = native.unwrap_or_else(emulated);
        log!("CapabilityTable: using {:?} DPI entry points", api.backend());
        Self { api }
    }

    pub fn backend(&self) -> CapabilityBackend {
        self.api.backend()
    }

    /// Opt in to per-monitor DPI. Must run before any other graphics call.
    pub fn enable_per_monitor_awareness(&self) -> Result<(), CapabilityError> {
        self.api.set_process_dpi_awareness(DpiAwareness::PerMonitor)
    }

    /// Effective DPI of `monitor`, or the reference DPI if the query fails
    /// or reports a zero axis
    pub fn effective_dpi(&self, monitor: MonitorId) -> Dpi {
        match self.api.dpi_for_monitor(monitor, MonitorDpiType::Effective) {
            Ok(dpi) if dpi.is_valid() => dpi,
            Ok(dpi) => {
                log!("effective_dpi({:?}) reported {:?}, assuming reference DPI", monitor, dpi);
                Dpi::REFERENCE
            }
            Err(e) => {
                log!("effective_dpi({:?}) failed: {}, assuming reference DPI", monitor, e);
                Dpi::REFERENCE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDpi {
        backend: CapabilityBackend,
        dpi: Result<Dpi, CapabilityError>,
    }

    impl DpiApi for FixedDpi {
        fn backend(&self) -> CapabilityBackend {
            self.backend
        }

        fn set_process_dpi_awareness(&self, _: DpiAwareness) -> Result<(), CapabilityError> {
            match self.backend {
                CapabilityBackend::Native => Ok(()),
                CapabilityBackend::Emulated => Err(CapabilityError::AccessDenied),
            }
        }

        fn dpi_for_monitor(&self, _: MonitorId, kind: MonitorDpiType) -> Result<Dpi, CapabilityError> {
            if kind != MonitorDpiType::Effective {
                return Err(CapabilityError::InvalidArgument);
            }
            self.dpi.clone()
        }
    }

    fn emulated() -> Box<dyn DpiApi> {
        Box::new(FixedDpi {
            backend: CapabilityBackend::Emulated,
            dpi: Ok(Dpi::uniform(120)),
        })
    }

    #[test]
    fn test_native_preferred_when_resolved() {
        let native: Box<dyn DpiApi> = Box::new(FixedDpi {
            backend: CapabilityBackend::Native,
            dpi: Ok(Dpi::uniform(144)),
        });
        let table = CapabilityTable::select(Some(native), emulated);
        assert_eq!(table.backend(), CapabilityBackend::Native);
        assert_eq!(table.effective_dpi(MonitorId(1)), Dpi::uniform(144));
        assert!(table.enable_per_monitor_awareness().is_ok());
    }

    #[test]
    fn test_falls_back_to_emulation() {
        let table = CapabilityTable::select(None, emulated);
        assert_eq!(table.backend(), CapabilityBackend::Emulated);
        assert_eq!(table.effective_dpi(MonitorId(1)), Dpi::uniform(120));
        assert_eq!(
            table.enable_per_monitor_awareness(),
            Err(CapabilityError::AccessDenied)
        );
    }

    #[test]
    fn test_failed_query_yields_reference_dpi() {
        let broken: Box<dyn DpiApi> = Box::new(FixedDpi {
            backend: CapabilityBackend::Native,
            dpi: Err(CapabilityError::Platform(0x8007_0057)),
        });
        let table = CapabilityTable::select(Some(broken), emulated);
        assert_eq!(table.effective_dpi(MonitorId(7)), Dpi::REFERENCE);
    }

    #[test]
    fn test_zero_dpi_yields_reference_dpi() {
        let table = CapabilityTable::select(None, || -> Box<dyn DpiApi> {
            Box::new(FixedDpi {
                backend: CapabilityBackend::Emulated,
                dpi: Ok(Dpi::new(0, 96)),
            })
        });
        assert_eq!(table.effective_dpi(MonitorId(1)), Dpi::REFERENCE);
    }
}
