//! Window status and event flag sets
//!
//! `StatusFlags` holds what is currently true about the window. `EventFlags`
//! holds what changed since the last time the main loop inspected the
//! window; the main loop clears it by taking it once per iteration.

use bitflags::bitflags;

bitflags! {
    /// Confirmed, currently-true window properties
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct StatusFlags: u32 {
        const CREATED    = 1 << 0;
        const ACTIVE     = 1 << 1;
        const VISIBLE    = 1 << 2;
        const FULLSCREEN = 1 << 3;
    }
}

bitflags! {
    /// Changes observed since the last inspection
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventFlags: u32 {
        const CREATED          = 1 << 0;
        const DESTROYED        = 1 << 1;
        const SHOWN            = 1 << 2;
        const HIDDEN           = 1 << 3;
        const ACTIVATED        = 1 << 4;
        const DEACTIVATED      = 1 << 5;
        const SIZE_CHANGED     = 1 << 6;
        const POSITION_CHANGED = 1 << 7;
    }
}
