//! Router - maps platform window ids to their state
//!
//! The state for a window is staged before the window exists and bound to
//! its id on the first message the platform delivers for it (non-client
//! create). Every later message looks the state up here. Messages for
//! unknown windows get default processing.

use std::collections::HashMap;

use super::handlers;
use super::host::WindowHost;
use super::message::{Dispatch, WindowMessage};
use super::state::WindowState;

/// Platform window handle value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowId(pub isize);

#[derive(Debug, Default)]
pub struct Router {
    windows: HashMap<WindowId, WindowState>,
    /// State for the window currently being created
    pending: Option<WindowState>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `state` until the next window announces itself
    pub fn stage(&mut self, state: WindowState) {
        if self.pending.replace(state).is_some() {
            log!("WARN: Router::stage: replacing a staged window that was never created");
        }
    }

    /// Bind the staged state to `id`. Returns false when nothing was staged.
    pub fn associate(&mut self, id: WindowId) -> bool {
        match self.pending.take() {
            Some(state) => {
                log!("Router: window {:#x} associated", id.0);
                self.windows.insert(id, state);
                true
            }
            None => false,
        }
    }

    pub fn is_associated(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    /// Route a message to its handler
    pub fn dispatch(&mut self, id: WindowId, host: &mut dyn WindowHost, message: &WindowMessage) -> Dispatch {
        match self.windows.get_mut(&id) {
            Some(state) => handlers::handle(state, host, message),
            None => Dispatch::default_processing(),
        }
    }

    pub fn window(&self, id: WindowId) -> Option<&WindowState> {
        self.windows.get(&id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut WindowState> {
        self.windows.get_mut(&id)
    }

    /// Remove the mapping for `id` and hand back its state
    pub fn detach(&mut self, id: WindowId) -> Option<WindowState> {
        let state = self.windows.remove(&id);
        if state.is_some() {
            log!("Router: window {:#x} detached", id.0);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::message::{Reply, SizeKind};
    use crate::display::pixels::{LogicalSize, PhysicalSize};
    use crate::display::testing::{FakeHost, Harness};

    #[test]
    fn test_messages_before_association_pass_through() {
        let mut h = Harness::staged(LogicalSize::new(800, 600));

        for message in [
            WindowMessage::Create,
            WindowMessage::Paint,
            WindowMessage::Size {
                kind: SizeKind::Restored,
                client: PhysicalSize::new(10, 10),
            },
        ] {
            let dispatch = h.router.dispatch(h.id, &mut h.host, &message);
            assert!(dispatch.is_default());
            assert!(dispatch.requests.is_empty());
        }
        assert!(!h.router.is_associated(h.id));
    }

    #[test]
    fn test_unrecognised_messages_pass_through() {
        let mut h = Harness::created(LogicalSize::new(800, 600));
        let dispatch = h.send(WindowMessage::Other(0x0020));
        assert_eq!(dispatch.reply, Reply::Default);
    }

    #[test]
    fn test_associate_without_staged_state() {
        let mut router = Router::new();
        assert!(!router.associate(WindowId(7)));
        assert!(router.window(WindowId(7)).is_none());
    }

    #[test]
    fn test_messages_for_other_windows_pass_through() {
        let mut h = Harness::created(LogicalSize::new(800, 600));
        let mut other = FakeHost::single_monitor(96);
        let dispatch = h.router.dispatch(WindowId(2), &mut other, &WindowMessage::Close);
        assert!(dispatch.is_default());
        assert!(h.state().is_created());
    }

    #[test]
    fn test_detach_removes_mapping() {
        let mut h = Harness::created(LogicalSize::new(800, 600));
        let state = h.router.detach(h.id).unwrap();
        assert!(state.backbuffer.is_allocated());
        assert!(!h.router.is_associated(h.id));
        assert!(h.router.detach(h.id).is_none());

        let dispatch = h.router.dispatch(h.id, &mut h.host, &WindowMessage::Paint);
        assert!(dispatch.is_default());
    }
}
