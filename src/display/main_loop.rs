//! Main loop - pumps messages, consumes events and presents at a fixed pace
//!
//! Each iteration dispatches everything queued without blocking, takes the
//! window's accumulated events (the loop is their only reader, so they are
//! cleared here), stops on `DESTROYED`, presents through the window DC while
//! visible, then sleeps for the frame interval.

use std::cell::RefCell;
use std::time::Duration;

use super::flags::EventFlags;
use super::host::{BlitTarget, Surface};
use super::presenter;
use super::router::{Router, WindowId};
use super::state::WindowState;

/// Outcome of one non-blocking pump
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PumpStatus {
    Continue,
    /// The thread's queue reported quit or an error
    Quit,
}

/// Why the loop stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopExit {
    Destroyed,
    Quit,
    /// The window's state is no longer in the router
    Detached,
}

/// Message source and window DC for the loop's window.
///
/// Dispatching re-enters the router, so implementations must not be called
/// while the router is borrowed.
pub trait MessagePump: Surface {
    /// Dispatch every queued message without blocking
    fn pump_messages(&mut self) -> PumpStatus;

    /// Pace the loop
    fn wait_frame(&mut self, interval: Duration);

    /// Destroy the platform window. Returns false if it was already gone.
    fn destroy_window(&mut self) -> bool;

    /// Dispatch messages still queued for the destroyed window, without
    /// blocking
    fn drain_messages(&mut self);
}

pub struct MainLoop {
    pub window: WindowId,
    pub frame_interval: Duration,
}

impl MainLoop {
    pub fn new(window: WindowId, frame_interval: Duration) -> Self {
        Self {
            window,
            frame_interval,
        }
    }

    pub fn run<P: MessagePump>(&self, pump: &mut P, router: &RefCell<Router>) -> LoopExit {
        self.run_with(pump, router, |_, _| {})
    }

    /// Run until the window is destroyed, calling `on_frame` once per
    /// iteration with the events taken in that iteration.
    pub fn run_with<P, F>(&self, pump: &mut P, router: &RefCell<Router>, mut on_frame: F) -> LoopExit
    where
        P: MessagePump,
        F: FnMut(EventFlags, &mut WindowState),
    {
        log!("MainLoop: running at {} ms per frame", self.frame_interval.as_millis());
        loop {
            if pump.pump_messages() == PumpStatus::Quit {
                log!("MainLoop: quit received");
                return LoopExit::Quit;
            }

            {
                let mut router = router.borrow_mut();
                let Some(state) = router.window_mut(self.window) else {
                    log!("WARN: MainLoop: window state missing, stopping");
                    return LoopExit::Detached;
                };

                let events = state.take_events();
                if events.contains(EventFlags::DESTROYED) {
                    log!("MainLoop: window destroyed");
                    return LoopExit::Destroyed;
                }
                if !events.is_empty() {
                    log!("MainLoop: events {:?}", events);
                }
                on_frame(events, &mut *state);

                if state.is_visible() {
                    presenter::present(state, &mut *pump, BlitTarget::Window);
                }
            }

            pump.wait_frame(self.frame_interval);
        }
    }

    /// Destroy the window, drain what it left queued, detach its state and
    /// free the backbuffer. Returns true if a backbuffer was released.
    pub fn shutdown<P: MessagePump>(&self, pump: &mut P, router: &RefCell<Router>) -> bool {
        if pump.destroy_window() {
            pump.drain_messages();
        } else {
            log!("WARN: MainLoop::shutdown: window already destroyed");
        }

        let detached = router.borrow_mut().detach(self.window);
        let Some(mut state) = detached else {
            return false;
        };
        let released = state.backbuffer.release();
        log!("MainLoop: shutdown complete, backbuffer released={}", released);
        released
    }
}
