//! Fake platform for handler and main loop tests
//!
//! `FakeHost` keeps a window rectangle, a style and a set of monitors, and
//! answers with the messages the platform would send back synchronously
//! when a [`Request`] is applied. `Harness` wires it to a [`Router`] and
//! delivers those follow-up messages depth-first, the way nested window
//! procedure calls arrive.

use std::cell::Cell;
use std::rc::Rc;

use super::backbuffer::{Backbuffer, BackbufferError, PixelAllocator};
use super::flags::EventFlags;
use super::host::{Blit, BlitTarget, Surface, WindowHost};
use super::message::{Dispatch, Request, ShowCommand, SizeKind, WindowMessage, SC_KEYMENU, VK_RETURN};
use super::pixels::{Dpi, LogicalSize, PhysicalSize};
use super::rect::PixelRect;
use super::router::{Router, WindowId};
use super::state::{WindowPosition, WindowState};
use super::style::WindowStyle;

/// Border of a framed window: left, top (caption included), right, bottom
pub const BORDER: (i32, i32, i32, i32) = (8, 31, 8, 8);

#[derive(Clone, Copy, Debug)]
pub struct FakeMonitor {
    pub rect: PixelRect,
    pub dpi: Dpi,
}

impl FakeMonitor {
    pub fn new(rect: PixelRect, dpi: u32) -> Self {
        Self {
            rect,
            dpi: Dpi::uniform(dpi),
        }
    }
}

#[derive(Debug)]
pub struct FakeHost {
    pub window: PixelRect,
    pub style: WindowStyle,
    pub monitors: Vec<FakeMonitor>,
    pub visible: bool,
    pub blits: Vec<(BlitTarget, PixelRect, PixelRect)>,
}

impl FakeHost {
    /// 1920x1080 primary monitor at `dpi`
    pub fn single_monitor(dpi: u32) -> Self {
        Self::with_monitors(vec![FakeMonitor::new(PixelRect::new(0, 0, 1920, 1080), dpi)])
    }

    /// 1920x1080 primary at 96 DPI with a 3840x2160 monitor at 192 DPI to
    /// its right
    pub fn dual_monitor() -> Self {
        Self::with_monitors(vec![
            FakeMonitor::new(PixelRect::new(0, 0, 1920, 1080), 96),
            FakeMonitor::new(PixelRect::new(1920, 0, 1920 + 3840, 2160), 192),
        ])
    }

    pub fn with_monitors(monitors: Vec<FakeMonitor>) -> Self {
        Self {
            window: PixelRect::default(),
            style: WindowStyle::windowed(),
            monitors,
            visible: false,
            blits: Vec::new(),
        }
    }

    /// Monitor containing the window's centre, else the primary
    pub fn monitor(&self) -> &FakeMonitor {
        let cx = (self.window.left + self.window.right) / 2;
        let cy = (self.window.top + self.window.bottom) / 2;
        self.monitors
            .iter()
            .find(|m| cx >= m.rect.left && cx < m.rect.right && cy >= m.rect.top && cy < m.rect.bottom)
            .unwrap_or(&self.monitors[0])
    }

    /// Move the window 100 pixels into monitor `index` without sending
    /// anything
    pub fn move_onto_monitor(&mut self, index: usize) {
        let target = self.monitors[index].rect;
        self.window = self
            .window
            .translate(target.left + 100 - self.window.left, target.top + 100 - self.window.top);
    }

    /// Apply a request and return the messages the platform sends back
    pub fn apply(&mut self, request: &Request) -> Vec<WindowMessage> {
        let before = self.window;
        let client_before = self.client_rect().size();
        match *request {
            Request::Resize { size } => {
                self.window = PixelRect::from_pos_size(before.left, before.top, size);
            }
            Request::Place { rect } => self.window = rect,
            Request::Reframe { rect, style } => {
                self.style = style;
                self.window = rect;
            }
            Request::Show(command) => return self.show(command),
        }

        let mut follow_ups = Vec::new();
        if self.window.origin() != before.origin() {
            follow_ups.push(WindowMessage::Move);
        }
        let client = self.client_rect().size();
        if client != client_before {
            follow_ups.push(WindowMessage::Size {
                kind: SizeKind::Restored,
                client,
            });
        }
        follow_ups
    }

    fn show(&mut self, command: ShowCommand) -> Vec<WindowMessage> {
        let client = self.client_rect().size();
        match command {
            ShowCommand::Hide if self.visible => {
                self.visible = false;
                vec![WindowMessage::ShowWindow { shown: false }]
            }
            ShowCommand::Hide => Vec::new(),
            ShowCommand::Normal if !self.visible => {
                self.visible = true;
                vec![
                    WindowMessage::ShowWindow { shown: true },
                    WindowMessage::Size {
                        kind: SizeKind::Restored,
                        client,
                    },
                ]
            }
            ShowCommand::Normal => Vec::new(),
            ShowCommand::Maximize => {
                let mut follow_ups = Vec::new();
                if !self.visible {
                    self.visible = true;
                    follow_ups.push(WindowMessage::ShowWindow { shown: true });
                }
                follow_ups.push(WindowMessage::Size {
                    kind: SizeKind::Maximized,
                    client,
                });
                follow_ups
            }
        }
    }
}

impl Surface for FakeHost {
    fn stretch_blit(&mut self, target: BlitTarget, blit: &Blit<'_>) {
        self.blits.push((target, blit.dest, blit.source));
    }
}

impl WindowHost for FakeHost {
    fn window_rect(&self) -> PixelRect {
        self.window
    }

    fn client_rect(&self) -> PixelRect {
        let frame = self.adjust_window_rect(PixelRect::default(), self.style);
        let width = self.window.width() - frame.width();
        let height = self.window.height() - frame.height();
        PixelRect::new(0, 0, width.max(0), height.max(0))
    }

    fn monitor_dpi(&self) -> Dpi {
        self.monitor().dpi
    }

    fn monitor_rect(&self) -> PixelRect {
        self.monitor().rect
    }

    fn style(&self) -> WindowStyle {
        self.style
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn adjust_window_rect(&self, client: PixelRect, style: WindowStyle) -> PixelRect {
        if style.is_popup() {
            client
        } else {
            client.expand(BORDER.0, BORDER.1, BORDER.2, BORDER.3)
        }
    }
}

/// Heap allocator that counts calls and can be told to fail
pub struct CountingAllocator {
    pub calls: Rc<Cell<usize>>,
    pub fail: Rc<Cell<bool>>,
}

impl PixelAllocator for CountingAllocator {
    fn allocate(&mut self, len: usize) -> Result<Box<[u8]>, BackbufferError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail.get() {
            return Err(BackbufferError::AllocationFailed { bytes: len });
        }
        Ok(vec![0u8; len].into_boxed_slice())
    }
}

/// Router plus fake host for one window
pub struct Harness {
    pub router: Router,
    pub host: FakeHost,
    pub id: WindowId,
    calls: Rc<Cell<usize>>,
    fail: Rc<Cell<bool>>,
}

impl Harness {
    /// Window staged at (100, 100) on a dual-monitor desktop, not yet
    /// associated
    pub fn staged(client: LogicalSize) -> Self {
        Self::with_host(FakeHost::dual_monitor(), client)
    }

    pub fn with_host(mut host: FakeHost, client: LogicalSize) -> Self {
        let calls = Rc::new(Cell::new(0));
        let fail = Rc::new(Cell::new(false));
        let backbuffer = Backbuffer::with_allocator(Box::new(CountingAllocator {
            calls: calls.clone(),
            fail: fail.clone(),
        }));
        let position = WindowPosition::new(100, 100);
        host.window = PixelRect::from_pos_size(
            position.x,
            position.y,
            PhysicalSize::new(client.width, client.height),
        );

        let mut router = Router::new();
        router.stage(WindowState::with_backbuffer(position, client, backbuffer));
        Self {
            router,
            host,
            id: WindowId(1),
            calls,
            fail,
        }
    }

    /// Associated and created, not yet shown
    pub fn created(client: LogicalSize) -> Self {
        let mut h = Self::staged(client);
        h.create();
        h
    }

    /// Created and shown
    pub fn shown(client: LogicalSize) -> Self {
        let mut h = Self::created(client);
        h.show();
        h
    }

    pub fn into_parts(self) -> (Router, FakeHost, WindowId) {
        (self.router, self.host, self.id)
    }

    pub fn associate(&mut self) {
        assert!(self.router.associate(self.id));
    }

    pub fn create(&mut self) {
        self.associate();
        self.send(WindowMessage::Create);
    }

    pub fn show(&mut self) {
        self.perform(Request::Show(ShowCommand::Normal));
    }

    pub fn alt_enter(&mut self) -> Dispatch {
        self.send(WindowMessage::SysCommand {
            command: SC_KEYMENU,
            key: VK_RETURN,
        })
    }

    /// User drags the window onto the second monitor, which runs at `dpi`
    pub fn drag_to_second_monitor(&mut self, dpi: u32) -> Dispatch {
        let old = self.host.monitor_dpi();
        self.host.monitors[1].dpi = Dpi::uniform(dpi);
        self.host.move_onto_monitor(1);

        let window = self.host.window;
        let scale = |v: i32, from: u32| (v as i64 * dpi as i64 / from as i64) as u32;
        let suggested = PixelRect::from_pos_size(
            window.left,
            window.top,
            PhysicalSize::new(scale(window.width(), old.x), scale(window.height(), old.y)),
        );
        self.send(WindowMessage::DpiChanged {
            dpi: Dpi::uniform(dpi),
            suggested,
        })
    }

    /// User drags the frame so the client area becomes `client`
    pub fn resize_client(&mut self, client: PhysicalSize) -> Dispatch {
        let frame = self
            .host
            .adjust_window_rect(PixelRect::from_size(client), self.host.style);
        self.host.window = PixelRect::from_pos_size(self.host.window.left, self.host.window.top, frame.size());
        self.send(WindowMessage::Size {
            kind: SizeKind::Restored,
            client,
        })
    }

    /// Deliver a message and, depth-first, everything its requests trigger.
    /// Returns the dispatch of the outermost message.
    pub fn send(&mut self, message: WindowMessage) -> Dispatch {
        let dispatch = self.router.dispatch(self.id, &mut self.host, &message);
        for request in &dispatch.requests {
            self.perform(*request);
        }
        dispatch
    }

    /// Apply a request to the host and deliver its follow-up messages
    pub fn perform(&mut self, request: Request) {
        for follow_up in self.host.apply(&request) {
            self.send(follow_up);
        }
    }

    pub fn state(&self) -> &WindowState {
        self.router.window(self.id).expect("window is associated")
    }

    pub fn state_mut(&mut self) -> &mut WindowState {
        self.router.window_mut(self.id).expect("window is associated")
    }

    pub fn take_events(&mut self) -> EventFlags {
        self.state_mut().take_events()
    }

    pub fn allocations(&self) -> usize {
        self.calls.get()
    }

    pub fn fail_allocations(&mut self, fail: bool) {
        self.fail.set(fail);
    }
}
