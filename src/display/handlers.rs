//! Window message handlers
//!
//! Each handler reads the platform through [`WindowHost`], updates the
//! [`WindowState`], and returns a [`Dispatch`] carrying the reply and any
//! window mutations to perform afterwards. Handlers never fail: a backbuffer
//! resize that cannot allocate keeps the previous buffer and is logged.

use super::flags::{EventFlags, StatusFlags};
use super::host::{BlitTarget, WindowHost};
use super::message::{Dispatch, Request, ShowCommand, SizeKind, WindowMessage};
use super::pixels::{Dpi, PhysicalSize};
use super::presenter;
use super::rect::PixelRect;
use super::state::{RestoreState, WindowPosition, WindowState};
use super::style::WindowStyle;

/// Route one decoded message to its handler
pub fn handle(state: &mut WindowState, host: &mut dyn WindowHost, message: &WindowMessage) -> Dispatch {
    match *message {
        WindowMessage::Create => on_create(state, host),
        WindowMessage::Close => on_close(state),
        WindowMessage::Activate { active, minimized } => on_activate(state, active, minimized),
        WindowMessage::ShowWindow { shown } => on_show_window(state, host, shown),
        WindowMessage::Move => on_move(state, host),
        WindowMessage::Size { kind, client } => on_size(state, host, kind, client),
        WindowMessage::DpiChanged { dpi, suggested } => on_dpi_changed(state, host, dpi, suggested),
        WindowMessage::SysCommand { .. } if message.is_alt_enter() => toggle_fullscreen(state, host),
        WindowMessage::SysCommand { .. } => Dispatch::default_processing(),
        WindowMessage::Paint => on_paint(state, host),
        WindowMessage::Other(_) => Dispatch::default_processing(),
    }
}

/// Record window rectangle and DPI in logical units
fn store_frame(state: &mut WindowState, frame: PixelRect, dpi: Dpi) {
    let (x, y) = frame.origin();
    state.position = WindowPosition::new(x, y);
    state.window_size = frame.size().to_logical(dpi);
    state.dpi = dpi;
}

/// Size the window so its client area matches the requested logical size at
/// the monitor's DPI, then allocate the backbuffer.
fn on_create(state: &mut WindowState, host: &mut dyn WindowHost) -> Dispatch {
    let dpi = host.monitor_dpi();
    let physical = state.client_size.to_physical(dpi);
    let frame = host.adjust_window_rect(PixelRect::from_size(physical), host.style());
    log_fn!(
        "on_create",
        "dpi={}x{}, client={}x{} physical, frame={}x{}",
        dpi.x,
        dpi.y,
        physical.width,
        physical.height,
        frame.width(),
        frame.height()
    );

    state.status = StatusFlags::CREATED;
    state.events = EventFlags::CREATED | EventFlags::SIZE_CHANGED | EventFlags::POSITION_CHANGED;
    state.dpi = dpi;
    state.window_size = frame.size().to_logical(dpi);
    state.resize_backbuffer(physical);

    Dispatch::handled().with(Request::Resize { size: frame.size() })
}

/// Hide and mark destroyed; the window itself is destroyed by the main loop
fn on_close(state: &mut WindowState) -> Dispatch {
    log_fn!("on_close");
    state.status = StatusFlags::empty();
    state.events = EventFlags::DESTROYED;
    Dispatch::handled().with(Request::Show(ShowCommand::Hide))
}

fn on_activate(state: &mut WindowState, active: bool, minimized: bool) -> Dispatch {
    log_fn!("on_activate", "active={}, minimized={}", active, minimized);
    if active {
        state.status |= StatusFlags::ACTIVE | StatusFlags::VISIBLE;
        state.events |= EventFlags::ACTIVATED;
    } else {
        state.status.remove(StatusFlags::ACTIVE);
        state.events |= EventFlags::DEACTIVATED;
    }
    if minimized {
        state.status.remove(StatusFlags::VISIBLE);
        state.events |= EventFlags::HIDDEN;
    }
    Dispatch::default_processing()
}

fn on_show_window(state: &mut WindowState, host: &mut dyn WindowHost, shown: bool) -> Dispatch {
    if !shown {
        log_fn!("on_show_window", "hidden");
        state.status.remove(StatusFlags::VISIBLE | StatusFlags::ACTIVE);
        state.events |= EventFlags::HIDDEN | EventFlags::DEACTIVATED;
        return Dispatch::default_processing();
    }

    let dpi = host.monitor_dpi();
    let frame = host.window_rect();
    let client = host.client_rect().size();
    log_fn!(
        "on_show_window",
        "shown, client={}x{} physical at {} dpi",
        client.width,
        client.height,
        dpi.x
    );

    state.status |= StatusFlags::VISIBLE;
    state.events |= EventFlags::SHOWN;
    store_frame(state, frame, dpi);
    state.client_size = client.to_logical(dpi);
    state.resize_backbuffer(client);
    Dispatch::default_processing()
}

/// The window may have been dragged onto another monitor, so the DPI is
/// queried again.
fn on_move(state: &mut WindowState, host: &mut dyn WindowHost) -> Dispatch {
    let dpi = host.monitor_dpi();
    let frame = host.window_rect();
    log_fn!("on_move", "({}, {}) at {} dpi", frame.left, frame.top, dpi.x);

    state.events |= EventFlags::POSITION_CHANGED;
    store_frame(state, frame, dpi);
    Dispatch::handled()
}

fn on_size(state: &mut WindowState, host: &mut dyn WindowHost, kind: SizeKind, client: PhysicalSize) -> Dispatch {
    let dpi = host.monitor_dpi();
    let logical = client.to_logical(dpi);
    let mut status = state.status;
    let mut events = EventFlags::SIZE_CHANGED;

    // A restore of a window the platform has not shown yet (e.g. during
    // creation) does not make it visible.
    let visible = if kind.hides_window() {
        events |= EventFlags::HIDDEN;
        status.remove(StatusFlags::VISIBLE);
        false
    } else if host.is_visible() {
        if kind == SizeKind::Restored {
            events |= EventFlags::SHOWN;
        }
        status.insert(StatusFlags::VISIBLE);
        true
    } else {
        false
    };
    let resized = logical != state.client_size;

    if !visible || !resized {
        log_fn!(
            "on_size",
            "{:?} {}x{} physical, visible={}, resized={}: status only",
            kind,
            client.width,
            client.height,
            visible,
            resized
        );
        state.status = status;
        return Dispatch::handled();
    }

    log_fn!(
        "on_size",
        "{:?} {}x{} physical -> {}x{} logical",
        kind,
        client.width,
        client.height,
        logical.width,
        logical.height
    );
    let fullscreen = state.is_fullscreen();
    state.resize_backbuffer(client);
    status.set(StatusFlags::FULLSCREEN, fullscreen);

    state.status = status;
    state.events |= events;
    store_frame(state, host.window_rect(), dpi);
    state.client_size = logical;
    Dispatch::handled()
}

/// Keep the logical client size across a DPI change.
///
/// Windowed: the window goes to the platform's suggested origin with a frame
/// sized for the new DPI. Borderless fullscreen: the window snaps to its
/// monitor.
fn on_dpi_changed(state: &mut WindowState, host: &mut dyn WindowHost, dpi: Dpi, suggested: PixelRect) -> Dispatch {
    let style = host.style();
    let physical = state.client_size.to_physical(dpi);
    let mut events = EventFlags::SIZE_CHANGED;

    let frame = if style.is_popup() {
        host.monitor_rect()
    } else {
        if suggested.origin() != (state.position.x, state.position.y) {
            events |= EventFlags::POSITION_CHANGED;
        }
        let frame = host.adjust_window_rect(PixelRect::from_size(physical), style);
        frame.translate(suggested.left - frame.left, suggested.top - frame.top)
    };
    log_fn!(
        "on_dpi_changed",
        "{}x{} dpi, popup={}, client={}x{} physical, frame=({}, {}, {}, {})",
        dpi.x,
        dpi.y,
        style.is_popup(),
        physical.width,
        physical.height,
        frame.left,
        frame.top,
        frame.right,
        frame.bottom
    );

    store_frame(state, frame, dpi);
    state.events |= events;
    state.resize_backbuffer(physical);
    Dispatch::handled().with(Request::Place { rect: frame })
}

/// Alt+Enter: switch between the framed window and borderless fullscreen
fn toggle_fullscreen(state: &mut WindowState, host: &mut dyn WindowHost) -> Dispatch {
    if state.is_fullscreen() {
        state.status.remove(StatusFlags::FULLSCREEN);
        let Some(restore) = state.restore.take() else {
            log!("WARN: toggle_fullscreen: fullscreen without saved placement, restoring style only");
            return Dispatch::handled()
                .with(Request::Reframe {
                    rect: host.window_rect(),
                    style: WindowStyle::windowed(),
                })
                .with(Request::Show(ShowCommand::Normal));
        };
        log_fn!(
            "toggle_fullscreen",
            "to windowed at ({}, {}, {}, {})",
            restore.rect.left,
            restore.rect.top,
            restore.rect.right,
            restore.rect.bottom
        );
        Dispatch::handled()
            .with(Request::Reframe {
                rect: restore.rect,
                style: restore.style,
            })
            .with(Request::Show(ShowCommand::Normal))
    } else {
        let monitor = host.monitor_rect();
        let current = host.style();
        state.restore = Some(RestoreState {
            rect: host.window_rect(),
            style: current,
        });
        state.status.insert(StatusFlags::FULLSCREEN);
        log_fn!(
            "toggle_fullscreen",
            "to fullscreen on ({}, {}, {}, {})",
            monitor.left,
            monitor.top,
            monitor.right,
            monitor.bottom
        );
        Dispatch::handled()
            .with(Request::Reframe {
                rect: monitor,
                style: WindowStyle::borderless(current.ex_style),
            })
            .with(Request::Show(ShowCommand::Maximize))
    }
}

fn on_paint(state: &mut WindowState, host: &mut dyn WindowHost) -> Dispatch {
    if presenter::present(state, host, BlitTarget::Paint) {
        Dispatch::handled()
    } else {
        Dispatch::default_processing()
    }
}
