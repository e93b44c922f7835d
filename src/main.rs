//! rtc - The Ray Tracer Challenge display shell
//!
//! Opens a DPI-aware window presenting a software backbuffer. Alt+Enter
//! toggles borderless fullscreen.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use rtc::config::{ConfigSource, DisplayConfig};
use rtc::log;

fn main() {
    // Configuration first: it names the log file
    let (config, source) = DisplayConfig::load();

    log::init(&config.log_file);
    log!("main() starting");
    match &source {
        ConfigSource::File(path) => log!("Loaded configuration from {:?}", path),
        ConfigSource::Rejected(path, e) => log!("WARN: ignoring {:?}: {}, using defaults", path, e),
        ConfigSource::Defaults => log!("No display.toml found, using defaults"),
    }

    let code = run(&config);

    log!("main() exiting with code {}", code);
    log::shutdown();
    std::process::exit(code);
}

#[cfg(target_os = "windows")]
fn run(config: &DisplayConfig) -> i32 {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rtc::display::{initial_placement, MainLoop, Router, WindowState, WindowStyle};
    use rtc::platform::win32::{
        clear_window_callback, create_window, install_router, primary_work_area,
        register_window_class, resolve_capabilities, show_window, window_id, Win32Pump,
    };

    // Must precede every other graphics call
    let capabilities = Rc::new(resolve_capabilities());
    if let Err(e) = capabilities.enable_per_monitor_awareness() {
        log!("WARN: per-monitor DPI awareness not enabled: {}", e);
    }

    if let Err(e) = register_window_class() {
        log!("FATAL: {}", e);
        return e.exit_code();
    }

    let work_area = primary_work_area();
    let (position, client_size) = initial_placement(work_area, config.client_size());
    log!(
        "Initial placement ({}, {}) {}x{} in work area {:?}",
        position.x,
        position.y,
        client_size.width,
        client_size.height,
        work_area
    );

    let router = Rc::new(RefCell::new(Router::new()));
    router
        .borrow_mut()
        .stage(WindowState::new(position, client_size));
    install_router(router.clone(), capabilities.clone());

    let hwnd = match create_window(&config.title, position, client_size, WindowStyle::windowed()) {
        Ok(hwnd) => hwnd,
        Err(e) => {
            log!("FATAL: {}", e);
            clear_window_callback();
            return e.exit_code();
        }
    };
    show_window(hwnd);

    let main_loop = MainLoop::new(window_id(hwnd), config.frame_interval());
    let mut pump = Win32Pump::new(hwnd);
    let exit = main_loop.run(&mut pump, &router);
    log!("Main loop ended: {:?}", exit);

    main_loop.shutdown(&mut pump, &router);
    clear_window_callback();
    0
}

#[cfg(not(target_os = "windows"))]
fn run(_config: &DisplayConfig) -> i32 {
    log!("FATAL: no window platform for this target");
    eprintln!("rtc: opening a window requires Windows");
    1
}
