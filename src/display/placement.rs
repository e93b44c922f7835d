//! Initial window placement on the primary display's work area

use super::pixels::LogicalSize;
use super::rect::PixelRect;
use super::state::WindowPosition;

/// Centre a window of `size` in `work_area`, shrinking it so it never
/// extends past the work area's right or bottom edge.
pub fn initial_placement(work_area: PixelRect, size: LogicalSize) -> (WindowPosition, LogicalSize) {
    let area_w = work_area.width().max(0) as i64;
    let area_h = work_area.height().max(0) as i64;

    let x = (work_area.left as i64 + (area_w - size.width as i64) / 2).max(work_area.left as i64);
    let y = (work_area.top as i64 + (area_h - size.height as i64) / 2).max(work_area.top as i64);

    let width = (size.width as i64).min(work_area.right as i64 - x).max(0);
    let height = (size.height as i64).min(work_area.bottom as i64 - y).max(0);

    (
        WindowPosition::new(x as i32, y as i32),
        LogicalSize::new(width as u32, height as u32),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centred_in_work_area() {
        let work = PixelRect::new(0, 0, 1920, 1040);
        let (pos, size) = initial_placement(work, LogicalSize::new(800, 600));
        assert_eq!(pos, WindowPosition::new(560, 220));
        assert_eq!(size, LogicalSize::new(800, 600));
    }

    #[test]
    fn test_offset_work_area() {
        // Taskbar docked on the left
        let work = PixelRect::new(48, 0, 1920, 1080);
        let (pos, size) = initial_placement(work, LogicalSize::new(800, 600));
        assert_eq!(pos, WindowPosition::new(48 + 536, 240));
        assert_eq!(size, LogicalSize::new(800, 600));
    }

    #[test]
    fn test_clamped_to_small_work_area() {
        let work = PixelRect::new(0, 0, 640, 480);
        let (pos, size) = initial_placement(work, LogicalSize::new(800, 600));
        assert_eq!(pos, WindowPosition::new(0, 0));
        assert_eq!(size, LogicalSize::new(640, 480));
    }

    #[test]
    fn test_clamped_on_secondary_work_area() {
        let work = PixelRect::new(-1280, 100, 0, 820);
        let (pos, size) = initial_placement(work, LogicalSize::new(1600, 600));
        assert_eq!(pos, WindowPosition::new(-1280, 160));
        assert_eq!(size, LogicalSize::new(1280, 600));
    }
}
