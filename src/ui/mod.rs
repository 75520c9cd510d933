//! Terminal rendering.
//!
//! - [`probes`]: the probe table with its heatmap column
//! - [`menu`]: the filter bar and dropdowns
//! - [`dialog`]: the add/edit/delete modal
//! - [`common`]: header, status bar and help overlay
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Filter bar (menu::render_bar)        │
//! ├──────────────────────────────────────┤
//! │ Probe table (probes::render)         │
//! ├──────────────────────────────────────┤
//! │ Status bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!    Overlays rendered on top:
//!    - menu::render_popup
//!    - dialog::render_overlay
//!    - common::render_help
//! ```

pub mod common;
pub mod dialog;
pub mod menu;
pub mod probes;
mod theme;

pub use theme::Theme;

use ratatui::layout::Rect;

/// Centered rectangle of at most `width` x `height` inside `area`.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Five-row band around the vertical middle of `area`, clipped to it.
pub fn middle_band(area: Rect) -> Rect {
    let y = area.y + (area.height / 2).saturating_sub(2);
    let height = 5.min(area.height.saturating_sub(y - area.y));
    Rect::new(area.x, y, area.width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_band_regular_terminal() {
        let band = middle_band(Rect::new(0, 0, 40, 10));
        assert_eq!(band, Rect::new(0, 3, 40, 5));
    }

    #[test]
    fn test_middle_band_tiny_terminal() {
        for height in 0..5 {
            let area = Rect::new(0, 0, 60, height);
            let band = middle_band(area);
            assert!(band.y + band.height <= height, "height {}: {:?}", height, band);
        }
        assert_eq!(middle_band(Rect::new(0, 0, 60, 3)), Rect::new(0, 0, 60, 3));
    }

    #[test]
    fn test_centered_fits_inside() {
        let area = Rect::new(0, 0, 20, 6);
        let rect = centered(area, 60, 10);
        assert!(rect.width <= 16);
        assert!(rect.height <= 4);
    }
}
