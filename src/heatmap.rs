//! 24-hour health heatmap.
//!
//! Each probe carries one status code per hour of the last day. The heatmap
//! lays them out as a strip of 24 cells, colored by status, with the cell of
//! the current wall-clock hour outlined.

use chrono::{Local, Timelike};

use crate::data::{HourStatus, HOURS_PER_DAY};

/// Cell width in pixels.
pub const CELL_WIDTH: u32 = 7;
/// Cell height in pixels.
pub const CELL_HEIGHT: u32 = 20;
/// Horizontal gap between cells.
pub const CELL_GAP: u32 = 2;
/// Outline color of the current hour.
pub const HIGHLIGHT_STROKE: &str = "#000";

/// Fill colors indexed by status code.
pub const PALETTE: [&str; 4] = ["#d3d3d3", "#28a745", "#f00", "#ffc107"];

/// One positioned heatmap rectangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatCell {
    pub hour: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub status: HourStatus,
    pub fill: &'static str,
    /// Stroke color when this is the current hour.
    pub stroke: Option<&'static str>,
}

impl HeatCell {
    pub fn is_current_hour(&self) -> bool {
        self.stroke.is_some()
    }
}

/// Lay out the 24 cells for `hour_codes`.
///
/// An empty sequence renders every hour as no data. Missing trailing entries
/// and unknown codes also render as no data.
pub fn render(hour_codes: &[u8], current_hour: u32) -> Vec<HeatCell> {
    (0..HOURS_PER_DAY)
        .map(|hour| {
            let status = hour_codes
                .get(hour)
                .copied()
                .map_or(HourStatus::NoData, HourStatus::from_code);
            let outlined = hour as u32 == current_hour;
            HeatCell {
                hour,
                x: hour as u32 * (CELL_WIDTH + CELL_GAP),
                y: 0,
                width: CELL_WIDTH,
                height: CELL_HEIGHT,
                status,
                fill: PALETTE[status.code() as usize],
                stroke: outlined.then_some(HIGHLIGHT_STROKE),
            }
        })
        .collect()
}

/// Current local hour (0-23).
pub fn current_hour() -> u32 {
    Local::now().hour()
}

/// Render cells as an SVG fragment sized like the web panel's cell.
pub fn to_svg(cells: &[HeatCell]) -> String {
    let mut svg = String::from("<svg width='220' height='20' viewBox='0 0 220 20'>");
    for cell in cells {
        svg.push_str(&format!(
            "<rect x='{}' y='{}' width='{}' height='{}' fill='{}'",
            cell.x, cell.y, cell.width, cell.height, cell.fill
        ));
        if let Some(stroke) = cell.stroke {
            svg.push_str(&format!(" stroke='{}'", stroke));
        }
        svg.push_str("></rect>");
    }
    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<u8> {
        let mut codes = vec![0, 1, 2, 3];
        codes.resize(24, 1);
        codes
    }

    #[test]
    fn test_renders_24_cells_with_palette() {
        let cells = render(&sample(), 5);
        assert_eq!(cells.len(), 24);
        assert_eq!(cells[0].fill, "#d3d3d3");
        assert_eq!(cells[1].fill, "#28a745");
        assert_eq!(cells[2].fill, "#f00");
        assert_eq!(cells[3].fill, "#ffc107");
    }

    #[test]
    fn test_exactly_one_highlight_at_current_hour() {
        let cells = render(&sample(), 5);
        let highlighted: Vec<usize> =
            cells.iter().filter(|c| c.is_current_hour()).map(|c| c.hour).collect();
        assert_eq!(highlighted, vec![5]);
        assert_eq!(cells[5].stroke, Some("#000"));
    }

    #[test]
    fn test_layout_positions() {
        let cells = render(&sample(), 0);
        assert_eq!(cells[0].x, 0);
        assert_eq!(cells[1].x, 9);
        assert_eq!(cells[23].x, 207);
        assert!(cells.iter().all(|c| c.width == 7 && c.height == 20 && c.y == 0));
    }

    #[test]
    fn test_empty_input_is_all_no_data() {
        let cells = render(&[], 12);
        assert_eq!(cells.len(), 24);
        assert!(cells.iter().all(|c| c.status == HourStatus::NoData));
    }

    #[test]
    fn test_short_and_out_of_range_input_does_not_panic() {
        let cells = render(&[2, 7, 255], 0);
        assert_eq!(cells[0].status, HourStatus::Alert);
        assert_eq!(cells[1].status, HourStatus::NoData);
        assert_eq!(cells[10].status, HourStatus::NoData);
    }

    #[test]
    fn test_current_hour_in_range() {
        assert!(current_hour() < 24);
    }

    #[test]
    fn test_svg_projection() {
        let svg = to_svg(&render(&sample(), 2));
        assert_eq!(svg.matches("<rect").count(), 24);
        assert_eq!(svg.matches("stroke=").count(), 1);
        assert!(svg.starts_with("<svg width='220'"));
    }
}
