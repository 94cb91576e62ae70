//! Layout partitioner — arranging N viewports in the container
//!
//! Pure mapping from (index, total, device class) to a panel size in percent
//! of the container, plus the Rect-splitting helper the renderer uses. Both
//! derive from the same cols/rows table so they cannot drift apart.

use crate::modules::shell::DeviceClass;
use ratatui::layout::Rect;

/// Fractional size of one viewport, in percent of the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelSize {
    pub width: f64,
    pub height: f64,
}

/// Grid dimensions (columns, rows) for a given instance count.
///
/// Mobile stacks full-width: one column, and every instance past the first
/// gets the same half-height assignment (counts beyond 2 simply repeat it;
/// trailing cells fall off the bottom). Desktop: 1 fills, 2 stacks, 3-4 form
/// a 2x2 grid, and beyond that cols = ceil(sqrt(total)).
pub fn grid_dims(total: usize, device: DeviceClass) -> (usize, usize) {
    match device {
        DeviceClass::Mobile => (1, if total <= 1 { 1 } else { 2 }),
        DeviceClass::Desktop => match total {
            0 | 1 => (1, 1),
            2 => (1, 2),
            3 | 4 => (2, 2),
            _ => {
                let cols = (total as f64).sqrt().ceil() as usize;
                let rows = total.div_ceil(cols);
                (cols, rows)
            }
        },
    }
}

/// Size of the viewport at `index` when `total` instances are on screen.
/// Uniform over every index; incomplete last rows are left blank, not
/// redistributed.
pub fn panel_size(_index: usize, total: usize, device: DeviceClass) -> PanelSize {
    let (cols, rows) = grid_dims(total, device);
    PanelSize {
        width: 100.0 / cols as f64,
        height: 100.0 / rows as f64,
    }
}

/// Split a terminal area into one cell per instance, row-major, by applying
/// `panel_size` fractions to the area. Integer remainders go to the trailing
/// column/row so the cells tile the area exactly. Cells that fall outside
/// the area (mobile with more than two instances) come back with zero
/// height and are skipped by the renderer.
pub fn split_area(area: Rect, total: usize, device: DeviceClass) -> Vec<Rect> {
    if total == 0 || area.width == 0 || area.height == 0 {
        return Vec::new();
    }
    let (cols, rows) = grid_dims(total, device);
    let size = panel_size(0, total, device);
    let base_w = (area.width as f64 * size.width / 100.0) as u16;
    let base_h = (area.height as f64 * size.height / 100.0) as u16;

    (0..total)
        .map(|i| {
            let col = (i % cols) as u16;
            let row = (i / cols) as u16;
            let x = area.x + col * base_w;
            let y = area.y.saturating_add(row * base_h);
            let w = if col as usize == cols - 1 {
                area.width - col * base_w
            } else {
                base_w
            };
            let h = if row as usize == rows - 1 {
                area.height.saturating_sub(row * base_h)
            } else {
                base_h
            };
            let bottom = area.y + area.height;
            let h = if y >= bottom { 0 } else { h.min(bottom - y) };
            Rect {
                x,
                y: y.min(bottom),
                width: w,
                height: h,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_instance_fills_container() {
        let p = panel_size(0, 1, DeviceClass::Desktop);
        assert_eq!(p, PanelSize { width: 100.0, height: 100.0 });
        let p = panel_size(0, 1, DeviceClass::Mobile);
        assert_eq!(p, PanelSize { width: 100.0, height: 100.0 });
    }

    #[test]
    fn test_two_instances_stack() {
        for i in 0..2 {
            let p = panel_size(i, 2, DeviceClass::Desktop);
            assert_eq!(p, PanelSize { width: 100.0, height: 50.0 });
        }
    }

    #[test]
    fn test_three_and_four_use_quad_grid() {
        for total in [3, 4] {
            for i in 0..total {
                let p = panel_size(i, total, DeviceClass::Desktop);
                assert_eq!(p, PanelSize { width: 50.0, height: 50.0 });
            }
        }
    }

    #[test]
    fn test_five_instances_use_3x2() {
        let p = panel_size(0, 5, DeviceClass::Desktop);
        assert!((p.width - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(p.height, 50.0);
    }

    #[test]
    fn test_ten_instances_use_4x3() {
        assert_eq!(grid_dims(10, DeviceClass::Desktop), (4, 3));
        let p = panel_size(9, 10, DeviceClass::Desktop);
        assert_eq!(p.width, 25.0);
        assert!((p.height - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_mobile_always_full_width() {
        for total in 1..=5 {
            for i in 0..total {
                let p = panel_size(i, total, DeviceClass::Mobile);
                assert_eq!(p.width, 100.0);
                let expected_h = if total == 1 { 100.0 } else { 50.0 };
                assert_eq!(p.height, expected_h);
            }
        }
    }

    #[test]
    fn test_split_area_tiles_exactly() {
        let area = Rect { x: 0, y: 0, width: 100, height: 30 };
        let cells = split_area(area, 4, DeviceClass::Desktop);
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[0], Rect { x: 0, y: 0, width: 50, height: 15 });
        assert_eq!(cells[3], Rect { x: 50, y: 15, width: 50, height: 15 });
        let total_cells: u32 = cells.iter().map(|c| c.width as u32 * c.height as u32).sum();
        assert_eq!(total_cells, 100 * 30);
    }

    #[test]
    fn test_split_area_odd_width_remainder_goes_to_last_column() {
        let area = Rect { x: 0, y: 0, width: 101, height: 30 };
        let cells = split_area(area, 4, DeviceClass::Desktop);
        assert_eq!(cells[0].width, 50);
        assert_eq!(cells[1].width, 51);
    }

    #[test]
    fn test_split_area_mobile_overflow_is_clipped() {
        let area = Rect { x: 0, y: 0, width: 40, height: 20 };
        let cells = split_area(area, 3, DeviceClass::Mobile);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].height, 10);
        assert_eq!(cells[1].height, 10);
        // The third half-height cell has nowhere to go.
        assert_eq!(cells[2].height, 0);
    }
}
