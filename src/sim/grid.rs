//! Brick grid construction

use super::rect::Rect;
use super::state::Brick;
use crate::settings::BrickSettings;

/// Build a fresh, fully populated grid in row-major order.
///
/// Positions follow a regular lattice from the top-left margins; color cycles
/// through the palette by row and the point value comes from the per-row
/// table. Pure function of `layout`, so repeated calls give identical grids.
///
/// Expects a layout that passed [`Settings::validate`](crate::Settings::validate);
/// out-of-range positions saturate rather than wrap.
pub fn build_grid(layout: &BrickSettings) -> Vec<Brick> {
    let mut bricks = Vec::with_capacity(layout.rows.saturating_mul(layout.columns));
    let step_x = layout.width.saturating_add(layout.spacing);
    let step_y = layout.height.saturating_add(layout.spacing);

    for row in 0..layout.rows.min(layout.points.len()) {
        let color = layout.palette[row % layout.palette.len()];
        let points = layout.points[row];
        let y = layout.top_margin.saturating_add(offset(row, step_y));

        for col in 0..layout.columns {
            let x = layout.left_margin.saturating_add(offset(col, step_x));
            bricks.push(Brick {
                rect: Rect::new(x, y, layout.width, layout.height),
                color,
                points,
            });
        }
    }

    bricks
}

fn offset(index: usize, step: i32) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX).saturating_mul(step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::consts::BRICK_PALETTE;
    use crate::sim::Session;

    #[test]
    fn test_grid_dimensions() {
        let bricks = build_grid(&BrickSettings::default());
        assert_eq!(bricks.len(), 80);

        let first = &bricks[0];
        assert_eq!(first.rect, Rect::new(27, 60, 70, 20));
        let last = bricks.last().unwrap();
        assert_eq!(last.rect, Rect::new(27 + 9 * 75, 60 + 7 * 25, 70, 20));
    }

    #[test]
    fn test_points_by_row() {
        let layout = BrickSettings::default();
        let bricks = build_grid(&layout);
        let row_points: Vec<u32> = bricks
            .chunks(layout.columns)
            .map(|row| {
                assert!(row.iter().all(|b| b.points == row[0].points));
                row[0].points
            })
            .collect();
        assert_eq!(row_points, vec![8, 8, 5, 5, 3, 3, 1, 1]);
    }

    #[test]
    fn test_colors_cycle_by_row() {
        let layout = BrickSettings::default();
        let bricks = build_grid(&layout);
        for (i, brick) in bricks.iter().enumerate() {
            let row = i / layout.columns;
            assert_eq!(brick.color, BRICK_PALETTE[row % BRICK_PALETTE.len()]);
        }
    }

    #[test]
    fn test_no_overlapping_bricks() {
        let bricks = build_grid(&BrickSettings::default());
        for (i, a) in bricks.iter().enumerate() {
            for b in &bricks[i + 1..] {
                assert!(!a.rect.intersects(&b.rect));
            }
        }
    }

    #[test]
    fn test_restart_rebuilds_pristine_grid() {
        let fresh = build_grid(&BrickSettings::default());

        let mut session = Session::new(Settings::default(), 9);
        session.phase.start().unwrap();
        session.bricks.retain(|b| b.points != 8);
        session.bricks.remove(0);
        session.score = 40;
        session.phase.set_named("game_over").unwrap();

        session.restart().unwrap();
        assert_eq!(session.bricks, fresh);
        assert_eq!(build_grid(&session.settings.bricks), fresh);
    }

    #[test]
    fn test_extreme_margin_saturates() {
        let layout = BrickSettings {
            left_margin: i32::MAX,
            ..Default::default()
        };
        let bricks = build_grid(&layout);
        assert_eq!(bricks.len(), 80);
        assert!(bricks.iter().all(|b| b.rect.left() == i32::MAX));
    }
}
