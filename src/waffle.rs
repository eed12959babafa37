//! Waffle chart: a near-square grid of squares, the first N of them filled.

use crate::numeric::{Percentage, add, ceil_div, div, modulo, mul, positive_or};
use crate::palette::RenderConfig;
use crate::svg::{Dim, Rect, Svg};

pub const DEFAULT_WIDTH: i64 = 100;
pub const DEFAULT_SQUARES: i64 = 100;
/// Space between squares and around the grid
pub const GAP: i64 = 3;
const MIN_SQUARE_SIZE: f64 = 10.0;

/// Rows and columns of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub per_row: i64,
    pub per_column: i64,
}

/// Pick a grid shape for `count` squares in roughly `width` pixels.
///
/// Non-positive `width` or `count` fall back to the defaults.
pub fn grid_size(width: i64, count: i64, gap: i64) -> GridSize {
    let width = positive_or(width, DEFAULT_WIDTH);
    let count = positive_or(count, DEFAULT_SQUARES);

    let estimated_per_row = (count as f64).sqrt() as i64;
    let total_gap = mul(estimated_per_row - 1, gap);
    let adjusted_width = width - total_gap;
    let ideal_size = (adjusted_width as f64 / estimated_per_row as f64).max(MIN_SQUARE_SIZE) as i64;

    let per_row = div(adjusted_width, ideal_size).max(1);
    GridSize {
        per_row,
        per_column: ceil_div(count, per_row),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Square {
    pub x: i64,
    pub y: i64,
    pub filled: bool,
}

/// Position `count` squares row-major, marking the first `filled` of them.
pub fn place_squares(width: i64, per_row: i64, count: i64, filled: i64, gap: i64) -> Vec<Square> {
    let available = width - mul(gap, per_row - 1);
    let square_width = div(available, per_row);
    // Always zero for integer inputs; kept so the column pitch matches
    // historical output exactly.
    let extra_per_square = div(modulo(available, per_row), per_row);

    (0..count.max(0))
        .map(|i| Square {
            x: add(gap, mul(modulo(i, per_row), add(add(square_width, gap), extra_per_square))),
            y: add(gap, mul(div(i, per_row), add(square_width, gap))),
            filled: i < filled,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaffleLayout {
    /// Canvas size
    pub width: i64,
    pub height: i64,
    pub square_size: i64,
    pub grid: GridSize,
    pub filled_count: i64,
    pub squares: Vec<Square>,
}

pub fn layout(width: i64, count: i64, percentage: i64) -> WaffleLayout {
    let width = positive_or(width, DEFAULT_WIDTH);
    let count = positive_or(count, DEFAULT_SQUARES);
    let percentage = Percentage::clamped(percentage);

    let grid = grid_size(width, count, GAP);
    let square_size = div(width - mul(grid.per_row - 1, GAP), grid.per_row);
    let filled_count = percentage.of(count);
    let squares = place_squares(width, grid.per_row, count, filled_count, GAP);

    crate::log::debug!(
        width,
        count,
        per_row = grid.per_row,
        per_column = grid.per_column,
        square_size,
        filled_count,
        "waffle layout"
    );

    WaffleLayout {
        width: add(mul(add(square_size, GAP), grid.per_row), GAP),
        height: add(mul(add(square_size, GAP), grid.per_column), GAP),
        square_size,
        grid,
        filled_count,
        squares,
    }
}

pub fn to_svg(waffle: &WaffleLayout, config: &RenderConfig) -> Svg {
    let palette = &config.palette;
    let mut svg = Svg::new(Dim::px(waffle.width), Dim::px(waffle.height));
    svg.push(Rect {
        x: Dim::user(0),
        y: Dim::user(0),
        width: Dim::px(waffle.width),
        height: Dim::px(waffle.height),
        fill: Some("none".into()),
        ..Default::default()
    });
    for square in &waffle.squares {
        let fill = if square.filled {
            palette.progress_active
        } else {
            palette.progress_inactive
        };
        svg.push(Rect {
            class: Some("gridSquare".into()),
            x: Dim::px(square.x),
            y: Dim::px(square.y),
            width: Dim::px(waffle.square_size),
            height: Dim::px(waffle.square_size),
            fill: Some(fill.into()),
            ..Default::default()
        });
    }
    svg
}
