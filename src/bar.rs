//! Linear progress bar.

use crate::numeric::{Percentage, div};
use crate::palette::RenderConfig;
use crate::svg::{Dim, Rect, Svg, Text};

pub const DEFAULT_WIDTH: i64 = 200;
pub const DEFAULT_HEIGHT: i64 = 30;
const CORNER_RADIUS: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarLayout {
    pub width: i64,
    pub height: i64,
    pub percentage: Percentage,
    pub fill_width: i64,
    /// Label anchor
    pub text_x: i64,
    pub text_y: i64,
    pub font_size: i64,
}

pub fn layout(width: i64, height: i64, percentage: i64) -> BarLayout {
    let percentage = Percentage::clamped(percentage);
    let bar = BarLayout {
        width,
        height,
        percentage,
        fill_width: percentage.of(width),
        text_x: div(width, 2),
        text_y: div(height, 2),
        font_size: div(height, 2),
    };
    crate::log::debug!(width, height, fill = bar.fill_width, "bar layout");
    bar
}

pub fn to_svg(bar: &BarLayout, config: &RenderConfig) -> Svg {
    let palette = &config.palette;
    let track = |width: i64, fill: &str| Rect {
        x: Dim::user(0),
        y: Dim::user(0),
        width: Dim::px(width),
        height: Dim::px(bar.height),
        rx: Some(CORNER_RADIUS),
        ry: Some(CORNER_RADIUS),
        fill: Some(fill.to_string()),
        ..Default::default()
    };

    let mut svg = Svg::new(Dim::px(bar.width), Dim::px(bar.height));
    svg.push(track(bar.width, palette.progress_inactive));
    svg.push(track(bar.fill_width, palette.progress_active));
    svg.push(Text {
        x: Dim::px(bar.text_x),
        y: Dim::px(bar.text_y),
        font_size: Some(Dim::px(bar.font_size)),
        dominant_baseline: Some("central".into()),
        text_anchor: Some("middle".into()),
        fill: Some(palette.white.into()),
        font_family: Some("Arial, Helvetica, sans-serif".into()),
        font_weight: Some("bold".into()),
        content: bar.percentage.to_string(),
        ..Default::default()
    });
    svg
}
