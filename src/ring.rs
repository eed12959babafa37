//! Circular progress ring drawn with a dashed stroke.

use crate::numeric::Percentage;
use crate::palette::RenderConfig;
use crate::svg::{Circle, Dim, Svg, Text, ViewBox};

pub const DEFAULT_SIZE: i64 = 100;
pub const STROKE_WIDTH: f64 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingLayout {
    pub size: i64,
    pub percentage: Percentage,
    pub center: f64,
    /// `size / 2 - STROKE_WIDTH`; negative for tiny sizes
    pub radius: f64,
    pub circumference: f64,
    pub filled: f64,
    pub unfilled: f64,
    pub font_size: f64,
}

pub fn layout(size: i64, percentage: i64, config: &RenderConfig) -> RingLayout {
    let percentage = Percentage::clamped(percentage);
    let size_f = size as f64;
    let radius = size_f / 2.0 - STROKE_WIDTH;
    let circumference = 2.0 * config.ring_pi.value() * radius;
    let filled = circumference * percentage.get() as f64 / 100.0;

    crate::log::debug!(size, radius, circumference, filled, "ring layout");

    RingLayout {
        size,
        percentage,
        center: size_f / 2.0,
        radius,
        circumference,
        filled,
        unfilled: circumference - filled,
        font_size: size_f / 5.0,
    }
}

pub fn to_svg(ring: &RingLayout, config: &RenderConfig) -> Svg {
    let palette = &config.palette;
    let c = ring.center;

    let mut svg = Svg::new(Dim::px(ring.size), Dim::px(ring.size))
        .with_view_box(ViewBox::sized(ring.size as f64, ring.size as f64));
    svg.push(Circle {
        cx: c,
        cy: c,
        r: ring.radius,
        stroke: Some(palette.ring_track.into()),
        stroke_width: Some(STROKE_WIDTH),
        fill: Some(palette.white.into()),
        ..Default::default()
    });
    svg.push(Circle {
        cx: c,
        cy: c,
        r: ring.radius,
        stroke: Some(palette.ring_fill.into()),
        stroke_width: Some(STROKE_WIDTH),
        fill: Some("none".into()),
        stroke_dasharray: Some((ring.filled, ring.unfilled)),
        stroke_dashoffset: Some(0.0),
        transform: Some(format!("rotate(-90, {c}, {c})")),
    });
    svg.push(Text {
        x: Dim::User(c),
        y: Dim::User(c),
        font_size: Some(Dim::Px(ring.font_size)),
        dominant_baseline: Some("central".into()),
        text_anchor: Some("middle".into()),
        fill: Some(palette.black.into()),
        font_family: Some("Arial, Helvetica, sans-serif".into()),
        font_weight: Some("bold".into()),
        content: ring.percentage.to_string(),
        ..Default::default()
    });
    svg
}
