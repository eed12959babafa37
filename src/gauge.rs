//! Dial gauge: a five-band half disc with a needle.
//!
//! Angles are in SVG's y-down frame, so 180° points left along the baseline
//! and 270° points straight up. The bands sweep 180°..360° left to right.

use glam::DVec2;

use crate::numeric::{Percentage, positive_or};
use crate::palette::RenderConfig;
use crate::svg::{Dim, Path, PathData, Polygon, Svg, ViewBox};

pub const DEFAULT_WIDTH: i64 = 100;
const BAND_COUNT: usize = 5;
const BAND_SWEEP_DEG: f64 = 36.0;
const BASELINE_DEG: f64 = 180.0;
const NEEDLE_SHAFT: f64 = 0.45;
const NEEDLE_BASE: f64 = 0.75;
const NEEDLE_SPREAD_DEG: f64 = 15.0;

/// One colored band of the scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wedge {
    /// 0 = lowest band
    pub band: usize,
    pub start_deg: f64,
    pub end_deg: f64,
}

/// Closed pie slice: arc from `start_deg` to `end_deg`, then back through the
/// center. Coordinates are printed with six decimals.
pub fn pie_path(center: f64, radius: f64, start_deg: f64, end_deg: f64) -> PathData {
    let c = DVec2::splat(center);
    let start = c + DVec2::from_angle(start_deg.to_radians()) * radius;
    let end = c + DVec2::from_angle(end_deg.to_radians()) * radius;
    PathData::fixed()
        .m(start.x, start.y)
        .a(radius, radius, 0.0, false, true, end.x, end.y)
        .l(c.x, c.y)
        .l(start.x, start.y)
        .z()
}

/// The needle triangle: two base points and the tip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Needle {
    /// Radians, `π` at 0% and `2π` at 100%
    pub angle: f64,
    pub points: [DVec2; 3],
}

impl Needle {
    pub fn new(center: f64, percentage: Percentage) -> Needle {
        let angle = percentage.fraction() * std::f64::consts::PI + std::f64::consts::PI;
        let c = DVec2::splat(center);
        let shaft = center * NEEDLE_SHAFT;
        let half_base = center * NEEDLE_BASE * 0.5;
        let spread = NEEDLE_SPREAD_DEG.to_radians();

        let dir = DVec2::from_angle(angle);
        let root = c + dir * shaft;
        Needle {
            angle,
            points: [
                root - DVec2::from_angle(angle - spread) * half_base,
                root - DVec2::from_angle(angle + spread) * half_base,
                root + dir * shaft,
            ],
        }
    }

    pub fn tip(&self) -> DVec2 {
        self.points[2]
    }
}

/// A decorative half disc over the hub, described by multiples of the center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HubDisc {
    pub left: f64,
    pub radius: f64,
    pub right: f64,
}

impl HubDisc {
    const ALL: [HubDisc; 3] = [
        HubDisc { left: 0.5, radius: 0.5, right: 1.5 },
        HubDisc { left: 0.8, radius: 0.2, right: 1.2 },
        HubDisc { left: 0.9, radius: 0.1, right: 1.1 },
    ];

    pub fn path(&self, center: f64) -> PathData {
        let r = center * self.radius;
        PathData::new()
            .m(center, center)
            .l(center * self.left, center)
            .a(r, r, 0.0, true, true, center * self.right, center)
            .z()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GaugeLayout {
    pub width: i64,
    pub percentage: Percentage,
    pub center: f64,
    pub wedges: Vec<Wedge>,
    pub needle: Needle,
    /// White, black and grey hub discs, largest first
    pub hubs: [HubDisc; 3],
}

impl GaugeLayout {
    pub fn hub_radii(&self) -> [f64; 3] {
        self.hubs.map(|h| self.center * h.radius)
    }
}

pub fn layout(width: i64, percentage: i64) -> GaugeLayout {
    let width = positive_or(width, DEFAULT_WIDTH);
    let percentage = Percentage::clamped(percentage);
    let center = width as f64 / 2.0;

    let wedges = (0..BAND_COUNT)
        .map(|band| Wedge {
            band,
            start_deg: BASELINE_DEG + band as f64 * BAND_SWEEP_DEG,
            end_deg: BASELINE_DEG + (band + 1) as f64 * BAND_SWEEP_DEG,
        })
        .collect();
    let needle = Needle::new(center, percentage);

    crate::log::debug!(width, center, angle = needle.angle, "gauge layout");

    GaugeLayout {
        width,
        percentage,
        center,
        wedges,
        needle,
        hubs: HubDisc::ALL,
    }
}

pub fn to_svg(gauge: &GaugeLayout, config: &RenderConfig) -> Svg {
    let palette = &config.palette;
    let c = gauge.center;

    let mut svg = Svg::new(Dim::px(gauge.width), Dim::Px(c))
        .with_view_box(ViewBox::sized(gauge.width as f64, c));
    for wedge in &gauge.wedges {
        svg.push(Path {
            d: pie_path(c, c, wedge.start_deg, wedge.end_deg),
            fill: Some(palette.bands[wedge.band].into()),
        });
    }

    let [white, black, grey] = gauge.hubs;
    svg.push(Path {
        d: white.path(c),
        fill: Some(palette.white.into()),
    });
    svg.push(Polygon {
        points: gauge.needle.points.to_vec(),
        fill: Some(palette.black.into()),
    });
    svg.push(Path {
        d: black.path(c),
        fill: Some(palette.black.into()),
    });
    svg.push(Path {
        d: grey.path(c),
        fill: Some(palette.grey().into()),
    });
    svg
}
