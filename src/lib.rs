//! SVG widgets for README files: a month calendar and four progress charts.
//!
//! Each widget module has a pure `layout` step producing a typed layout value
//! and a `to_svg` step turning it into an [`svg::Svg`] document. The
//! `render_*` functions below run both and serialize to a string.

pub mod bar;
pub mod calendar;
pub mod errors;
pub mod gauge;
pub mod log;
pub mod numeric;
pub mod palette;
pub mod ring;
pub mod svg;
pub mod waffle;

pub use calendar::{CalendarRequest, DateContext, MarkedDays};
pub use errors::WidgetError;
pub use numeric::Percentage;
pub use palette::{Palette, RenderConfig, RingPi};
pub use svg::CONTENT_TYPE;

/// Render a month calendar.
///
/// Query validation happens in [`CalendarRequest::from_query`] and
/// [`DateContext::new`]; a request built through either always renders.
pub fn render_calendar(request: &CalendarRequest, config: &RenderConfig) -> Result<String, WidgetError> {
    let layout = calendar::layout(&request.date, &request.marked);
    Ok(calendar::to_svg(&layout, config, request.navigation).to_string())
}

/// Render a horizontal progress bar.
pub fn render_bar(width: i64, height: i64, percentage: i64, config: &RenderConfig) -> String {
    bar::to_svg(&bar::layout(width, height, percentage), config).to_string()
}

/// Render a circular progress ring `diameter` pixels across.
pub fn render_ring(diameter: i64, percentage: i64, config: &RenderConfig) -> String {
    ring::to_svg(&ring::layout(diameter, percentage, config), config).to_string()
}

/// Render a waffle chart of `square_count` squares.
pub fn render_waffle(width: i64, square_count: i64, percentage: i64, config: &RenderConfig) -> String {
    waffle::to_svg(&waffle::layout(width, square_count, percentage), config).to_string()
}

/// Render a half-disc gauge.
pub fn render_gauge(width: i64, percentage: i64, config: &RenderConfig) -> String {
    gauge::to_svg(&gauge::layout(width, percentage), config).to_string()
}
