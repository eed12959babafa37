//! Colors and tunables shared by every widget.
//!
//! Everything here is immutable; a [`RenderConfig`] is built once and passed
//! by reference into each render call.

/// Named colors used by the widgets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub progress_active: &'static str,
    pub progress_inactive: &'static str,
    pub white: &'static str,
    pub black: &'static str,
    /// Gauge scale, low to high
    pub bands: [&'static str; 5],
    pub calendar_marked: &'static str,
    pub calendar_unmarked: &'static str,
    pub calendar_stroke: &'static str,
    pub ring_track: &'static str,
    pub ring_fill: &'static str,
    pub nav_button: &'static str,
}

impl Palette {
    pub const STANDARD: Palette = Palette {
        progress_active: "#44CC11",
        progress_inactive: "#7A7A7A",
        white: "white",
        black: "black",
        bands: ["red", "orange", "yellow", "#99F255", "#44CC11"],
        calendar_marked: "#4c1",
        calendar_unmarked: "#f0f0f0",
        calendar_stroke: "#ddd",
        ring_track: "lightgrey",
        ring_fill: "#4c1",
        nav_button: "#007bff",
    };

    /// The grey used for the gauge hub; same as the inactive progress color.
    pub fn grey(&self) -> &'static str {
        self.progress_inactive
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::STANDARD
    }
}

/// Which value of π the ring chart uses for its circumference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RingPi {
    /// `3.14`, reproducing the historical dash lengths exactly
    #[default]
    Legacy,
    /// [`std::f64::consts::PI`]
    Full,
}

impl RingPi {
    #[allow(clippy::approx_constant)]
    pub const LEGACY_VALUE: f64 = 3.14;

    pub fn value(self) -> f64 {
        match self {
            RingPi::Legacy => Self::LEGACY_VALUE,
            RingPi::Full => std::f64::consts::PI,
        }
    }
}

impl std::str::FromStr for RingPi {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(RingPi::Legacy),
            "full" => Ok(RingPi::Full),
            other => Err(format!("unknown ring pi mode: {other:?} (expected `legacy` or `full`)")),
        }
    }
}

/// Configuration handed to every render function.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RenderConfig {
    pub palette: Palette,
    pub ring_pi: RingPi,
}

impl RenderConfig {
    pub fn with_ring_pi(mut self, ring_pi: RingPi) -> Self {
        self.ring_pi = ring_pi;
        self
    }
}
