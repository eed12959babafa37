//! Typed SVG shape records and their serializer.
//!
//! Layout engines build an [`Svg`] out of [`SvgNode`]s carrying literal
//! numeric attributes; `Display` on [`Svg`] walks the tree and emits markup.
//! Attribute order is fixed per element type so output is byte-stable.

use std::fmt;

use enum_dispatch::enum_dispatch;
use glam::DVec2;

/// SVG namespace URI
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// XLink namespace URI
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Content type every rendered document is served with
pub const CONTENT_TYPE: &str = "image/svg+xml";

/// A length attribute, either unitless (user units) or suffixed with `px`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Dim {
    User(f64),
    Px(f64),
}

impl Dim {
    #[inline]
    pub fn user(value: i64) -> Dim {
        Dim::User(value as f64)
    }

    #[inline]
    pub fn px(value: i64) -> Dim {
        Dim::Px(value as f64)
    }
}

impl Default for Dim {
    fn default() -> Self {
        Dim::User(0.0)
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dim::User(v) => write!(f, "{v}"),
            Dim::Px(v) => write!(f, "{v}px"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn sized(width: f64, height: f64) -> ViewBox {
        ViewBox {
            min_x: 0.0,
            min_y: 0.0,
            width,
            height,
        }
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

// ============================================================================
// Path data
// ============================================================================

/// How coordinates inside a path's `d` attribute are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PathStyle {
    /// `M50,50 L25,50 A25,25 0 1,1 75,50 Z`
    #[default]
    Compact,
    /// `M 0.000000,50.000000 A 50.000000,50.000000 0 0 1 ...`
    Fixed6,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum PathCmd {
    Move(DVec2),
    Line(DVec2),
    Arc {
        radii: DVec2,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: DVec2,
    },
    Close,
}

/// Fluent builder for the `d` attribute of a `<path>`.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct PathData {
    cmds: Vec<PathCmd>,
    style: PathStyle,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder printing every coordinate with six decimals.
    pub fn fixed() -> Self {
        Self {
            cmds: Vec::new(),
            style: PathStyle::Fixed6,
        }
    }

    pub fn m(mut self, x: f64, y: f64) -> Self {
        self.cmds.push(PathCmd::Move(DVec2::new(x, y)));
        self
    }

    pub fn l(mut self, x: f64, y: f64) -> Self {
        self.cmds.push(PathCmd::Line(DVec2::new(x, y)));
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn a(mut self, rx: f64, ry: f64, rotation: f64, large_arc: bool, sweep: bool, x: f64, y: f64) -> Self {
        self.cmds.push(PathCmd::Arc {
            radii: DVec2::new(rx, ry),
            rotation,
            large_arc,
            sweep,
            to: DVec2::new(x, y),
        });
        self
    }

    pub fn z(mut self) -> Self {
        self.cmds.push(PathCmd::Close);
        self
    }

    fn write_point(&self, f: &mut fmt::Formatter<'_>, p: DVec2) -> fmt::Result {
        match self.style {
            PathStyle::Compact => write!(f, "{},{}", p.x, p.y),
            PathStyle::Fixed6 => write!(f, "{:.6},{:.6}", p.x, p.y),
        }
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = match self.style {
            PathStyle::Compact => "",
            PathStyle::Fixed6 => " ",
        };
        for (i, cmd) in self.cmds.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match *cmd {
                PathCmd::Move(p) => {
                    write!(f, "M{sep}")?;
                    self.write_point(f, p)?;
                }
                PathCmd::Line(p) => {
                    write!(f, "L{sep}")?;
                    self.write_point(f, p)?;
                }
                PathCmd::Arc {
                    radii,
                    rotation,
                    large_arc,
                    sweep,
                    to,
                } => {
                    write!(f, "A{sep}")?;
                    self.write_point(f, radii)?;
                    let (large_arc, sweep) = (u8::from(large_arc), u8::from(sweep));
                    match self.style {
                        PathStyle::Compact => write!(f, " {rotation} {large_arc},{sweep} ")?,
                        PathStyle::Fixed6 => write!(f, " {rotation} {large_arc} {sweep} ")?,
                    }
                    self.write_point(f, to)?;
                }
                PathCmd::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// Serialization
// ============================================================================

/// Minimal XML emitter used by the node types.
struct XmlWriter<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
}

impl<'a, 'b> XmlWriter<'a, 'b> {
    fn open(&mut self, tag: &str) -> fmt::Result {
        write!(self.f, "<{tag}")
    }

    fn attr(&mut self, name: &str, value: impl fmt::Display) -> fmt::Result {
        write!(self.f, " {name}=\"")?;
        write_escaped(self.f, &value.to_string(), true)?;
        self.f.write_str("\"")
    }

    fn opt_attr<T: fmt::Display>(&mut self, name: &str, value: Option<T>) -> fmt::Result {
        match value {
            Some(v) => self.attr(name, v),
            None => Ok(()),
        }
    }

    fn close_empty(&mut self) -> fmt::Result {
        self.f.write_str(" />")
    }

    fn end_start_tag(&mut self) -> fmt::Result {
        self.f.write_str(">")
    }

    fn text(&mut self, content: &str) -> fmt::Result {
        write_escaped(self.f, content, false)
    }

    fn raw(&mut self, content: &str) -> fmt::Result {
        self.f.write_str(content)
    }

    fn close(&mut self, tag: &str) -> fmt::Result {
        write!(self.f, "</{tag}>")
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str, in_attr: bool) -> fmt::Result {
    for c in s.chars() {
        match c {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' if in_attr => f.write_str("&quot;")?,
            _ => write!(f, "{c}")?,
        }
    }
    Ok(())
}

/// Common behavior for every node: serialize itself.
#[enum_dispatch]
trait WriteSvg {
    fn write_svg(&self, w: &mut XmlWriter<'_, '_>) -> fmt::Result;
}

/// Any node a widget document may contain
#[enum_dispatch(WriteSvg)]
#[derive(Clone, Debug, PartialEq)]
pub enum SvgNode {
    Rect,
    Circle,
    Path,
    Polygon,
    Text,
    Group,
    Script,
}

/// `<rect>`
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Rect {
    pub id: Option<String>,
    pub class: Option<String>,
    pub x: Dim,
    pub y: Dim,
    pub width: Dim,
    pub height: Dim,
    pub rx: Option<f64>,
    pub ry: Option<f64>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
}

impl WriteSvg for Rect {
    fn write_svg(&self, w: &mut XmlWriter<'_, '_>) -> fmt::Result {
        w.open("rect")?;
        w.opt_attr("id", self.id.as_deref())?;
        w.opt_attr("class", self.class.as_deref())?;
        w.attr("x", self.x)?;
        w.attr("y", self.y)?;
        w.attr("width", self.width)?;
        w.attr("height", self.height)?;
        w.opt_attr("rx", self.rx)?;
        w.opt_attr("ry", self.ry)?;
        w.opt_attr("fill", self.fill.as_deref())?;
        w.opt_attr("stroke", self.stroke.as_deref())?;
        w.close_empty()
    }
}

/// `<circle>`
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub fill: Option<String>,
    /// `(dash, gap)`
    pub stroke_dasharray: Option<(f64, f64)>,
    pub stroke_dashoffset: Option<f64>,
    pub transform: Option<String>,
}

impl WriteSvg for Circle {
    fn write_svg(&self, w: &mut XmlWriter<'_, '_>) -> fmt::Result {
        w.open("circle")?;
        w.attr("cx", self.cx)?;
        w.attr("cy", self.cy)?;
        w.attr("r", self.r)?;
        w.opt_attr("stroke", self.stroke.as_deref())?;
        w.opt_attr("stroke-width", self.stroke_width)?;
        w.opt_attr("fill", self.fill.as_deref())?;
        if let Some((dash, gap)) = self.stroke_dasharray {
            w.attr("stroke-dasharray", format_args!("{dash}, {gap}"))?;
        }
        w.opt_attr("stroke-dashoffset", self.stroke_dashoffset)?;
        w.opt_attr("transform", self.transform.as_deref())?;
        w.close_empty()
    }
}

/// `<path>`
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Path {
    pub d: PathData,
    pub fill: Option<String>,
}

impl WriteSvg for Path {
    fn write_svg(&self, w: &mut XmlWriter<'_, '_>) -> fmt::Result {
        w.open("path")?;
        w.attr("d", &self.d)?;
        w.opt_attr("fill", self.fill.as_deref())?;
        w.close_empty()
    }
}

/// `<polygon>`
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Polygon {
    pub points: Vec<DVec2>,
    pub fill: Option<String>,
}

impl WriteSvg for Polygon {
    fn write_svg(&self, w: &mut XmlWriter<'_, '_>) -> fmt::Result {
        let points = self
            .points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        w.open("polygon")?;
        w.attr("points", points)?;
        w.opt_attr("fill", self.fill.as_deref())?;
        w.close_empty()
    }
}

/// `<text>`
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Text {
    pub id: Option<String>,
    pub x: Dim,
    pub y: Dim,
    pub font_size: Option<Dim>,
    pub dominant_baseline: Option<String>,
    pub text_anchor: Option<String>,
    pub fill: Option<String>,
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub content: String,
}

impl WriteSvg for Text {
    fn write_svg(&self, w: &mut XmlWriter<'_, '_>) -> fmt::Result {
        w.open("text")?;
        w.opt_attr("id", self.id.as_deref())?;
        w.attr("x", self.x)?;
        w.attr("y", self.y)?;
        w.opt_attr("font-size", self.font_size)?;
        w.opt_attr("dominant-baseline", self.dominant_baseline.as_deref())?;
        w.opt_attr("text-anchor", self.text_anchor.as_deref())?;
        w.opt_attr("fill", self.fill.as_deref())?;
        w.opt_attr("font-family", self.font_family.as_deref())?;
        w.opt_attr("font-weight", self.font_weight.as_deref())?;
        w.end_start_tag()?;
        w.text(&self.content)?;
        w.close("text")
    }
}

/// `<g>`
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Group {
    pub id: Option<String>,
    pub onmousedown: Option<String>,
    pub style: Option<String>,
    pub children: Vec<SvgNode>,
}

impl WriteSvg for Group {
    fn write_svg(&self, w: &mut XmlWriter<'_, '_>) -> fmt::Result {
        w.open("g")?;
        w.opt_attr("id", self.id.as_deref())?;
        w.opt_attr("onmousedown", self.onmousedown.as_deref())?;
        w.opt_attr("style", self.style.as_deref())?;
        w.end_start_tag()?;
        for child in &self.children {
            w.raw("\n")?;
            child.write_svg(w)?;
        }
        w.raw("\n")?;
        w.close("g")
    }
}

/// `<script>` with its body wrapped in CDATA. The body is emitted verbatim.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Script {
    pub content: String,
}

impl WriteSvg for Script {
    fn write_svg(&self, w: &mut XmlWriter<'_, '_>) -> fmt::Result {
        w.open("script")?;
        w.attr("type", "text/ecmascript")?;
        w.end_start_tag()?;
        w.raw("<![CDATA[")?;
        w.raw(&self.content)?;
        w.raw("]]>")?;
        w.close("script")
    }
}

/// Root `<svg>` element
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Svg {
    pub width: Option<Dim>,
    pub height: Option<Dim>,
    pub view_box: Option<ViewBox>,
    pub font_family: Option<String>,
    /// Declare `xmlns:xlink`
    pub xlink: bool,
    pub children: Vec<SvgNode>,
}

impl Svg {
    pub fn new(width: Dim, height: Dim) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    pub fn with_view_box(mut self, view_box: ViewBox) -> Self {
        self.view_box = Some(view_box);
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn with_xlink(mut self) -> Self {
        self.xlink = true;
        self
    }

    pub fn push(&mut self, node: impl Into<SvgNode>) {
        self.children.push(node.into());
    }
}

impl fmt::Display for Svg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut w = XmlWriter { f };
        w.open("svg")?;
        w.opt_attr("width", self.width)?;
        w.opt_attr("height", self.height)?;
        w.opt_attr("viewBox", self.view_box)?;
        w.attr("xmlns", SVG_NS)?;
        w.opt_attr("font-family", self.font_family.as_deref())?;
        if self.xlink {
            w.attr("xmlns:xlink", XLINK_NS)?;
        }
        w.end_start_tag()?;
        for child in &self.children {
            w.raw("\n")?;
            child.write_svg(&mut w)?;
        }
        w.raw("\n")?;
        w.close("svg")
    }
}
