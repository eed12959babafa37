//! Month calendar: weekday offset, day count and the 7-column day grid.

use std::collections::BTreeSet;

use time::{Date, Month};

use crate::errors::WidgetError;
use crate::numeric::{div, modulo, mul};
use crate::palette::{Palette, RenderConfig};
use crate::svg::{Dim, Group, Rect, Script, Svg, SvgNode, Text};

pub const CANVAS_WIDTH: i64 = 370;
const CELL_PITCH: i64 = 50;
const CELL_SIZE: i64 = 40;
const GRID_LEFT: i64 = 15;
const GRID_TOP: i64 = 45;
const LABEL_DX: i64 = 20;
const LABEL_DY: i64 = 25;
/// Five full weeks; anything past this spills into a sixth row.
const FIVE_WEEKS: i64 = 35;

/// A validated (year, month) pair with its derived calendar facts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateContext {
    year: i32,
    month: Month,
    weekday_of_first: i64,
    days_in_month: i64,
}

impl DateContext {
    pub fn new(year: i64, month: i64) -> Result<Self, WidgetError> {
        let month = u8::try_from(month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or(WidgetError::InvalidMonth { month })?;
        let year_i32 = i32::try_from(year).map_err(|_| WidgetError::YearOutOfRange { year })?;
        let first = Date::from_calendar_date(year_i32, month, 1)
            .map_err(|_| WidgetError::YearOutOfRange { year })?;

        Ok(Self {
            year: year_i32,
            month,
            weekday_of_first: i64::from(first.weekday().number_days_from_sunday()),
            days_in_month: last_day_of_month(first),
        })
    }

    pub fn year(&self) -> i64 {
        i64::from(self.year)
    }

    pub fn month(&self) -> Month {
        self.month
    }

    /// 1-based month number
    pub fn month_number(&self) -> i64 {
        i64::from(u8::from(self.month))
    }

    /// 0 = Sunday .. 6 = Saturday
    pub fn weekday_of_first(&self) -> i64 {
        self.weekday_of_first
    }

    pub fn days_in_month(&self) -> i64 {
        self.days_in_month
    }

    pub fn month_name(&self) -> String {
        self.month.to_string()
    }
}

/// Day-of-month of the day before the first of the following month.
fn last_day_of_month(first: Date) -> i64 {
    let next_first = match first.month() {
        Month::December => first
            .year()
            .checked_add(1)
            .and_then(|y| Date::from_calendar_date(y, Month::January, 1).ok()),
        m => Date::from_calendar_date(first.year(), m.next(), 1).ok(),
    };
    match next_first.and_then(Date::previous_day) {
        Some(last) => i64::from(last.day()),
        // December of the last representable year
        None => i64::from(time::util::days_in_year_month(first.year(), first.month())),
    }
}

/// Day numbers to highlight. Values outside the month are kept and ignored.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct MarkedDays(BTreeSet<i64>);

impl MarkedDays {
    pub fn single(day: i64) -> Self {
        Self(BTreeSet::from([day]))
    }

    /// Parse a comma-separated list such as `1,15,22`.
    pub fn parse(list: &str) -> Result<Self, WidgetError> {
        list.split(',')
            .map(|token| {
                token.parse::<i64>().map_err(|_| WidgetError::InvalidDay {
                    token: token.to_string(),
                })
            })
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    pub fn contains(&self, day: i64) -> bool {
        self.0.contains(&day)
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<i64> for MarkedDays {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything needed to draw one calendar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarRequest {
    pub date: DateContext,
    pub marked: MarkedDays,
    /// Embed the prev/next month script and buttons
    pub navigation: bool,
}

impl CalendarRequest {
    pub fn new(date: DateContext, marked: MarkedDays) -> Self {
        Self {
            date,
            marked,
            navigation: false,
        }
    }

    pub fn with_navigation(mut self, navigation: bool) -> Self {
        self.navigation = navigation;
        self
    }

    /// Build a request from raw query tokens.
    ///
    /// Absent tokens default to `today`; an empty `progress_days` also means
    /// "today". Days are checked first, then the year, then the month.
    pub fn from_query(
        year: Option<&str>,
        month: Option<&str>,
        progress_days: Option<&str>,
        today: Date,
    ) -> Result<Self, WidgetError> {
        let marked = match progress_days {
            Some(list) if !list.is_empty() => MarkedDays::parse(list)?,
            _ => MarkedDays::single(i64::from(today.day())),
        };

        let year = match year {
            Some(token) => token.parse::<i64>().map_err(|_| WidgetError::InvalidYear {
                token: token.to_string(),
            })?,
            None => i64::from(today.year()),
        };

        let month = match month {
            Some(token) => token
                .parse::<i64>()
                .map_err(|_| WidgetError::InvalidMonthFormat {
                    token: token.to_string(),
                })?,
            None => i64::from(u8::from(today.month())),
        };

        Ok(Self::new(DateContext::new(year, month)?, marked))
    }
}

/// One day's position in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub day: i64,
    /// 0 = Sunday column
    pub column: i64,
    pub row: i64,
    pub marked: bool,
}

impl GridCell {
    /// Top-left corner of the cell rectangle.
    pub fn origin(&self) -> (i64, i64) {
        (
            mul(self.column, CELL_PITCH) + GRID_LEFT,
            mul(self.row, CELL_PITCH) + GRID_TOP,
        )
    }

    /// Anchor of the centered day label.
    pub fn label_anchor(&self) -> (i64, i64) {
        let (x, y) = self.origin();
        (x + LABEL_DX, y + LABEL_DY)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CanvasHeight {
    /// Fits in five week rows
    Short,
    /// Needs a sixth row
    Tall,
}

impl CanvasHeight {
    pub fn px(self) -> i64 {
        match self {
            CanvasHeight::Short => 310,
            CanvasHeight::Tall => 360,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthLayout {
    pub year: i64,
    pub month_number: i64,
    pub month_name: String,
    pub weekday_of_first: i64,
    pub days_in_month: i64,
    pub cells: Vec<GridCell>,
    pub height: CanvasHeight,
    pub marked_days: Vec<i64>,
}

pub fn layout(date: &DateContext, marked: &MarkedDays) -> MonthLayout {
    let start = date.weekday_of_first();
    let days = date.days_in_month();

    let cells = (1..=days)
        .map(|day| {
            let position = day + start - 1;
            GridCell {
                day,
                column: modulo(position, 7),
                row: div(position, 7),
                marked: marked.contains(day),
            }
        })
        .collect();

    let height = if start + days <= FIVE_WEEKS {
        CanvasHeight::Short
    } else {
        CanvasHeight::Tall
    };

    crate::log::debug!(
        year = date.year(),
        month = date.month_number(),
        start,
        days,
        ?height,
        "calendar layout"
    );

    MonthLayout {
        year: date.year(),
        month_number: date.month_number(),
        month_name: date.month_name(),
        weekday_of_first: start,
        days_in_month: days,
        cells,
        height,
        marked_days: marked.iter().collect(),
    }
}

pub fn to_svg(layout: &MonthLayout, config: &RenderConfig, navigation: bool) -> Svg {
    let palette = &config.palette;
    let height = layout.height.px();

    let mut svg = Svg::new(Dim::px(CANVAS_WIDTH), Dim::px(height)).with_font_family("Arial");
    if navigation {
        svg = svg.with_xlink();
        svg.push(Script {
            content: navigation_script(layout, palette),
        });
    }

    let id = |name: &str| navigation.then(|| name.to_string());

    svg.push(Rect {
        id: id("bgRect"),
        x: Dim::user(5),
        y: Dim::user(5),
        width: Dim::px(CANVAS_WIDTH - 10),
        height: Dim::px(height - 10),
        rx: Some(15.0),
        fill: Some(palette.white.into()),
        ..Default::default()
    });
    svg.push(Text {
        id: id("monthHeader"),
        x: Dim::user(180),
        y: Dim::user(35),
        font_size: Some(Dim::user(20)),
        text_anchor: Some("middle".into()),
        fill: Some(palette.black.into()),
        content: format!("{} {}", layout.month_name, layout.year),
        ..Default::default()
    });

    if navigation {
        svg.push(nav_button("prevButton", "prevMonth();", 15, "← Prev", config));
        svg.push(nav_button("nextButton", "nextMonth();", 295, "Next →", config));
    }

    let mut cells: Vec<SvgNode> = Vec::with_capacity(layout.cells.len() * 2);
    for cell in &layout.cells {
        let (x, y) = cell.origin();
        let (tx, ty) = cell.label_anchor();
        let (fill, ink) = if cell.marked {
            (palette.calendar_marked, palette.white)
        } else {
            (palette.calendar_unmarked, palette.black)
        };
        cells.push(
            Rect {
                x: Dim::user(x),
                y: Dim::user(y),
                width: Dim::user(CELL_SIZE),
                height: Dim::user(CELL_SIZE),
                fill: Some(fill.into()),
                stroke: Some(palette.calendar_stroke.into()),
                ..Default::default()
            }
            .into(),
        );
        cells.push(
            Text {
                x: Dim::user(tx),
                y: Dim::user(ty),
                font_size: Some(Dim::user(14)),
                text_anchor: Some("middle".into()),
                fill: Some(ink.into()),
                content: cell.day.to_string(),
                ..Default::default()
            }
            .into(),
        );
    }

    if navigation {
        svg.push(Group {
            id: Some("calendarGrid".into()),
            children: cells,
            ..Default::default()
        });
    } else {
        svg.children.extend(cells);
    }

    svg
}

fn nav_button(id: &str, handler: &str, x: i64, label: &str, config: &RenderConfig) -> Group {
    Group {
        id: Some(id.into()),
        onmousedown: Some(handler.into()),
        style: Some("cursor:pointer;".into()),
        children: vec![
            Rect {
                x: Dim::user(x),
                y: Dim::user(15),
                width: Dim::user(60),
                height: Dim::user(25),
                rx: Some(5.0),
                fill: Some(config.palette.nav_button.into()),
                ..Default::default()
            }
            .into(),
            Text {
                x: Dim::user(x + 30),
                y: Dim::user(32),
                font_size: Some(Dim::user(12)),
                text_anchor: Some("middle".into()),
                fill: Some(config.palette.white.into()),
                content: label.into(),
                ..Default::default()
            }
            .into(),
        ],
    }
}

/// Client-side month switcher. Redraws the grid with the same geometry as
/// [`layout`]; the service only emits it.
const NAVIGATION_SCRIPT: &str = r#"
var currentYear = @YEAR@;
var currentMonth = @MONTH@;
var marked = {};
@MARKED@
var monthNames = ["January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December"];

function daysIn(year, month) { return new Date(year, month, 0).getDate(); }
function firstWeekday(year, month) { return new Date(year, month - 1, 1).getDay(); }

function svgNode(tag, attrs) {
    var node = document.createElementNS("http://www.w3.org/2000/svg", tag);
    for (var key in attrs) { node.setAttribute(key, attrs[key]); }
    return node;
}

function redraw() {
    var days = daysIn(currentYear, currentMonth);
    var start = firstWeekday(currentYear, currentMonth);
    document.getElementById("monthHeader").textContent = monthNames[currentMonth - 1] + " " + currentYear;

    var grid = document.getElementById("calendarGrid");
    while (grid.firstChild) { grid.removeChild(grid.firstChild); }

    for (var day = 1; day <= days; day++) {
        var position = day + start - 1;
        var x = (position % 7) * 50 + 15;
        var y = Math.floor(position / 7) * 50 + 45;
        var on = marked[day] === true;
        grid.appendChild(svgNode("rect", {x: x, y: y, width: 40, height: 40,
            fill: on ? "@MARKED_FILL@" : "@UNMARKED_FILL@", stroke: "@STROKE@"}));
        var label = svgNode("text", {x: x + 20, y: y + 25, "font-size": 14,
            "text-anchor": "middle", fill: on ? "white" : "black"});
        label.textContent = day;
        grid.appendChild(label);
    }

    var height = start + days > 35 ? 360 : 310;
    document.documentElement.setAttribute("height", height + "px");
    document.getElementById("bgRect").setAttribute("height", (height - 10) + "px");
}

function prevMonth() {
    currentMonth--;
    if (currentMonth < 1) { currentMonth = 12; currentYear--; }
    redraw();
}

function nextMonth() {
    currentMonth++;
    if (currentMonth > 12) { currentMonth = 1; currentYear++; }
    redraw();
}
"#;

fn navigation_script(layout: &MonthLayout, palette: &Palette) -> String {
    let marked = layout
        .marked_days
        .iter()
        .map(|d| format!("marked[{d}] = true;"))
        .collect::<Vec<_>>()
        .join("\n");
    NAVIGATION_SCRIPT
        .replace("@YEAR@", &layout.year.to_string())
        .replace("@MONTH@", &layout.month_number.to_string())
        .replace("@MARKED@", &marked)
        .replace("@MARKED_FILL@", palette.calendar_marked)
        .replace("@UNMARKED_FILL@", palette.calendar_unmarked)
        .replace("@STROKE@", palette.calendar_stroke)
}
