use readme_widgets::{
    CalendarRequest, DateContext, MarkedDays, RenderConfig, render_bar, render_calendar, render_gauge, render_ring,
    render_waffle,
};
use regex_lite::Regex;

fn config() -> RenderConfig {
    RenderConfig::default()
}

#[test]
fn bar_document() {
    insta::assert_snapshot!(render_bar(221, 33, 54, &config()), @r##"
    <svg width="221px" height="33px" xmlns="http://www.w3.org/2000/svg">
    <rect x="0" y="0" width="221px" height="33px" rx="3" ry="3" fill="#7A7A7A" />
    <rect x="0" y="0" width="119px" height="33px" rx="3" ry="3" fill="#44CC11" />
    <text x="110px" y="16px" font-size="16px" dominant-baseline="central" text-anchor="middle" fill="white" font-family="Arial, Helvetica, sans-serif" font-weight="bold">54%</text>
    </svg>
    "##);
}

#[test]
fn ring_document() {
    insta::assert_snapshot!(render_ring(103, 58, &config()), @r##"
    <svg width="103px" height="103px" viewBox="0 0 103 103" xmlns="http://www.w3.org/2000/svg">
    <circle cx="51.5" cy="51.5" r="36.5" stroke="lightgrey" stroke-width="15" fill="white" />
    <circle cx="51.5" cy="51.5" r="36.5" stroke="#4c1" stroke-width="15" fill="none" stroke-dasharray="132.9476, 96.2724" stroke-dashoffset="0" transform="rotate(-90, 51.5, 51.5)" />
    <text x="51.5" y="51.5" font-size="20.6px" dominant-baseline="central" text-anchor="middle" fill="black" font-family="Arial, Helvetica, sans-serif" font-weight="bold">58%</text>
    </svg>
    "##);
}

#[test]
fn small_waffle_document() {
    insta::assert_snapshot!(render_waffle(50, 4, 50, &config()), @r##"
    <svg width="55px" height="55px" xmlns="http://www.w3.org/2000/svg">
    <rect x="0" y="0" width="55px" height="55px" fill="none" />
    <rect class="gridSquare" x="3px" y="3px" width="23px" height="23px" fill="#44CC11" />
    <rect class="gridSquare" x="29px" y="3px" width="23px" height="23px" fill="#44CC11" />
    <rect class="gridSquare" x="3px" y="29px" width="23px" height="23px" fill="#7A7A7A" />
    <rect class="gridSquare" x="29px" y="29px" width="23px" height="23px" fill="#7A7A7A" />
    </svg>
    "##);
}

#[test]
fn waffle_square_count_and_fill() {
    let doc = render_waffle(300, 105, 40, &config());
    let square = Regex::new(r#"<rect class="gridSquare" x="(\d+)px" y="(\d+)px" width="27px" height="27px" fill="([^"]+)" />"#).unwrap();
    let squares: Vec<_> = square.captures_iter(&doc).collect();
    assert_eq!(squares.len(), 105);
    assert_eq!(squares.iter().filter(|c| &c[3] == "#44CC11").count(), 42);

    // 10 per row, 11 rows
    let last = &squares[104];
    assert_eq!((&last[1], &last[2]), ("123", "303"));
    assert!(doc.starts_with(r#"<svg width="303px" height="333px""#), "{doc}");
}

#[test]
fn enormous_waffle_still_renders() {
    for (width, count) in [(i64::MAX, 100), (4_000_000_000_000_000_000, 4)] {
        let doc = render_waffle(width, count, 50, &config());
        assert!(doc.ends_with("</svg>"));
        assert_eq!(doc.matches("class=\"gridSquare\"").count() as i64, count);
    }
}

fn numbers(text: &str) -> Vec<f64> {
    let number = Regex::new(r"-?\d+(?:\.\d+)?(?:e-?\d+)?").unwrap();
    number.find_iter(text).map(|m| m.as_str().parse().unwrap()).collect()
}

fn assert_close(got: &[f64], expected: &[f64]) {
    assert_eq!(got.len(), expected.len(), "{got:?} vs {expected:?}");
    for (g, e) in got.iter().zip(expected) {
        assert!((g - e).abs() < 1e-5, "{got:?} vs {expected:?}");
    }
}

#[test]
fn gauge_document_structure() {
    let doc = render_gauge(100, 50, &config());
    let lines: Vec<&str> = doc.lines().collect();
    assert_eq!(lines.len(), 11, "{doc}");
    assert_eq!(
        lines[0],
        r#"<svg width="100px" height="50px" viewBox="0 0 100 50" xmlns="http://www.w3.org/2000/svg">"#
    );

    let fills: Vec<&str> = lines[1..10]
        .iter()
        .map(|line| {
            let start = line.find("fill=\"").unwrap() + 6;
            let end = start + line[start..].find('"').unwrap();
            &line[start..end]
        })
        .collect();
    assert_eq!(
        fills,
        ["red", "orange", "yellow", "#99F255", "#44CC11", "white", "black", "black", "#7A7A7A"]
    );

    assert!(lines[1].starts_with(
        r#"<path d="M 0.000000,50.000000 A 50.000000,50.000000 0 0 1 9.549150,20.610737 L 50.000000,50.000000 L 0.000000,50.000000 Z""#
    ));
    assert!(lines[6].starts_with(r#"<path d="M50,50 L25,50 A25,25 0 1,1 75,50 Z""#));
    assert!(lines[8].starts_with(r#"<path d="M50,50 L40,50 A10,10 0 1,1 60,50 Z""#));
    assert!(lines[9].starts_with(r#"<path d="M50,50 L45,50 A5,5 0 1,1 55.00000000000001,50 Z""#));
    assert_eq!(lines[10], "</svg>");
}

#[test]
fn gauge_needle_points() {
    let doc = render_gauge(100, 50, &config());
    let polygon = Regex::new(r#"<polygon points="([^"]+)""#).unwrap();
    let points = &polygon.captures(&doc).unwrap()[1];
    assert_close(
        &numbers(points),
        &[54.852857, 45.611109, 45.147143, 45.611109, 50.0, 5.0],
    );

    let doc = render_gauge(200, 0, &config());
    let points = &polygon.captures(&doc).unwrap()[1];
    assert_close(
        &numbers(points),
        &[91.222218, 90.294286, 91.222218, 109.705714, 10.0, 100.0],
    );
}

#[test]
fn gauge_wedges_tile_the_half_disc() {
    let doc = render_gauge(100, 0, &config());
    let wedge = Regex::new(r#"<path d="M ([\d.]+),([\d.]+) A [\d.]+,[\d.]+ 0 0 1 ([\d.]+),([\d.]+) L"#).unwrap();
    let ends: Vec<[f64; 4]> = wedge
        .captures_iter(&doc)
        .map(|c| [1, 2, 3, 4].map(|i| c[i].parse::<f64>().unwrap()))
        .collect();
    assert_eq!(ends.len(), 5);
    assert_close(&ends[0][..2], &[0.0, 50.0]);
    assert_close(&ends[4][2..], &[100.0, 50.0]);
    for pair in ends.windows(2) {
        assert_close(&pair[0][2..], &pair[1][..2]);
    }
}

#[test]
fn calendar_grid_for_january_2023() {
    let request = CalendarRequest::new(
        DateContext::new(2023, 1).unwrap(),
        MarkedDays::parse("1,8,31").unwrap(),
    );
    let doc = render_calendar(&request, &config()).unwrap();

    assert!(doc.starts_with(r#"<svg width="370px" height="310px" xmlns="http://www.w3.org/2000/svg" font-family="Arial">"#));
    assert!(doc.contains(r#"<rect x="5" y="5" width="360px" height="300px" rx="15" fill="white" />"#));
    assert!(doc.contains(">January 2023</text>"));

    let cell = Regex::new(r##"<rect x="(\d+)" y="(\d+)" width="40" height="40" fill="([^"]+)" stroke="#ddd" />"##).unwrap();
    let cells: Vec<_> = cell.captures_iter(&doc).collect();
    assert_eq!(cells.len(), 31);
    // day 1 on Sunday, day 8 directly below it
    assert_eq!((&cells[0][1], &cells[0][2]), ("15", "45"));
    assert_eq!((&cells[7][1], &cells[7][2]), ("15", "95"));
    let marked: Vec<usize> = cells
        .iter()
        .enumerate()
        .filter(|(_, c)| &c[3] == "#4c1")
        .map(|(i, _)| i + 1)
        .collect();
    assert_eq!(marked, [1, 8, 31]);
}

#[test]
fn six_week_month_is_taller() {
    // June 2024 starts on a Saturday
    let request = CalendarRequest::new(DateContext::new(2024, 6).unwrap(), MarkedDays::single(1));
    let doc = render_calendar(&request, &config()).unwrap();
    assert!(doc.starts_with(r#"<svg width="370px" height="360px""#), "{doc}");
    assert!(doc.contains(r#"<text x="35" y="320" font-size="14" text-anchor="middle" fill="black">30</text>"#));
}
