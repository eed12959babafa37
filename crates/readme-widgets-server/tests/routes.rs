use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use readme_widgets_server::{AppState, Config, router};
use tower::ServiceExt;

struct Reply {
    status: StatusCode,
    content_type: Option<String>,
    body: String,
}

async fn get_with(config: &Config, uri: &str) -> Reply {
    let app = router(Arc::new(AppState::from_config(config)));
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    Reply {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

async fn get(uri: &str) -> Reply {
    get_with(&Config::default(), uri).await
}

fn assert_svg(reply: &Reply) {
    assert_eq!(reply.status, StatusCode::OK, "{}", reply.body);
    assert_eq!(reply.content_type.as_deref(), Some("image/svg+xml"));
    assert!(reply.body.starts_with("<svg "), "{}", reply.body);
}

#[tokio::test]
async fn bar_defaults_and_alias() {
    let reply = get("/progress/bar").await;
    assert_svg(&reply);
    assert!(reply.body.starts_with("<svg width=\"200px\" height=\"30px\""));
    assert!(reply.body.contains(">0%</text>"));

    let alias = get("/bar").await;
    assert_eq!(alias.body, reply.body);
}

#[tokio::test]
async fn malformed_numbers_use_defaults() {
    let garbage = get("/progress/bar?width=wide&height=&percentage=lots").await;
    let defaults = get("/progress/bar").await;
    assert_eq!(garbage.body, defaults.body);
}

#[tokio::test]
async fn bar_with_parameters() {
    let reply = get("/progress/bar?width=221&height=33&percentage=54").await;
    assert_svg(&reply);
    assert!(reply.body.contains("width=\"119px\""), "{}", reply.body);
    assert!(reply.body.contains(">54%</text>"));
}

#[tokio::test]
async fn circle_uses_legacy_pi_by_default() {
    let reply = get("/progress/circle?size=103&percentage=58").await;
    assert_svg(&reply);
    assert!(reply.body.contains("stroke-dasharray=\"132.9476, 96.2724\""), "{}", reply.body);
    assert_eq!(get("/circle?size=103&percentage=58").await.body, reply.body);
}

#[tokio::test]
async fn circle_with_full_pi() {
    let config = Config {
        ring_pi: readme_widgets::RingPi::Full,
        ..Config::default()
    };
    let reply = get_with(&config, "/progress/circle?size=103&percentage=58").await;
    assert_svg(&reply);
    assert!(!reply.body.contains("132.9476"));
}

#[tokio::test]
async fn waffle_square_count_is_capped() {
    let config = Config {
        max_squares: 20,
        ..Config::default()
    };
    let reply = get_with(&config, "/progress/waffle?numberOfSquares=5000&percentage=50").await;
    assert_svg(&reply);
    assert_eq!(reply.body.matches("class=\"gridSquare\"").count(), 20);
    assert_eq!(reply.body.matches("fill=\"#44CC11\"").count(), 10);
}

#[tokio::test]
async fn waffle_with_maximal_width() {
    let reply = get("/progress/waffle?width=9223372036854775807&numberOfSquares=100&percentage=50").await;
    assert_svg(&reply);
    assert_eq!(reply.body.matches("class=\"gridSquare\"").count(), 100);
}

#[tokio::test]
async fn waffle_defaults() {
    let reply = get("/progress/waffle").await;
    assert_svg(&reply);
    assert_eq!(reply.body.matches("class=\"gridSquare\"").count(), 100);
}

#[tokio::test]
async fn gauge_is_half_as_tall_as_wide() {
    let reply = get("/progress/gauge?width=120&percentage=30").await;
    assert_svg(&reply);
    assert!(reply.body.starts_with("<svg width=\"120px\" height=\"60px\" viewBox=\"0 0 120 60\""));
    assert_eq!(reply.body.matches("<path ").count(), 8);
    assert_eq!(reply.body.matches("<polygon ").count(), 1);
}

#[tokio::test]
async fn calendar_renders_requested_month() {
    let reply = get("/calendar?year=2023&month=1&progressDays=1,8").await;
    assert_svg(&reply);
    assert!(reply.body.contains(">January 2023</text>"));
    assert!(reply.body.contains("height=\"310px\""));
    assert_eq!(reply.body.matches("fill=\"#4c1\"").count(), 2);
    assert!(!reply.body.contains("<script"));
}

#[tokio::test]
async fn calendar_navigation() {
    let reply = get("/calendar?year=2024&month=6&progressDays=3&navigation=true").await;
    assert_svg(&reply);
    assert!(reply.body.contains("xmlns:xlink"));
    assert!(reply.body.contains("<script type=\"text/ecmascript\"><![CDATA["));
    assert!(reply.body.contains("id=\"calendarGrid\""));
}

#[tokio::test]
async fn navigation_with_days_outside_the_month() {
    let reply = get("/calendar?year=2023&month=1&progressDays=-2,5&navigation=true").await;
    assert_svg(&reply);
    assert!(reply.body.contains("var marked = {};\nmarked[-2] = true;\nmarked[5] = true;"));
    assert!(!reply.body.contains("{-2"));
}

#[tokio::test]
async fn calendar_defaults_to_today() {
    let reply = get("/calendar").await;
    assert_svg(&reply);
    let today = time::OffsetDateTime::now_utc().date();
    // a request straddling midnight may see yesterday's month
    let header = format!(">{} {}</text>", today.month(), today.year());
    let previous = today.previous_day().map(|d| format!(">{} {}</text>", d.month(), d.year()));
    assert!(
        reply.body.contains(&header) || previous.is_some_and(|p| reply.body.contains(&p)),
        "{}",
        reply.body
    );
}

#[tokio::test]
async fn calendar_errors_are_plain_text_400s() {
    let cases = [
        ("/calendar?month=13", "Month must be between 1 and 12"),
        ("/calendar?month=0", "Month must be between 1 and 12"),
        ("/calendar?month=jan", "Invalid month format: jan"),
        ("/calendar?year=abc", "Invalid year format: abc"),
        ("/calendar?year=", "Invalid year format: "),
        ("/calendar?progressDays=1,x", "Invalid progress day format: x"),
        // day list is checked before year and month
        ("/calendar?year=abc&month=13&progressDays=1,,3", "Invalid progress day format: "),
    ];
    for (uri, message) in cases {
        let reply = get(uri).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(reply.content_type.as_deref(), Some("text/plain; charset=utf-8"));
        assert_eq!(reply.body, message, "{uri}");
    }
}

#[tokio::test]
async fn health_and_version() {
    let health = get("/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert!(health.body.is_empty());

    let config = Config {
        revision: "deadbeef".into(),
        ..Config::default()
    };
    let reply = get_with(&config, "/version").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.content_type.as_deref(), Some("application/json"));
    let info: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(info["revision"], "deadbeef");
    assert_eq!(info["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn unknown_route_is_404() {
    assert_eq!(get("/progress/pie").await.status, StatusCode::NOT_FOUND);
}
