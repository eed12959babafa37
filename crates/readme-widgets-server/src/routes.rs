use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use readme_widgets::{CalendarRequest, RenderConfig, WidgetError};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Config;

/// Shared, immutable per-process state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub render: RenderConfig,
    pub max_squares: i64,
    pub version: VersionInfo,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            render: RenderConfig::default().with_ring_pi(config.ring_pi),
            max_squares: config.max_squares,
            version: VersionInfo {
                version: env!("CARGO_PKG_VERSION").to_string(),
                revision: config.revision.clone(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub version: String,
    pub revision: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/calendar", get(calendar))
        .route("/progress/bar", get(bar))
        .route("/bar", get(bar))
        .route("/progress/circle", get(circle))
        .route("/circle", get(circle))
        .route("/progress/waffle", get(waffle))
        .route("/progress/gauge", get(gauge))
        .route("/health", get(health))
        .route("/version", get(version))
        .with_state(state)
}

/// A rendered document.
struct SvgDocument(String);

impl IntoResponse for SvgDocument {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, readme_widgets::CONTENT_TYPE)], self.0).into_response()
    }
}

/// A rejected calendar query, reported as plain text.
struct ApiError(WidgetError);

impl From<WidgetError> for ApiError {
    fn from(err: WidgetError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(error = %self.0, token = self.0.token(), "rejected calendar request");
        (
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.0.to_string(),
        )
            .into_response()
    }
}

/// Parse an integer parameter, falling back to `default` when it is absent
/// or malformed.
fn int_param(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarQuery {
    year: Option<String>,
    month: Option<String>,
    progress_days: Option<String>,
    navigation: Option<String>,
}

#[tracing::instrument(skip(state))]
async fn calendar(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<SvgDocument, ApiError> {
    let today = time::OffsetDateTime::now_utc().date();
    let navigation = matches!(query.navigation.as_deref(), Some("true" | "1"));
    let request = CalendarRequest::from_query(
        query.year.as_deref(),
        query.month.as_deref(),
        query.progress_days.as_deref(),
        today,
    )?
    .with_navigation(navigation);
    Ok(SvgDocument(readme_widgets::render_calendar(&request, &state.render)?))
}

#[derive(Debug, Deserialize)]
struct BarQuery {
    width: Option<String>,
    height: Option<String>,
    percentage: Option<String>,
}

#[tracing::instrument(skip(state))]
async fn bar(State(state): State<Arc<AppState>>, Query(query): Query<BarQuery>) -> SvgDocument {
    SvgDocument(readme_widgets::render_bar(
        int_param(query.width.as_deref(), readme_widgets::bar::DEFAULT_WIDTH),
        int_param(query.height.as_deref(), readme_widgets::bar::DEFAULT_HEIGHT),
        int_param(query.percentage.as_deref(), 0),
        &state.render,
    ))
}

#[derive(Debug, Deserialize)]
struct CircleQuery {
    size: Option<String>,
    percentage: Option<String>,
}

#[tracing::instrument(skip(state))]
async fn circle(State(state): State<Arc<AppState>>, Query(query): Query<CircleQuery>) -> SvgDocument {
    SvgDocument(readme_widgets::render_ring(
        int_param(query.size.as_deref(), readme_widgets::ring::DEFAULT_SIZE),
        int_param(query.percentage.as_deref(), 0),
        &state.render,
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WaffleQuery {
    width: Option<String>,
    number_of_squares: Option<String>,
    percentage: Option<String>,
}

#[tracing::instrument(skip(state))]
async fn waffle(State(state): State<Arc<AppState>>, Query(query): Query<WaffleQuery>) -> SvgDocument {
    let requested = int_param(
        query.number_of_squares.as_deref(),
        readme_widgets::waffle::DEFAULT_SQUARES,
    );
    if requested > state.max_squares {
        warn!(requested, max = state.max_squares, "capping waffle square count");
    }
    SvgDocument(readme_widgets::render_waffle(
        int_param(query.width.as_deref(), readme_widgets::waffle::DEFAULT_WIDTH),
        requested.min(state.max_squares),
        int_param(query.percentage.as_deref(), 0),
        &state.render,
    ))
}

#[derive(Debug, Deserialize)]
struct GaugeQuery {
    width: Option<String>,
    percentage: Option<String>,
}

#[tracing::instrument(skip(state))]
async fn gauge(State(state): State<Arc<AppState>>, Query(query): Query<GaugeQuery>) -> SvgDocument {
    SvgDocument(readme_widgets::render_gauge(
        int_param(query.width.as_deref(), readme_widgets::gauge::DEFAULT_WIDTH),
        int_param(query.percentage.as_deref(), 0),
        &state.render,
    ))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn version(State(state): State<Arc<AppState>>) -> Json<VersionInfo> {
    Json(state.version.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_params_fall_back_to_defaults() {
        assert_eq!(int_param(None, 200), 200);
        assert_eq!(int_param(Some(""), 200), 200);
        assert_eq!(int_param(Some("abc"), 200), 200);
        assert_eq!(int_param(Some("12.5"), 200), 200);
        assert_eq!(int_param(Some("-7"), 200), -7);
        assert_eq!(int_param(Some("+42"), 200), 42);
    }
}
