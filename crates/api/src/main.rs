use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use niche_core::domain::keyword::{ContentCompetitionData, TrendSeries};
use niche_core::domain::score::NicheScoreResult;
use niche_core::ingest::error::UpstreamError;
use niche_core::ingest::provider::Sources;
use niche_core::workflow::{
    self, BatchReport, DiscoverOutcome, ExpandOutcome, InvalidInput, VolumeReport,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = niche_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let sources = match Sources::from_settings(&settings) {
        Ok(sources) => sources,
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "upstream clients not configured");
            return Err(e);
        }
    };

    let state = AppState { sources };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/keywords/:keyword/volume", get(get_volume))
        .route("/keywords/:keyword/trend", get(get_trend))
        .route("/keywords/:keyword/competition", get(get_competition))
        .route("/keywords/:keyword/score", get(get_score))
        .route("/keywords/:keyword/expand", get(get_expand))
        .route("/keywords/:keyword/discover", get(get_discover))
        .route("/batch", post(post_batch))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    sources: Sources,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps workflow errors onto HTTP: bad input is 400, everything else came from upstream.
struct ApiError(anyhow::Error);

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        if let Some(invalid) = err.downcast_ref::<InvalidInput>() {
            return (StatusCode::BAD_REQUEST, Json(ErrorBody { error: invalid.to_string() }))
                .into_response();
        }

        sentry_anyhow::capture_anyhow(&err);
        match err.downcast_ref::<UpstreamError>() {
            Some(upstream) => {
                tracing::error!(api = upstream.api.name(), status = ?upstream.status, error = %format!("{err:#}"), "upstream request failed")
            }
            None => tracing::error!(error = %format!("{err:#}"), "request failed"),
        }
        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorBody {
                error: format!("{err:#}"),
            }),
        )
            .into_response()
    }
}

async fn get_volume(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Result<Json<VolumeReport>, ApiError> {
    let keyword = workflow::validate_keyword(&keyword)?;
    Ok(Json(workflow::lookup_volume(&state.sources, keyword).await?))
}

async fn get_trend(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Result<Json<TrendSeries>, ApiError> {
    let keyword = workflow::validate_keyword(&keyword)?;
    Ok(Json(workflow::lookup_trend(&state.sources, keyword).await?))
}

async fn get_competition(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Result<Json<ContentCompetitionData>, ApiError> {
    let keyword = workflow::validate_keyword(&keyword)?;
    Ok(Json(workflow::lookup_competition(&state.sources, keyword).await?))
}

async fn get_score(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Result<Json<NicheScoreResult>, ApiError> {
    let keyword = workflow::validate_keyword(&keyword)?;
    Ok(Json(workflow::analyze_keyword(&state.sources, keyword).await?))
}

#[derive(Debug, Deserialize)]
struct ExpandParams {
    full_score_count: Option<usize>,
}

async fn get_expand(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
    Query(params): Query<ExpandParams>,
) -> Result<Json<ExpandOutcome>, ApiError> {
    let keyword = workflow::validate_keyword(&keyword)?;
    let count = workflow::validate_count(
        "full_score_count",
        params.full_score_count,
        workflow::DEFAULT_FULL_SCORE_COUNT,
        workflow::MAX_FULL_SCORE_COUNT,
    )?;
    Ok(Json(workflow::expand_keyword(&state.sources, keyword, count).await?))
}

#[derive(Debug, Deserialize)]
struct DiscoverParams {
    limit: Option<usize>,
}

async fn get_discover(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
    Query(params): Query<DiscoverParams>,
) -> Result<Json<DiscoverOutcome>, ApiError> {
    let keyword = workflow::validate_keyword(&keyword)?;
    let limit = workflow::validate_count(
        "limit",
        params.limit,
        workflow::DEFAULT_DISCOVER_LIMIT,
        workflow::MAX_DISCOVER_LIMIT,
    )?;
    Ok(Json(workflow::discover_trending(&state.sources, keyword, limit).await?))
}

#[derive(Debug, Deserialize)]
struct BatchRequest {
    keywords: Vec<String>,
}

async fn post_batch(
    State(state): State<AppState>,
    Json(body): Json<BatchRequest>,
) -> Result<Json<BatchReport>, ApiError> {
    let keywords = workflow::validate_batch(&body.keywords)?;
    Ok(Json(workflow::batch_analyze(&state.sources, &keywords).await?))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &niche_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
