// Axum API Server Module
//
// Purpose: JSON proxy over the boatrace site (scraped racer pages, graded race
// list) plus the SG schedule, criteria and qualification endpoints.

#[cfg(feature = "api")]
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use moka::future::Cache;

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use crate::client::{is_valid_racer_id, BoatraceClient, FetchError};

#[cfg(feature = "api")]
use crate::config::ServerConfig;

#[cfg(feature = "api")]
use crate::criteria::{all_criteria, criteria_for};

#[cfg(feature = "api")]
use crate::qualification::evaluate;

#[cfg(feature = "api")]
use crate::schedule::{race_for, upcoming, SgRace, SG_SCHEDULE_2026};

#[cfg(feature = "api")]
use crate::scrape::{scheduled_races, HtmlParser};

#[cfg(feature = "api")]
use crate::types::{PerformanceRecord, TournamentType};

#[cfg(feature = "api")]
use crate::utils::{
    apply_official_rankings, venue_by_code, with_margin, MarginSummary, RankingEntry, DEFAULT_MARGIN,
};

#[cfg(feature = "api")]
use chrono::Datelike;

/// Upper bound on ids accepted by one batch racer request
#[cfg(feature = "api")]
pub const MAX_BATCH_IDS: usize = 200;

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub client: BoatraceClient,
    pub parser: Arc<HtmlParser>,
    pub cache: Cache<String, serde_json::Value>,
}

#[cfg(feature = "api")]
impl AppState {
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        tracing::info!("Initializing upstream client ({})...", config.upstream_base_url);
        let client = BoatraceClient::new(&config)?;

        tracing::info!("Compiling HTML extraction patterns...");
        let parser = Arc::new(HtmlParser::new()?);

        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            config: Arc::new(config),
            client,
            parser,
            cache,
        })
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Scraping proxy
        .route("/api/racer/:id", get(get_racer))
        .route("/api/racers", get(get_racers_batch))
        .route("/api/races/g1", get(get_graded_races))
        .route("/api/search", get(search_racers))

        // SG endpoints
        // static `schedule` segment wins over `:type`
        .route("/api/sg", get(list_sg_criteria))
        .route("/api/sg/schedule", get(get_sg_schedule))
        .route("/api/sg/:type", get(get_sg_detail))
        .route("/api/sg/:type/qualification", post(qualify))

        .fallback(not_found)

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive()) // browser frontend on another origin
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "api")]
async fn not_found() -> AppError {
    AppError::NotFound("endpoint not found".to_string())
}

/// Scraped profile and upcoming schedule for one racer
///
/// GET /api/racer/:id
#[cfg(feature = "api")]
async fn get_racer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !is_valid_racer_id(&id) {
        return Err(AppError::BadRequest(format!("invalid racer id: {}", id)));
    }

    let cache_key = format!("racer:{}", id);
    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for racer {}", id);
        return Ok(Json(cached));
    }

    let html = state.client.fetch_racer_page(&id).await?;
    // upstream rows carry no year
    let result = racer_payload(&state.parser, &html, chrono::Utc::now().year());

    state.cache.insert(cache_key, result.clone()).await;

    Ok(Json(result))
}

/// Query params for batch racer lookup
#[cfg(feature = "api")]
#[derive(Debug, serde::Deserialize)]
struct BatchRacerQuery {
    /// Comma-separated racer ids
    ids: Option<String>,
}

/// Batch profile fetch, `FETCH_BATCH_SIZE` upstream requests at a time
///
/// GET /api/racers?ids=4444,4320
#[cfg(feature = "api")]
async fn get_racers_batch(
    State(state): State<AppState>,
    Query(params): Query<BatchRacerQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let ids: Vec<String> = params
        .ids
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if ids.is_empty() {
        return Ok(Json(serde_json::json!({
            "rows": 0,
            "data": []
        })));
    }

    if ids.len() > MAX_BATCH_IDS {
        return Err(AppError::BadRequest(format!(
            "too many racer ids: {} (max {})",
            ids.len(),
            MAX_BATCH_IDS
        )));
    }

    tracing::info!("Fetching {} racer profiles", ids.len());
    let profiles = state
        .client
        .fetch_racer_profiles(&state.parser, &ids, state.config.fetch_batch_size)
        .await;

    Ok(Json(serde_json::json!({
        "rows": profiles.len(),
        "data": profiles,
    })))
}

/// SG and G1 meets from the race index page
///
/// GET /api/races/g1
#[cfg(feature = "api")]
async fn get_graded_races(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let cache_key = "races:g1".to_string();
    if let Some(cached) = state.cache.get(&cache_key).await {
        return Ok(Json(cached));
    }

    let html = state.client.fetch_race_index().await?;
    let races: Vec<_> = state
        .parser
        .parse_race_list(&html)
        .into_iter()
        .filter(|r| r.grade.is_premier())
        .collect();

    let result = serde_json::json!({ "races": races });
    state.cache.insert(cache_key, result.clone()).await;

    Ok(Json(result))
}

/// Profile, raw schedule rows and the same rows resolved to venue codes and dates
#[cfg(feature = "api")]
fn racer_payload(parser: &HtmlParser, html: &str, year: i32) -> serde_json::Value {
    let schedule = parser.parse_schedule(html);
    let upcoming_races = scheduled_races(&schedule, year);

    serde_json::json!({
        "racer": parser.parse_racer_info(html),
        "schedule": schedule,
        "upcomingRaces": upcoming_races,
    })
}

#[cfg(feature = "api")]
#[derive(Debug, serde::Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

/// Racer search; only registration-number lookups are supported upstream
///
/// GET /api/search?q=4444
#[cfg(feature = "api")]
async fn search_racers(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let query = params.q.as_deref().map(str::trim).unwrap_or("");
    if query.is_empty() {
        return Err(AppError::BadRequest("search query required".to_string()));
    }

    if !is_valid_racer_id(query) {
        tracing::debug!("Name search not supported upstream: '{}'", query);
        return Ok(Json(serde_json::json!({
            "query": query,
            "rows": 0,
            "data": []
        })));
    }

    let html = state.client.fetch_racer_page(query).await?;
    let profile = state.parser.parse_racer_info(&html);

    Ok(Json(serde_json::json!({
        "query": query,
        "rows": 1,
        "data": [profile],
    })))
}

/// Criteria for every tournament type
///
/// GET /api/sg
#[cfg(feature = "api")]
async fn list_sg_criteria() -> impl IntoResponse {
    Json(serde_json::json!({
        "criteria": all_criteria(),
    }))
}

#[cfg(feature = "api")]
#[derive(Debug, serde::Deserialize)]
struct ScheduleQuery {
    /// Only races not finished today
    #[serde(default)]
    upcoming: bool,
}

/// GET /api/sg/schedule?upcoming=true
#[cfg(feature = "api")]
async fn get_sg_schedule(Query(params): Query<ScheduleQuery>) -> impl IntoResponse {
    let races: Vec<&SgRace> = if params.upcoming {
        upcoming(chrono::Utc::now().date_naive()).collect()
    } else {
        SG_SCHEDULE_2026.iter().collect()
    };

    Json(serde_json::json!({
        "year": 2026,
        "races": races,
    }))
}

#[cfg(feature = "api")]
fn parse_tournament(raw: &str) -> Result<TournamentType, AppError> {
    raw.parse()
        .map_err(|e: crate::types::ParseTournamentError| AppError::NotFound(e.to_string()))
}

/// Criteria table and scheduled race for one tournament
///
/// GET /api/sg/:type
#[cfg(feature = "api")]
async fn get_sg_detail(Path(raw): Path<String>) -> Result<Json<serde_json::Value>, AppError> {
    let tournament = parse_tournament(&raw)?;
    let race = race_for(tournament);

    Ok(Json(serde_json::json!({
        "sgType": tournament,
        "criteria": criteria_for(tournament),
        "race": race,
        "venue": race.and_then(|r| venue_by_code(r.venue_code)),
    })))
}

#[cfg(feature = "api")]
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct QualificationRequest {
    records: Vec<PerformanceRecord>,
    #[serde(default)]
    prize_ranking: Vec<RankingEntry>,
    #[serde(default)]
    fan_vote_ranking: Vec<RankingEntry>,
    margin: Option<usize>,
    #[serde(default)]
    show_all: bool,
}

/// Overlay official rankings, rank, and trim to the display margin
///
/// POST /api/sg/:type/qualification
/// Body: { "records": [...], "prizeRanking": [...], "margin": 10, "showAll": false }
#[cfg(feature = "api")]
async fn qualify(
    Path(raw): Path<String>,
    Json(req): Json<QualificationRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let tournament = parse_tournament(&raw)?;
    let criteria = criteria_for(tournament);
    let margin = req.margin.unwrap_or(DEFAULT_MARGIN);
    let show_all = req.show_all;

    tracing::info!("Evaluating {} racers for {}", req.records.len(), tournament);

    // CPU-bound work: run in blocking thread pool
    let (results, overlaid) = tokio::task::spawn_blocking(move || {
        let mut records = req.records;
        let overlaid =
            apply_official_rankings(&mut records, &req.prize_ranking, &req.fan_vote_ranking);
        (evaluate(&records, tournament), overlaid)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    tracing::debug!("Official rankings applied to {} records", overlaid);

    let shown = if show_all {
        &results[..]
    } else {
        with_margin(&results, margin)
    };
    let summary = MarginSummary::new(&results, shown);

    Ok(Json(serde_json::json!({
        "sgType": tournament,
        "name": criteria.name,
        "totalSlots": criteria.total_slots,
        "qualifiedCount": summary.qualified_count,
        "borderlineCount": summary.borderline_count,
        "total": summary.total,
        "results": shown,
    })))
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Upstream(String),
    Internal(String),
}

#[cfg(feature = "api")]
impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::InvalidRacerId(_) => AppError::BadRequest(e.to_string()),
            _ => {
                tracing::warn!("Upstream fetch failed: {}", e);
                AppError::Upstream(e.to_string())
            }
        }
    }
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
