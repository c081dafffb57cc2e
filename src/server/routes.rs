//! API routes
//!
//! Grouped route builders, merged by the server. Request bodies use the
//! same snake_case fields the frontend sends; skill data and projections
//! go out camelCase to match the skill file schema.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use rand::thread_rng;
use serde::{Deserialize, Serialize};

use crate::calculators::{ardy_knights, birdhouses, gotr, herbiboar, wintertodt};
use crate::hiscores::PlayerStats;
use crate::server::error::ApiError;
use crate::server::AppState;
use crate::skills::{recompute, MethodProjection, SkillData};
use crate::xp::xp_for_level;

type AppStateArc = Arc<AppState>;

// ============================================================================
// Health
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/health", get(health))
        .route("/api/health", get(health))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "xpkit",
    })
}

// ============================================================================
// Skill data and projections
// ============================================================================

pub fn skill_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/skills", get(list_skills))
        .route("/api/skill-data/:skill", get(get_skill_data))
        .route("/api/skill-data/:skill/projection", post(project_skill))
}

async fn list_skills(State(state): State<AppStateArc>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.catalog.list()?))
}

async fn get_skill_data(
    State(state): State<AppStateArc>,
    Path(skill): Path<String>,
) -> Result<Json<SkillData>, ApiError> {
    Ok(Json(state.catalog.load(&skill)?))
}

/// Current and target progress, each given as a level or as raw XP. XP
/// wins when both are present.
#[derive(Debug, Deserialize)]
struct ProjectionRequest {
    current_level: Option<u32>,
    current_xp: Option<f64>,
    target_level: Option<u32>,
    target_xp: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse {
    skill: String,
    current_xp: f64,
    target_xp: f64,
    methods: Vec<MethodProjection>,
}

fn resolve_xp(xp: Option<f64>, level: Option<u32>, field: &str) -> Result<f64, ApiError> {
    match (xp, level) {
        (Some(xp), _) if xp >= 0.0 => Ok(xp),
        (Some(_), _) => Err(ApiError::Validation(format!("{field} XP cannot be negative."))),
        (None, Some(level)) => Ok(f64::from(xp_for_level(level))),
        (None, None) => Err(ApiError::Validation(format!(
            "Provide {field}_level or {field}_xp."
        ))),
    }
}

async fn project_skill(
    State(state): State<AppStateArc>,
    Path(skill): Path<String>,
    Json(req): Json<ProjectionRequest>,
) -> Result<Json<ProjectionResponse>, ApiError> {
    let data = state.catalog.load(&skill)?;
    let current_xp = resolve_xp(req.current_xp, req.current_level, "current")?;
    let target_xp = resolve_xp(req.target_xp, req.target_level, "target")?;

    let methods = recompute(&data, current_xp, target_xp)?;
    Ok(Json(ProjectionResponse {
        skill: data.skill_name_canonical,
        current_xp,
        target_xp,
        methods,
    }))
}

// ============================================================================
// Technique calculators
// ============================================================================

pub fn calculator_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/wintertodt", post(calc_wintertodt))
        .route("/api/birdhouse", post(calc_birdhouse))
        .route("/api/ardyknights", post(calc_ardy_knights))
        .route("/api/herbiboar", post(calc_herbiboar))
        .route("/api/tools/gotr", post(calc_gotr))
        .route("/api/tools/gotr/strategy", post(gotr_strategy))
}

#[derive(Debug, Deserialize)]
struct WintertodtRequest {
    firemaking_level: u32,
    rounds_per_hour: f64,
    total_rounds: u32,
}

async fn calc_wintertodt(
    Json(req): Json<WintertodtRequest>,
) -> Result<Json<wintertodt::WintertodtResult>, ApiError> {
    let result = wintertodt::calculate(
        req.firemaking_level,
        req.rounds_per_hour,
        req.total_rounds,
        &mut thread_rng(),
    )?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct BirdhouseRequest {
    #[serde(rename = "type")]
    kind: String,
    quantity: u32,
}

async fn calc_birdhouse(
    Json(req): Json<BirdhouseRequest>,
) -> Result<Json<birdhouses::BirdhouseResult>, ApiError> {
    let kind: birdhouses::BirdhouseType = req.kind.parse()?;
    let result = birdhouses::calculate(kind, req.quantity, &mut thread_rng())?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ArdyKnightRequest {
    current_level: Option<u32>,
    current_xp: Option<f64>,
    target_level: Option<u32>,
    target_xp: Option<f64>,
    has_ardy_med: bool,
    has_thieving_cape: bool,
    has_rogues_outfit: bool,
    has_shadow_veil: bool,
    hourly_pickpockets: u32,
    food_heal_amount: u32,
    food_cost: i64,
}

async fn calc_ardy_knights(
    Json(req): Json<ArdyKnightRequest>,
) -> Result<Json<ardy_knights::ArdyKnightResult>, ApiError> {
    let current_xp = resolve_xp(req.current_xp, req.current_level, "current")? as u32;
    let target_xp = resolve_xp(req.target_xp, req.target_level, "target")? as u32;

    let setup = ardy_knights::ArdyKnightSetup {
        has_ardy_med: req.has_ardy_med,
        has_thieving_cape: req.has_thieving_cape,
        has_rogues_outfit: req.has_rogues_outfit,
        has_shadow_veil: req.has_shadow_veil,
        hourly_pickpockets: req.hourly_pickpockets,
        food_heal_amount: req.food_heal_amount,
        food_cost: req.food_cost,
    };
    let result = ardy_knights::calculate(current_xp, target_xp, setup)?;
    Ok(Json(result))
}

/// `calculation_type` selects the goal: "target" needs `target_level`,
/// "number" needs `number_to_catch`.
#[derive(Debug, Deserialize)]
struct HerbiboarRequest {
    hunter_level: u32,
    herblore_level: u32,
    #[serde(default)]
    magic_secateurs: bool,
    calculation_type: String,
    target_level: Option<u32>,
    number_to_catch: Option<u32>,
}

async fn calc_herbiboar(
    Json(req): Json<HerbiboarRequest>,
) -> Result<Json<herbiboar::HerbiboarResult>, ApiError> {
    let goal = match req.calculation_type.as_str() {
        "target" => {
            let target = req.target_level.ok_or_else(|| {
                ApiError::Validation(
                    "target_level is required for the target calculation type.".to_string(),
                )
            })?;
            herbiboar::HerbiboarGoal::TargetLevel(target)
        }
        "number" => {
            let n = req.number_to_catch.ok_or_else(|| {
                ApiError::Validation(
                    "number_to_catch is required for the number calculation type.".to_string(),
                )
            })?;
            herbiboar::HerbiboarGoal::NumberToCatch(n)
        }
        other => {
            return Err(ApiError::Validation(format!(
                "unknown calculation type: {other}"
            )))
        }
    };

    let result = herbiboar::calculate(
        req.hunter_level,
        req.herblore_level,
        req.magic_secateurs,
        goal,
    )?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct GotrRequest {
    current_level: u32,
    target_level: u32,
}

async fn calc_gotr(Json(req): Json<GotrRequest>) -> Result<Json<gotr::GotrResult>, ApiError> {
    Ok(Json(gotr::calculate(req.current_level, req.target_level)?))
}

async fn gotr_strategy(
    Json(req): Json<GotrRequest>,
) -> Result<Json<gotr::GotrStrategy>, ApiError> {
    Ok(Json(gotr::strategy(req.current_level, req.target_level)?))
}

// ============================================================================
// Player stats
// ============================================================================

pub fn player_routes() -> Router<AppStateArc> {
    Router::new().route("/api/player-stats/:username", get(get_player_stats))
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PlayerStatsQuery {
    refresh: bool,
}

#[derive(Serialize)]
struct PlayerStatsResponse {
    success: bool,
    data: PlayerStats,
}

async fn get_player_stats(
    State(state): State<AppStateArc>,
    Path(username): Path<String>,
    Query(query): Query<PlayerStatsQuery>,
) -> Result<Json<PlayerStatsResponse>, ApiError> {
    let username = username.trim();
    if query.refresh {
        state.hiscores.invalidate(username);
    }
    let stats = state.hiscores.lookup(username).await?;
    Ok(Json(PlayerStatsResponse {
        success: true,
        data: stats,
    }))
}
