use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::delivery::DeliveryRequest;
use crate::error::ScoringError;
use crate::match_engine::{ChaseStatus, Match, MatchPhase};
use crate::report::MatchReport;
use crate::scorer::{self, Command, CommandOutcome};
use crate::state::AppState;
use crate::types::{BallKind, BallSignal};

type S = Arc<AppState>;
type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

pub fn build_router(state: S) -> Router {
    Router::new()
        .route("/api/status", get(get_status))
        .route("/api/events", get(get_events))
        .route("/api/rosters", get(get_rosters))
        .route("/api/report", get(get_report))
        .route("/api/start-match", post(post_start_match))
        .route("/api/delivery", post(post_delivery))
        .route("/api/signal", post(post_signal))
        .route("/api/swap-strike", post(post_swap_strike))
        .route("/api/end-innings", post(post_end_innings))
        .route("/api/match-over", post(post_match_over))
        .route("/api/bowler", post(post_bowler))
        .route("/api/striker", post(post_striker))
        .route("/api/non-striker", post(post_non_striker))
        .route("/api/save", post(post_save))
        .route("/api/load", post(post_load))
        .route("/api/reset", post(post_reset))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn reject(e: ScoringError) -> (StatusCode, String) {
    let code = match &e {
        ScoringError::InvalidReference { .. } | ScoringError::UnknownTeam(_) => StatusCode::NOT_FOUND,
        e if e.is_input_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::CONFLICT,
    };
    (code, e.to_string())
}

// ── Status ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChaseView {
    #[serde(flatten)]
    status: ChaseStatus,
    rrr: Decimal,
}

#[derive(Serialize)]
struct StatusResponse {
    phase: MatchPhase,
    current_innings: u8,
    score: Option<String>,
    overs: Option<String>,
    run_rate: Option<Decimal>,
    free_hit: bool,
    bowling_options: Vec<String>,
    chase: Option<ChaseView>,
    winner: Option<String>,
    scorecard: Match,
}

async fn get_status(State(state): State<S>) -> Json<StatusResponse> {
    let m = state.scorecard.read().unwrap();
    let live = m.live_innings();

    Json(StatusResponse {
        phase: m.phase(),
        current_innings: m.current_innings(),
        score: live.map(|inn| format!("{}/{}", inn.total_runs(), inn.wickets())),
        overs: live.map(|inn| format!("{} / {} overs", inn.overs_played(), inn.overs_limit())),
        run_rate: m.run_rate().map(|r| r.round_dp(2)),
        free_hit: live.is_some_and(|inn| inn.is_free_hit()),
        bowling_options: live.map(|_| m.bowling_roster().to_vec()).unwrap_or_default(),
        chase: m.chase().map(|status| ChaseView { rrr: status.display_rate(), status }),
        winner: m.winner().map(|w| w.to_string()),
        scorecard: m.clone(),
    })
}

async fn get_events(State(state): State<S>) -> Json<Vec<crate::state::EventEntry>> {
    let events = state.events.lock().unwrap();
    Json(events.iter().cloned().collect())
}

async fn get_rosters(State(state): State<S>) -> Json<serde_json::Value> {
    let config = state.config.read().unwrap();
    Json(serde_json::json!({
        "team_a_name": config.team_a_name,
        "team_b_name": config.team_b_name,
        "overs_limit": config.overs_limit,
        "teams": config.team_names(),
        "rosters": config.rosters,
    }))
}

async fn get_report(State(state): State<S>) -> ApiResult<serde_json::Value> {
    let m = state.scorecard.read().unwrap();
    let report = MatchReport::from_match(&m)
        .ok_or_else(|| (StatusCode::NOT_FOUND, "no completed innings yet".into()))?;
    Ok(Json(serde_json::json!({
        "file_stem": report.file_stem(),
        "report": report,
    })))
}

// ── Match setup ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct StartMatchRequest {
    team_a: Option<String>,
    team_b: Option<String>,
    overs: Option<u32>,
}

async fn post_start_match(
    State(state): State<S>,
    Json(body): Json<StartMatchRequest>,
) -> ApiResult<serde_json::Value> {
    start_match(&state, body)?;
    Ok(Json(serde_json::json!({"ok": true})))
}

/// Config only takes the requested setup once the match has actually started.
fn start_match(state: &AppState, body: StartMatchRequest) -> Result<(), (StatusCode, String)> {
    if state.is_match_running() {
        return Err((StatusCode::CONFLICT, "match in progress — reset first".into()));
    }

    let mut config = state.config.write().unwrap();
    let team_a = body.team_a.unwrap_or_else(|| config.team_a_name.clone());
    let team_b = body.team_b.unwrap_or_else(|| config.team_b_name.clone());
    let overs = body.overs.unwrap_or(config.overs_limit);

    let m = Match::start(&team_a, &team_b, overs, &*config).map_err(reject)?;
    config.team_a_name = m.team_a().to_string();
    config.team_b_name = m.team_b().to_string();
    config.overs_limit = overs;
    config.persist();
    drop(config);

    state.push_event("match", &format!(
        "{} vs {} — {} overs, {} batting",
        m.team_a(), m.team_b(), m.overs_limit(), m.team_a()
    ));
    state.autosave(&m);
    *state.scorecard.write().unwrap() = m;
    Ok(())
}

// ── Scoring ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct DeliveryBody {
    kind: String,
    runs: Option<i64>,
    striker: Option<String>,
    bowler: Option<String>,
}

async fn post_delivery(
    State(state): State<S>,
    Json(body): Json<DeliveryBody>,
) -> ApiResult<CommandOutcome> {
    let kind: BallKind = body.kind.parse().map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    let req = DeliveryRequest { kind, runs: body.runs, striker: body.striker, bowler: body.bowler };
    let outcome = scorer::apply(&state, Command::Deliver(req)).map_err(reject)?;
    Ok(Json(outcome))
}

#[derive(Deserialize)]
struct SignalRequest {
    signal: String,
}

async fn post_signal(
    State(state): State<S>,
    Json(body): Json<SignalRequest>,
) -> ApiResult<CommandOutcome> {
    let parsed = BallSignal::parse(&body.signal)
        .ok_or_else(|| (StatusCode::BAD_REQUEST, format!("unknown signal: {}", body.signal)))?;
    scorer::apply_signal(&state, &parsed).map(Json).map_err(reject)
}

async fn post_swap_strike(State(state): State<S>) -> ApiResult<CommandOutcome> {
    scorer::apply(&state, Command::SwapStrike).map(Json).map_err(reject)
}

async fn post_end_innings(State(state): State<S>) -> ApiResult<CommandOutcome> {
    scorer::apply(&state, Command::EndInnings).map(Json).map_err(reject)
}

async fn post_match_over(State(state): State<S>) -> ApiResult<CommandOutcome> {
    scorer::apply(&state, Command::EndMatch).map(Json).map_err(reject)
}

// ── Selection (between balls) ───────────────────────────────────────────────

#[derive(Deserialize)]
struct PlayerRequest {
    name: String,
}

fn select_player(
    state: &AppState,
    kind: &str,
    name: &str,
    apply: impl FnOnce(&mut Match, &str) -> Result<(), ScoringError>,
) -> ApiResult<serde_json::Value> {
    let mut m = state.scorecard.write().unwrap();
    apply(&mut *m, name).map_err(reject)?;
    state.push_event(kind, name);
    state.autosave(&m);
    Ok(Json(serde_json::json!({"ok": true, "role": kind, "selected": name})))
}

async fn post_bowler(State(state): State<S>, Json(body): Json<PlayerRequest>) -> ApiResult<serde_json::Value> {
    select_player(&state, "bowler", &body.name, Match::set_bowler)
}

async fn post_striker(State(state): State<S>, Json(body): Json<PlayerRequest>) -> ApiResult<serde_json::Value> {
    select_player(&state, "striker", &body.name, Match::set_striker)
}

async fn post_non_striker(State(state): State<S>, Json(body): Json<PlayerRequest>) -> ApiResult<serde_json::Value> {
    select_player(&state, "non_striker", &body.name, Match::set_non_striker)
}

// ── Save / load / reset ─────────────────────────────────────────────────────

async fn post_save(State(state): State<S>) -> ApiResult<serde_json::Value> {
    state.save_now()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("save failed: {e}")))?;
    state.push_event("save", "match saved");
    Ok(Json(serde_json::json!({"ok": true})))
}

async fn post_load(State(state): State<S>) -> ApiResult<serde_json::Value> {
    let restored = state.restore()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("load failed: {e}")))?;
    if !restored {
        return Err((StatusCode::NOT_FOUND, "no saved match found".into()));
    }
    state.push_event("load", "match restored from saved state");
    Ok(Json(serde_json::json!({"ok": true})))
}

async fn post_reset(State(state): State<S>) -> ApiResult<serde_json::Value> {
    state.reset_for_new_match();
    state.push_event("reset", "state reset for new match");
    Ok(Json(serde_json::json!({"ok": true})))
}
