//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use roundnet_tournament_web::{
    calculate_groups, complete_round, generate_next_round, import_players, leaderboard,
    player_stats, start_tournament, update_match_score, GroupMode, Tournament, TournamentConfig,
    TournamentError, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID (sessioned). Entries are removed after inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    configuration: Option<TournamentConfig>,
    #[serde(default)]
    mode: Option<GroupMode>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default)]
    skill_rating: Option<u8>,
}

#[derive(Deserialize)]
struct SetGroupModeBody {
    mode: GroupMode,
}

#[derive(Deserialize)]
struct MatchScoreBody {
    match_id: Uuid,
    team_1_score: u32,
    team_2_score: u32,
}

#[derive(Deserialize)]
struct GroupPreviewBody {
    player_count: usize,
    mode: GroupMode,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and player id (e.g. /api/tournaments/{id}/players/{player_id})
#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    player_id: Uuid,
}

fn error_response(e: TournamentError) -> HttpResponse {
    match &e {
        TournamentError::GenerationFailed(errors) => HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": e.to_string(), "errors": errors })),
        _ => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "roundnet-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Preview how a player count splits into groups and byes without committing anything.
#[post("/api/group-sizes/preview")]
async fn api_group_preview(body: Json<GroupPreviewBody>) -> HttpResponse {
    match calculate_groups(body.player_count, body.mode) {
        Ok(config) => HttpResponse::Ok().json(config),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let configuration = body.configuration.clone().unwrap_or_default();
    let mut tournament = Tournament::new(body.name.trim(), body.description.clone(), configuration);
    if let Some(mode) = body.mode {
        tournament.group_mode = mode;
    }
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(&g.get(&id).unwrap().tournament)
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

/// Add a player (tournament must not be started).
#[post("/api/tournaments/{id}/players")]
async fn api_add_player(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.add_player(body.name.trim(), body.skill_rating) {
        Ok(_) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Bulk-add players from a CSV body of `name[,skill_rating]` lines (setup only).
#[post("/api/tournaments/{id}/players/import")]
async fn api_import_players(
    state: AppState,
    path: Path<TournamentPath>,
    body: String,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match import_players(t, body.as_bytes()) {
        Ok(added) => {
            log::info!("Imported {} players into tournament {}", added, t.id);
            HttpResponse::Ok().json(t)
        }
        Err(e) => error_response(e),
    }
}

/// Remove a player by id (setup only).
#[delete("/api/tournaments/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.remove_player(path.player_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Mark a player inactive: kept in history but excluded from future rounds.
#[post("/api/tournaments/{id}/players/{player_id}/deactivate")]
async fn api_deactivate_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.deactivate_player(path.player_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Bring a deactivated player back for future rounds.
#[post("/api/tournaments/{id}/players/{player_id}/reactivate")]
async fn api_reactivate_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.reactivate_player(path.player_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Choose the group mode (fours / mixed / custom counts; setup only).
#[put("/api/tournaments/{id}/group-mode")]
async fn api_set_group_mode(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<SetGroupModeBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.set_group_mode(body.mode) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Start the tournament: validates the player count for the chosen mode.
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match start_tournament(t) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Generate the pairings for the current round.
#[post("/api/tournaments/{id}/rounds/generate")]
async fn api_generate_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match generate_next_round(t) {
        Ok(()) => {
            log::info!("Generated round {} for tournament {}", t.current_round, t.id);
            HttpResponse::Ok().json(t)
        }
        Err(e) => {
            log::warn!("Round generation failed for tournament {}: {}", t.id, e);
            error_response(e)
        }
    }
}

/// Record the score for one match in the current round.
#[put("/api/tournaments/{id}/matches/score")]
async fn api_set_match_score(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<MatchScoreBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match update_match_score(t, body.match_id, body.team_1_score, body.team_2_score) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Complete the current round: apply points and history, open the next round.
#[post("/api/tournaments/{id}/rounds/complete")]
async fn api_complete_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match complete_round(t) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Current standings: players ranked by score, strength of schedule, name.
#[get("/api/tournaments/{id}/leaderboard")]
async fn api_leaderboard(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    HttpResponse::Ok().json(leaderboard(&entry.tournament))
}

/// Per-player statistics view.
#[get("/api/tournaments/{id}/players/{player_id}/stats")]
async fn api_player_stats(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    match player_stats(&entry.tournament, path.player_id) {
        Some(stats) => HttpResponse::Ok().json(stats),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "Player not found" })),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_group_preview)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_player)
            .service(api_import_players)
            .service(api_remove_player)
            .service(api_deactivate_player)
            .service(api_reactivate_player)
            .service(api_set_group_mode)
            .service(api_start_tournament)
            .service(api_generate_round)
            .service(api_set_match_score)
            .service(api_complete_round)
            .service(api_leaderboard)
            .service(api_player_stats)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
