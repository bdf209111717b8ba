//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), DATA_DIR (schedule blobs).

use actix_files::Files;
use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use fixture_planner::{
    decode, encode, generate_fixtures, parse_roster_csv, regenerate_round, swap_teams, FileStore,
    Fixture, GenerationConfig, ScheduleHistory, ScheduleStore, Snapshot, Team, Zone,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Identifies one event (tournament day) hosted on this server.
type EventId = Uuid;

/// One hosted event: generation settings (with the roster inside), the live
/// schedule, and the undo history. The history is server-side state only and
/// is not serialized into responses.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Event {
    id: EventId,
    config: GenerationConfig,
    fixtures: Vec<Fixture>,
    zones: Vec<Zone>,
    summary: String,
    #[serde(skip)]
    history: ScheduleHistory,
}

impl Event {
    fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    fn with_id(id: EventId) -> Self {
        Self {
            id,
            config: GenerationConfig::default(),
            fixtures: Vec::new(),
            zones: Vec::new(),
            summary: String::new(),
            history: ScheduleHistory::new(),
        }
    }

    /// Replace the live schedule. The outgoing schedule goes into the undo
    /// history first, unless it was empty or `skip_history` is set (restores
    /// must not push what they are restoring over).
    fn install(
        &mut self,
        fixtures: Vec<Fixture>,
        teams: Vec<Team>,
        zones: Vec<Zone>,
        skip_history: bool,
    ) {
        if !self.fixtures.is_empty() && !skip_history {
            self.history.record(Snapshot::new(
                self.fixtures.clone(),
                self.config.teams.clone(),
                self.zones.clone(),
            ));
        }
        self.fixtures = fixtures;
        self.config.teams = teams;
        self.zones = zones;
    }
}

/// Per-event entry: event data + last activity time (for auto-cleanup).
struct EventEntry {
    event: Event,
    last_activity: Instant,
}

/// In-memory state: many events by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<EventId, EventEntry>>>;

/// Inactivity threshold: events not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

/// Store key for an event's schedule blob.
fn storage_key(id: EventId) -> String {
    format!("event-{}", id)
}

/// Serialize and write the event's schedule through the store.
fn persist(store: &Data<dyn ScheduleStore>, event: &Event) {
    match encode(&event.fixtures, &event.config.teams, &event.zones) {
        Ok(blob) => {
            if !store.set(&storage_key(event.id), &blob) {
                log::warn!("could not persist event {}", event.id);
            }
        }
        Err(e) => log::warn!("could not serialize event {}: {}", event.id, e),
    }
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Generation settings as accepted over the API. Every field is optional;
/// absent fields keep their current value.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParamsBody {
    num_pitches: Option<u32>,
    num_rounds: Option<u32>,
    match_duration: Option<u32>,
    start_time: Option<String>,
    lunch_enabled: Option<bool>,
    lunch_start: Option<String>,
    lunch_end: Option<String>,
}

impl ParamsBody {
    fn apply(&self, config: &mut GenerationConfig) {
        if let Some(v) = self.num_pitches {
            config.num_pitches = v;
        }
        if let Some(v) = self.num_rounds {
            config.num_rounds = v;
        }
        if let Some(v) = self.match_duration {
            config.match_duration = v;
        }
        if let Some(v) = &self.start_time {
            config.start_time = v.clone();
        }
        if let Some(v) = self.lunch_enabled {
            config.lunch_enabled = v;
        }
        if let Some(v) = &self.lunch_start {
            config.lunch_start = v.clone();
        }
        if let Some(v) = &self.lunch_end {
            config.lunch_end = v.clone();
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwapBody {
    source_fixture_id: String,
    /// 1 or 2: which side of the source fixture moves.
    source_slot: u8,
    destination_fixture_id: String,
    destination_team_id: String,
}

/// One row of the history listing (snapshots themselves stay server-side).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HistoryRow {
    index: usize,
    timestamp: String,
    fixture_count: usize,
    team_count: usize,
}

/// Path segment: event id (e.g. /api/events/{id})
#[derive(Deserialize)]
struct EventPath {
    id: EventId,
}

/// Path segments: event id and round number.
#[derive(Deserialize)]
struct EventRoundPath {
    id: EventId,
    round: u32,
}

/// Path segments: event id and history index (0 is the newest snapshot).
#[derive(Deserialize)]
struct EventHistoryPath {
    id: EventId,
    index: usize,
}

/// Path segments: event id and team id.
#[derive(Deserialize)]
struct EventTeamPath {
    id: EventId,
    team_id: String,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "fixture-planner-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new event (returns it with id; client stores id for subsequent requests).
#[post("/api/events")]
async fn api_create_event(state: AppState, body: Option<Json<ParamsBody>>) -> HttpResponse {
    let mut event = Event::new();
    if let Some(body) = &body {
        body.apply(&mut event.config);
    }
    let id = event.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        EventEntry {
            event,
            last_activity: Instant::now(),
        },
    );
    match g.get(&id) {
        Some(entry) => HttpResponse::Ok().json(&entry.event),
        None => HttpResponse::InternalServerError().body("lock error"),
    }
}

/// Get an event by id. An event missing from memory is rehydrated from the
/// store when a schedule blob exists for it. Touching it refreshes last_activity.
#[get("/api/events/{id}")]
async fn api_get_event(
    state: AppState,
    store: Data<dyn ScheduleStore>,
    path: Path<EventPath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if !g.contains_key(&path.id) {
        if let Some(restored) = store.get(&storage_key(path.id)).and_then(|b| decode(&b)) {
            let mut event = Event::with_id(path.id);
            event.config.teams = restored.teams;
            event.fixtures = restored.fixtures;
            event.zones = restored.zones;
            g.insert(
                path.id,
                EventEntry {
                    event,
                    last_activity: Instant::now(),
                },
            );
        }
    }
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.event)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    }
}

/// Upload the roster as CSV text (club, team count, then team name columns).
/// Replaces the event's roster; fixtures are kept until the next generate.
#[post("/api/events/{id}/roster")]
async fn api_upload_roster(state: AppState, path: Path<EventPath>, body: String) -> HttpResponse {
    let teams = match parse_roster_csv(&body) {
        Ok(teams) => teams,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    if teams.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "No teams found in file" }));
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    };
    entry.last_activity = Instant::now();
    entry.event.config.teams = teams;
    HttpResponse::Ok().json(&entry.event)
}

/// Update generation settings (only fields present in the body change).
#[put("/api/events/{id}/params")]
async fn api_set_params(
    state: AppState,
    path: Path<EventPath>,
    body: Json<ParamsBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    };
    entry.last_activity = Instant::now();
    body.apply(&mut entry.event.config);
    HttpResponse::Ok().json(&entry.event)
}

/// Generate a fresh schedule from the event's settings and roster.
#[post("/api/events/{id}/generate")]
async fn api_generate(
    state: AppState,
    store: Data<dyn ScheduleStore>,
    path: Path<EventPath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    };
    entry.last_activity = Instant::now();
    match generate_fixtures(&entry.event.config) {
        Ok(schedule) => {
            log::info!("event {}: {}", entry.event.id, schedule.summary);
            entry
                .event
                .install(schedule.fixtures, schedule.teams, schedule.zones, false);
            entry.event.summary = schedule.summary;
            persist(&store, &entry.event);
            HttpResponse::Ok().json(&entry.event)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Redo the pairings of a single round, leaving all other rounds in place.
#[post("/api/events/{id}/rounds/{round}/regenerate")]
async fn api_regenerate_round(
    state: AppState,
    store: Data<dyn ScheduleStore>,
    path: Path<EventRoundPath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    };
    entry.last_activity = Instant::now();
    let event = &mut entry.event;
    let merged = regenerate_round(
        path.round,
        &event.fixtures,
        &event.config.teams,
        &event.zones,
        event.config.num_rounds,
        &event.config.start_time,
    );
    let teams = event.config.teams.clone();
    let zones = event.zones.clone();
    event.install(merged, teams, zones, false);
    persist(&store, event);
    HttpResponse::Ok().json(&*event)
}

/// Exchange a team in one fixture for a chosen team in another fixture.
#[post("/api/events/{id}/swap")]
async fn api_swap_teams(
    state: AppState,
    store: Data<dyn ScheduleStore>,
    path: Path<EventPath>,
    body: Json<SwapBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    };
    entry.last_activity = Instant::now();
    let event = &mut entry.event;
    let mut updated = event.fixtures.clone();
    match swap_teams(
        &mut updated,
        &body.source_fixture_id,
        body.source_slot,
        &body.destination_fixture_id,
        &body.destination_team_id,
    ) {
        Some(_) => {
            let teams = event.config.teams.clone();
            let zones = event.zones.clone();
            event.install(updated, teams, zones, false);
            persist(&store, event);
            HttpResponse::Ok().json(&*event)
        }
        None => HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Fixture or team not found" })),
    }
}

/// List undo snapshots, newest first.
#[get("/api/events/{id}/history")]
async fn api_history(state: AppState, path: Path<EventPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    };
    entry.last_activity = Instant::now();
    let rows: Vec<HistoryRow> = entry
        .event
        .history
        .iter()
        .enumerate()
        .map(|(index, snapshot)| HistoryRow {
            index,
            timestamp: snapshot.timestamp.clone(),
            fixture_count: snapshot.fixtures.len(),
            team_count: snapshot.teams.len(),
        })
        .collect();
    HttpResponse::Ok().json(rows)
}

/// Restore the snapshot at the given index, removing it from the history.
/// The restored schedule is not itself pushed onto the history.
#[post("/api/events/{id}/history/{index}/restore")]
async fn api_restore_history(
    state: AppState,
    store: Data<dyn ScheduleStore>,
    path: Path<EventHistoryPath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    };
    entry.last_activity = Instant::now();
    let event = &mut entry.event;
    match event.history.restore(path.index) {
        Some(snapshot) => {
            event.install(snapshot.fixtures, snapshot.teams, snapshot.zones, true);
            persist(&store, event);
            HttpResponse::Ok().json(&*event)
        }
        None => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": "No snapshot at index" }))
        }
    }
}

/// All fixtures a team plays in, sorted by kickoff time.
#[get("/api/events/{id}/teams/{team_id}/fixtures")]
async fn api_team_fixtures(state: AppState, path: Path<EventTeamPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" })),
    };
    entry.last_activity = Instant::now();
    let mut fixtures: Vec<Fixture> = entry
        .event
        .fixtures
        .iter()
        .filter(|f| f.involves(&path.team_id))
        .cloned()
        .collect();
    fixtures.sort_by(|a, b| a.time.cmp(&b.time));
    HttpResponse::Ok().json(fixtures)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> String {
    "data".to_string()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| default_data_dir());
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!("Schedule blobs stored under {}/", data_dir);

    let state = Data::new(RwLock::new(HashMap::<EventId, EventEntry>::new()));
    let store: Data<dyn ScheduleStore> = Data::from(
        Arc::new(FileStore::new(data_dir)) as Arc<dyn ScheduleStore>
    );

    // Background task: every 30 minutes, remove events inactive for 12+ hours
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
                log::info!("Cleaned up {} inactive event(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(store.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_create_event)
            .service(api_get_event)
            .service(api_upload_roster)
            .service(api_set_params)
            .service(api_generate)
            .service(api_regenerate_round)
            .service(api_swap_teams)
            .service(api_history)
            .service(api_restore_history)
            .service(api_team_fixtures)
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
