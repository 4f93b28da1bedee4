use axum::{
    extract::{Json, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wordchain_engine::leaderboard::LeaderboardStats;
use wordchain_engine::{
    rank_of, GameConfig, GameSnapshot, GameStore, GameSummary, LeaderboardEntry, Rank, Rejection,
    ScoreSubmission, Turn, WordChainEngine, WordChainError,
};

/// Header carrying the caller identity supplied by the auth proxy
const USER_ID_HEADER: &str = "x-user-id";

/// How often stale games are swept from memory
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Clone)]
struct AppState {
    engine: Arc<WordChainEngine>,
    games: Arc<Mutex<GameStore>>,
}

#[derive(Debug, Default, Deserialize)]
struct NewGameRequest {
    #[serde(default)]
    word: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MoveRequest {
    word: String,
}

#[derive(Debug, Deserialize)]
struct TopQuery {
    limit: Option<usize>,
    word: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WordQuery {
    word: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WordsResponse {
    words: Vec<String>,
    default_word: String,
    time_limit_secs: u64,
}

#[derive(Debug, Serialize)]
struct GameResponse {
    id: u64,
    game: GameSnapshot,
}

#[derive(Debug, Serialize)]
struct MoveResponse {
    turn: Turn,
    message: String,
    game: GameSnapshot,
}

#[derive(Debug, Serialize)]
struct EndResponse {
    id: u64,
    summary: GameSummary,
    submission: ScoreSubmission,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordchain_server=debug,wordchain_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_path = std::env::var("DB_PATH").unwrap_or_else(|_| "wordchain.db".to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8090);
    let config = GameConfig::from_env()?;

    tracing::info!("Starting word-chain server");
    tracing::info!("Database: {}", db_path);
    tracing::info!("Port: {}", port);

    let games = Arc::new(Mutex::new(GameStore::new(config.session_retention())));
    let engine = WordChainEngine::new(&db_path, config).await?;

    tokio::spawn(cleanup_games(games.clone()));

    let state = AppState {
        engine: Arc::new(engine),
        games,
    };

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/words", get(words_handler))
        .route("/v1/rank/:score", get(rank_handler))
        .route("/v1/games", post(create_game_handler))
        .route("/v1/games/:id", get(get_game_handler))
        .route("/v1/games/:id/moves", post(move_handler))
        .route("/v1/games/:id/end", post(end_game_handler))
        .route("/v1/games/:id/reset", post(reset_game_handler))
        .route("/v1/leaderboard", post(submit_score_handler))
        .route("/v1/leaderboard/top", get(top_scores_handler))
        .route("/v1/leaderboard/user/:user_id", get(user_best_handler))
        .route("/v1/stats", get(stats_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn cleanup_games(games: Arc<Mutex<GameStore>>) {
    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
    loop {
        interval.tick().await;
        let mut games = games.lock().await;
        let removed = games.cleanup_at(Instant::now());
        if removed > 0 {
            tracing::info!("Cleaned up {} games, {} active", removed, games.len());
        }
    }
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: wordchain_engine::VERSION.to_string(),
    })
}

async fn words_handler(State(state): State<AppState>) -> Json<WordsResponse> {
    let config = state.engine.config();
    Json(WordsResponse {
        words: config.starting_words().iter().map(|w| w.to_string()).collect(),
        default_word: config.default_starting_word().to_string(),
        time_limit_secs: config.time_limit_secs,
    })
}

async fn rank_handler(Path(score): Path<u32>) -> Json<Rank> {
    Json(rank_of(score))
}

async fn create_game_handler(
    State(state): State<AppState>,
    Json(req): Json<NewGameRequest>,
) -> Result<Json<GameResponse>, AppError> {
    let session = state.engine.new_session(req.word.as_deref())?;
    let now = Instant::now();
    let game = session.snapshot_at(now);

    let id = state.games.lock().await.insert_at(session, now);
    tracing::info!("Game {} started from {}", id, game.starting_word);

    Ok(Json(GameResponse { id, game }))
}

async fn get_game_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<GameResponse>, AppError> {
    let now = Instant::now();
    let mut games = state.games.lock().await;
    let session = games.get_mut_at(id, now).ok_or(AppError::GameNotFound(id))?;

    session.expire_if_due(now);

    Ok(Json(GameResponse {
        id,
        game: session.snapshot_at(now),
    }))
}

async fn move_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, AppError> {
    let mut games = state.games.lock().await;
    let session = games
        .get_mut_at(id, Instant::now())
        .ok_or(AppError::GameNotFound(id))?;

    let turn = state.engine.submit_move(session, &req.word)?;
    let message = turn.describe();

    tracing::info!("Game {}: {} -> {} {}", id, turn.from, turn.to, message);

    Ok(Json(MoveResponse {
        turn,
        message,
        game: session.snapshot_at(Instant::now()),
    }))
}

async fn end_game_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<EndResponse>, AppError> {
    let mut session = state
        .games
        .lock()
        .await
        .remove(id)
        .ok_or(AppError::GameNotFound(id))?;

    session.expire_if_due(Instant::now());
    session.end();
    tracing::info!("Game {} finished with {}", id, session.score());

    Ok(Json(EndResponse {
        id,
        summary: session.summary(),
        submission: session.submission(),
    }))
}

async fn reset_game_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<GameResponse>, AppError> {
    let mut games = state.games.lock().await;
    let session = games
        .get_mut_at(id, Instant::now())
        .ok_or(AppError::GameNotFound(id))?;

    session.reset();

    Ok(Json(GameResponse {
        id,
        game: session.snapshot_at(Instant::now()),
    }))
}

async fn submit_score_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(submission): Json<ScoreSubmission>,
) -> Result<Json<LeaderboardEntry>, AppError> {
    let user_id = headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(AppError::Unauthorized)?
        .to_string();

    let entry = state.engine.submit_score(&user_id, submission).await?;
    Ok(Json(entry))
}

async fn top_scores_handler(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let entries = state
        .engine
        .top_scores(query.limit, query.word.as_deref())
        .await?;
    Ok(Json(entries))
}

async fn user_best_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<WordQuery>,
) -> Result<Json<Option<LeaderboardEntry>>, AppError> {
    let best = state
        .engine
        .user_best_score(&user_id, query.word.as_deref())
        .await?;
    Ok(Json(best))
}

async fn stats_handler(State(state): State<AppState>) -> Result<Json<LeaderboardStats>, AppError> {
    Ok(Json(state.engine.stats().await?))
}

// Error handling
enum AppError {
    Rejected(Rejection),
    GameNotFound(u64),
    Unauthorized,
    Engine(WordChainError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, reason) = match self {
            AppError::Rejected(rejection) => {
                (StatusCode::UNPROCESSABLE_ENTITY, rejection.to_string(), Some(rejection.code()))
            }
            AppError::GameNotFound(id) => (StatusCode::NOT_FOUND, format!("No game with id {}", id), None),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string(), None),
            AppError::Engine(e @ WordChainError::UnknownStartingWord(_))
            | AppError::Engine(e @ WordChainError::InvalidSubmission(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string(), None)
            }
            AppError::Engine(e @ WordChainError::SessionInProgress) => (StatusCode::CONFLICT, e.to_string(), None),
            AppError::Engine(e) => {
                tracing::error!("Submission failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Submission failed".to_string(), None)
            }
        };

        if status.is_server_error() {
            tracing::error!("{} - {}", status, message);
        } else {
            tracing::debug!("{} - {}", status, message);
        }

        (status, Json(ErrorResponse { error: message, reason })).into_response()
    }
}

impl From<WordChainError> for AppError {
    fn from(err: WordChainError) -> Self {
        match err {
            WordChainError::Move(rejection) => AppError::Rejected(rejection),
            other => AppError::Engine(other),
        }
    }
}

impl From<Rejection> for AppError {
    fn from(rejection: Rejection) -> Self {
        AppError::Rejected(rejection)
    }
}
