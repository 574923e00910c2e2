use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use parking_lot::RwLock;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    ingredients::IngredientList,
    models::AddIngredientRequest,
    recipes::RecipeClient,
    state::{Session, SessionSnapshot},
};

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<Session>>,
    pub recipes: Arc<RecipeClient>,
}

impl AppState {
    pub fn new(recipes: RecipeClient) -> Self {
        Self {
            session: Arc::default(),
            recipes: Arc::new(recipes),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/session", get(get_session))
        .route("/api/ingredients", post(add_ingredient))
        .route("/api/ingredients/:name", delete(remove_ingredient))
        .route("/api/recipes", post(generate_recipes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.read().snapshot())
}

pub async fn add_ingredient(
    State(state): State<AppState>,
    Json(body): Json<AddIngredientRequest>,
) -> Json<IngredientList> {
    let mut session = state.session.write();
    if session.add_ingredient(&body.name) {
        info!("➕ Added ingredient: {}", body.name.trim());
    }
    Json(session.ingredients().clone())
}

pub async fn remove_ingredient(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Json<IngredientList> {
    let mut session = state.session.write();
    if session.remove_ingredient(&name) {
        info!("➖ Removed ingredient: {}", name);
    }
    Json(session.ingredients().clone())
}

/// One generation cycle. The session lock is released while the model call
/// is in flight.
pub async fn generate_recipes(State(state): State<AppState>) -> (StatusCode, Json<SessionSnapshot>) {
    let begun = {
        let mut session = state.session.write();
        if !session.request().is_ready() {
            info!("🔁 Generation already in flight; the newest request wins");
        }
        session.begin()
    };
    let (ticket, ingredients) = match begun {
        Ok(started) => started,
        Err(e) => {
            warn!("🚫 Generation rejected: {}", e);
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(state.session.read().snapshot()),
            );
        }
    };

    let outcome = state.recipes.generate(&ingredients).await;
    let status = if outcome.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };

    let mut session = state.session.write();
    if !session.complete(ticket, outcome) {
        info!("⏭️ Result superseded by a newer generation request");
        return (StatusCode::CONFLICT, Json(session.snapshot()));
    }
    (status, Json(session.snapshot()))
}
