use std::sync::Arc;

use axum::{extract::State, Json};

use crate::chat::{ChatRequest, ChatResponse};
use crate::utils::state::AppState;

pub async fn ask(State(state): State<Arc<AppState>>, Json(request): Json<ChatRequest>) -> Json<ChatResponse> {
    Json(state.chat.answer(&request.query).await)
}
