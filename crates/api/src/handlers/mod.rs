//! Request handlers and the state they share.

use std::sync::Arc;

use axum::Json;
use serde_json::{json, Value};
use service::PetService;

pub mod pets;


/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pets: Arc<PetService>,
}

impl AppState {
    pub fn new(pets: PetService) -> Self {
        Self { pets: Arc::new(pets) }
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
