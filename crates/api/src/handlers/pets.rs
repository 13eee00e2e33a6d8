use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use db::{Page, PageRequest};
use serde::{Deserialize, Serialize};
use service::{Pet, PetRequest, Species};

use super::AppState;
use crate::ApiError;

/// Pet as returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetResponse {
    pub id: i64,
    pub name: String,
    pub species: Species,
    pub age: Option<i32>,
    pub owner_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl From<Pet> for PetResponse {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id,
            name: pet.name,
            species: pet.species,
            age: pet.age,
            owner_name: pet.owner_name,
            created_at: pet.created_at,
            last_modified: pet.last_modified,
        }
    }
}

/// `?page=&size=` for the list endpoint. Out-of-range values are clamped
/// rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl From<PageParams> for PageRequest {
    fn from(params: PageParams) -> Self {
        let page = params
            .page
            .map_or(PageRequest::DEFAULT_PAGE, |p| u32::try_from(p.max(0)).unwrap_or(u32::MAX));
        let size = match params.size {
            Some(s) if s >= 1 => u32::try_from(s).unwrap_or(u32::MAX),
            _ => PageRequest::DEFAULT_SIZE,
        };
        PageRequest::new(page, size)
    }
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<PetRequest>, JsonRejection>,
) -> Result<Json<PetResponse>, ApiError> {
    let Json(request) = payload?;
    let pet = state.pets.create_pet(request).await?;
    Ok(Json(pet.into()))
}

pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<PetResponse>, ApiError> {
    let Path(id) = id?;
    let pet = state.pets.get_pet(id).await?;
    Ok(Json(pet.into()))
}

pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page<PetResponse>>, ApiError> {
    let Query(params) = params?;
    let page = state.pets.get_all_pets(params.into()).await?;
    Ok(Json(page.map(PetResponse::from)))
}

pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<PetRequest>, JsonRejection>,
) -> Result<Json<PetResponse>, ApiError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let pet = state.pets.update_pet(id, request).await?;
    Ok(Json(pet.into()))
}

pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.pets.delete_pet(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
