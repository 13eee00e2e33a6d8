//! Postgres backend for [`PetStore`] and [`SequenceGenerator`].

use async_trait::async_trait;
use tracing::debug;

use crate::{
    models::PetRow,
    page::{Page, PageRequest},
    pool,
    repository::{pets, sequences},
    store::{PetStore, SequenceGenerator},
    DbError, DbPool,
};

/// Relational store over a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` with a pool of at most `max_connections`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DbError> {
        pool::connect(database_url, max_connections).await.map(Self::new)
    }

    /// Bring the schema up to date.
    pub async fn migrate(&self) -> Result<(), DbError> {
        pool::migrate(&self.pool).await
    }
}

#[async_trait]
impl PetStore for PgStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<PetRow>, DbError> {
        pets::find_pet(&self.pool, id).await
    }

    async fn find_by_name_and_species_and_owner(
        &self,
        name: &str,
        species: &str,
        owner_name: &str,
    ) -> Result<Option<PetRow>, DbError> {
        pets::find_pet_by_identity(&self.pool, name, species, owner_name).await
    }

    async fn save(&self, pet: PetRow) -> Result<PetRow, DbError> {
        pets::upsert_pet(&self.pool, &pet).await
    }

    async fn delete(&self, pet: &PetRow) -> Result<(), DbError> {
        let removed = pets::delete_pet(&self.pool, pet.id).await?;
        debug!(id = pet.id, removed, "delete issued");
        Ok(())
    }

    async fn find_all(&self, request: PageRequest) -> Result<Page<PetRow>, DbError> {
        // page and size are both bounded by u32, so the offset fits in i64.
        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
        let rows = pets::list_pets(&self.pool, i64::from(request.size), offset).await?;
        let total = pets::count_pets(&self.pool).await?;
        Ok(Page::new(rows, request, u64::try_from(total).unwrap_or(0)))
    }
}

#[async_trait]
impl SequenceGenerator for PgStore {
    async fn generate_sequence(&self, name: &str) -> Result<i64, DbError> {
        sequences::next_value(&self.pool, name).await
    }
}
