//! The storage contracts the pet service is written against.
//!
//! Two backends implement them: [`crate::PgStore`] (Postgres) and
//! [`crate::MemoryStore`] (in-process document map). A deployment picks one.

use async_trait::async_trait;

use crate::{
    models::PetRow,
    page::{Page, PageRequest},
    DbError,
};

/// Durable storage for pet rows.
#[async_trait]
pub trait PetStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<PetRow>, DbError>;

    async fn find_by_name_and_species_and_owner(
        &self,
        name: &str,
        species: &str,
        owner_name: &str,
    ) -> Result<Option<PetRow>, DbError>;

    /// Insert-or-update keyed on `pet.id`. The store never assigns ids.
    ///
    /// # Errors
    /// `DbError::Conflict` when another row already holds the same
    /// (name, species, owner) tuple.
    async fn save(&self, pet: PetRow) -> Result<PetRow, DbError>;

    async fn delete(&self, pet: &PetRow) -> Result<(), DbError>;

    /// One page of rows in ascending id order.
    async fn find_all(&self, request: PageRequest) -> Result<Page<PetRow>, DbError>;
}

/// Named monotonically increasing counters.
#[async_trait]
pub trait SequenceGenerator: Send + Sync {
    /// Advance the counter `name` and return the new value (first value is 1).
    async fn generate_sequence(&self, name: &str) -> Result<i64, DbError>;
}
