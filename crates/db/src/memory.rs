//! `MemoryStore` — an in-process document store.
//!
//! Rows live in a `BTreeMap` keyed by id, which gives the same ascending
//! scan order as the Postgres backend. Useful for local runs and for tests
//! where a real Postgres instance is unavailable or irrelevant.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::{
    models::PetRow,
    page::{Page, PageRequest},
    store::{PetStore, SequenceGenerator},
    DbError,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    pets: RwLock<BTreeMap<i64, PetRow>>,
    sequences: Mutex<HashMap<String, i64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.pets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pets.read().await.is_empty()
    }
}

#[async_trait]
impl PetStore for MemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<PetRow>, DbError> {
        Ok(self.pets.read().await.get(&id).cloned())
    }

    async fn find_by_name_and_species_and_owner(
        &self,
        name: &str,
        species: &str,
        owner_name: &str,
    ) -> Result<Option<PetRow>, DbError> {
        let pets = self.pets.read().await;
        let found = pets.values().find(|p| {
            p.name == name && p.species == species && p.owner_name.as_deref() == Some(owner_name)
        });
        Ok(found.cloned())
    }

    async fn save(&self, pet: PetRow) -> Result<PetRow, DbError> {
        let mut pets = self.pets.write().await;

        if pets.values().any(|p| p.id != pet.id && p.same_identity(&pet)) {
            return Err(DbError::Conflict(format!(
                "pets (name, species, owner_name) = ({}, {}, {:?})",
                pet.name, pet.species, pet.owner_name
            )));
        }

        let stored = match pets.get(&pet.id) {
            // Mirror the SQL upsert: the update branch never rewrites created_at.
            Some(existing) => PetRow { created_at: existing.created_at, ..pet },
            None => pet,
        };
        pets.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, pet: &PetRow) -> Result<(), DbError> {
        self.pets.write().await.remove(&pet.id);
        Ok(())
    }

    async fn find_all(&self, request: PageRequest) -> Result<Page<PetRow>, DbError> {
        let pets = self.pets.read().await;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(request.size).unwrap_or(usize::MAX);
        let content: Vec<PetRow> = pets.values().skip(skip).take(take).cloned().collect();
        Ok(Page::new(content, request, pets.len() as u64))
    }
}

#[async_trait]
impl SequenceGenerator for MemoryStore {
    async fn generate_sequence(&self, name: &str) -> Result<i64, DbError> {
        let mut sequences = self.sequences.lock().await;
        let value = sequences.entry(name.to_string()).or_insert(0);
        *value += 1;
        Ok(*value)
    }
}
