//! The pet service.
//!
//! `PetService` owns the rules around the store:
//! 1. Validates request fields before touching the store.
//! 2. Rejects a create whose (name, species, owner) tuple is already taken.
//! 3. Assigns ids from the `pet_sequence` counter and stamps timestamps.
//! 4. Turns store failures into [`ServiceError::Generic`] with a fixed
//!    message, logging the underlying cause.

use std::sync::Arc;

use chrono::Utc;
use db::{DbError, Page, PageRequest, PetRow, PetStore, SequenceGenerator};
use tracing::{error, info, instrument};

use crate::{Pet, PetFields, PetRequest, ServiceError};

/// Name of the counter that hands out pet ids.
pub const PET_SEQUENCE: &str = "pet_sequence";

const SAVE_FAILED: &str = "Failed to save pet";
const LOAD_FAILED: &str = "Failed to load pet";
const LIST_FAILED: &str = "Failed to list pets";
const UPDATE_FAILED: &str = "Failed to update pet";
const DELETE_FAILED: &str = "Failed to delete pet";

/// Orchestrates validation and persistence for pet records.
///
/// Cheap to share: clone the surrounding `Arc` rather than the service.
pub struct PetService {
    store: Arc<dyn PetStore>,
    sequence: Arc<dyn SequenceGenerator>,
}

impl PetService {
    pub fn new(store: Arc<dyn PetStore>, sequence: Arc<dyn SequenceGenerator>) -> Self {
        Self { store, sequence }
    }

    /// Create a pet from `request`.
    ///
    /// # Errors
    /// `Validation` for bad fields, `AlreadyExists` when the tuple is taken,
    /// `Generic` when the store fails.
    #[instrument(skip(self, request), fields(name = %request.name, species = %request.species))]
    pub async fn create_pet(&self, request: PetRequest) -> Result<Pet, ServiceError> {
        let fields = PetFields::try_from(request)?;

        let existing = self
            .store
            .find_by_name_and_species_and_owner(
                fields.name(),
                fields.species().as_str(),
                fields.owner_name(),
            )
            .await
            .map_err(|e| generic(SAVE_FAILED, e))?;
        if existing.is_some() {
            return Err(already_exists(&fields));
        }

        let id = self
            .sequence
            .generate_sequence(PET_SEQUENCE)
            .await
            .map_err(|e| generic(SAVE_FAILED, e))?;

        let saved = self
            .store
            .save(fields.to_new_row(id, Utc::now()))
            .await
            .map_err(|e| match e {
                DbError::Conflict(_) => already_exists(&fields),
                other => generic(SAVE_FAILED, other),
            })?;

        info!(id, "pet created");
        to_pet(saved, SAVE_FAILED)
    }

    /// Fetch one pet.
    ///
    /// # Errors
    /// `NotFound` when absent, `Generic` when the store fails.
    #[instrument(skip(self))]
    pub async fn get_pet(&self, id: i64) -> Result<Pet, ServiceError> {
        let row = self.find_row(id).await?;
        to_pet(row, LOAD_FAILED)
    }

    /// One page of pets in store order.
    #[instrument(skip(self))]
    pub async fn get_all_pets(&self, request: PageRequest) -> Result<Page<Pet>, ServiceError> {
        let page = self
            .store
            .find_all(request)
            .await
            .map_err(|e| generic(LIST_FAILED, e))?;

        page.try_map(Pet::try_from).map_err(|e| {
            error!(error = %e, "stored pet has an unreadable species");
            ServiceError::Generic(LIST_FAILED)
        })
    }

    /// Replace the mutable fields of pet `id`.
    ///
    /// # Errors
    /// `Validation` for bad fields, `NotFound` when absent, `AlreadyExists`
    /// when the new tuple belongs to another pet, `Generic` on store failure.
    #[instrument(skip(self, request), fields(name = %request.name, species = %request.species))]
    pub async fn update_pet(&self, id: i64, request: PetRequest) -> Result<Pet, ServiceError> {
        let fields = PetFields::try_from(request)?;
        let existing = self.find_row(id).await?;
        let conflict = already_exists(&fields);

        let saved = self
            .store
            .save(fields.apply_to(existing, Utc::now()))
            .await
            .map_err(|e| match e {
                DbError::Conflict(_) => conflict,
                other => generic(UPDATE_FAILED, other),
            })?;

        info!(id, "pet updated");
        to_pet(saved, UPDATE_FAILED)
    }

    /// Hard-delete pet `id`.
    ///
    /// # Errors
    /// `NotFound` when absent (including a repeat delete), `Generic` on
    /// store failure.
    #[instrument(skip(self))]
    pub async fn delete_pet(&self, id: i64) -> Result<(), ServiceError> {
        let existing = self.find_row(id).await?;
        self.store
            .delete(&existing)
            .await
            .map_err(|e| generic(DELETE_FAILED, e))?;

        info!(id, "pet deleted");
        Ok(())
    }

    async fn find_row(&self, id: i64) -> Result<PetRow, ServiceError> {
        self.store
            .find_by_id(id)
            .await
            .map_err(|e| generic(LOAD_FAILED, e))?
            .ok_or(ServiceError::NotFound(id))
    }
}

fn already_exists(fields: &PetFields) -> ServiceError {
    ServiceError::AlreadyExists {
        name: fields.name().to_string(),
        owner_name: fields.owner_name().to_string(),
        species: fields.species(),
    }
}

fn generic(message: &'static str, err: DbError) -> ServiceError {
    error!(error = %err, "{message}");
    ServiceError::Generic(message)
}

fn to_pet(row: PetRow, message: &'static str) -> Result<Pet, ServiceError> {
    let id = row.id;
    Pet::try_from(row).map_err(|e| {
        error!(id, error = %e, "stored pet has an unreadable species");
        ServiceError::Generic(message)
    })
}
