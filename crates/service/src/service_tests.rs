//! Tests for the pet service.
//!
//! These run against `db::MemoryStore` so no Postgres connection is
//! required. `FlakyStore` wraps it to inject store failures.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use db::{DbError, MemoryStore, Page, PageRequest, PetRow, PetStore, SequenceGenerator};

use crate::{PetRequest, PetService, ServiceError, Species, ValidationError, PET_SEQUENCE};

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// Which store call should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailOn {
    Nothing,
    Save,
    Delete,
    Reads,
    /// Identity lookups miss and `save` reports a uniqueness violation,
    /// as when another writer inserts the same pet first.
    ConflictOnSave,
}

/// A `PetStore` that delegates to a `MemoryStore` unless told to fail.
struct FlakyStore {
    inner: MemoryStore,
    fail_on: Mutex<FailOn>,
    saves: Mutex<Vec<PetRow>>,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_on: Mutex::new(FailOn::Nothing),
            saves: Mutex::new(Vec::new()),
        }
    }

    fn fail_on(&self, on: FailOn) {
        *self.fail_on.lock().unwrap() = on;
    }

    fn should_fail(&self, on: FailOn) -> bool {
        *self.fail_on.lock().unwrap() == on
    }

    fn save_count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }
}

fn boom() -> DbError {
    DbError::Sqlx(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl PetStore for FlakyStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<PetRow>, DbError> {
        if self.should_fail(FailOn::Reads) {
            return Err(boom());
        }
        self.inner.find_by_id(id).await
    }

    async fn find_by_name_and_species_and_owner(
        &self,
        name: &str,
        species: &str,
        owner_name: &str,
    ) -> Result<Option<PetRow>, DbError> {
        if self.should_fail(FailOn::Reads) {
            return Err(boom());
        }
        if self.should_fail(FailOn::ConflictOnSave) {
            return Ok(None);
        }
        self.inner
            .find_by_name_and_species_and_owner(name, species, owner_name)
            .await
    }

    async fn save(&self, pet: PetRow) -> Result<PetRow, DbError> {
        self.saves.lock().unwrap().push(pet.clone());
        if self.should_fail(FailOn::Save) {
            return Err(boom());
        }
        if self.should_fail(FailOn::ConflictOnSave) {
            return Err(DbError::Conflict("pets_identity_unique".into()));
        }
        self.inner.save(pet).await
    }

    async fn delete(&self, pet: &PetRow) -> Result<(), DbError> {
        if self.should_fail(FailOn::Delete) {
            return Err(boom());
        }
        self.inner.delete(pet).await
    }

    async fn find_all(&self, request: PageRequest) -> Result<Page<PetRow>, DbError> {
        if self.should_fail(FailOn::Reads) {
            return Err(boom());
        }
        self.inner.find_all(request).await
    }
}

fn setup() -> (PetService, Arc<FlakyStore>, Arc<MemoryStore>) {
    let store = Arc::new(FlakyStore::new());
    let sequence = Arc::new(MemoryStore::new());
    let service = PetService::new(store.clone(), sequence.clone());
    (service, store, sequence)
}

fn tommy() -> PetRequest {
    PetRequest::new("Tommy", Species::Monkey, Some(3), "Khan")
}

// ============================================================
// create
// ============================================================

#[tokio::test]
async fn create_assigns_id_and_timestamps() {
    let (service, store, _) = setup();

    let pet = service.create_pet(tommy()).await.expect("created");

    assert_eq!(pet.id, 1);
    assert_eq!(pet.name, "Tommy");
    assert_eq!(pet.species, Species::Monkey);
    assert_eq!(pet.age, Some(3));
    assert_eq!(pet.owner_name.as_deref(), Some("Khan"));
    assert_eq!(pet.created_at, pet.last_modified);
    assert_eq!(store.save_count(), 1);
}

#[tokio::test]
async fn created_ids_are_unique_and_increasing() {
    let (service, _, _) = setup();
    let mut seen = Vec::new();

    for i in 0..5 {
        let req = PetRequest::new(format!("pet-{i}"), Species::Cat, None, "Mike");
        seen.push(service.create_pet(req).await.unwrap().id);
    }

    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn ids_come_from_the_pet_sequence() {
    let (service, _, sequence) = setup();
    sequence.generate_sequence(PET_SEQUENCE).await.unwrap();
    sequence.generate_sequence(PET_SEQUENCE).await.unwrap();

    let pet = service.create_pet(tommy()).await.unwrap();
    assert_eq!(pet.id, 3);
}

#[tokio::test]
async fn duplicate_create_is_rejected() {
    let (service, store, _) = setup();
    let req = PetRequest::new("tommy", Species::Dog, Some(10), "Alberto");

    service.create_pet(req.clone()).await.unwrap();
    let err = service.create_pet(req).await.unwrap_err();

    assert!(matches!(err, ServiceError::AlreadyExists { .. }));
    assert_eq!(
        err.to_string(),
        "Pet: tommy with owner: Alberto for species: DOG already exists"
    );
    assert_eq!(store.save_count(), 1);
}

#[tokio::test]
async fn concurrent_duplicate_caught_by_store_is_already_exists() {
    let (service, store, _) = setup();
    store.fail_on(FailOn::ConflictOnSave);

    let err = service
        .create_pet(PetRequest::new("tommy", Species::Dog, Some(10), "Alberto"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::AlreadyExists { .. }));
    assert_eq!(
        err.to_string(),
        "Pet: tommy with owner: Alberto for species: DOG already exists"
    );
    assert_eq!(store.save_count(), 1);
}

#[tokio::test]
async fn same_name_and_owner_with_other_species_is_allowed() {
    let (service, _, _) = setup();
    service
        .create_pet(PetRequest::new("tommy", Species::Dog, None, "Alberto"))
        .await
        .unwrap();
    service
        .create_pet(PetRequest::new("tommy", Species::Cat, None, "Alberto"))
        .await
        .expect("different species is a different pet");
}

#[tokio::test]
async fn invalid_create_never_reaches_the_store() {
    let (service, store, _) = setup();
    store.fail_on(FailOn::Reads);

    let err = service
        .create_pet(PetRequest::new("", Species::Dog, Some(-1), ""))
        .await
        .unwrap_err();

    assert_eq!(err, ServiceError::Validation(ValidationError::NameTooShort));
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn save_failure_is_generic_with_fixed_message() {
    let (service, store, _) = setup();
    store.fail_on(FailOn::Save);

    let err = service.create_pet(tommy()).await.unwrap_err();

    assert_eq!(err, ServiceError::Generic("Failed to save pet"));
}

// ============================================================
// get / list
// ============================================================

#[tokio::test]
async fn get_returns_stored_pet() {
    let (service, _, _) = setup();
    let created = service.create_pet(tommy()).await.unwrap();

    let fetched = service.get_pet(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_missing_is_not_found() {
    let (service, _, _) = setup();
    let err = service.get_pet(123456).await.unwrap_err();
    assert_eq!(err, ServiceError::NotFound(123456));
    assert_eq!(err.to_string(), "Pet with id: 123456 not found");
}

#[tokio::test]
async fn list_returns_page_in_store_order() {
    let (service, _, _) = setup();
    service
        .create_pet(PetRequest::new("lilli", Species::Cat, Some(3), "Mike"))
        .await
        .unwrap();
    service
        .create_pet(PetRequest::new("tommy", Species::Dog, Some(0), "Alessia"))
        .await
        .unwrap();

    let page = service.get_all_pets(PageRequest::default()).await.unwrap();

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.size, 10);
    assert_eq!(page.page, 0);
    assert_eq!(page.total_elements, 2);
    assert_eq!(page.content[0].name, "lilli");
    assert_eq!(page.content[1].name, "tommy");
}

#[tokio::test]
async fn list_failure_is_generic() {
    let (service, store, _) = setup();
    store.fail_on(FailOn::Reads);
    let err = service.get_all_pets(PageRequest::default()).await.unwrap_err();
    assert_eq!(err, ServiceError::Generic("Failed to list pets"));
}

// ============================================================
// update
// ============================================================

#[tokio::test]
async fn update_overwrites_fields_and_refreshes_last_modified() {
    let (service, _, _) = setup();
    let created = service.create_pet(tommy()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    let updated = service
        .update_pet(created.id, PetRequest::new("Rabi", Species::Rabbit, Some(4), "Jack"))
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Rabi");
    assert_eq!(updated.species, Species::Rabbit);
    assert_eq!(updated.age, Some(4));
    assert_eq!(updated.owner_name.as_deref(), Some("Jack"));
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.last_modified > created.last_modified);
}

#[tokio::test]
async fn update_can_clear_age() {
    let (service, _, _) = setup();
    let created = service.create_pet(tommy()).await.unwrap();

    let updated = service
        .update_pet(created.id, PetRequest::new("Tommy", Species::Monkey, None, "Khan"))
        .await
        .unwrap();
    assert_eq!(updated.age, None);
}

#[tokio::test]
async fn update_missing_is_not_found() {
    let (service, store, _) = setup();
    let err = service.update_pet(44345, tommy()).await.unwrap_err();
    assert_eq!(err, ServiceError::NotFound(44345));
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn update_validates_before_lookup() {
    let (service, _, _) = setup();
    let err = service
        .update_pet(44345, PetRequest::new("Tommy", Species::Monkey, Some(-10), "Khan"))
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::Validation(ValidationError::NegativeAge));
}

#[tokio::test]
async fn update_onto_another_pets_identity_conflicts() {
    let (service, _, _) = setup();
    service
        .create_pet(PetRequest::new("lilli", Species::Cat, None, "Mike"))
        .await
        .unwrap();
    let other = service.create_pet(tommy()).await.unwrap();

    let err = service
        .update_pet(other.id, PetRequest::new("lilli", Species::Cat, None, "Mike"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::AlreadyExists { .. }));
}

#[tokio::test]
async fn update_save_failure_is_generic() {
    let (service, store, _) = setup();
    let created = service.create_pet(tommy()).await.unwrap();
    store.fail_on(FailOn::Save);

    let err = service.update_pet(created.id, tommy()).await.unwrap_err();
    assert_eq!(err, ServiceError::Generic("Failed to update pet"));
}

// ============================================================
// delete
// ============================================================

#[tokio::test]
async fn delete_removes_pet() {
    let (service, _, _) = setup();
    let created = service.create_pet(tommy()).await.unwrap();

    service.delete_pet(created.id).await.unwrap();

    assert_eq!(
        service.get_pet(created.id).await.unwrap_err(),
        ServiceError::NotFound(created.id)
    );
}

#[tokio::test]
async fn repeated_delete_is_consistently_not_found() {
    let (service, _, _) = setup();
    let created = service.create_pet(tommy()).await.unwrap();
    service.delete_pet(created.id).await.unwrap();

    for _ in 0..2 {
        let err = service.delete_pet(created.id).await.unwrap_err();
        assert_eq!(err, ServiceError::NotFound(created.id));
    }
}

#[tokio::test]
async fn delete_failure_is_generic() {
    let (service, store, _) = setup();
    let created = service.create_pet(tommy()).await.unwrap();
    store.fail_on(FailOn::Delete);

    let err = service.delete_pet(created.id).await.unwrap_err();
    assert_eq!(err, ServiceError::Generic("Failed to delete pet"));
}
