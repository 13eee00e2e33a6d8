//! Pet CRUD operations.

use sqlx::PgPool;

use crate::{models::PetRow, DbError};

/// Fetch a single pet by its primary key.
pub async fn find_pet(pool: &PgPool, id: i64) -> Result<Option<PetRow>, DbError> {
    let row = sqlx::query_as::<_, PetRow>(
        r#"
        SELECT id, name, species, age, owner_name, created_at, last_modified
        FROM pets
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Fetch the pet occupying the (name, species, owner) slot, if any.
pub async fn find_pet_by_identity(
    pool: &PgPool,
    name: &str,
    species: &str,
    owner_name: &str,
) -> Result<Option<PetRow>, DbError> {
    let row = sqlx::query_as::<_, PetRow>(
        r#"
        SELECT id, name, species, age, owner_name, created_at, last_modified
        FROM pets
        WHERE name = $1 AND species = $2 AND owner_name = $3
        "#,
    )
    .bind(name)
    .bind(species)
    .bind(owner_name)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Insert the row, or overwrite the mutable columns of the row with the
/// same `id`.
///
/// `created_at` is never rewritten by the update branch.
pub async fn upsert_pet(pool: &PgPool, pet: &PetRow) -> Result<PetRow, DbError> {
    let row = sqlx::query_as::<_, PetRow>(
        r#"
        INSERT INTO pets (id, name, species, age, owner_name, created_at, last_modified)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (id) DO UPDATE
        SET name = EXCLUDED.name,
            species = EXCLUDED.species,
            age = EXCLUDED.age,
            owner_name = EXCLUDED.owner_name,
            last_modified = EXCLUDED.last_modified
        RETURNING id, name, species, age, owner_name, created_at, last_modified
        "#,
    )
    .bind(pet.id)
    .bind(&pet.name)
    .bind(&pet.species)
    .bind(pet.age)
    .bind(&pet.owner_name)
    .bind(pet.created_at)
    .bind(pet.last_modified)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Permanently delete a pet by its primary key.
///
/// Returns the number of rows removed.
pub async fn delete_pet(pool: &PgPool, id: i64) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM pets WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Return one page of pets ordered by id (oldest first).
pub async fn list_pets(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<PetRow>, DbError> {
    let rows = sqlx::query_as::<_, PetRow>(
        r#"
        SELECT id, name, species, age, owner_name, created_at, last_modified
        FROM pets
        ORDER BY id ASC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Total number of stored pets.
pub async fn count_pets(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM pets")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
