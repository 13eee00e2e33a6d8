//! Validation and conversion tests for the domain models.

use chrono::Utc;
use db::PetRow;

use crate::{ParseSpeciesError, Pet, PetFields, PetRequest, Species, ValidationError};

fn fields(name: &str, age: Option<i32>, owner: &str) -> Result<PetFields, ValidationError> {
    PetFields::try_from(PetRequest::new(name, Species::Dog, age, owner))
}

#[test]
fn valid_request_builds_fields() {
    let f = fields("tommy", Some(0), "Alberto").expect("valid");
    assert_eq!(f.name(), "tommy");
    assert_eq!(f.species(), Species::Dog);
    assert_eq!(f.age(), Some(0));
    assert_eq!(f.owner_name(), "Alberto");
}

#[test]
fn absent_age_is_allowed() {
    assert!(fields("tommy", None, "Alberto").is_ok());
}

#[test]
fn short_names_are_rejected() {
    assert_eq!(fields("", Some(1), "Alberto"), Err(ValidationError::NameTooShort));
    assert_eq!(fields("t", Some(1), "Alberto"), Err(ValidationError::NameTooShort));
    assert_eq!(fields("tommy", Some(1), ""), Err(ValidationError::OwnerNameTooShort));
    assert_eq!(fields("tommy", Some(1), "A"), Err(ValidationError::OwnerNameTooShort));
}

#[test]
fn negative_age_is_rejected() {
    assert_eq!(fields("tommy", Some(-10), "Alberto"), Err(ValidationError::NegativeAge));
}

#[test]
fn first_violation_wins_in_name_age_owner_order() {
    assert_eq!(fields("", Some(-1), ""), Err(ValidationError::NameTooShort));
    assert_eq!(fields("tommy", Some(-1), ""), Err(ValidationError::NegativeAge));
}

#[test]
fn length_counts_characters_not_bytes() {
    // one character, two bytes
    assert_eq!(fields("é", None, "Alberto"), Err(ValidationError::NameTooShort));
    assert!(fields("éé", None, "Alberto").is_ok());
}

#[test]
fn single_emoji_name_is_too_short() {
    assert_eq!(fields("🐶", None, "Alberto"), Err(ValidationError::NameTooShort));
    assert!(fields("🐶🐱", None, "Alberto").is_ok());
}

#[test]
fn validation_messages_match_error_bodies() {
    assert_eq!(ValidationError::NameTooShort.to_string(), "name length too short");
    assert_eq!(
        ValidationError::NegativeAge.to_string(),
        "age must be greater then or equal to zero"
    );
    assert_eq!(ValidationError::OwnerNameTooShort.to_string(), "owner_name length too short");
}

#[test]
fn species_text_form_is_upper_case() {
    for species in Species::ALL {
        assert_eq!(species.as_str().parse::<Species>(), Ok(species));
        assert_eq!(
            serde_json::to_value(species).unwrap(),
            serde_json::Value::String(species.to_string())
        );
    }
    assert_eq!("dog".parse::<Species>(), Err(ParseSpeciesError("dog".into())));
}

#[test]
fn request_deserializes_snake_case_with_optional_age() {
    let req: PetRequest =
        serde_json::from_str(r#"{"name":"tommy","species":"DOG","owner_name":"Alberto"}"#)
            .unwrap();
    assert_eq!(req, PetRequest::new("tommy", Species::Dog, None, "Alberto"));

    let unknown = serde_json::from_str::<PetRequest>(
        r#"{"name":"tommy","species":"DRAGON","owner_name":"Alberto"}"#,
    );
    assert!(unknown.is_err());
}

#[test]
fn row_with_unknown_species_does_not_convert() {
    let now = Utc::now();
    let row = PetRow {
        id: 1,
        name: "tommy".into(),
        species: "DRAGON".into(),
        age: None,
        owner_name: None,
        created_at: now,
        last_modified: now,
    };
    assert!(Pet::try_from(row).is_err());
}
