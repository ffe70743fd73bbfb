//! The Pet aggregate and its write-side input type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::FieldError;

/// A pet aggregate: the root row plus its owned vaccination records.
///
/// Persisted, mutated, and deleted as one unit. `id` is assigned by the
/// storage layer on insert and never changes afterwards; `created_at` is
/// stamped once on insert and `updated_at` on every subsequent replace.
///
/// Absent optional fields are omitted from the JSON representation, never
/// rendered as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Opaque unique identifier (UUIDv4), immutable after insert.
    pub id: String,

    /// Display name. Required, non-empty.
    pub name: String,

    /// Free-form classification tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Owned child entities, replaced wholesale on every update.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vaccinations: Vec<Vaccination>,

    /// Set once when the aggregate is first inserted.
    pub created_at: DateTime<Utc>,

    /// Set on every mutation after creation; absent for a fresh insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Pet {
    /// Field names accepted as list filters for this resource.
    pub const FILTERABLE_FIELDS: &'static [&'static str] = &["name", "tag"];

    /// Field names accepted as list sort keys for this resource.
    pub const SORTABLE_FIELDS: &'static [&'static str] = &["name", "tag", "createdAt"];
}

/// A single vaccination record owned by a [`Pet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vaccination {
    /// Name of the administered vaccine.
    pub name: String,
}

impl Vaccination {
    /// Creates a vaccination record.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Client-supplied desired state of a pet.
///
/// Used by both create (POST) and update (PUT): a write always carries the
/// full scalar state and the full vaccination set. There are no partial
/// updates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PetInput {
    /// Display name. Required, non-empty.
    pub name: String,

    /// Free-form classification tag.
    #[serde(default)]
    pub tag: Option<String>,

    /// Full desired vaccination set.
    #[serde(default)]
    pub vaccinations: Vec<Vaccination>,
}

impl PetInput {
    /// Validates the input, returning every field-level problem found.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "must not be empty"));
        }

        for (i, vaccination) in self.vaccinations.iter().enumerate() {
            if vaccination.name.trim().is_empty() {
                errors.push(FieldError::new(
                    format!("vaccinations[{}].name", i),
                    "must not be empty",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Builds the aggregate this input describes, targeting the given id.
    ///
    /// Timestamps are left at their insert defaults; the storage layer owns
    /// stamping them.
    pub fn into_pet(self, id: impl Into<String>) -> Pet {
        Pet {
            id: id.into(),
            name: self.name,
            tag: self.tag,
            vaccinations: self.vaccinations,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str) -> PetInput {
        PetInput {
            name: name.to_string(),
            tag: None,
            vaccinations: Vec::new(),
        }
    }

    #[test]
    fn test_valid_input() {
        assert!(input("Rex").validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let errors = input("  ").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn test_empty_vaccination_name_rejected() {
        let mut input = input("Rex");
        input.vaccinations = vec![Vaccination::new("rabies"), Vaccination::new("")];
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "vaccinations[1].name");
    }

    #[test]
    fn test_absent_optionals_are_omitted() {
        let pet = input("Rex").into_pet("p1");
        let json = serde_json::to_value(&pet).unwrap();
        assert!(json.get("tag").is_none());
        assert!(json.get("updatedAt").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_camel_case_round_trip() {
        let json = serde_json::json!({
            "id": "p1",
            "name": "Rex",
            "tag": "dog",
            "vaccinations": [{"name": "rabies"}],
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-02-01T00:00:00Z"
        });
        let pet: Pet = serde_json::from_value(json).unwrap();
        assert_eq!(pet.tag.as_deref(), Some("dog"));
        assert!(pet.updated_at.is_some());
        assert!(pet.created_at <= pet.updated_at.unwrap());
    }
}
