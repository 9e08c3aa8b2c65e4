// SPDX-License-Identifier: AGPL-3.0
// PetPals Core - Pet catalog
//
// The catalog is the built-in seed list followed by the pets the user added.
// Only user-added pets are persisted, under the `customPets` key.

use crate::storage::{keys, Storage};
use crate::types::{AppError, Coordinates, PetDraft, PetImage, PetRecord};
use std::sync::Arc;

/// Seed + custom pet records
pub struct PetCatalog {
    storage: Storage,
    seed: Arc<[PetRecord]>,
}

impl PetCatalog {
    /// Create a catalog over the built-in seed list
    pub fn new(storage: Storage) -> Self {
        Self::with_seed(storage, seed_pets())
    }

    /// Create a catalog over an explicit seed list
    pub fn with_seed(storage: Storage, seed: impl Into<Arc<[PetRecord]>>) -> Self {
        Self {
            storage,
            seed: seed.into(),
        }
    }

    /// The built-in pets, in display order
    pub fn seed(&self) -> &[PetRecord] {
        &self.seed
    }

    /// Seed pets followed by user-added pets.
    ///
    /// Never fails: if the custom list can't be read or parsed, only the seed
    /// pets are returned. Keeping the catalog visible matters more than
    /// showing a possibly stale custom list.
    pub fn load(&self) -> Vec<PetRecord> {
        let custom = self.custom_pets().unwrap_or_else(|e| {
            tracing::warn!("Failed to load custom pets, showing seed pets only: {}", e);
            Vec::new()
        });

        let mut pets = Vec::with_capacity(self.seed.len() + custom.len());
        pets.extend(self.seed.iter().cloned());
        pets.extend(custom);
        pets
    }

    /// User-added pets as persisted
    pub fn custom_pets(&self) -> Result<Vec<PetRecord>, AppError> {
        Ok(self
            .storage
            .read_json::<Vec<PetRecord>>(keys::CUSTOM_PETS)?
            .unwrap_or_default())
    }

    /// Find a pet by id across seed and custom pets
    pub fn get(&self, id: &str) -> Option<PetRecord> {
        self.load().into_iter().find(|p| p.id == id)
    }

    /// Whether `id` names a user-added (and therefore deletable) pet
    pub fn is_custom(&self, id: &str) -> bool {
        !self.is_seed(id)
            && self
                .custom_pets()
                .map(|pets| pets.iter().any(|p| p.id == id))
                .unwrap_or(false)
    }

    fn is_seed(&self, id: &str) -> bool {
        self.seed.iter().any(|p| p.id == id)
    }

    /// Validate a draft and append it to the custom pets
    pub fn add_pet(&self, draft: PetDraft) -> Result<PetRecord, AppError> {
        let image = validate_draft(&draft)?;

        let pet = PetRecord {
            id: uuid::Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            species: draft.species.as_str().to_string(),
            age: draft.age.trim().to_string(),
            breed: draft.breed.trim().to_string(),
            description: draft.description.trim().to_string(),
            image,
            location: None,
            created_at: Some(chrono::Utc::now()),
        };

        self.storage
            .update_json(keys::CUSTOM_PETS, |pets: &mut Vec<PetRecord>| {
                pets.push(pet.clone());
                Ok(())
            })
            .map_err(|e| {
                tracing::error!("Failed to save pet {}: {}", pet.name, e);
                e
            })?;

        tracing::info!("Added pet {} ({})", pet.name, pet.id);
        Ok(pet)
    }

    /// Remove a user-added pet. Seed ids and unknown ids are left alone.
    pub fn delete_pet(&self, id: &str) -> Result<(), AppError> {
        if self.is_seed(id) {
            tracing::debug!("Ignoring delete of seed pet {}", id);
            return Ok(());
        }

        let removed = self
            .storage
            .update_json(keys::CUSTOM_PETS, |pets: &mut Vec<PetRecord>| {
                let original_len = pets.len();
                pets.retain(|p| p.id != id);
                Ok(original_len - pets.len())
            })?;

        if removed > 0 {
            tracing::info!("Deleted pet {}", id);
        }
        Ok(())
    }
}

/// Check every required draft field, naming each one that is missing
fn validate_draft(draft: &PetDraft) -> Result<PetImage, AppError> {
    let mut missing = Vec::new();
    for (field, value) in [
        ("name", &draft.name),
        ("age", &draft.age),
        ("breed", &draft.breed),
        ("description", &draft.description),
    ] {
        if value.trim().is_empty() {
            missing.push(field);
        }
    }

    let image = draft.image.as_ref().filter(|image| image.is_present());
    if image.is_none() {
        missing.push("image");
    }

    match image {
        Some(image) if missing.is_empty() => Ok(image.clone()),
        _ => Err(AppError::Validation(format!(
            "Missing info: {}. Please fill out all fields and select an image.",
            missing.join(", ")
        ))),
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_pet(
    id: &str,
    name: &str,
    species: &str,
    age: &str,
    breed: &str,
    description: &str,
    latitude: f64,
    longitude: f64,
) -> PetRecord {
    PetRecord {
        id: id.to_string(),
        name: name.to_string(),
        species: species.to_string(),
        age: age.to_string(),
        breed: breed.to_string(),
        description: description.to_string(),
        image: PetImage::asset(format!("{}.jpg", name.to_lowercase())),
        location: Some(Coordinates::new(latitude, longitude)),
        created_at: None,
    }
}

/// The pets shipped with the app
pub fn seed_pets() -> Vec<PetRecord> {
    vec![
        seed_pet("1", "Luna", "Dog", "2 years", "Labrador Retriever",
            "Energetic and friendly. Loves the outdoors.", 1.3521, 103.8198),
        seed_pet("2", "Mochi", "Cat", "1 year", "Scottish Fold",
            "Calm, affectionate, and loves naps.", 1.3600, 103.8460),
        seed_pet("3", "Charlie", "Dog", "3 years", "Beagle",
            "Playful and loves to sniff everything.", 1.3400, 103.8200),
        seed_pet("4", "Bella", "Dog", "4 years", "Pomeranian",
            "Fluffy and loves attention. Great with kids.", 1.3000, 103.8550),
        seed_pet("5", "Simba", "Cat", "2 years", "Maine Coon",
            "Gentle giant with majestic fur.", 1.3750, 103.8300),
        seed_pet("6", "Rocky", "Dog", "5 years", "Bulldog",
            "Lazy but loyal. Perfect couch companion.", 1.3450, 103.8000),
        seed_pet("7", "Milo", "Cat", "6 months", "Siamese",
            "Curious and talkative. Always exploring.", 1.3250, 103.7900),
        seed_pet("8", "Daisy", "Rabbit", "1 year", "Holland Lop",
            "Shy at first but very sweet once comfortable.", 1.3650, 103.8800),
        seed_pet("9", "Max", "Dog", "3 years", "Golden Retriever",
            "Therapy dog trained. Great with elderly.", 1.3900, 103.8500),
        seed_pet("10", "Oreo", "Cat", "4 years", "Tuxedo",
            "Independent but affectionate on his terms.", 1.3100, 103.9200),
    ]
}
