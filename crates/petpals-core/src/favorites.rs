// SPDX-License-Identifier: AGPL-3.0
// PetPals Core - Favorites storage
//
// Favorites are a list of pet ids under the `favorites` key,
// kept separately from the catalog itself.

use crate::catalog::PetCatalog;
use crate::storage::{keys, Storage};
use crate::types::{AppError, PetRecord};

/// Persistent set of favorite pet ids
pub struct FavoritesStore {
    storage: Storage,
}

impl FavoritesStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Stored favorite ids, oldest first
    pub fn list_ids(&self) -> Result<Vec<String>, AppError> {
        Ok(self
            .storage
            .read_json::<Vec<String>>(keys::FAVORITES)?
            .unwrap_or_default())
    }

    pub fn is_favorite(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.list_ids()?.iter().any(|f| f == id))
    }

    /// Flip membership of `id` and return whether it is now a favorite.
    ///
    /// Always works from the latest stored list, so a toggle made elsewhere is
    /// never overwritten.
    pub fn toggle(&self, id: &str) -> Result<bool, AppError> {
        let now_favorite = self
            .storage
            .update_json(keys::FAVORITES, |ids: &mut Vec<String>| {
                let original_len = ids.len();
                ids.retain(|f| f != id);

                if ids.len() == original_len {
                    ids.push(id.to_string());
                    Ok(true)
                } else {
                    Ok(false)
                }
            })
            .map_err(|e| {
                tracing::error!("Failed to toggle favorite {}: {}", id, e);
                e
            })?;

        tracing::info!("Favorite {} is now {}", id, now_favorite);
        Ok(now_favorite)
    }

    /// Favorite pets resolved against the catalog, in catalog order.
    ///
    /// Ids whose pet no longer exists are skipped.
    pub fn favorite_pets(&self, catalog: &PetCatalog) -> Result<Vec<PetRecord>, AppError> {
        let ids = self.list_ids()?;
        Ok(catalog
            .load()
            .into_iter()
            .filter(|p| ids.contains(&p.id))
            .collect())
    }
}

/// Confirmation text for the profile toggle button
pub fn toggle_message(pet: &PetRecord, now_favorite: bool) -> String {
    if now_favorite {
        format!("{} has been added to your favorites!", pet.name)
    } else {
        format!("{} has been removed from your favorites.", pet.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_membership() {
        let favorites = FavoritesStore::new(Storage::in_memory());
        assert!(!favorites.is_favorite("3").unwrap());

        assert!(favorites.toggle("3").unwrap());
        assert!(favorites.is_favorite("3").unwrap());

        assert!(!favorites.toggle("3").unwrap());
        assert!(!favorites.is_favorite("3").unwrap());
        assert!(favorites.list_ids().unwrap().is_empty());
    }

    #[test]
    fn test_toggle_sees_writes_from_other_handles() {
        let storage = Storage::in_memory();
        let profile = FavoritesStore::new(storage.clone());
        let other_screen = FavoritesStore::new(storage);

        profile.toggle("1").unwrap();
        other_screen.toggle("2").unwrap();
        profile.toggle("5").unwrap();

        assert_eq!(other_screen.list_ids().unwrap(), vec!["1", "2", "5"]);
    }

    #[test]
    fn test_favorite_pets_follow_catalog_order() {
        let storage = Storage::in_memory();
        let catalog = PetCatalog::new(storage.clone());
        let favorites = FavoritesStore::new(storage);

        favorites.toggle("7").unwrap();
        favorites.toggle("missing").unwrap();
        favorites.toggle("1").unwrap();

        let names: Vec<_> = favorites
            .favorite_pets(&catalog)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Luna", "Milo"]);
    }

    #[test]
    fn test_toggle_message() {
        let catalog = PetCatalog::new(Storage::in_memory());
        let luna = catalog.get("1").unwrap();
        assert_eq!(
            toggle_message(&luna, true),
            "Luna has been added to your favorites!"
        );
        assert_eq!(
            toggle_message(&luna, false),
            "Luna has been removed from your favorites."
        );
    }
}
