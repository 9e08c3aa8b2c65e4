// SPDX-License-Identifier: AGPL-3.0
// PetPals Core - Shared logic for all frontends
//
// This crate provides:
// - PetRecord, AppSettings and AppError types
// - Storage over a persistent key-value store
// - PetCatalog (seed + user-added pets)
// - FavoritesStore and the listing filter
// - AdoptionSimulator, SwipeDeck and nearby-pet markers
//
// Frontend-specific code lives in separate crates.

pub mod adoption;
pub mod catalog;
pub mod favorites;
pub mod filter;
pub mod nearby;
pub mod notify;
pub mod settings;
pub mod storage;
pub mod swipe;
pub mod types;

// Re-export commonly used items
pub use adoption::{adoption_message, AdoptionSimulator, IndexPicker, RandomPicker};
pub use catalog::{seed_pets, PetCatalog};
pub use favorites::{toggle_message, FavoritesStore};
pub use filter::{filter_pets, FilterResult, FilterState, SpeciesFilter};
pub use nearby::{map_markers, nearby_pets, FixedLocation, LocationProvider, MapMarker, MapRegion};
pub use notify::{dispatch, AppEvent, ChannelNotifier, Haptic, Notification, Notifier};
pub use settings::SettingsStore;
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, Storage};
pub use swipe::{SwipeDeck, SwipeDirection};
pub use types::{
    AppError, AppSettings, Coordinates, Language, PetDraft, PetImage, PetRecord, Species, Theme,
};
