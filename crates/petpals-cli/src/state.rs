// SPDX-License-Identifier: AGPL-3.0
// PetPals CLI - Application State

use async_channel::Receiver;
use petpals_core::{
    AppError, AppEvent, ChannelNotifier, FavoritesStore, FileKeyValueStore, PetCatalog,
    SettingsStore, Storage,
};
use std::path::Path;
use std::sync::Arc;

/// Everything a command needs, built once at startup
pub struct AppState {
    pub catalog: PetCatalog,
    pub favorites: FavoritesStore,
    pub settings: SettingsStore,
    pub notifier: Arc<ChannelNotifier>,
}

impl AppState {
    /// Create application state with all stores initialized.
    ///
    /// Returns the receiving end of the notification channel; it closes once
    /// the state (and every notifier clone) is dropped.
    pub fn new(data_dir: Option<&Path>) -> Result<(Self, Receiver<AppEvent>), AppError> {
        let store = match data_dir {
            Some(dir) => FileKeyValueStore::open(dir)?,
            None => FileKeyValueStore::new()?,
        };
        Ok(Self::with_storage(Storage::new(Arc::new(store))))
    }

    pub fn with_storage(storage: Storage) -> (Self, Receiver<AppEvent>) {
        let (notifier, events) = ChannelNotifier::unbounded();

        let state = Self {
            catalog: PetCatalog::new(storage.clone()),
            favorites: FavoritesStore::new(storage.clone()),
            settings: SettingsStore::new(storage),
            notifier: Arc::new(notifier),
        };

        (state, events)
    }
}
